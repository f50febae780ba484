//! Turning the collected results of an element's children into one node.

use fomake_model::{ContentNode, InlineNode, StackBlock, StyledRun};
use fomake_style::{BoxProps, ResolvedStyle};
use itertools::Itertools;

/// Collapses whitespace runs to one space. Whitespace-only text that spans a
/// line break is indentation between elements and yields `None`.
pub(crate) fn normalize_text(raw: &str) -> Option<String> {
    if raw.is_empty() || (raw.trim().is_empty() && raw.contains('\n')) {
        return None;
    }
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_whitespace() {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Drops empty strings and merges adjacent strings into one.
pub(crate) fn merge_adjacent_text(items: Vec<ContentNode>) -> Vec<ContentNode> {
    items
        .into_iter()
        .filter(|node| !node.is_empty_text())
        .coalesce(|a, b| match (a, b) {
            (ContentNode::Text(mut left), ContentNode::Text(right)) => {
                if left.ends_with(' ') && right.starts_with(' ') {
                    left.push_str(&right[1..]);
                } else {
                    left.push_str(&right);
                }
                Ok(ContentNode::Text(left))
            }
            (a, b) => Err((a, b)),
        })
        .collect()
}

/// Trims leading whitespace of the first string and trailing whitespace of
/// the last one, dropping strings left empty.
pub(crate) fn trim_edges(items: &mut Vec<ContentNode>) {
    if let Some(ContentNode::Text(first)) = items.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(ContentNode::Text(last)) = items.last_mut() {
        *last = last.trim_end().to_string();
    }
    items.retain(|node| !node.is_empty_text());
}

/// Puts a node's own emitted style and box properties on its single result.
///
/// Values already on the child win; the child's were resolved against this
/// node's effective style. When both carry the same box property the child
/// is wrapped instead, so neither value is lost. Isolated containers only
/// take the box properties; the text style goes to the parts around them.
pub(crate) fn attach_props(node: ContentNode, emitted: ResolvedStyle, boxes: BoxProps) -> ContentNode {
    if emitted.is_empty() && boxes.is_empty() {
        return node;
    }
    let mut node = match node {
        ContentNode::Text(text) => {
            let mut run = StyledRun::plain(text, emitted);
            run.boxes = boxes;
            return ContentNode::Run(run);
        }
        other => other,
    };
    if !emitted.is_empty() && node.holds_isolated() {
        let node = push_style_down(node, &emitted);
        return attach_props(node, ResolvedStyle::default(), boxes);
    }

    let conflicts = node.boxes_mut().is_some_and(|own| {
        (own.margin.is_some() && boxes.margin.is_some())
            || (own.page_break.is_some() && boxes.page_break.is_some())
    });
    if conflicts {
        return wrap(node, emitted, boxes);
    }

    if let Some(style) = node.style_mut() {
        *style = std::mem::take(style).or(&emitted);
    }
    if let Some(own) = node.boxes_mut() {
        *own = std::mem::take(own).or(&boxes);
    }
    node
}

/// Applies `style` to every part of `node` that is not isolated.
fn push_style_down(node: ContentNode, style: &ResolvedStyle) -> ContentNode {
    if node.is_isolated() || node.is_empty_text() {
        return node;
    }
    if !node.holds_isolated() {
        return attach_props(node, style.clone(), BoxProps::default());
    }
    match node {
        ContentNode::Stack(mut stack) => {
            stack.items = push_into_items(stack.items, style);
            ContentNode::Stack(stack)
        }
        ContentNode::List(mut list) => {
            list.items = push_into_items(list.items, style);
            ContentNode::List(list)
        }
        ContentNode::Table(mut table) => {
            for cell in table.grid.body.iter_mut().flatten() {
                let content = std::mem::replace(&mut cell.content, ContentNode::empty());
                cell.content = push_style_down(content, style);
            }
            ContentNode::Table(table)
        }
        other => other,
    }
}

fn push_into_items(items: Vec<ContentNode>, style: &ResolvedStyle) -> Vec<ContentNode> {
    items
        .into_iter()
        .map(|item| push_style_down(item, style))
        .collect()
}

fn wrap(node: ContentNode, emitted: ResolvedStyle, boxes: BoxProps) -> ContentNode {
    match node.into_inline() {
        Ok(inline) => {
            let mut run = StyledRun::runs(vec![inline], emitted);
            run.boxes = boxes;
            ContentNode::Run(run)
        }
        Err(block) => {
            let mut stack = StackBlock::new(vec![block]);
            stack.style = emitted;
            stack.boxes = boxes;
            ContentNode::Stack(stack)
        }
    }
}

/// A stack of `items` carrying the element's own props.
fn stack_of(items: Vec<ContentNode>, emitted: ResolvedStyle, boxes: BoxProps) -> ContentNode {
    attach_props(ContentNode::Stack(StackBlock::new(items)), emitted, boxes)
}

/// Builds the result of a text-bearing element (`block`, `inline`, ...).
///
/// Children are merged into one run of text unless one of them is a block
/// container, in which case the element becomes a stack (or, when it holds
/// nothing but a single container, that container itself).
pub(crate) fn assemble_inline(
    children: Vec<ContentNode>,
    emitted: ResolvedStyle,
    boxes: BoxProps,
    trim: bool,
) -> ContentNode {
    let mut children = merge_adjacent_text(children);
    if trim {
        trim_edges(&mut children);
    }

    let has_block = children.iter().any(ContentNode::is_block_container);
    let has_inline = children.iter().any(|c| !c.is_block_container());
    let has_props = !emitted.is_empty() || !boxes.is_empty();

    if children.is_empty() {
        return if has_props {
            attach_props(ContentNode::empty(), emitted, boxes)
        } else {
            ContentNode::empty()
        };
    }

    if has_block && has_inline {
        return stack_of(group_inline_runs(children), emitted, boxes);
    }

    if children.len() == 1 {
        let only = children.remove(0);
        return attach_props(only, emitted, boxes);
    }

    if has_block {
        return stack_of(children, emitted, boxes);
    }

    let runs = children
        .into_iter()
        .filter_map(|c| c.into_inline().ok())
        .collect();
    let mut run = StyledRun::runs(runs, emitted);
    run.boxes = boxes;
    ContentNode::Run(run)
}

/// Builds the result of an element whose children are separate blocks
/// (flow, list item body, table cell, block container). Each child stays its
/// own item; more than one becomes a stack.
pub(crate) fn assemble_sequence(
    children: Vec<ContentNode>,
    emitted: ResolvedStyle,
    boxes: BoxProps,
) -> Option<ContentNode> {
    let mut items: Vec<ContentNode> = children
        .into_iter()
        .filter_map(|child| match child {
            ContentNode::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| ContentNode::Text(trimmed.to_string()))
            }
            other => Some(other),
        })
        .collect();

    match items.len() {
        0 if emitted.is_empty() && boxes.is_empty() => None,
        0 => Some(attach_props(ContentNode::empty(), emitted, boxes)),
        1 => Some(attach_props(items.remove(0), emitted, boxes)),
        _ => Some(stack_of(items, emitted, boxes)),
    }
}

/// Replaces each maximal stretch of inline items with a single node so the
/// stretch lays out as one paragraph between the block containers.
fn group_inline_runs(children: Vec<ContentNode>) -> Vec<ContentNode> {
    let mut items = Vec::new();
    let mut pending: Vec<InlineNode> = Vec::new();

    for child in children {
        match child.into_inline() {
            Ok(inline) => pending.push(inline),
            Err(block) => {
                flush_pending(&mut pending, &mut items);
                items.push(block);
            }
        }
    }
    flush_pending(&mut pending, &mut items);
    items
}

fn flush_pending(pending: &mut Vec<InlineNode>, items: &mut Vec<ContentNode>) {
    // Each stretch starts a new paragraph, so its outer whitespace goes.
    if let Some(InlineNode::Text(first)) = pending.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(InlineNode::Text(last)) = pending.last_mut() {
        *last = last.trim_end().to_string();
    }
    pending.retain(|node| !matches!(node, InlineNode::Text(t) if t.is_empty()));

    match pending.len() {
        0 => {}
        1 => items.extend(pending.pop().map(ContentNode::from)),
        _ => items.push(ContentNode::Run(StyledRun::runs(
            std::mem::take(pending),
            ResolvedStyle::default(),
        ))),
    }
}
