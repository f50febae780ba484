use crate::assemble::{assemble_inline, assemble_sequence, attach_props, normalize_text};
use crate::list::{ListEntry, build_list};
use crate::table::{
    CellResult, RowResult, TableParts, TableSection, build_cell, build_table, column_count,
    declares_border, parse_column_width,
};
use fomake_dom::{Element, Node};
use fomake_model::{ColumnWidth, ContentNode};
use fomake_style::parsers::parse_fo_attributes;
use fomake_style::{BASE_FONT_SIZE, BoxProps, Cascade, FoTag, InheritanceConfig, ResolvedStyle};

/// Settings handed to the transducer once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransduceOptions {
    pub inheritance: InheritanceConfig,
    /// Font size that relative units resolve against when no ancestor sets one.
    pub base_font_size: f32,
}

impl Default for TransduceOptions {
    fn default() -> Self {
        Self {
            inheritance: InheritanceConfig::default(),
            base_font_size: BASE_FONT_SIZE,
        }
    }
}

/// What a finished element hands to its parent. Structural parts of lists
/// and tables travel up as typed pieces until their container assembles
/// them.
#[derive(Debug)]
enum Partial {
    Content(ContentNode),
    Nothing,
    Columns(Vec<ColumnWidth>),
    Rows(TableSection, Vec<RowResult>),
    Row(RowResult),
    Cell(CellResult),
    Item(ListEntry),
    Label(String),
}

impl Partial {
    fn into_content(self) -> Option<ContentNode> {
        match self {
            Partial::Content(node) => Some(node),
            Partial::Cell(cell) => Some(cell.cell.content),
            Partial::Item(entry) => Some(entry.body),
            Partial::Label(label) => Some(ContentNode::Text(label)),
            Partial::Nothing | Partial::Columns(_) | Partial::Rows(..) | Partial::Row(_) => None,
        }
    }
}

/// An element being transduced: its resolved style and the results of the
/// children visited so far.
struct Frame<'a> {
    element: &'a Element,
    tag: FoTag,
    cascade: Cascade,
    boxes: BoxProps,
    next_child: usize,
    results: Vec<Partial>,
}

/// Converts formatting-object subtrees into content nodes.
///
/// The walk keeps one [`Frame`] per open element on a heap-allocated stack,
/// so nesting depth is limited by memory only.
#[derive(Debug, Clone, Default)]
pub struct Transducer {
    options: TransduceOptions,
}

impl Transducer {
    pub fn new(options: TransduceOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransduceOptions {
        &self.options
    }

    /// Converts `element` given the style its parent passes down.
    ///
    /// Returns `None` for elements that produce nothing: empty lists, tables
    /// without rows and structural elements outside any flow.
    pub fn transduce(&self, element: &Element, inherited: &ResolvedStyle) -> Option<ContentNode> {
        let mut stack = vec![self.open(element, inherited)];

        while let Some(frame) = stack.last_mut() {
            let current = frame.element;
            let Some(child) = current.children.get(frame.next_child) else {
                let Some(done) = stack.pop() else { break };
                let child_tag = done.tag;
                let result = self.finish(done);
                match stack.last_mut() {
                    Some(parent) => {
                        let result = self.isolate_if_detached(parent.tag, child_tag, result);
                        parent.results.push(result);
                    }
                    None => return result.into_content(),
                }
                continue;
            };
            frame.next_child += 1;

            match child {
                Node::Text(raw) => {
                    if let Some(text) = normalize_text(raw) {
                        frame.results.push(Partial::Content(ContentNode::Text(text)));
                    }
                }
                Node::Element(child) => {
                    let inherited = self.inherited_for(frame, FoTag::from_name(&child.tag));
                    let child_frame = self.open(child, &inherited);
                    stack.push(child_frame);
                }
            }
        }
        None
    }

    /// Converts the children of a `flow` or `static-content` element into a
    /// content list, one entry per child that produced something.
    ///
    /// The flow's own text style is carried by each entry; its children were
    /// resolved against it, so their own values take precedence.
    pub fn transduce_flow(&self, flow: &Element) -> Vec<ContentNode> {
        let frame = self.open(flow, &ResolvedStyle::default());
        let emitted = frame.cascade.emitted.clone();

        let mut content = Vec::new();
        for child in &flow.children {
            let node = match child {
                Node::Text(raw) => normalize_text(raw)
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .map(ContentNode::Text),
                Node::Element(child) => {
                    let tag = FoTag::from_name(&child.tag);
                    let inherited = self.inherited_for(&frame, tag);
                    self.transduce(child, &inherited).map(|mut node| {
                        if node.is_block_container() && !self.options.inheritance.inherits(frame.tag, tag) {
                            node.isolate();
                        }
                        node
                    })
                }
            };
            if let Some(node) = node.filter(|n| !n.is_empty_text()) {
                content.push(attach_props(node, emitted.clone(), BoxProps::default()));
            }
        }
        log::debug!(
            "Flow \"{}\" produced {} top-level nodes",
            flow.attr("flow-name").unwrap_or_default(),
            content.len()
        );
        content
    }

    fn inherited_for(&self, parent: &Frame<'_>, child: FoTag) -> ResolvedStyle {
        if self.options.inheritance.inherits(parent.tag, child) {
            parent.cascade.effective.clone()
        } else {
            ResolvedStyle::default()
        }
    }

    /// A block container built by a child that does not inherit from its
    /// parent must not pick up the parent's text style later on.
    fn isolate_if_detached(&self, parent: FoTag, child: FoTag, result: Partial) -> Partial {
        match result {
            Partial::Content(mut node)
                if node.is_block_container() && !self.options.inheritance.inherits(parent, child) =>
            {
                node.isolate();
                Partial::Content(node)
            }
            other => other,
        }
    }

    fn open<'a>(&self, element: &'a Element, inherited: &ResolvedStyle) -> Frame<'a> {
        let tag = FoTag::from_name(&element.tag);
        let local = parse_fo_attributes(element.attrs(), inherited, self.options.base_font_size);
        log::trace!("Opening <{}> with local style {:?}", element.tag, local.style);
        Frame {
            element,
            tag,
            cascade: inherited.cascade(&local.style),
            boxes: local.boxes,
            next_child: 0,
            results: Vec::new(),
        }
    }

    fn finish(&self, frame: Frame<'_>) -> Partial {
        let Frame {
            element,
            tag,
            cascade,
            boxes,
            results,
            ..
        } = frame;
        let emitted = cascade.emitted;

        match tag {
            FoTag::Block => Partial::Content(assemble_inline(contents(results), emitted, boxes, true)),
            FoTag::Inline | FoTag::BasicLink | FoTag::Wrapper | FoTag::Other => {
                Partial::Content(assemble_inline(contents(results), emitted, boxes, false))
            }
            FoTag::BlockContainer | FoTag::ListItemBody | FoTag::Flow | FoTag::StaticContent => {
                assemble_sequence(contents(results), emitted, boxes)
                    .map_or(Partial::Nothing, Partial::Content)
            }
            FoTag::ListItemLabel => {
                let label: String = contents(results).iter().map(ContentNode::plain_text).collect();
                Partial::Label(label.trim().to_string())
            }
            FoTag::ListItem => finish_list_item(results, emitted, boxes),
            FoTag::ListBlock => {
                let entries = results
                    .into_iter()
                    .filter_map(|r| match r {
                        Partial::Item(entry) => Some(entry),
                        _ => None,
                    })
                    .collect();
                build_list(entries, emitted, boxes).map_or(Partial::Nothing, Partial::Content)
            }
            FoTag::TableColumn => {
                let width = parse_column_width(element.attr("column-width").unwrap_or("auto"));
                let repeat = column_count(element, "number-columns-repeated");
                Partial::Columns(vec![width; repeat])
            }
            FoTag::TableHeader | FoTag::TableBody | FoTag::TableFooter => {
                Partial::Rows(TableSection::from_tag(tag), collect_rows(results))
            }
            FoTag::TableRow => Partial::Row(
                results
                    .into_iter()
                    .filter_map(|r| match r {
                        Partial::Cell(cell) => Some(cell),
                        _ => None,
                    })
                    .collect(),
            ),
            FoTag::TableCell => Partial::Cell(build_cell(element, contents(results), emitted, boxes)),
            FoTag::Table => {
                let mut parts = TableParts::default();
                let mut loose_rows = Vec::new();
                for result in results {
                    match result {
                        Partial::Columns(widths) => parts.columns.extend(widths),
                        Partial::Rows(section, rows) => parts.add_rows(section, rows),
                        Partial::Row(row) => loose_rows.push(row),
                        _ => {}
                    }
                }
                parts.add_rows(TableSection::Body, loose_rows);
                build_table(parts, emitted, boxes, declares_border(element))
                    .map_or(Partial::Nothing, Partial::Content)
            }
            FoTag::Root
            | FoTag::LayoutMasterSet
            | FoTag::SimplePageMaster
            | FoTag::RegionBody
            | FoTag::RegionBefore
            | FoTag::RegionAfter
            | FoTag::RegionStart
            | FoTag::RegionEnd
            | FoTag::PageSequenceMaster
            | FoTag::SinglePageMasterReference
            | FoTag::RepeatablePageMasterReference
            | FoTag::RepeatablePageMasterAlternatives
            | FoTag::ConditionalPageMasterReference
            | FoTag::PageSequence => {
                log::debug!("Skipping structural element <{}> inside content", element.tag);
                Partial::Nothing
            }
        }
    }
}

fn contents(results: Vec<Partial>) -> Vec<ContentNode> {
    results
        .into_iter()
        .filter_map(|r| match r {
            Partial::Content(node) => Some(node),
            _ => None,
        })
        .collect()
}

fn finish_list_item(results: Vec<Partial>, emitted: ResolvedStyle, boxes: BoxProps) -> Partial {
    let mut label = None;
    let mut body = Vec::new();
    for result in results {
        match result {
            Partial::Label(text) if label.is_none() => label = Some(text),
            Partial::Content(node) => body.push(node),
            _ => {}
        }
    }
    Partial::Item(ListEntry {
        label: label.unwrap_or_default(),
        body: assemble_sequence(body, emitted, boxes).unwrap_or_else(ContentNode::empty),
    })
}

/// Rows of a table section. Cells placed directly in the section, without a
/// `table-row`, form one row per consecutive run.
fn collect_rows(results: Vec<Partial>) -> Vec<RowResult> {
    let mut rows = Vec::new();
    let mut loose: RowResult = Vec::new();
    for result in results {
        match result {
            Partial::Row(row) => {
                if !loose.is_empty() {
                    rows.push(std::mem::take(&mut loose));
                }
                rows.push(row);
            }
            Partial::Cell(cell) => loose.push(cell),
            _ => {}
        }
    }
    if !loose.is_empty() {
        rows.push(loose);
    }
    rows
}
