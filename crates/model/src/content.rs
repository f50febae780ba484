//! Content nodes of the document definition.
//!
//! The text of a [`StyledRun`] is either a plain string or a sequence of
//! [`InlineNode`]s. `InlineNode` has no list, table or stack variant, so a
//! block container can never end up inside a run of text.

use fomake_style::{BoxProps, ResolvedStyle};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A node of the document content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentNode {
    Text(String),
    Run(StyledRun),
    List(ListBlock),
    Stack(StackBlock),
    Table(Table),
}

impl ContentNode {
    pub fn text(value: impl Into<String>) -> Self {
        ContentNode::Text(value.into())
    }

    pub fn empty() -> Self {
        ContentNode::Text(String::new())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentNode::Text(_) => "text",
            ContentNode::Run(_) => "run",
            ContentNode::List(_) => "list",
            ContentNode::Stack(_) => "stack",
            ContentNode::Table(_) => "table",
        }
    }

    /// Lists, tables and stacks lay out as blocks and may not appear in text.
    pub fn is_block_container(&self) -> bool {
        matches!(
            self,
            ContentNode::List(_) | ContentNode::Stack(_) | ContentNode::Table(_)
        )
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, ContentNode::Text(t) if t.is_empty())
    }

    /// Converts to an inline node, handing block containers back unchanged.
    pub fn into_inline(self) -> Result<InlineNode, ContentNode> {
        match self {
            ContentNode::Text(t) => Ok(InlineNode::Text(t)),
            ContentNode::Run(r) => Ok(InlineNode::Run(r)),
            other => Err(other),
        }
    }

    /// Concatenated text of the node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(t) => out.push_str(t),
            ContentNode::Run(run) => run.text.collect_text(out),
            ContentNode::List(list) => list.items.iter().for_each(|i| i.collect_text(out)),
            ContentNode::Stack(stack) => stack.items.iter().for_each(|i| i.collect_text(out)),
            ContentNode::Table(table) => table
                .grid
                .body
                .iter()
                .flatten()
                .for_each(|cell| cell.content.collect_text(out)),
        }
    }

    /// Mutable access to the emitted style, for nodes that carry one.
    pub fn style_mut(&mut self) -> Option<&mut ResolvedStyle> {
        match self {
            ContentNode::Text(_) => None,
            ContentNode::Run(run) => Some(&mut run.style),
            ContentNode::List(list) => Some(&mut list.style),
            ContentNode::Stack(stack) => Some(&mut stack.style),
            ContentNode::Table(table) => Some(&mut table.style),
        }
    }

    /// Marks a block container whose element did not inherit from its
    /// parent. An isolated container never takes text style from the nodes
    /// around it.
    pub fn isolate(&mut self) {
        match self {
            ContentNode::List(list) => list.isolated = true,
            ContentNode::Stack(stack) => stack.isolated = true,
            ContentNode::Table(table) => table.isolated = true,
            ContentNode::Text(_) | ContentNode::Run(_) => {}
        }
    }

    pub fn is_isolated(&self) -> bool {
        match self {
            ContentNode::List(list) => list.isolated,
            ContentNode::Stack(stack) => stack.isolated,
            ContentNode::Table(table) => table.isolated,
            ContentNode::Text(_) | ContentNode::Run(_) => false,
        }
    }

    /// Whether this node, or any container below it, is isolated.
    pub fn holds_isolated(&self) -> bool {
        match self {
            ContentNode::Text(_) | ContentNode::Run(_) => false,
            ContentNode::List(list) => list.isolated || list.items.iter().any(ContentNode::holds_isolated),
            ContentNode::Stack(stack) => {
                stack.isolated || stack.items.iter().any(ContentNode::holds_isolated)
            }
            ContentNode::Table(table) => {
                table.isolated
                    || table
                        .grid
                        .body
                        .iter()
                        .flatten()
                        .any(|cell| cell.content.holds_isolated())
            }
        }
    }

    pub fn boxes_mut(&mut self) -> Option<&mut BoxProps> {
        match self {
            ContentNode::Text(_) => None,
            ContentNode::Run(run) => Some(&mut run.boxes),
            ContentNode::List(list) => Some(&mut list.boxes),
            ContentNode::Stack(stack) => Some(&mut stack.boxes),
            ContentNode::Table(table) => Some(&mut table.boxes),
        }
    }
}

impl From<InlineNode> for ContentNode {
    fn from(node: InlineNode) -> Self {
        match node {
            InlineNode::Text(t) => ContentNode::Text(t),
            InlineNode::Run(r) => ContentNode::Run(r),
        }
    }
}

/// An element of a text sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InlineNode {
    Text(String),
    Run(StyledRun),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RunText {
    Plain(String),
    Runs(Vec<InlineNode>),
}

impl RunText {
    fn collect_text(&self, out: &mut String) {
        match self {
            RunText::Plain(t) => out.push_str(t),
            RunText::Runs(runs) => {
                for run in runs {
                    match run {
                        InlineNode::Text(t) => out.push_str(t),
                        InlineNode::Run(r) => r.text.collect_text(out),
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRun {
    pub text: RunText,
    #[serde(flatten)]
    pub style: ResolvedStyle,
    #[serde(flatten)]
    pub boxes: BoxProps,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>, style: ResolvedStyle) -> Self {
        Self {
            text: RunText::Plain(text.into()),
            style,
            boxes: BoxProps::default(),
        }
    }

    pub fn runs(runs: Vec<InlineNode>, style: ResolvedStyle) -> Self {
        Self {
            text: RunText::Runs(runs),
            style,
            boxes: BoxProps::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    Bullet,
    Numbered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListBlock {
    pub kind: ListKind,
    pub items: Vec<ContentNode>,
    /// First number of a numbered list when it does not start at 1.
    pub start: Option<u32>,
    pub style: ResolvedStyle,
    pub boxes: BoxProps,
    pub isolated: bool,
}

impl ListBlock {
    pub fn new(kind: ListKind, items: Vec<ContentNode>) -> Self {
        Self {
            kind,
            items,
            start: None,
            style: ResolvedStyle::default(),
            boxes: BoxProps::default(),
            isolated: false,
        }
    }
}

impl Serialize for ListBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct ListShape<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            ul: Option<&'a Vec<ContentNode>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            ol: Option<&'a Vec<ContentNode>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            start: Option<u32>,
            #[serde(flatten)]
            style: &'a ResolvedStyle,
            #[serde(flatten)]
            boxes: &'a BoxProps,
        }

        let (ul, ol) = match self.kind {
            ListKind::Bullet => (Some(&self.items), None),
            ListKind::Numbered => (None, Some(&self.items)),
        };
        ListShape {
            ul,
            ol,
            start: self.start,
            style: &self.style,
            boxes: &self.boxes,
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackBlock {
    #[serde(rename = "stack")]
    pub items: Vec<ContentNode>,
    #[serde(flatten)]
    pub style: ResolvedStyle,
    #[serde(flatten)]
    pub boxes: BoxProps,
    #[serde(skip)]
    pub isolated: bool,
}

impl StackBlock {
    pub fn new(items: Vec<ContentNode>) -> Self {
        Self {
            items,
            style: ResolvedStyle::default(),
            boxes: BoxProps::default(),
            isolated: false,
        }
    }
}

/// Width of one table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    Points(f32),
    Percent(f32),
    /// Shares the remaining width with the other star columns.
    Star,
    Auto,
}

impl Serialize for ColumnWidth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ColumnWidth::Points(pt) => serializer.serialize_f32(*pt),
            ColumnWidth::Percent(p) => serializer.serialize_str(&format!("{}%", p)),
            ColumnWidth::Star => serializer.serialize_str("*"),
            ColumnWidth::Auto => serializer.serialize_str("auto"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TableLayout {
    NoBorders,
    HeaderLineOnly,
    LightHorizontalLines,
}

/// A table cell. Cells that only carry content serialize as that content;
/// cells with a fill color or column span are wrapped in a one-item stack
/// that carries those properties.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub content: ContentNode,
    pub fill_color: Option<String>,
    pub col_span: Option<usize>,
}

impl TableCell {
    pub fn new(content: ContentNode) -> Self {
        Self {
            content,
            fill_color: None,
            col_span: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(ContentNode::empty())
    }
}

impl Serialize for TableCell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.fill_color.is_none() && self.col_span.is_none() {
            return self.content.serialize(serializer);
        }
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("stack", std::slice::from_ref(&self.content))?;
        if let Some(fill) = &self.fill_color {
            map.serialize_entry("fillColor", fill)?;
        }
        if let Some(span) = self.col_span {
            map.serialize_entry("colSpan", &span)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableGrid {
    pub widths: Vec<ColumnWidth>,
    pub header_rows: usize,
    pub body: Vec<Vec<TableCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    #[serde(rename = "table")]
    pub grid: TableGrid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<TableLayout>,
    #[serde(flatten)]
    pub style: ResolvedStyle,
    #[serde(flatten)]
    pub boxes: BoxProps,
    #[serde(skip)]
    pub isolated: bool,
}

impl Table {
    pub fn new(grid: TableGrid) -> Self {
        Self {
            grid,
            layout: None,
            style: ResolvedStyle::default(),
            boxes: BoxProps::default(),
            isolated: false,
        }
    }
}
