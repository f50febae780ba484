//! Table assembly: column widths, row normalization and border detection.

use crate::assemble::{assemble_sequence, attach_props};
use fomake_dom::Element;
use fomake_model::{ColumnWidth, ContentNode, Table, TableCell, TableGrid, TableLayout};
use fomake_style::units::{LengthUnit, parse_number, parse_quantity, to_points};
use fomake_style::{BASE_FONT_SIZE, BoxProps, ResolvedStyle};
use nom::IResult;
use nom::Parser;
use nom::bytes::complete::tag;
use nom::character::complete::{char, space0};
use nom::combinator::all_consuming;
use nom::sequence::delimited;

fn proportional(input: &str) -> IResult<&str, f32> {
    all_consuming(delimited(
        (tag("proportional-column-width"), space0, char('(')),
        delimited(space0, parse_number, space0),
        char(')'),
    ))
    .parse(input)
}

/// Parses `column-width`. Proportional widths share the free space; values
/// that cannot be parsed fall back to `auto`.
pub fn parse_column_width(s: &str) -> ColumnWidth {
    let value = s.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
        return ColumnWidth::Auto;
    }
    if proportional(value).is_ok() {
        return ColumnWidth::Star;
    }
    match all_consuming(parse_quantity).parse(value) {
        Ok((_, (n, LengthUnit::Percent))) => ColumnWidth::Percent(n),
        Ok((_, (n, unit))) => ColumnWidth::Points(to_points(n, unit, BASE_FONT_SIZE)),
        Err(_) => {
            log::debug!("Unparseable column-width \"{}\", using auto", s);
            ColumnWidth::Auto
        }
    }
}

/// Largest accepted `number-columns-repeated` or `number-columns-spanned`.
pub const MAX_COLUMN_COUNT: usize = 1000;

/// Reads a column count attribute. Missing, unparseable, zero and
/// out-of-range values count as one column.
pub(crate) fn column_count(element: &Element, name: &str) -> usize {
    let Some(raw) = element.attr(name) else {
        return 1;
    };
    match raw.trim().parse::<usize>() {
        Ok(count) if (1..=MAX_COLUMN_COUNT).contains(&count) => count,
        _ => {
            log::debug!("Ignoring {}=\"{}\", using 1", name, raw);
            1
        }
    }
}

/// Whether an element declares a visible border through any `border*`
/// attribute.
pub(crate) fn declares_border(element: &Element) -> bool {
    element.attrs().any(|(name, value)| {
        if !name.starts_with("border") || name == "border-collapse" || name.starts_with("border-separation") {
            return false;
        }
        let value = value.trim().to_lowercase();
        !(value.is_empty()
            || value.contains("none")
            || value.contains("hidden")
            || matches!(value.as_str(), "0" | "0pt" | "0px" | "0mm"))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableSection {
    Header,
    Body,
    Footer,
}

impl TableSection {
    pub fn from_tag(tag: fomake_style::FoTag) -> Self {
        match tag {
            fomake_style::FoTag::TableHeader => TableSection::Header,
            fomake_style::FoTag::TableFooter => TableSection::Footer,
            _ => TableSection::Body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CellResult {
    pub cell: TableCell,
    pub bordered: bool,
}

pub(crate) type RowResult = Vec<CellResult>;

/// Finishes a `table-cell`: the cell's own background becomes the fill
/// color, the rest of its style goes on the content.
pub(crate) fn build_cell(
    element: &Element,
    children: Vec<ContentNode>,
    mut emitted: ResolvedStyle,
    boxes: BoxProps,
) -> CellResult {
    let fill_color = emitted.background.take();
    let content = assemble_sequence(children, emitted, boxes)
        .unwrap_or_else(ContentNode::empty);
    let col_span = Some(column_count(element, "number-columns-spanned")).filter(|span| *span > 1);

    CellResult {
        cell: TableCell {
            content,
            fill_color,
            col_span,
        },
        bordered: declares_border(element),
    }
}

/// Collected parts of a finished `table`.
#[derive(Debug, Default)]
pub(crate) struct TableParts {
    pub columns: Vec<ColumnWidth>,
    pub header: Vec<RowResult>,
    pub body: Vec<RowResult>,
    pub footer: Vec<RowResult>,
}

impl TableParts {
    pub fn add_rows(&mut self, section: TableSection, rows: Vec<RowResult>) {
        match section {
            TableSection::Header => self.header.extend(rows),
            TableSection::Body => self.body.extend(rows),
            TableSection::Footer => self.footer.extend(rows),
        }
    }
}

/// Builds the table. Spanned cells are followed by empty placeholders and
/// every row is padded to the column count. A table with no rows yields
/// nothing.
pub(crate) fn build_table(
    parts: TableParts,
    emitted: ResolvedStyle,
    boxes: BoxProps,
    table_bordered: bool,
) -> Option<ContentNode> {
    let header_rows = parts.header.len();
    let rows: Vec<RowResult> = parts
        .header
        .into_iter()
        .chain(parts.body)
        .chain(parts.footer)
        .collect();
    if rows.is_empty() {
        return None;
    }

    let bordered = table_bordered || rows.iter().flatten().any(|c| c.bordered);

    let mut body: Vec<Vec<TableCell>> = rows
        .into_iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(row.len());
            for CellResult { cell, .. } in row {
                let placeholders = cell.col_span.map_or(0, |span| span - 1);
                cells.push(cell);
                cells.extend((0..placeholders).map(|_| TableCell::empty()));
            }
            cells
        })
        .collect();

    let column_count = body
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(parts.columns.len());
    for row in &mut body {
        row.resize_with(column_count, TableCell::empty);
    }
    let mut widths = parts.columns;
    widths.resize(column_count, ColumnWidth::Star);

    let mut table = Table::new(TableGrid {
        widths,
        header_rows,
        body,
    });
    table.layout = (!bordered).then_some(TableLayout::NoBorders);
    Some(attach_props(ContentNode::Table(table), emitted, boxes))
}
