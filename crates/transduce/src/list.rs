//! List kind inference from item labels.
//!
//! The markup carries no list type; the label of each item holds the literal
//! marker text. A label starting with digits followed by `.` or `)`, with an
//! optional opening parenthesis as in `(1)`, marks a numbered list; bullets,
//! dashes and anything else mark a bullet list.

use crate::assemble::attach_props;
use fomake_model::{ContentNode, ListBlock, ListKind};
use fomake_style::{BoxProps, ResolvedStyle};
use nom::IResult;
use nom::Parser;
use nom::character::complete::{char, digit1, one_of, space0};
use nom::combinator::{map_res, opt};
use nom::sequence::{preceded, terminated};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Numbered(u32),
    Bullet,
}

fn numbered_label(input: &str) -> IResult<&str, u32> {
    preceded(
        (space0, opt(char('('))),
        terminated(map_res(digit1, |d: &str| d.parse::<u32>()), one_of(".)")),
    )
    .parse(input)
}

pub fn parse_list_label(label: &str) -> LabelKind {
    match numbered_label(label) {
        Ok((_, number)) => LabelKind::Numbered(number),
        Err(_) => LabelKind::Bullet,
    }
}

/// One finished `list-item`: the label's text and the body's content.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListEntry {
    pub label: String,
    pub body: ContentNode,
}

/// Builds the list from its finished items. An empty list yields nothing.
pub(crate) fn build_list(
    entries: Vec<ListEntry>,
    emitted: ResolvedStyle,
    boxes: BoxProps,
) -> Option<ContentNode> {
    let first = entries.first()?;
    let (kind, start) = match parse_list_label(&first.label) {
        LabelKind::Numbered(n) => (ListKind::Numbered, (n != 1).then_some(n)),
        LabelKind::Bullet => (ListKind::Bullet, None),
    };

    let mut list = ListBlock::new(kind, entries.into_iter().map(|e| e.body).collect());
    list.start = start;
    Some(attach_props(ContentNode::List(list), emitted, boxes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_patterns() {
        assert_eq!(parse_list_label("1."), LabelKind::Numbered(1));
        assert_eq!(parse_list_label(" 12)"), LabelKind::Numbered(12));
        assert_eq!(parse_list_label("3.1."), LabelKind::Numbered(3));
        assert_eq!(parse_list_label("(2)"), LabelKind::Numbered(2));
        assert_eq!(parse_list_label(" (10)"), LabelKind::Numbered(10));
        assert_eq!(parse_list_label("(a)"), LabelKind::Bullet);
        assert_eq!(parse_list_label("•"), LabelKind::Bullet);
        assert_eq!(parse_list_label("-"), LabelKind::Bullet);
        assert_eq!(parse_list_label("12"), LabelKind::Bullet);
        assert_eq!(parse_list_label(""), LabelKind::Bullet);
    }

    #[test]
    fn empty_list_yields_nothing() {
        assert_eq!(
            build_list(vec![], ResolvedStyle::default(), BoxProps::default()),
            None
        );
    }

    #[test]
    fn numbered_list_records_its_start() {
        let entries = vec![
            ListEntry {
                label: "4.".into(),
                body: ContentNode::text("four"),
            },
            ListEntry {
                label: "5.".into(),
                body: ContentNode::text("five"),
            },
        ];
        let Some(ContentNode::List(list)) =
            build_list(entries, ResolvedStyle::default(), BoxProps::default())
        else {
            panic!("expected a list");
        };
        assert_eq!(list.kind, ListKind::Numbered);
        assert_eq!(list.start, Some(4));
        assert_eq!(list.items.len(), 2);
    }
}
