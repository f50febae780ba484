//! The resolved text style of a node and the rule that combines it with a
//! node's own attributes.
//!
//! Every property has three states: absent (inherit silently), an "on" value,
//! and an explicit "off" value (`false`, or `TextDecoration::None`). The
//! distinction matters in [`ResolvedStyle::cascade`]: an off value is only
//! emitted when it contradicts an inherited "on" value.

use crate::text::{TextAlign, TextDecoration};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
}

/// Result of combining an inherited style with a node's local delta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cascade {
    /// What the node's children inherit.
    pub effective: ResolvedStyle,
    /// What the node itself must carry in the output: only the properties
    /// that differ from what it inherited.
    pub emitted: ResolvedStyle,
}

impl ResolvedStyle {
    pub fn is_empty(&self) -> bool {
        *self == ResolvedStyle::default()
    }

    pub fn cascade(&self, local: &ResolvedStyle) -> Cascade {
        let (bold, emitted_bold) = toggle(self.bold, local.bold);
        let (italics, emitted_italics) = toggle(self.italics, local.italics);
        let (decoration, emitted_decoration) = decoration(self.decoration, local.decoration);
        let (font_size, emitted_font_size) = replace(&self.font_size, &local.font_size);
        let (color, emitted_color) = replace(&self.color, &local.color);
        let (background, emitted_background) = replace(&self.background, &local.background);
        let (alignment, emitted_alignment) = replace(&self.alignment, &local.alignment);
        let (font, emitted_font) = replace(&self.font, &local.font);
        let (line_height, emitted_line_height) = replace(&self.line_height, &local.line_height);

        Cascade {
            effective: ResolvedStyle {
                bold,
                italics,
                decoration,
                font_size,
                color,
                background,
                alignment,
                font,
                line_height,
            },
            emitted: ResolvedStyle {
                bold: emitted_bold,
                italics: emitted_italics,
                decoration: emitted_decoration,
                font_size: emitted_font_size,
                color: emitted_color,
                background: emitted_background,
                alignment: emitted_alignment,
                font: emitted_font,
                line_height: emitted_line_height,
            },
        }
    }

    /// Fills in whatever `self` leaves unset from `other`.
    pub fn or(self, other: &ResolvedStyle) -> ResolvedStyle {
        ResolvedStyle {
            bold: self.bold.or(other.bold),
            italics: self.italics.or(other.italics),
            decoration: self.decoration.or(other.decoration),
            font_size: self.font_size.or(other.font_size),
            color: self.color.or_else(|| other.color.clone()),
            background: self.background.or_else(|| other.background.clone()),
            alignment: self.alignment.or(other.alignment),
            font: self.font.or_else(|| other.font.clone()),
            line_height: self.line_height.or(other.line_height),
        }
    }
}

fn toggle(inherited: Option<bool>, local: Option<bool>) -> (Option<bool>, Option<bool>) {
    match (inherited, local) {
        (_, None) => (inherited, None),
        (Some(true), Some(true)) => (Some(true), None),
        (_, Some(true)) => (Some(true), Some(true)),
        (Some(true), Some(false)) => (Some(false), Some(false)),
        (_, Some(false)) => (inherited, None),
    }
}

fn decoration(
    inherited: Option<TextDecoration>,
    local: Option<TextDecoration>,
) -> (Option<TextDecoration>, Option<TextDecoration>) {
    let inherited_on = inherited.is_some_and(|d| d.is_on());
    match local {
        None => (inherited, None),
        Some(d) if !d.is_on() => {
            if inherited_on {
                (Some(d), Some(d))
            } else {
                (inherited, None)
            }
        }
        Some(d) if inherited == Some(d) => (Some(d), None),
        Some(d) => (Some(d), Some(d)),
    }
}

fn replace<T: PartialEq + Clone>(inherited: &Option<T>, local: &Option<T>) -> (Option<T>, Option<T>) {
    match local {
        None => (inherited.clone(), None),
        Some(v) if inherited.as_ref() == Some(v) => (Some(v.clone()), None),
        Some(v) => (Some(v.clone()), Some(v.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(value: Option<bool>) -> ResolvedStyle {
        ResolvedStyle {
            bold: value,
            ..Default::default()
        }
    }

    #[test]
    fn off_is_emitted_only_against_inherited_on() {
        for parent in [None, Some(false), Some(true)] {
            let cascade = bold(parent).cascade(&bold(Some(false)));
            let expected = if parent == Some(true) { Some(false) } else { None };
            assert_eq!(cascade.emitted.bold, expected, "parent bold = {:?}", parent);
        }
    }

    #[test]
    fn restating_inherited_values_emits_nothing() {
        let inherited = ResolvedStyle {
            bold: Some(true),
            font_size: Some(12.0),
            color: Some("red".into()),
            decoration: Some(TextDecoration::Underline),
            ..Default::default()
        };
        let cascade = inherited.cascade(&inherited.clone());
        assert!(cascade.emitted.is_empty());
        assert_eq!(cascade.effective, inherited);
    }

    #[test]
    fn decoration_none_cancels_only_inherited_decoration() {
        let none = ResolvedStyle {
            decoration: Some(TextDecoration::None),
            ..Default::default()
        };
        assert!(ResolvedStyle::default().cascade(&none).emitted.is_empty());

        let underlined = ResolvedStyle {
            decoration: Some(TextDecoration::Underline),
            ..Default::default()
        };
        let cascade = underlined.cascade(&none);
        assert_eq!(cascade.emitted.decoration, Some(TextDecoration::None));
        assert_eq!(cascade.effective.decoration, Some(TextDecoration::None));
    }

    #[test]
    fn emitted_style_serializes_sparse() {
        let style = ResolvedStyle {
            bold: Some(false),
            font_size: Some(12.0),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&style).unwrap(),
            serde_json::json!({ "bold": false, "fontSize": 12.0 })
        );
    }
}
