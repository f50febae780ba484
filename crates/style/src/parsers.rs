//! Attribute parsers for formatting-object style properties.
//!
//! Each parser maps one attribute string to a typed value. The high-level
//! [`parse_fo_attributes`] applies them to a whole attribute list and drops
//! whatever fails to parse: the markup ecosystem is permissive, so a bad value
//! simply leaves the property unset.

use crate::boxes::{BoxProps, PageBreak};
use crate::font::{FontStyle, FontWeight};
use crate::resolved::ResolvedStyle;
use crate::text::{TextAlign, TextDecoration};
use crate::units::{LengthUnit, parse_quantity, to_points};
use fomake_types::EdgeInsets;
use nom::IResult;
use nom::Parser;
use nom::bytes::complete::{tag_no_case, take_while_m_n};
use nom::character::complete::{char, digit1, space0};
use nom::combinator::{all_consuming, map_res};
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

impl StyleParseError {
    fn invalid(property: &str, value: &str) -> Self {
        StyleParseError::InvalidValue {
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: FnMut(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

// --- Value parsers ---

/// Parses a length to points. `reference` resolves `em` and `%`.
pub fn parse_length(s: &str, reference: f32) -> Result<f32, StyleParseError> {
    let (number, unit) = run_parser(parse_quantity, s)?;
    Ok(to_points(number, unit, reference))
}

/// Parses `font-weight` into the bold flag.
pub fn parse_bold(s: &str) -> Result<bool, StyleParseError> {
    FontWeight::parse(s)
        .map(|weight| weight.is_bold())
        .map_err(|_| StyleParseError::invalid("font-weight", s))
}

/// Parses `font-style` into the italics flag.
pub fn parse_italics(s: &str) -> Result<bool, StyleParseError> {
    FontStyle::parse(s)
        .map(|style| style.is_italic())
        .map_err(|_| StyleParseError::invalid("font-style", s))
}

pub fn parse_text_align(s: &str) -> Result<TextAlign, StyleParseError> {
    TextAlign::parse(s).map_err(|_| StyleParseError::invalid("text-align", s))
}

pub fn parse_decoration(s: &str) -> Result<TextDecoration, StyleParseError> {
    TextDecoration::parse(s).map_err(|_| StyleParseError::invalid("text-decoration", s))
}

/// Parses `line-height` into a multiplier of the font size.
///
/// A bare number already is a multiplier. A percentage is divided by 100.
/// Any other length is converted to points and divided by `font_size`.
pub fn parse_line_height(s: &str, font_size: f32) -> Result<f32, StyleParseError> {
    let (number, unit) = run_parser(parse_quantity, s)
        .map_err(|_| StyleParseError::invalid("line-height", s))?;
    match unit {
        LengthUnit::None => Ok(number),
        LengthUnit::Percent => Ok(number / 100.0),
        LengthUnit::Em => Ok(number),
        _ if font_size > 0.0 => Ok(to_points(number, unit, font_size) / font_size),
        _ => Err(StyleParseError::invalid("line-height", s)),
    }
}

/// Takes the first family of a `font-family` list, without quotes.
pub fn parse_font_family(s: &str) -> Result<String, StyleParseError> {
    let first = s.split(',').next().unwrap_or_default();
    let name = first.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if name.is_empty() {
        Err(StyleParseError::invalid("font-family", s))
    } else {
        Ok(name.to_string())
    }
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_color(input: &str) -> IResult<&str, String> {
    let (rest, digits) = all_consuming(preceded(
        char('#'),
        take_while_m_n(3, 8, is_hex_digit),
    ))
    .parse(input)?;
    match digits.len() {
        3 | 6 | 8 => Ok((rest, format!("#{}", digits.to_lowercase()))),
        _ => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::LengthValue,
        ))),
    }
}

fn rgb_channel(input: &str) -> IResult<&str, u8> {
    delimited(space0, map_res(digit1, |d: &str| d.parse::<u8>()), space0).parse(input)
}

fn rgb_color(input: &str) -> IResult<&str, String> {
    let (rest, channels) = preceded(
        tag_no_case("rgb"),
        delimited(char('('), separated_list1(char(','), rgb_channel), char(')')),
    )
    .parse(input)?;
    match channels.as_slice() {
        [r, g, b] => Ok((rest, format!("#{:02x}{:02x}{:02x}", r, g, b))),
        _ => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Count,
        ))),
    }
}

/// Parses a color into a form the renderer understands: hex strings and
/// `rgb()` become lowercase hex, keywords pass through lowercased.
/// `transparent` and `inherit` are rejected so the property stays unset.
pub fn parse_color(s: &str) -> Result<String, StyleParseError> {
    let value = s.trim();
    if value.starts_with('#') {
        return run_parser(hex_color, value);
    }
    if value.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("rgb")) {
        return run_parser(rgb_color, value);
    }
    let keyword = value.to_lowercase();
    match keyword.as_str() {
        "" | "transparent" | "inherit" | "none" => Err(StyleParseError::invalid("color", s)),
        k if k.chars().all(|c| c.is_ascii_alphabetic()) => Ok(keyword),
        _ => Err(StyleParseError::invalid("color", s)),
    }
}

/// Parses a CSS-order margin shorthand (1 to 4 lengths: top right bottom left).
pub fn parse_shorthand_margins(s: &str, reference: f32) -> Result<EdgeInsets, StyleParseError> {
    let values = s
        .split_whitespace()
        .map(|part| parse_length(part, reference))
        .collect::<Result<Vec<_>, _>>()?;
    match values.as_slice() {
        [all] => Ok(EdgeInsets::all(*all)),
        [y, x] => Ok(EdgeInsets::new(*x, *y, *x, *y)),
        [top, x, bottom] => Ok(EdgeInsets::new(*x, *top, *x, *bottom)),
        [top, right, bottom, left] => Ok(EdgeInsets::new(*left, *top, *right, *bottom)),
        _ => Err(StyleParseError::invalid("margin", s)),
    }
}

/// Parses `break-before` / `break-after`. `auto` yields `None`.
pub fn parse_page_break(s: &str, position: PageBreak) -> Result<Option<PageBreak>, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "page" | "odd-page" | "even-page" => Ok(Some(position)),
        "auto" | "column" => Ok(None),
        _ => Err(StyleParseError::invalid("break", s)),
    }
}

// --- High-level style application ---

/// The style a single element declares on its own, before inheritance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalStyle {
    pub style: ResolvedStyle,
    pub boxes: BoxProps,
}

/// Applies one attribute to `local`. Attributes that are not style
/// properties are ignored. `reference` is the inherited font size.
pub fn apply_style_property(
    local: &mut LocalStyle,
    name: &str,
    value: &str,
    reference: f32,
) -> Result<(), StyleParseError> {
    let style = &mut local.style;
    match name {
        "font-weight" => style.bold = Some(parse_bold(value)?),
        "font-style" => style.italics = Some(parse_italics(value)?),
        "text-decoration" => style.decoration = Some(parse_decoration(value)?),
        "font-size" => style.font_size = Some(parse_length(value, reference)?),
        "font-family" => style.font = Some(parse_font_family(value)?),
        "color" => style.color = Some(parse_color(value)?),
        "background-color" => style.background = Some(parse_color(value)?),
        "text-align" => style.alignment = Some(parse_text_align(value)?),
        "margin" => local.boxes.margin = Some(parse_shorthand_margins(value, reference)?),
        "margin-top" | "space-before" | "space-before.optimum" => {
            local.boxes.margin_mut().top = parse_length(value, reference)?
        }
        "margin-bottom" | "space-after" | "space-after.optimum" => {
            local.boxes.margin_mut().bottom = parse_length(value, reference)?
        }
        "margin-left" | "start-indent" => {
            local.boxes.margin_mut().left = parse_length(value, reference)?
        }
        "margin-right" | "end-indent" => {
            local.boxes.margin_mut().right = parse_length(value, reference)?
        }
        "break-before" => {
            if let Some(page_break) = parse_page_break(value, PageBreak::Before)? {
                local.boxes.page_break = Some(page_break);
            }
        }
        "break-after" => {
            if let Some(page_break) = parse_page_break(value, PageBreak::After)? {
                local.boxes.page_break = Some(page_break);
            }
        }
        _ => {} // Not a style attribute, ignore.
    };
    Ok(())
}

/// Parses the style attributes of one element.
///
/// `inherited` supplies the font size that relative units refer to; when no
/// ancestor set one, `base_font_size` is used. Values that fail to parse are
/// logged and dropped.
pub fn parse_fo_attributes<'a, I>(attrs: I, inherited: &ResolvedStyle, base_font_size: f32) -> LocalStyle
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let reference = inherited.font_size.unwrap_or(base_font_size);
    let mut local = LocalStyle::default();
    let mut line_height = None;

    for (name, value) in attrs {
        if name == "line-height" {
            // Needs the final font size of this element, which may come later.
            line_height = Some(value);
            continue;
        }
        if let Err(e) = apply_style_property(&mut local, name, value, reference) {
            log::debug!("Dropping attribute {}=\"{}\": {}", name, value, e);
        }
    }

    if let Some(value) = line_height {
        let font_size = local.style.font_size.unwrap_or(reference);
        match parse_line_height(value, font_size) {
            Ok(multiplier) => local.style.line_height = Some(multiplier),
            Err(e) => log::debug!("Dropping attribute line-height=\"{}\": {}", value, e),
        }
    }

    local
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::BASE_FONT_SIZE;

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("12pt", BASE_FONT_SIZE).unwrap(), 12.0);
        assert_eq!(parse_length("16px", BASE_FONT_SIZE).unwrap(), 12.0);
        assert_eq!(parse_length(" 1in ", BASE_FONT_SIZE).unwrap(), 72.0);
        assert_eq!(parse_length("10", BASE_FONT_SIZE).unwrap(), 10.0);
        assert_eq!(parse_length("150%", 12.0).unwrap(), 18.0);
        assert!(parse_length("abc", BASE_FONT_SIZE).is_err());
        assert!(parse_length("12 pt extra", BASE_FONT_SIZE).is_err());
    }

    #[test]
    fn test_parse_bold() {
        assert!(parse_bold("bold").unwrap());
        assert!(parse_bold("bolder").unwrap());
        assert!(parse_bold("600").unwrap());
        assert!(parse_bold("900").unwrap());
        assert!(!parse_bold("normal").unwrap());
        assert!(!parse_bold("500").unwrap());
        assert!(parse_bold("heavy").is_err());
    }

    #[test]
    fn test_parse_line_height() {
        assert_eq!(parse_line_height("1.5", 12.0).unwrap(), 1.5);
        assert_eq!(parse_line_height("150%", 12.0).unwrap(), 1.5);
        assert_eq!(parse_line_height("18pt", 12.0).unwrap(), 1.5);
        assert_eq!(parse_line_height("15pt", BASE_FONT_SIZE).unwrap(), 1.5);
        assert!(parse_line_height("normal", 12.0).is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF0000").unwrap(), "#ff0000");
        assert_eq!(parse_color("#f00").unwrap(), "#f00");
        assert_eq!(parse_color("rgb(0, 128, 255)").unwrap(), "#0080ff");
        assert_eq!(parse_color("Navy").unwrap(), "navy");
        assert!(parse_color("#12").is_err());
        assert!(parse_color("transparent").is_err());
        assert!(parse_color("rgb(1,2)").is_err());
    }

    #[test]
    fn test_parse_font_family() {
        assert_eq!(parse_font_family("'Open Sans', serif").unwrap(), "Open Sans");
        assert!(parse_font_family(" , serif").is_err());
    }

    #[test]
    fn test_parse_shorthand_margins() {
        assert_eq!(
            parse_shorthand_margins("10pt 20pt", BASE_FONT_SIZE).unwrap(),
            EdgeInsets::new(20.0, 10.0, 20.0, 10.0)
        );
        assert_eq!(
            parse_shorthand_margins("1 2 3 4", BASE_FONT_SIZE).unwrap(),
            EdgeInsets::new(4.0, 1.0, 2.0, 3.0)
        );
        assert!(parse_shorthand_margins("", BASE_FONT_SIZE).is_err());
    }

    #[test]
    fn unparseable_attributes_are_dropped() {
        let local = parse_fo_attributes(
            [
                ("font-size", "huge"),
                ("text-align", "sideways"),
                ("font-weight", "bold"),
                ("id", "ignored"),
            ],
            &ResolvedStyle::default(),
            BASE_FONT_SIZE,
        );
        assert_eq!(
            local.style,
            ResolvedStyle {
                bold: Some(true),
                ..Default::default()
            }
        );
        assert!(local.boxes.is_empty());
    }

    #[test]
    fn line_height_uses_the_element_font_size_regardless_of_order() {
        let local = parse_fo_attributes(
            [("line-height", "24pt"), ("font-size", "16pt")],
            &ResolvedStyle::default(),
            BASE_FONT_SIZE,
        );
        assert_eq!(local.style.line_height, Some(1.5));
    }

    #[test]
    fn line_height_falls_back_to_inherited_then_base_font_size() {
        let inherited = ResolvedStyle {
            font_size: Some(20.0),
            ..Default::default()
        };
        let local = parse_fo_attributes([("line-height", "30pt")], &inherited, BASE_FONT_SIZE);
        assert_eq!(local.style.line_height, Some(1.5));

        let local = parse_fo_attributes(
            [("line-height", "12pt")],
            &ResolvedStyle::default(),
            BASE_FONT_SIZE,
        );
        assert_eq!(local.style.line_height, Some(1.2));
    }

    #[test]
    fn box_properties() {
        let local = parse_fo_attributes(
            [
                ("space-before", "6pt"),
                ("space-after.optimum", "4pt"),
                ("break-before", "page"),
            ],
            &ResolvedStyle::default(),
            BASE_FONT_SIZE,
        );
        assert_eq!(local.boxes.margin, Some(EdgeInsets::new(0.0, 6.0, 0.0, 4.0)));
        assert_eq!(local.boxes.page_break, Some(PageBreak::Before));
    }
}
