//! nom parsers for lengths and their conversion to points.
//!
//! Every length in the output model is in points. Relative units (`em`, `%`)
//! need a reference value, which is the font size in effect for the node the
//! attribute belongs to.

use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit0, digit1, one_of, space0};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::sequence::pair;

/// Fixed CSS pixel to point ratio (96 px per inch, 72 pt per inch).
pub const PX_TO_PT: f32 = 0.75;

/// Font size assumed when no ancestor resolves one.
pub const BASE_FONT_SIZE: f32 = 10.0;

const PT_PER_INCH: f32 = 72.0;
const PT_PER_CM: f32 = PT_PER_INCH / 2.54;
const PT_PER_MM: f32 = PT_PER_INCH / 25.4;
const PT_PER_PICA: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Pt,
    Px,
    In,
    Cm,
    Mm,
    Pc,
    Em,
    Percent,
    /// A bare number. Lengths read it as points, line heights as a multiplier.
    None,
}

impl LengthUnit {
    pub fn is_relative(&self) -> bool {
        matches!(self, LengthUnit::Em | LengthUnit::Percent)
    }
}

/// Parses a signed decimal number such as `12`, `-0.5` or `.75`.
pub fn parse_number(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(pair(
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

/// Parses a unit suffix. A missing suffix yields `LengthUnit::None`.
pub fn parse_unit(input: &str) -> IResult<&str, LengthUnit> {
    map(
        opt(alt((
            value(LengthUnit::Pt, tag_no_case("pt")),
            value(LengthUnit::Px, tag_no_case("px")),
            value(LengthUnit::Pc, tag_no_case("pc")),
            value(LengthUnit::In, tag_no_case("in")),
            value(LengthUnit::Cm, tag_no_case("cm")),
            value(LengthUnit::Mm, tag_no_case("mm")),
            value(LengthUnit::Em, tag_no_case("em")),
            value(LengthUnit::Percent, char('%')),
        ))),
        |unit| unit.unwrap_or(LengthUnit::None),
    )
    .parse(input)
}

/// Parses a number with an optional unit, e.g. `"16px"` or `"1.5"`.
pub fn parse_quantity(input: &str) -> IResult<&str, (f32, LengthUnit)> {
    let (input, number) = parse_number(input)?;
    let (input, _) = space0(input)?;
    let (input, unit) = parse_unit(input)?;
    Ok((input, (number, unit)))
}

/// Converts a parsed quantity to points. `reference` is the value `1em` and
/// `100%` stand for.
pub fn to_points(number: f32, unit: LengthUnit, reference: f32) -> f32 {
    match unit {
        LengthUnit::Pt | LengthUnit::None => number,
        LengthUnit::Px => number * PX_TO_PT,
        LengthUnit::In => number * PT_PER_INCH,
        LengthUnit::Cm => number * PT_PER_CM,
        LengthUnit::Mm => number * PT_PER_MM,
        LengthUnit::Pc => number * PT_PER_PICA,
        LengthUnit::Em => number * reference,
        LengthUnit::Percent => number / 100.0 * reference,
    }
}
