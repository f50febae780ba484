pub mod font;
pub mod text;
pub mod units;
pub mod boxes;
pub mod resolved;
pub mod inheritance;
pub mod parsers;

pub use font::{FontStyle, FontWeight};
pub use text::{TextAlign, TextDecoration};
pub use units::{LengthUnit, BASE_FONT_SIZE, PX_TO_PT};
pub use boxes::{BoxProps, PageBreak};
pub use resolved::{Cascade, ResolvedStyle};
pub use inheritance::{FoTag, InheritanceConfig};
pub use parsers::{LocalStyle, StyleParseError};
