pub mod geometry;

pub use geometry::{EdgeInsets, PageSize, Size};
