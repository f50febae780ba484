//! The element tree the converter reads.
//!
//! The tree is plain owned data: tag name, ordered attributes, ordered
//! children. It is built once (by [`parse_document`] or by hand) and only
//! borrowed afterwards.

pub mod element;
pub mod xml;

pub use element::{Element, Node};
pub use xml::{DomError, parse_document};
