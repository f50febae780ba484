//! Output model of the converter.
//!
//! `content` holds the closed union of content nodes a renderer lays out;
//! `pages` holds the page-master graph resolved from the layout masters.
//! Both serialize to the renderer's JSON document-definition shape.

pub mod content;
pub mod pages;

pub use content::{
    ColumnWidth, ContentNode, InlineNode, ListBlock, ListKind, RunText, StackBlock, StyledRun,
    Table, TableCell, TableGrid, TableLayout,
};
pub use pages::{
    Applicability, HeaderFooterInfo, PageMaster, PageMasterReference, PageSequenceMaster, Region,
    RegionKind, Repetition,
};
