//! Document structure and page-sequence resolution.
//!
//! Parses the layout masters of a formatting-object document, classifies
//! each static-content flow as a header or footer for the pages it renders
//! on, pre-computes the body margins of every page master and converts the
//! flows through the transducer.

pub mod classify;
pub mod document;
pub mod margins;
pub mod masters;
pub mod resolver;
pub mod slots;

pub use classify::{Classification, classify_applicability, get_header_footer_information, is_should_run};
pub use document::{DocumentDefinition, DocumentMetadata, DocumentStructure};
pub use margins::{apply_calculated_margins, calculate_margins};
pub use masters::{LayoutMasters, MasterDefaults, parse_layout_master_set};
pub use resolver::{ResolverOptions, StructureResolver};
pub use slots::{HeaderFooterSlot, SlotEntry};
