//! Converts XSL-FO page descriptions into declarative document definitions
//! in the pdfmake shape: nested `content`, `pageSize`, `pageMargins` and
//! page-indexed header and footer functions.
//!
//! ```no_run
//! use fomake::{ConverterConfig, convert_str};
//!
//! let markup = std::fs::read_to_string("report.fo")?;
//! let definition = convert_str(&markup, &ConverterConfig::default())?;
//! println!("{}", serde_json::to_string_pretty(&definition)?);
//! # Ok::<(), fomake::FomakeError>(())
//! ```

pub mod config;
pub mod error;

pub use config::ConverterConfig;
pub use error::FomakeError;

pub use fomake_dom::{Element, Node, parse_document};
pub use fomake_model::{ContentNode, HeaderFooterInfo, PageMaster};
pub use fomake_structure::{
    DocumentDefinition, DocumentStructure, HeaderFooterSlot, StructureResolver, is_should_run,
};
pub use fomake_transduce::Transducer;

/// A configured converter. Cheap to reuse across documents.
#[derive(Debug, Clone)]
pub struct Converter {
    resolver: StructureResolver,
}

impl Converter {
    pub fn new(config: &ConverterConfig) -> Result<Self, FomakeError> {
        config.validate()?;
        Ok(Self {
            resolver: StructureResolver::new(config.resolver_options()),
        })
    }

    pub fn resolver(&self) -> &StructureResolver {
        &self.resolver
    }

    /// Converts an already parsed document.
    pub fn convert_element(&self, document: &Element) -> DocumentDefinition {
        self.resolver.build_document(document)
    }

    /// Parses markup text and converts the whole document.
    pub fn convert_str(&self, markup: &str) -> Result<DocumentDefinition, FomakeError> {
        let document = parse_document(markup)?;
        Ok(self.convert_element(&document))
    }

    /// Parses markup text and converts a single flow, the body flow when
    /// `flow_name` is `None`.
    pub fn convert_flow_str(
        &self,
        markup: &str,
        flow_name: Option<&str>,
    ) -> Result<Vec<ContentNode>, FomakeError> {
        let document = parse_document(markup)?;
        Ok(self.resolver.convert_flow(&document, flow_name))
    }
}

/// Converts markup text with the given configuration.
pub fn convert_str(markup: &str, config: &ConverterConfig) -> Result<DocumentDefinition, FomakeError> {
    Converter::new(config)?.convert_str(markup)
}
