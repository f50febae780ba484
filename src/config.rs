//! Converter configuration, loaded from JSON.

use crate::error::FomakeError;
use fomake_structure::ResolverOptions;
use fomake_style::{BASE_FONT_SIZE, InheritanceConfig};
use fomake_transduce::TransduceOptions;
use fomake_types::PageSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for a conversion. Every field has a default, so a configuration
/// file only needs the values it changes.
///
/// ```json
/// { "baseFontSize": 11, "defaultPageSize": "Letter",
///   "inheritance": { "block": ["block", "inline"], "inline": ["inline"] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterConfig {
    /// Font size in points that relative units fall back to.
    pub base_font_size: f32,
    /// Flow converted into the document content.
    pub body_flow_name: String,
    /// Page size for masters without explicit dimensions.
    pub default_page_size: PageSize,
    /// Replaces the built-in inheritance table when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inheritance: Option<InheritanceConfig>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            base_font_size: BASE_FONT_SIZE,
            body_flow_name: "xsl-region-body".to_string(),
            default_page_size: PageSize::A4,
            inheritance: None,
        }
    }
}

impl ConverterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FomakeError> {
        let config: ConverterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FomakeError> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), FomakeError> {
        if !(self.base_font_size.is_finite() && self.base_font_size > 0.0) {
            return Err(FomakeError::Config(format!(
                "baseFontSize must be a positive number, got {}",
                self.base_font_size
            )));
        }
        if self.body_flow_name.trim().is_empty() {
            return Err(FomakeError::Config("bodyFlowName must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            body_flow_name: self.body_flow_name.clone(),
            default_page_size: self.default_page_size.dimensions_pt(),
            transduce: TransduceOptions {
                inheritance: self.inheritance.clone().unwrap_or_default(),
                base_font_size: self.base_font_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fomake_style::FoTag;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConverterConfig::from_json_str(r#"{ "baseFontSize": 12 }"#).unwrap();
        assert_eq!(config.base_font_size, 12.0);
        assert_eq!(config.body_flow_name, "xsl-region-body");
        assert_eq!(config.default_page_size, PageSize::A4);
    }

    #[test]
    fn inheritance_override_replaces_table() {
        let config = ConverterConfig::from_json_str(
            r#"{ "defaultPageSize": "Letter", "inheritance": { "block": ["inline"] } }"#,
        )
        .unwrap();
        let options = config.resolver_options();
        assert!(options.transduce.inheritance.inherits(FoTag::Block, FoTag::Inline));
        assert!(!options.transduce.inheritance.inherits(FoTag::Block, FoTag::Block));
        assert_eq!(options.default_page_size.width, 612.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            ConverterConfig::from_json_str(r#"{ "baseFontSize": 0 }"#),
            Err(FomakeError::Config(_))
        ));
        assert!(matches!(
            ConverterConfig::from_json_str(r#"{ "bodyFlowName": "" }"#),
            Err(FomakeError::Config(_))
        ));
        assert!(matches!(
            ConverterConfig::from_json_str("{"),
            Err(FomakeError::Json(_))
        ));
    }
}
