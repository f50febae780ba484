pub mod fixtures;

use fomake::{Converter, ConverterConfig, DocumentDefinition, FomakeError};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Converts a document with the default configuration.
pub fn convert(markup: &str) -> Result<DocumentDefinition, FomakeError> {
    convert_with(markup, &ConverterConfig::default())
}

pub fn convert_with(markup: &str, config: &ConverterConfig) -> Result<DocumentDefinition, FomakeError> {
    init_logging();
    Converter::new(config)?.convert_str(markup)
}

/// Converts a document and returns its serialized `content` array.
pub fn content_json(markup: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let definition = convert(markup)?;
    Ok(serde_json::to_value(&definition.content)?)
}

/// Whether a JSON number is within `1e-2` of the expected value.
pub fn close_to(value: &Value, expected: f64) -> bool {
    value.as_f64().is_some_and(|v| (v - expected).abs() < 1e-2)
}
