mod common;

use common::fixtures::*;
use common::{TestResult, convert_with};
use fomake::{ConverterConfig, FomakeError};
use serde_json::json;
use std::io::Write;

#[test]
fn test_config_file_round_trip() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, r#"{{ "baseFontSize": 12, "bodyFlowName": "main" }}"#)?;

    let config = ConverterConfig::from_json_file(file.path())?;
    assert_eq!(config.base_font_size, 12.0);
    assert_eq!(config.body_flow_name, "main");

    let markup = document(
        &plain_master("page", "0"),
        r#"<fo:page-sequence master-reference="page">
             <fo:flow flow-name="main"><fo:block font-size="2em">scaled</fo:block></fo:flow>
           </fo:page-sequence>"#,
    );
    let definition = convert_with(&markup, &config)?;
    assert_eq!(serde_json::to_value(&definition.content)?, json!([{ "text": "scaled", "fontSize": 24.0 }]));
    Ok(())
}

#[test]
fn test_missing_config_file_is_io_error() {
    let result = ConverterConfig::from_json_file("/nonexistent/fomake.json");
    assert!(matches!(result, Err(FomakeError::Io(_))));
}

#[test]
fn test_inheritance_table_override() -> TestResult {
    // Inlines no longer inherit from blocks, so the inline's bold is emitted
    // again.
    let config = ConverterConfig::from_json_str(r#"{ "inheritance": { "flow": ["block"] } }"#)?;
    let body = block(
        r#"font-weight="bold""#,
        &format!("A{}", inline(r#"font-weight="bold""#, "B")),
    );
    let definition = convert_with(&body_document(&body), &config)?;
    assert_eq!(
        serde_json::to_value(&definition.content)?,
        json!([{ "bold": true, "text": ["A", { "text": "B", "bold": true }] }])
    );
    Ok(())
}
