mod common;

use common::fixtures::*;
use common::{TestResult, close_to, convert, convert_with};
use fomake::{ConverterConfig, is_should_run};
use fomake_model::Applicability;
use serde_json::json;

fn report() -> String {
    let masters = [
        master_with_regions("first", "cover-header", "footer"),
        master_with_regions("rest", "running-header", "footer"),
        r#"<fo:page-sequence-master master-name="report">
             <fo:single-page-master-reference master-reference="first"/>
             <fo:repeatable-page-master-reference master-reference="rest"/>
           </fo:page-sequence-master>"#
            .to_string(),
    ]
    .concat();
    let cover = block(r#"font-size="20pt""#, "Cover");
    let running = block("", "Running");
    let footer = block(r#"text-align="center""#, "Page footer");
    let sequence = page_sequence_with_static(
        "report",
        &[
            ("cover-header", cover.as_str()),
            ("running-header", running.as_str()),
            ("footer", footer.as_str()),
        ],
        &block("", "Body"),
    );
    document(&masters, &sequence)
}

#[test]
fn test_margin_scenario() -> TestResult {
    let definition = convert(&report())?;
    let margins = serde_json::to_value(definition.page_margins)?;
    for (i, expected) in [36.0, 72.0, 36.0, 80.37].into_iter().enumerate() {
        assert!(close_to(&margins[i], expected), "{}", margins);
    }

    let metadata = serde_json::to_value(&definition.metadata)?;
    assert_eq!(metadata["pageMasters"]["first"]["pageMargin"], json!([18.0, 18.0, 18.0, 18.0]));
    assert!(close_to(&metadata["pageMasters"]["rest"]["calculatedPageMargins"][3], 80.37));
    Ok(())
}

#[test]
fn test_first_page_and_running_headers() -> TestResult {
    let definition = convert(&report())?;

    let header = definition.header.as_ref().ok_or("no header slot")?;
    assert_eq!(header.applicability(), Some(Applicability::Custom));
    let kinds: Vec<Applicability> = header
        .entries()
        .iter()
        .map(|e| e.information.applicability)
        .collect();
    assert_eq!(kinds, [Applicability::First, Applicability::Rest]);

    assert_eq!(definition.header_for(1, 3).plain_text(), "Cover");
    assert_eq!(definition.header_for(2, 3).plain_text(), "Running");
    assert_eq!(definition.header_for(3, 3).plain_text(), "Running");

    let header = serde_json::to_value(definition.header_for(1, 3))?;
    assert_eq!(header["margin"], json!([18.0, 18.0, 18.0, 0.0]));
    Ok(())
}

#[test]
fn test_footer_on_every_page() -> TestResult {
    let definition = convert(&report())?;
    for page in [0, 1, 2, 99] {
        assert_eq!(definition.footer_for(page, 99).plain_text(), "Page footer");
    }
    let footer = serde_json::to_value(definition.footer_for(1, 1))?;
    assert!(close_to(&footer["margin"][1], 34.02));
    assert!(close_to(&footer["margin"][3], 18.0));
    Ok(())
}

#[test]
fn test_header_functions_are_not_serialized() -> TestResult {
    let value = serde_json::to_value(convert(&report())?)?;
    assert!(value.get("header").is_none());
    assert!(value.get("footer").is_none());
    assert_eq!(value["content"], json!(["Body"]));
    assert!(close_to(&value["pageSize"]["width"], 595.28));
    Ok(())
}

#[test]
fn test_gating() {
    assert!(is_should_run(Some(Applicability::All), -1, 5));
    assert!(is_should_run(Some(Applicability::First), 1, 5));
    assert!(!is_should_run(Some(Applicability::First), 3, 5));
    assert!(is_should_run(Some(Applicability::Rest), 3, 5));
    assert!(!is_should_run(None, 1, 5));
}

#[test]
fn test_multiple_sequences_start_new_pages() -> TestResult {
    let masters = [plain_master("a", "1cm"), plain_master("b", "2cm")].concat();
    let sequences = [
        page_sequence("a", &block("", "one")),
        page_sequence("b", &block("", "two")),
        page_sequence("b", &[block("", "three"), block("", "four")].concat()),
    ]
    .concat();
    let definition = convert(&document(&masters, &sequences))?;
    assert_eq!(
        serde_json::to_value(&definition.content)?,
        json!([
            "one",
            { "stack": ["two"], "pageBreak": "before" },
            { "stack": ["three", "four"], "pageBreak": "before" }
        ])
    );
    assert!(close_to(&serde_json::to_value(definition.page_margins)?[0], 28.35));
    Ok(())
}

#[test]
fn test_default_page_size_from_config() -> TestResult {
    let markup = document(
        r#"<fo:simple-page-master master-name="bare"><fo:region-body/></fo:simple-page-master>"#,
        &page_sequence("bare", &block("", "x")),
    );
    let config = ConverterConfig::from_json_str(r#"{ "defaultPageSize": "Letter" }"#)?;
    let definition = convert_with(&markup, &config)?;
    assert_eq!(definition.page_size.width, 612.0);
    assert_eq!(definition.page_size.height, 792.0);
    assert!(definition.page_margins.is_zero());
    Ok(())
}
