//! Parsing of `layout-master-set`: simple page masters and page sequence
//! masters.

use crate::margins::apply_calculated_margins;
use fomake_dom::Element;
use fomake_model::{PageMaster, PageMasterReference, PageSequenceMaster, Region, Repetition};
use fomake_style::FoTag;
use fomake_style::StyleParseError;
use fomake_style::parsers::{parse_length, parse_shorthand_margins};
use fomake_types::{EdgeInsets, Size};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

pub const DEFAULT_HEADER_REGION: &str = "xsl-region-before";
pub const DEFAULT_FOOTER_REGION: &str = "xsl-region-after";
pub const DEFAULT_BODY_REGION: &str = "xsl-region-body";

/// Values used where a master leaves something unspecified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasterDefaults {
    pub page_size: Size,
    pub base_font_size: f32,
}

/// All masters declared by a document, keyed by `master-name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMasters {
    pub page_masters: BTreeMap<String, PageMaster>,
    pub sequences: BTreeMap<String, PageSequenceMaster>,
}

impl LayoutMasters {
    /// The sequence master with the given name. A name that refers to a
    /// simple page master directly yields a sequence repeating that master.
    pub fn sequence(&self, name: &str) -> Option<Cow<'_, PageSequenceMaster>> {
        if let Some(sequence) = self.sequences.get(name) {
            return Some(Cow::Borrowed(sequence));
        }
        self.page_masters
            .contains_key(name)
            .then(|| Cow::Owned(PageSequenceMaster::single(name)))
    }

    /// The page master governing a 1-based page of a sequence.
    pub fn master_for_page(&self, sequence_name: &str, page: u32) -> Option<&PageMaster> {
        let sequence = self.sequence(sequence_name)?;
        let reference = sequence.reference_for_page(page)?;
        self.page_masters.get(&reference.page_master_name)
    }
}

/// Applies a margin attribute to `margins`. Returns whether the attribute
/// was a margin at all.
fn apply_margin(
    margins: &mut EdgeInsets,
    name: &str,
    value: &str,
    reference: f32,
) -> Result<bool, StyleParseError> {
    match name {
        "margin" => *margins = parse_shorthand_margins(value, reference)?,
        "margin-top" => margins.top = parse_length(value, reference)?,
        "margin-right" => margins.right = parse_length(value, reference)?,
        "margin-bottom" => margins.bottom = parse_length(value, reference)?,
        "margin-left" => margins.left = parse_length(value, reference)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_region(element: &Element, default_name: &str, reference: f32) -> Region {
    let mut region = Region::new(element.attr("region-name").unwrap_or(default_name));
    for (name, value) in element.attrs() {
        let result = match name {
            "extent" => parse_length(value, reference).map(|extent| region.height = extent),
            _ => apply_margin(&mut region.margins, name, value, reference).map(|_| ()),
        };
        if let Err(e) = result {
            log::debug!("Ignoring {}=\"{}\" on <{}>: {}", name, value, element.tag, e);
        }
    }
    region
}

/// Parses a `simple-page-master`. A master without a name cannot be
/// referenced and is skipped.
pub fn parse_simple_page_master(element: &Element, defaults: &MasterDefaults) -> Option<PageMaster> {
    let Some(name) = element.attr("master-name") else {
        log::warn!("Skipping <simple-page-master> without master-name");
        return None;
    };
    let reference = defaults.base_font_size;
    let mut page_size = defaults.page_size;
    let mut page_margin = EdgeInsets::zero();

    for (key, value) in element.attrs() {
        let result = match key {
            "master-name" => Ok(()),
            "page-width" => parse_length(value, reference).map(|w| page_size.width = w),
            "page-height" => parse_length(value, reference).map(|h| page_size.height = h),
            _ => match apply_margin(&mut page_margin, key, value, reference) {
                Ok(true) => Ok(()),
                Ok(false) => {
                    log::debug!("Unknown attribute on <simple-page-master>: '{}'", key);
                    Ok(())
                }
                Err(e) => Err(e),
            },
        };
        if let Err(e) = result {
            log::debug!("Ignoring {}=\"{}\" on master '{}': {}", key, value, name, e);
        }
    }

    let mut master = PageMaster {
        name: name.to_string(),
        page_size,
        page_margin,
        header: None,
        footer: None,
        body: Region::new(DEFAULT_BODY_REGION),
        calculated_page_margins: None,
    };
    for region in element.child_elements() {
        match FoTag::from_name(&region.tag) {
            FoTag::RegionBody => master.body = parse_region(region, DEFAULT_BODY_REGION, reference),
            FoTag::RegionBefore => {
                master.header = Some(parse_region(region, DEFAULT_HEADER_REGION, reference))
            }
            FoTag::RegionAfter => {
                master.footer = Some(parse_region(region, DEFAULT_FOOTER_REGION, reference))
            }
            _ => log::debug!("Ignoring <{}> in master '{}'", region.tag, name),
        }
    }
    apply_calculated_margins(&mut master);
    Some(master)
}

/// Parses a `page-sequence-master` into its ordered master references.
pub fn parse_page_sequence_master(element: &Element) -> Option<PageSequenceMaster> {
    let Some(name) = element.attr("master-name") else {
        log::warn!("Skipping <page-sequence-master> without master-name");
        return None;
    };
    let mut references = Vec::new();
    let mut push = |child: &Element, repetition: Repetition| match child.attr("master-reference") {
        Some(master) => references.push(PageMasterReference::new(master, repetition)),
        None => log::debug!("<{}> in '{}' has no master-reference", child.tag, name),
    };

    for child in element.child_elements() {
        match FoTag::from_name(&child.tag) {
            FoTag::SinglePageMasterReference => push(child, Repetition::Once),
            FoTag::RepeatablePageMasterReference => push(child, Repetition::Repeatable),
            FoTag::RepeatablePageMasterAlternatives => {
                for conditional in child.children_named("conditional-page-master-reference") {
                    let repetition = match conditional.attr("page-position") {
                        Some("first") => Repetition::First,
                        _ => Repetition::Repeatable,
                    };
                    push(conditional, repetition);
                }
            }
            _ => log::debug!("Ignoring <{}> in sequence master '{}'", child.tag, name),
        }
    }

    Some(PageSequenceMaster {
        name: name.to_string(),
        references,
    })
}

/// Parses every master of a `layout-master-set`.
pub fn parse_layout_master_set(element: &Element, defaults: &MasterDefaults) -> LayoutMasters {
    let mut masters = LayoutMasters::default();
    for child in element.child_elements() {
        match FoTag::from_name(&child.tag) {
            FoTag::SimplePageMaster => {
                if let Some(master) = parse_simple_page_master(child, defaults) {
                    masters.page_masters.insert(master.name.clone(), master);
                }
            }
            FoTag::PageSequenceMaster => {
                if let Some(sequence) = parse_page_sequence_master(child) {
                    masters.sequences.insert(sequence.name.clone(), sequence);
                }
            }
            _ => log::debug!("Ignoring <{}> in layout-master-set", child.tag),
        }
    }
    log::debug!(
        "Resolved {} page masters and {} sequence masters",
        masters.page_masters.len(),
        masters.sequences.len()
    );
    masters
}

#[cfg(test)]
mod tests {
    use super::*;
    use fomake_dom::parse_document;

    fn defaults() -> MasterDefaults {
        MasterDefaults {
            page_size: Size::new(595.28, 841.89),
            base_font_size: 10.0,
        }
    }

    const MASTERS: &str = r#"
        <fo:layout-master-set xmlns:fo="http://www.w3.org/1999/XSL/Format">
          <fo:simple-page-master master-name="first" page-width="8.5in" page-height="11in" margin="18pt">
            <fo:region-body margin-left="18pt" margin-right="18pt"/>
            <fo:region-before region-name="first-header" extent="1in"/>
            <fo:region-after extent="28.35pt" margin-top="34.02pt"/>
          </fo:simple-page-master>
          <fo:simple-page-master master-name="rest" margin-top="1cm">
            <fo:region-body/>
          </fo:simple-page-master>
          <fo:simple-page-master page-width="10in"/>
          <fo:page-sequence-master master-name="doc">
            <fo:repeatable-page-master-alternatives>
              <fo:conditional-page-master-reference page-position="first" master-reference="first"/>
              <fo:conditional-page-master-reference page-position="rest" master-reference="rest"/>
            </fo:repeatable-page-master-alternatives>
          </fo:page-sequence-master>
          <fo:page-sequence-master master-name="cover">
            <fo:single-page-master-reference master-reference="first"/>
            <fo:repeatable-page-master-reference master-reference="rest"/>
          </fo:page-sequence-master>
        </fo:layout-master-set>"#;

    #[test]
    fn parses_page_masters_and_regions() {
        let masters = parse_layout_master_set(&parse_document(MASTERS).unwrap(), &defaults());
        assert_eq!(masters.page_masters.len(), 2);

        let first = &masters.page_masters["first"];
        assert_eq!(first.page_size, Size::new(612.0, 792.0));
        assert_eq!(first.page_margin, EdgeInsets::all(18.0));
        assert_eq!(first.body.margins, EdgeInsets::new(18.0, 0.0, 18.0, 0.0));
        let header = first.header.as_ref().unwrap();
        assert_eq!(header.region_name, "first-header");
        assert_eq!(header.height, 72.0);
        let footer = first.footer.as_ref().unwrap();
        assert_eq!(footer.region_name, DEFAULT_FOOTER_REGION);
        assert!(first.calculated_page_margins.is_some());

        let rest = &masters.page_masters["rest"];
        assert_eq!(rest.page_size, defaults().page_size);
        assert!((rest.page_margin.top - 28.3465).abs() < 1e-3);
        assert_eq!(rest.header, None);
    }

    #[test]
    fn parses_sequence_references() {
        let masters = parse_layout_master_set(&parse_document(MASTERS).unwrap(), &defaults());
        let doc = &masters.sequences["doc"];
        assert_eq!(
            doc.references,
            vec![
                PageMasterReference::new("first", Repetition::First),
                PageMasterReference::new("rest", Repetition::Repeatable),
            ]
        );
        let cover = &masters.sequences["cover"];
        assert_eq!(cover.references[0].repetition, Repetition::Once);
    }

    #[test]
    fn pages_resolve_to_masters() {
        let masters = parse_layout_master_set(&parse_document(MASTERS).unwrap(), &defaults());
        assert_eq!(masters.master_for_page("doc", 1).map(|m| m.name.as_str()), Some("first"));
        assert_eq!(masters.master_for_page("doc", 5).map(|m| m.name.as_str()), Some("rest"));
        assert_eq!(masters.master_for_page("cover", 1).map(|m| m.name.as_str()), Some("first"));
        assert_eq!(masters.master_for_page("cover", 2).map(|m| m.name.as_str()), Some("rest"));
        assert_eq!(masters.master_for_page("rest", 3).map(|m| m.name.as_str()), Some("rest"));
        assert!(masters.master_for_page("missing", 1).is_none());
    }
}
