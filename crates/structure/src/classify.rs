//! Header/footer classification: which pages of a sequence a static flow
//! renders on.

use crate::masters::LayoutMasters;
use fomake_model::{Applicability, HeaderFooterInfo, PageSequenceMaster, RegionKind, Repetition};

/// How a flow name is bound across the references of a sequence master.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub kind: RegionKind,
    pub applicability: Applicability,
    /// The first page master whose region carries the flow.
    pub page_master_reference: String,
}

/// Classifies a flow within a sequence master.
///
/// A flow bound under both the first-page and the repeating references
/// renders on every page. Bound only under the first-page reference it is
/// `First`; only under the repeating reference it is `Rest`, or `All` when
/// the sequence has no first-page reference at all. Unknown masters and
/// empty flow names classify as nothing.
pub fn classify_applicability(
    sequence: &PageSequenceMaster,
    masters: &LayoutMasters,
    flow_name: &str,
) -> Option<Classification> {
    if flow_name.is_empty() {
        return None;
    }

    let mut bound_first = false;
    let mut bound_repeat = false;
    let mut found: Option<(RegionKind, &str)> = None;

    for (index, reference) in sequence.references.iter().enumerate() {
        let Some(master) = masters.page_masters.get(&reference.page_master_name) else {
            log::debug!(
                "Sequence '{}' references unknown page master '{}'",
                sequence.name,
                reference.page_master_name
            );
            continue;
        };
        let Some(kind) = master.region_kind(flow_name) else {
            continue;
        };
        match sequence.effective_repetition(index) {
            Some(Repetition::First) => bound_first = true,
            Some(_) => bound_repeat = true,
            None => continue,
        }
        found.get_or_insert((kind, reference.page_master_name.as_str()));
    }

    let (kind, page_master) = found?;
    let applicability = match (bound_first, bound_repeat) {
        (true, true) => Applicability::All,
        (true, false) => Applicability::First,
        (false, true) if sequence.has_first() => Applicability::Rest,
        (false, true) => Applicability::All,
        (false, false) => return None,
    };
    Some(Classification {
        kind,
        applicability,
        page_master_reference: page_master.to_string(),
    })
}

/// Whether content with the given applicability renders on a page.
///
/// `All` renders on every page number, including zero and negative ones.
/// `Custom` and a missing classification never render directly.
pub fn is_should_run(applicability: Option<Applicability>, current_page: i64, _total_pages: i64) -> bool {
    match applicability {
        Some(Applicability::All) => true,
        Some(Applicability::First) => current_page == 1,
        Some(Applicability::Rest) => current_page >= 2,
        Some(Applicability::Custom) | None => false,
    }
}

/// Header/footer information for a flow of a page sequence that references
/// `sequence_name`, or `None` when the flow is neither.
pub fn get_header_footer_information(
    masters: &LayoutMasters,
    sequence_name: &str,
    flow_name: &str,
) -> Option<HeaderFooterInfo> {
    let Some(sequence) = masters.sequence(sequence_name) else {
        log::debug!("No master named '{}'", sequence_name);
        return None;
    };
    let classification = classify_applicability(&sequence, masters, flow_name)?;
    Some(HeaderFooterInfo {
        sequence_master_name: sequence_name.to_string(),
        page_master_reference: classification.page_master_reference,
        region_name: flow_name.to_string(),
        kind: classification.kind,
        applicability: classification.applicability,
    })
}
