//! The page-master graph: simple page masters with their regions, page
//! sequence masters that choose a master per page, and the derived
//! header/footer classification.

use fomake_types::{EdgeInsets, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A region of a page master. `height` is the region's extent; it is zero
/// for the body region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub region_name: String,
    pub height: f32,
    pub margins: EdgeInsets,
}

impl Region {
    pub fn new(region_name: impl Into<String>) -> Self {
        Self {
            region_name: region_name.into(),
            height: 0.0,
            margins: EdgeInsets::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMaster {
    pub name: String,
    pub page_size: Size,
    pub page_margin: EdgeInsets,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Region>,
    pub body: Region,
    /// Filled in by the margin calculator. Absent until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_page_margins: Option<EdgeInsets>,
}

impl PageMaster {
    /// The calculated margins, or the raw page margin when they have not been
    /// calculated.
    pub fn effective_margins(&self) -> EdgeInsets {
        self.calculated_page_margins.unwrap_or(self.page_margin)
    }

    /// Which static region, if any, carries the given flow name.
    pub fn region_kind(&self, flow_name: &str) -> Option<RegionKind> {
        if self
            .header
            .as_ref()
            .is_some_and(|r| r.region_name == flow_name)
        {
            Some(RegionKind::Header)
        } else if self
            .footer
            .as_ref()
            .is_some_and(|r| r.region_name == flow_name)
        {
            Some(RegionKind::Footer)
        } else {
            None
        }
    }

    pub fn region(&self, kind: RegionKind) -> Option<&Region> {
        match kind {
            RegionKind::Header => self.header.as_ref(),
            RegionKind::Footer => self.footer.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Repetition {
    /// Used for exactly one page at its position in the sequence.
    Once,
    /// Used for the first page only.
    First,
    /// Used for every remaining page.
    Repeatable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMasterReference {
    pub page_master_name: String,
    pub repetition: Repetition,
}

impl PageMasterReference {
    pub fn new(page_master_name: impl Into<String>, repetition: Repetition) -> Self {
        Self {
            page_master_name: page_master_name.into(),
            repetition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSequenceMaster {
    pub name: String,
    pub references: Vec<PageMasterReference>,
}

impl PageSequenceMaster {
    /// A sequence made of one page master repeated on every page; used when
    /// a page sequence names a simple page master directly.
    pub fn single(page_master_name: &str) -> Self {
        Self {
            name: page_master_name.to_string(),
            references: vec![PageMasterReference::new(
                page_master_name,
                Repetition::Repeatable,
            )],
        }
    }

    /// The repetition a reference behaves as. A single-page reference in
    /// leading position covers page 1 like a `First` reference; anywhere else
    /// it covers a later page, like the repeatable part.
    pub fn effective_repetition(&self, index: usize) -> Option<Repetition> {
        let reference = self.references.get(index)?;
        Some(match reference.repetition {
            Repetition::Once if index == 0 => Repetition::First,
            Repetition::Once => Repetition::Repeatable,
            other => other,
        })
    }

    pub fn has_first(&self) -> bool {
        (0..self.references.len())
            .any(|i| self.effective_repetition(i) == Some(Repetition::First))
    }

    /// The reference that governs the given 1-based page number.
    ///
    /// Page 1 belongs to the first `First` reference when one exists; every
    /// other page walks the single-page references in order and then falls
    /// through to the repeatable one.
    pub fn reference_for_page(&self, page: u32) -> Option<&PageMasterReference> {
        let page = page.max(1);
        if page == 1 {
            if let Some(first) = self
                .references
                .iter()
                .find(|r| r.repetition == Repetition::First)
            {
                return Some(first);
            }
        }

        let mut current = if self.references.iter().any(|r| r.repetition == Repetition::First) {
            2
        } else {
            1
        };
        for reference in &self.references {
            match reference.repetition {
                Repetition::First => continue,
                Repetition::Once => {
                    if current == page {
                        return Some(reference);
                    }
                    current += 1;
                }
                Repetition::Repeatable => return Some(reference),
            }
        }
        self.references.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionKind {
    Header,
    Footer,
}

/// Which pages a header or footer renders on.
///
/// `Custom` names a slot whose first and later pages use different flows. It
/// is never gated directly: the slot holds one `First` and one `Rest` entry
/// and the caller consults them in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Applicability {
    First,
    Rest,
    All,
    Custom,
}

impl Applicability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::First => "first",
            Applicability::Rest => "rest",
            Applicability::All => "all",
            Applicability::Custom => "custom",
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Applicability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Applicability::First),
            "rest" => Ok(Applicability::Rest),
            "all" => Ok(Applicability::All),
            "custom" => Ok(Applicability::Custom),
            _ => Err(format!("Unknown applicability: '{}'", s)),
        }
    }
}

/// Classification of one static-content flow within a page sequence master.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderFooterInfo {
    pub sequence_master_name: String,
    pub page_master_reference: String,
    pub region_name: String,
    pub kind: RegionKind,
    pub applicability: Applicability,
}

impl HeaderFooterInfo {
    pub fn is_header(&self) -> bool {
        self.kind == RegionKind::Header
    }

    pub fn is_footer(&self) -> bool {
        self.kind == RegionKind::Footer
    }
}
