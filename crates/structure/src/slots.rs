use crate::classify::is_should_run;
use fomake_model::{Applicability, ContentNode, HeaderFooterInfo};

/// One static flow placed in a header or footer, with its pre-built content.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEntry {
    pub information: HeaderFooterInfo,
    pub content: ContentNode,
}

impl SlotEntry {
    /// The entry's content when it applies to the page and is not empty.
    pub fn render(&self, current_page: i64, total_pages: i64) -> Option<&ContentNode> {
        if !is_should_run(Some(self.information.applicability), current_page, total_pages) {
            return None;
        }
        (!self.content.is_empty_text()).then_some(&self.content)
    }
}

/// The header (or footer) of a document: every classified entry in
/// declaration order, exposed as one page-indexed function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFooterSlot {
    entries: Vec<SlotEntry>,
}

impl HeaderFooterSlot {
    pub fn new(entries: Vec<SlotEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: SlotEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SlotEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The applicability of the slot as a whole. Entries that disagree make
    /// the slot `Custom`.
    pub fn applicability(&self) -> Option<Applicability> {
        let first = self.entries.first()?.information.applicability;
        if self.entries.iter().all(|e| e.information.applicability == first) {
            Some(first)
        } else {
            Some(Applicability::Custom)
        }
    }

    /// Content for a page: the first entry that applies and has content, or
    /// the empty string.
    pub fn render(&self, current_page: i64, total_pages: i64) -> ContentNode {
        self.entries
            .iter()
            .find_map(|entry| entry.render(current_page, total_pages))
            .cloned()
            .unwrap_or_else(ContentNode::empty)
    }
}
