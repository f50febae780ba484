use crate::masters::LayoutMasters;
use crate::slots::HeaderFooterSlot;
use fomake_model::{ContentNode, PageMaster};
use fomake_types::{EdgeInsets, Size};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything resolved from a document before its body is converted: the
/// masters and the classified header and footer entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStructure {
    pub masters: LayoutMasters,
    pub headers: HeaderFooterSlot,
    pub footers: HeaderFooterSlot,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub page_masters: BTreeMap<String, PageMaster>,
}

/// The converted document, in the renderer's document-definition shape.
///
/// The header and footer are page-indexed functions on the renderer side
/// and are not serialized; call [`DocumentDefinition::header_for`] and
/// [`DocumentDefinition::footer_for`] instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    pub page_size: Size,
    pub page_margins: EdgeInsets,
    pub content: Vec<ContentNode>,
    #[serde(skip)]
    pub header: Option<HeaderFooterSlot>,
    #[serde(skip)]
    pub footer: Option<HeaderFooterSlot>,
    pub metadata: DocumentMetadata,
}

impl DocumentDefinition {
    pub fn header_for(&self, current_page: i64, total_pages: i64) -> ContentNode {
        self.header
            .as_ref()
            .map_or_else(ContentNode::empty, |slot| slot.render(current_page, total_pages))
    }

    pub fn footer_for(&self, current_page: i64, total_pages: i64) -> ContentNode {
        self.footer
            .as_ref()
            .map_or_else(ContentNode::empty, |slot| slot.render(current_page, total_pages))
    }
}
