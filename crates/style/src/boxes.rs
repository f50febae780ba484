//! Box properties that belong to a single node and never cascade.
use fomake_types::EdgeInsets;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PageBreak {
    Before,
    After,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<EdgeInsets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_break: Option<PageBreak>,
}

impl BoxProps {
    pub fn is_empty(&self) -> bool {
        self.margin.is_none() && self.page_break.is_none()
    }

    pub fn margin_mut(&mut self) -> &mut EdgeInsets {
        self.margin.get_or_insert_with(EdgeInsets::zero)
    }

    /// Fills in whatever `self` leaves unset from `other`.
    pub fn or(mut self, other: &BoxProps) -> BoxProps {
        if self.margin.is_none() {
            self.margin = other.margin;
        }
        if self.page_break.is_none() {
            self.page_break = other.page_break;
        }
        self
    }
}
