//! The formatting-object vocabulary and the table that decides which child
//! elements inherit their parent's resolved style.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Every formatting object the converter knows about, keyed by local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoTag {
    Root,
    LayoutMasterSet,
    SimplePageMaster,
    RegionBody,
    RegionBefore,
    RegionAfter,
    RegionStart,
    RegionEnd,
    PageSequenceMaster,
    SinglePageMasterReference,
    RepeatablePageMasterReference,
    RepeatablePageMasterAlternatives,
    ConditionalPageMasterReference,
    PageSequence,
    StaticContent,
    Flow,
    Block,
    BlockContainer,
    Inline,
    Wrapper,
    BasicLink,
    ListBlock,
    ListItem,
    ListItemLabel,
    ListItemBody,
    Table,
    TableColumn,
    TableHeader,
    TableBody,
    TableFooter,
    TableRow,
    TableCell,
    #[serde(other)]
    Other,
}

impl FoTag {
    /// Maps a tag name to its variant. Namespace prefixes (`fo:`) are ignored.
    pub fn from_name(name: &str) -> FoTag {
        let local = name.rsplit(':').next().unwrap_or(name);
        match local {
            "root" => FoTag::Root,
            "layout-master-set" => FoTag::LayoutMasterSet,
            "simple-page-master" => FoTag::SimplePageMaster,
            "region-body" => FoTag::RegionBody,
            "region-before" => FoTag::RegionBefore,
            "region-after" => FoTag::RegionAfter,
            "region-start" => FoTag::RegionStart,
            "region-end" => FoTag::RegionEnd,
            "page-sequence-master" => FoTag::PageSequenceMaster,
            "single-page-master-reference" => FoTag::SinglePageMasterReference,
            "repeatable-page-master-reference" => FoTag::RepeatablePageMasterReference,
            "repeatable-page-master-alternatives" => FoTag::RepeatablePageMasterAlternatives,
            "conditional-page-master-reference" => FoTag::ConditionalPageMasterReference,
            "page-sequence" => FoTag::PageSequence,
            "static-content" => FoTag::StaticContent,
            "flow" => FoTag::Flow,
            "block" => FoTag::Block,
            "block-container" => FoTag::BlockContainer,
            "inline" => FoTag::Inline,
            "wrapper" => FoTag::Wrapper,
            "basic-link" => FoTag::BasicLink,
            "list-block" => FoTag::ListBlock,
            "list-item" => FoTag::ListItem,
            "list-item-label" => FoTag::ListItemLabel,
            "list-item-body" => FoTag::ListItemBody,
            "table" => FoTag::Table,
            "table-column" => FoTag::TableColumn,
            "table-header" => FoTag::TableHeader,
            "table-body" => FoTag::TableBody,
            "table-footer" => FoTag::TableFooter,
            "table-row" => FoTag::TableRow,
            "table-cell" => FoTag::TableCell,
            _ => FoTag::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FoTag::Root => "root",
            FoTag::LayoutMasterSet => "layout-master-set",
            FoTag::SimplePageMaster => "simple-page-master",
            FoTag::RegionBody => "region-body",
            FoTag::RegionBefore => "region-before",
            FoTag::RegionAfter => "region-after",
            FoTag::RegionStart => "region-start",
            FoTag::RegionEnd => "region-end",
            FoTag::PageSequenceMaster => "page-sequence-master",
            FoTag::SinglePageMasterReference => "single-page-master-reference",
            FoTag::RepeatablePageMasterReference => "repeatable-page-master-reference",
            FoTag::RepeatablePageMasterAlternatives => "repeatable-page-master-alternatives",
            FoTag::ConditionalPageMasterReference => "conditional-page-master-reference",
            FoTag::PageSequence => "page-sequence",
            FoTag::StaticContent => "static-content",
            FoTag::Flow => "flow",
            FoTag::Block => "block",
            FoTag::BlockContainer => "block-container",
            FoTag::Inline => "inline",
            FoTag::Wrapper => "wrapper",
            FoTag::BasicLink => "basic-link",
            FoTag::ListBlock => "list-block",
            FoTag::ListItem => "list-item",
            FoTag::ListItemLabel => "list-item-label",
            FoTag::ListItemBody => "list-item-body",
            FoTag::Table => "table",
            FoTag::TableColumn => "table-column",
            FoTag::TableHeader => "table-header",
            FoTag::TableBody => "table-body",
            FoTag::TableFooter => "table-footer",
            FoTag::TableRow => "table-row",
            FoTag::TableCell => "table-cell",
            FoTag::Other => "other",
        }
    }
}

/// Which child tags inherit the resolved style of a parent tag.
///
/// A child whose tag is not listed under its parent starts from an empty
/// inherited style. The table is plain data: it is built once and handed to
/// the transducer, and a configuration file may replace it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InheritanceConfig {
    inheriters: HashMap<FoTag, HashSet<FoTag>>,
}

impl InheritanceConfig {
    /// A table with no inheriters at all.
    pub fn empty() -> Self {
        Self {
            inheriters: HashMap::new(),
        }
    }

    pub fn with(mut self, parent: FoTag, children: &[FoTag]) -> Self {
        self.inheriters
            .entry(parent)
            .or_default()
            .extend(children.iter().copied());
        self
    }

    pub fn inherits(&self, parent: FoTag, child: FoTag) -> bool {
        self.inheriters
            .get(&parent)
            .is_some_and(|children| children.contains(&child))
    }

    pub fn inheriters_of(&self, parent: FoTag) -> impl Iterator<Item = FoTag> + '_ {
        self.inheriters
            .get(&parent)
            .into_iter()
            .flat_map(|children| children.iter().copied())
    }
}

impl Default for InheritanceConfig {
    fn default() -> Self {
        use FoTag::*;
        let inline_content = [Inline, BasicLink, Wrapper];
        let block_content = [Block, BlockContainer, Inline, BasicLink, Wrapper, ListBlock];

        InheritanceConfig::empty()
            .with(Flow, &block_content)
            .with(StaticContent, &block_content)
            .with(Block, &block_content)
            .with(BlockContainer, &block_content)
            .with(Inline, &inline_content)
            .with(BasicLink, &inline_content)
            .with(Wrapper, &block_content)
            .with(ListBlock, &[ListItem])
            .with(ListItem, &[ListItemLabel, ListItemBody])
            .with(ListItemLabel, &block_content)
            .with(ListItemBody, &block_content)
            .with(TableCell, &block_content)
    }
}
