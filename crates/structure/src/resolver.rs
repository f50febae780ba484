use crate::classify::get_header_footer_information;
use crate::document::{DocumentDefinition, DocumentMetadata, DocumentStructure};
use crate::masters::{DEFAULT_BODY_REGION, LayoutMasters, MasterDefaults, parse_layout_master_set};
use crate::slots::{HeaderFooterSlot, SlotEntry};
use fomake_dom::Element;
use fomake_model::{ContentNode, PageMaster, RegionKind, StackBlock};
use fomake_style::{FoTag, PageBreak};
use fomake_transduce::{TransduceOptions, Transducer};
use fomake_types::{EdgeInsets, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverOptions {
    /// Flow converted when no flow name is given.
    pub body_flow_name: String,
    /// Page size of masters that set no `page-width`/`page-height`, and of
    /// documents without any master.
    pub default_page_size: Size,
    pub transduce: TransduceOptions,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            body_flow_name: DEFAULT_BODY_REGION.to_string(),
            default_page_size: Size::new(595.28, 841.89),
            transduce: TransduceOptions::default(),
        }
    }
}

/// Resolves the page structure of a document and converts its flows.
#[derive(Debug, Clone, Default)]
pub struct StructureResolver {
    options: ResolverOptions,
    transducer: Transducer,
}

impl StructureResolver {
    pub fn new(options: ResolverOptions) -> Self {
        let transducer = Transducer::new(options.transduce.clone());
        Self { options, transducer }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn transducer(&self) -> &Transducer {
        &self.transducer
    }

    /// Parses every `layout-master-set` of the document.
    pub fn resolve_masters(&self, document: &Element) -> LayoutMasters {
        let defaults = MasterDefaults {
            page_size: self.options.default_page_size,
            base_font_size: self.options.transduce.base_font_size,
        };
        let mut masters = LayoutMasters::default();
        for set in document.children_named("layout-master-set") {
            let parsed = parse_layout_master_set(set, &defaults);
            masters.page_masters.extend(parsed.page_masters);
            masters.sequences.extend(parsed.sequences);
        }
        masters
    }

    /// Resolves masters and classifies every `static-content` of every page
    /// sequence into the header or footer slot.
    pub fn resolve_structure(&self, document: &Element) -> DocumentStructure {
        let masters = self.resolve_masters(document);
        let mut headers = HeaderFooterSlot::default();
        let mut footers = HeaderFooterSlot::default();

        for sequence in page_sequences(document) {
            let Some(master_reference) = sequence.attr("master-reference") else {
                log::warn!("<page-sequence> without master-reference");
                continue;
            };
            if masters.sequence(master_reference).is_none() {
                log::warn!("<page-sequence> references unknown master '{}'", master_reference);
                continue;
            }

            for flow in sequence.children_named("static-content") {
                let flow_name = flow.attr("flow-name").unwrap_or_default();
                let Some(information) =
                    get_header_footer_information(&masters, master_reference, flow_name)
                else {
                    log::debug!("Static content '{}' is neither header nor footer", flow_name);
                    continue;
                };
                let master = masters.page_masters.get(&information.page_master_reference);
                let content = region_content(self.transducer.transduce_flow(flow), master, information.kind);
                let slot = match information.kind {
                    RegionKind::Header => &mut headers,
                    RegionKind::Footer => &mut footers,
                };
                slot.push(SlotEntry { information, content });
            }
        }

        DocumentStructure {
            masters,
            headers,
            footers,
        }
    }

    /// Converts the flow with the given name, or the body flow, across all
    /// page sequences. Content of every sequence after the first starts on a
    /// new page. A document without such a flow yields no content.
    pub fn convert_flow(&self, document: &Element, flow_name: Option<&str>) -> Vec<ContentNode> {
        let flow_name = flow_name.unwrap_or(self.options.body_flow_name.as_str());
        let mut content = Vec::new();

        for sequence in page_sequences(document) {
            let items: Vec<ContentNode> = sequence
                .child_elements()
                .filter(|child| {
                    matches!(FoTag::from_name(&child.tag), FoTag::Flow | FoTag::StaticContent)
                        && child.attr("flow-name") == Some(flow_name)
                })
                .flat_map(|flow| self.transducer.transduce_flow(flow))
                .collect();
            if items.is_empty() {
                continue;
            }
            if content.is_empty() {
                content = items;
            } else {
                let mut next = StackBlock::new(items);
                next.boxes.page_break = Some(PageBreak::Before);
                content.push(ContentNode::Stack(next));
            }
        }
        content
    }

    /// Converts a whole document. Page size and margins come from the master
    /// governing the first page of the first page sequence.
    pub fn build_document(&self, document: &Element) -> DocumentDefinition {
        if !document.is("root") {
            log::warn!("Document element is <{}>, expected <root>", document.tag);
        }
        let structure = self.resolve_structure(document);
        let content = self.convert_flow(document, None);

        let first_master = page_sequences(document)
            .filter_map(|s| s.attr("master-reference"))
            .find_map(|name| structure.masters.master_for_page(name, 1));
        let (page_size, page_margins) = match first_master {
            Some(master) => (master.page_size, master.effective_margins()),
            None => (self.options.default_page_size, EdgeInsets::zero()),
        };

        let DocumentStructure {
            masters,
            headers,
            footers,
        } = structure;
        DocumentDefinition {
            page_size,
            page_margins,
            content,
            header: (!headers.is_empty()).then_some(headers),
            footer: (!footers.is_empty()).then_some(footers),
            metadata: DocumentMetadata {
                page_masters: masters.page_masters,
            },
        }
    }
}

fn page_sequences(document: &Element) -> impl Iterator<Item = &Element> {
    document
        .child_elements()
        .filter(|e| FoTag::from_name(&e.tag) == FoTag::PageSequence)
}

/// Wraps a region's content in a stack positioned within the page margins.
fn region_content(items: Vec<ContentNode>, master: Option<&PageMaster>, kind: RegionKind) -> ContentNode {
    if items.is_empty() {
        return ContentNode::empty();
    }
    let mut stack = StackBlock::new(items);
    if let Some(master) = master {
        let page = master.page_margin;
        let margin = match kind {
            RegionKind::Header => EdgeInsets::new(page.left, page.top, page.right, 0.0),
            RegionKind::Footer => {
                let gap = master.footer.as_ref().map_or(0.0, |f| f.margins.top);
                EdgeInsets::new(page.left, gap, page.right, page.bottom)
            }
        };
        if !margin.is_zero() {
            stack.boxes.margin = Some(margin);
        }
    }
    ContentNode::Stack(stack)
}
