// XML adapter: builds the owned element tree from markup text using roxmltree.
use crate::element::{Element, Node};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] roxmltree::Error),
}

/// Parses markup text and returns its root element.
///
/// Comments and processing instructions are dropped; text and CDATA become
/// [`Node::Text`]. Tag and attribute names keep only their local part.
pub fn parse_document(text: &str) -> Result<Element, DomError> {
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();
    log::debug!(
        "Parsed document with root <{}> ({} nodes)",
        root.tag_name().name(),
        doc.descendants().count()
    );
    Ok(convert(root))
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());
    element.attributes = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();
    element.children = node
        .children()
        .filter_map(|child| {
            if child.is_element() {
                Some(Node::Element(convert(child)))
            } else if child.is_text() {
                child.text().map(|t| Node::Text(t.to_string()))
            } else {
                None
            }
        })
        .collect();
    element
}
