//! Purpose: Tree-query boundary over `roxmltree` documents.
//! Exports: `parse`, `XmlNode`, re-exported `Document`.
//! Role: Single seam for XML access so decoders never touch roxmltree directly.
//! Invariants: Path resolution is read-only and total; unmatched paths resolve to nothing.
//! Invariants: Attribute nodes carry only their value; child segments under them match nothing.

use crate::error::{Error, ErrorKind};

pub use roxmltree::Document;

/// Parse an XML document, mapping parser failures into this crate's error type.
pub fn parse(input: &str) -> Result<Document<'_>, Error> {
    Document::parse(input).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("malformed XML document")
            .with_source(err)
    })
}

/// One position in a document: an element or text node, or an attribute value.
///
/// Paths are `/`-separated relative addresses. `.` is the node itself,
/// `@name` selects an attribute, `text()` selects text children, and any
/// other segment selects child elements by tag name.
#[derive(Clone, Copy, Debug)]
pub enum XmlNode<'a, 'input> {
    Tree(roxmltree::Node<'a, 'input>),
    Attr(&'a str),
}

impl<'a, 'input> XmlNode<'a, 'input> {
    /// The document's root container node. Its children include the root
    /// element, so a schema root path like `"Root"` resolves from here.
    pub fn document_root(document: &'a Document<'input>) -> Self {
        Self::Tree(document.root())
    }

    pub fn find_one(&self, path: &str) -> Option<Self> {
        self.resolve(path).into_iter().next()
    }

    pub fn find_all(&self, path: &str) -> Vec<Self> {
        self.resolve(path)
    }

    /// String content of this node: an attribute's value, a text node's own
    /// text, or the first text child of an element. `None` when the element
    /// has no text child.
    pub fn text_value(&self) -> Option<String> {
        match self {
            Self::Attr(value) => Some((*value).to_string()),
            Self::Tree(node) if node.is_text() => node.text().map(str::to_string),
            Self::Tree(node) => node
                .children()
                .find(|child| child.is_text())
                .and_then(|child| child.text())
                .map(str::to_string),
        }
    }

    fn resolve(&self, path: &str) -> Vec<Self> {
        let mut current = vec![*self];
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            if segment == "." {
                continue;
            }
            let mut next = Vec::new();
            for node in &current {
                node.expand(segment, &mut next);
            }
            current = next;
            if current.is_empty() {
                break;
            }
        }
        current
    }

    fn expand(&self, segment: &str, out: &mut Vec<Self>) {
        let Self::Tree(node) = self else {
            return;
        };
        if segment == "text()" {
            out.extend(node.children().filter(|child| child.is_text()).map(Self::Tree));
        } else if let Some(name) = segment.strip_prefix('@') {
            if let Some(value) = node.attribute(name) {
                out.push(Self::Attr(value));
            }
        } else {
            out.extend(
                node.children()
                    .filter(|child| child.is_element() && child.tag_name().name() == segment)
                    .map(Self::Tree),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{XmlNode, parse};

    const SAMPLE: &str = r#"<Root><Name>John</Name><Badges><Badge id="1">a</Badge><Badge id="2">b</Badge></Badges></Root>"#;

    #[test]
    fn parse_rejects_malformed_input() {
        let err = parse("<Root><unclosed>").expect_err("should fail");
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }

    #[test]
    fn find_one_walks_nested_elements() {
        let doc = parse(SAMPLE).expect("parse");
        let root = XmlNode::document_root(&doc);
        let name = root.find_one("Root/Name").expect("name node");
        assert_eq!(name.text_value().as_deref(), Some("John"));
    }

    #[test]
    fn find_all_preserves_document_order() {
        let doc = parse(SAMPLE).expect("parse");
        let root = XmlNode::document_root(&doc);
        let badges = root.find_all("Root/Badges/Badge");
        let texts: Vec<_> = badges
            .iter()
            .map(|node| node.text_value().unwrap_or_default())
            .collect();
        assert_eq!(texts, ["a", "b"]);
    }

    #[test]
    fn attribute_segment_yields_attribute_value() {
        let doc = parse(SAMPLE).expect("parse");
        let root = XmlNode::document_root(&doc);
        let id = root.find_one("Root/Badges/Badge/@id").expect("attr");
        assert_eq!(id.text_value().as_deref(), Some("1"));
    }

    #[test]
    fn attribute_nodes_have_no_children() {
        let doc = parse(SAMPLE).expect("parse");
        let root = XmlNode::document_root(&doc);
        let id = root.find_one("Root/Badges/Badge/@id").expect("attr");
        assert!(id.find_one("anything").is_none());
        assert!(id.find_one(".").is_some());
    }

    #[test]
    fn text_segment_yields_text_nodes() {
        let doc = parse(SAMPLE).expect("parse");
        let root = XmlNode::document_root(&doc);
        let text = root.find_one("Root/Name/text()").expect("text node");
        assert_eq!(text.text_value().as_deref(), Some("John"));
    }

    #[test]
    fn dot_path_is_identity() {
        let doc = parse(SAMPLE).expect("parse");
        let root = XmlNode::document_root(&doc);
        let name = root.find_one("Root/Name").expect("name");
        let same = name.find_one(".").expect("self");
        assert_eq!(same.text_value(), name.text_value());
    }

    #[test]
    fn unmatched_path_resolves_to_nothing() {
        let doc = parse(SAMPLE).expect("parse");
        let root = XmlNode::document_root(&doc);
        assert!(root.find_one("Root/Missing").is_none());
        assert!(root.find_all("Root/Missing").is_empty());
    }
}
