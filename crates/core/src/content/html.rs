//! HTML adapter built on `scraper`.
//!
//! Parses markup into a [`ContentNode`] tree and renders a tree back to
//! markup, so a page can be converted without a browser DOM.

use scraper::{ElementRef, Html, Node};

use super::content_model::{ContentNode, ElementNode, OtherNode, TextNode};

/// Kind of the synthetic root returned by [`parse_document`].
pub const DOCUMENT_KIND: &str = "#document";
/// Kind of the synthetic root returned by [`parse_fragment`].
pub const FRAGMENT_KIND: &str = "#fragment";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parses a complete page, doctype included.
pub fn parse_document(html: &str) -> ContentNode {
    let document = Html::parse_document(html);
    let children = document
        .tree
        .root()
        .children()
        .filter_map(|child| convert_node(child.value(), ElementRef::wrap(child)))
        .collect();

    ContentNode::Element(ElementNode {
        kind: DOCUMENT_KIND.to_string(),
        attributes: Vec::new(),
        children,
    })
}

/// Parses a snippet of body content.
pub fn parse_fragment(html: &str) -> ContentNode {
    let fragment = Html::parse_fragment(html);
    // The parser wraps fragment content in a synthetic <html> element.
    let children = convert_children(fragment.root_element());

    ContentNode::Element(ElementNode {
        kind: FRAGMENT_KIND.to_string(),
        attributes: Vec::new(),
        children,
    })
}

fn convert_children(element: ElementRef<'_>) -> Vec<ContentNode> {
    element
        .children()
        .filter_map(|child| convert_node(child.value(), ElementRef::wrap(child)))
        .collect()
}

fn convert_node(node: &Node, element: Option<ElementRef<'_>>) -> Option<ContentNode> {
    match node {
        Node::Text(text) => Some(ContentNode::Text(TextNode {
            data: String::from(&**text),
        })),
        Node::Element(value) => {
            let element = element?;
            Some(ContentNode::Element(ElementNode {
                kind: value.name().to_string(),
                attributes: value
                    .attrs()
                    .map(|(name, val)| (name.to_string(), val.to_string()))
                    .collect(),
                children: convert_children(element),
            }))
        }
        Node::Comment(comment) => Some(ContentNode::Other(OtherNode {
            kind: OtherNode::COMMENT.to_string(),
            data: String::from(&**comment),
        })),
        Node::Doctype(doctype) => Some(ContentNode::Other(OtherNode {
            kind: OtherNode::DOCTYPE.to_string(),
            data: doctype.name().to_string(),
        })),
        _ => None,
    }
}

impl ContentNode {
    /// Serializes the tree back to markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        render(self, &mut out, false);
        out
    }
}

fn render(node: &ContentNode, out: &mut String, raw_text: bool) {
    match node {
        ContentNode::Text(text) => {
            if raw_text {
                out.push_str(&text.data);
            } else {
                escape_into(&text.data, false, out);
            }
        }
        ContentNode::Element(element) => {
            if element.kind.starts_with('#') {
                for child in &element.children {
                    render(child, out, raw_text);
                }
                return;
            }

            out.push('<');
            out.push_str(&element.kind);
            for (name, value) in &element.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_into(value, true, out);
                out.push('"');
            }
            out.push('>');

            let kind = element.kind.to_ascii_lowercase();
            if VOID_ELEMENTS.contains(&kind.as_str()) {
                return;
            }

            let child_raw = RAW_TEXT_ELEMENTS.contains(&kind.as_str());
            for child in &element.children {
                render(child, out, child_raw);
            }
            out.push_str("</");
            out.push_str(&element.kind);
            out.push('>');
        }
        ContentNode::Other(other) => match other.kind.as_str() {
            OtherNode::COMMENT => {
                out.push_str("<!--");
                out.push_str(&other.data);
                out.push_str("-->");
            }
            OtherNode::DOCTYPE => {
                out.push_str("<!DOCTYPE ");
                out.push_str(&other.data);
                out.push('>');
            }
            _ => {}
        },
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_round_trip() {
        let html = r#"<div class="price"><p>From R 8,000 per night</p><!-- note --><br><script>if (a < b) {}</script></div>"#;
        assert_eq!(parse_fragment(html).to_html(), html);
    }

    #[test]
    fn test_fragment_structure() {
        let tree = parse_fragment("<p>Rooms <b>R 100</b></p>");
        let ContentNode::Element(root) = &tree else {
            panic!("fragment root must be an element");
        };
        assert_eq!(root.kind, FRAGMENT_KIND);
        assert_eq!(root.children.len(), 1);
        assert_eq!(tree.text_content(), "Rooms R 100");
    }

    #[test]
    fn test_text_is_escaped_on_render() {
        let tree = parse_fragment("<p>Fish &amp; chips &lt;R 50&gt;</p>");
        assert_eq!(tree.text_content(), "Fish & chips <R 50>");
        assert_eq!(tree.to_html(), "<p>Fish &amp; chips &lt;R 50&gt;</p>");
    }

    #[test]
    fn test_document_keeps_doctype() {
        let tree = parse_document("<!DOCTYPE html><html><head></head><body>R 5</body></html>");
        let html = tree.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<body>R 5</body>"));
    }
}
