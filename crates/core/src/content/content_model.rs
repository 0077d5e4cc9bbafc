use serde::{Deserialize, Serialize};

/// A node of a host content tree (e.g. a parsed web page).
///
/// The converter never adds or removes nodes; it only rewrites
/// [`TextNode::data`] in place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentNode {
    Text(TextNode),
    Element(ElementNode),
    Other(OtherNode),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub data: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Tag name, e.g. "div" or "script".
    pub kind: String,
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
    #[serde(default)]
    pub children: Vec<ContentNode>,
}

/// Comments, doctypes and anything else that is neither text nor element.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OtherNode {
    /// "#comment", "#doctype", ...
    pub kind: String,
    #[serde(default)]
    pub data: String,
}

impl ContentNode {
    pub fn text(data: impl Into<String>) -> Self {
        ContentNode::Text(TextNode { data: data.into() })
    }

    pub fn element(kind: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Element(ElementNode {
            kind: kind.into(),
            attributes: Vec::new(),
            children,
        })
    }

    pub fn comment(data: impl Into<String>) -> Self {
        ContentNode::Other(OtherNode {
            kind: OtherNode::COMMENT.to_string(),
            data: data.into(),
        })
    }

    /// Concatenated text of this node and its descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(text) => out.push_str(&text.data),
            ContentNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            ContentNode::Other(_) => {}
        }
    }
}

impl OtherNode {
    pub const COMMENT: &'static str = "#comment";
    pub const DOCTYPE: &'static str = "#doctype";
}
