//! Minimal rich-text documents.
//!
//! The platform stores `RichText` fields as a node tree. Imported values are
//! plain strings, so each becomes `document → paragraph → text`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextDocument {
    pub node_type: String,
    pub data: Map<String, Value>,
    pub content: Vec<RichTextNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextNode {
    pub node_type: String,
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<RichTextNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Value>>,
}

impl RichTextDocument {
    /// Wrap `text` in a single paragraph holding a single text node.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        let text_node = RichTextNode {
            node_type: "text".to_string(),
            data: Map::new(),
            content: None,
            value: Some(text.into()),
            marks: Some(Vec::new()),
        };
        let paragraph = RichTextNode {
            node_type: "paragraph".to_string(),
            data: Map::new(),
            content: Some(vec![text_node]),
            value: None,
            marks: None,
        };
        Self {
            node_type: "document".to_string(),
            data: Map::new(),
            content: vec![paragraph],
        }
    }
}
