//! Rich-text documents and plain-text extraction.
//!
//! The CMS stores rich text as a recursive node tree:
//! `{ root: { children: [ paragraph { children: [ run { text } ] } ] } }`.
//! Only the text content is modelled here; formatting, direction and
//! version attributes are ignored on input.

use serde::{Deserialize, Serialize};

/// A rich-text document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    /// Root node; its children are the paragraphs.
    pub root: RichTextNode,
}

/// A node of the rich-text tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextNode {
    /// Node type (e.g. `paragraph`, `text`, `link`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Text content of a leaf run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RichTextNode>,
}

impl RichTextNode {
    /// Creates a text run.
    pub fn run(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".into()),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Creates a paragraph from its runs.
    pub fn paragraph(runs: impl IntoIterator<Item = RichTextNode>) -> Self {
        Self {
            kind: Some("paragraph".into()),
            text: None,
            children: runs.into_iter().collect(),
        }
    }

    /// Appends the text of this node and all its descendants to `out`.
    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

impl RichText {
    /// Creates a document with one paragraph per item, each a single run.
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let children = paragraphs
            .into_iter()
            .map(|text| RichTextNode::paragraph([RichTextNode::run(text)]))
            .collect();

        Self {
            root: RichTextNode {
                kind: Some("root".into()),
                text: None,
                children,
            },
        }
    }

    /// Returns the text of every paragraph, in order.
    pub fn paragraphs(&self) -> Vec<String> {
        self.root
            .children
            .iter()
            .map(|paragraph| {
                let mut text = String::new();
                paragraph.collect_text(&mut text);
                text
            })
            .collect()
    }

    /// Returns true if the document holds no text at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Flattens the document into a single string.
    ///
    /// Folds over every paragraph and every run, including runs nested in
    /// inline nodes such as links, and concatenates them without a
    /// separator.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for paragraph in &self.root.children {
            paragraph.collect_text(&mut text);
        }
        text
    }
}

/// Extracts the plain text of an optional rich-text field.
pub fn extract_plain_text(rich_text: Option<&RichText>) -> String {
    rich_text.map(RichText::plain_text).unwrap_or_default()
}
