//! Canonical in-memory summary representation.
//!
//! Every historical backend format is normalized into [`CanonicalSummary`]
//! (or passed through as [`SummaryView::Markdown`] / [`SummaryView::Structured`]
//! when already canonical). These types are transient: they are recomputed
//! from the authoritative backend payload on every fetch and never written
//! back.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Reserved payload key carrying the meeting title, never a section.
pub const MEETING_NAME_KEY: &str = "MeetingName";

/// Reserved payload key wrapping the legacy nested-section array.
pub const MEETING_NOTES_KEY: &str = "MeetingNotes";

/// Reserved pseudo-key carrying section display order in flat legacy payloads.
pub const SECTION_ORDER_KEY: &str = "_section_order";

/// One content block inside a summary section.
///
/// `content` is always trimmed and never absent; `color` is forced to
/// `"default"` during normalization. Fields the engine does not interpret
/// pass through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn default_color() -> String {
    "default".to_string()
}

impl Block {
    /// Normalize a raw block value. Non-object values carry no usable
    /// content and are dropped.
    pub fn from_raw(raw: &Value) -> Option<Block> {
        let obj = raw.as_object()?;
        let content = obj
            .get("content")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("")
            .to_string();
        let mut extra = obj.clone();
        extra.remove("content");
        extra.remove("color");
        Some(Block {
            content,
            color: default_color(),
            extra,
        })
    }
}

/// A titled, ordered run of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// Ordered section-key → section map.
///
/// Insertion order is the display order; each key appears exactly once.
/// Serializes as an object of key → section plus the [`SECTION_ORDER_KEY`]
/// pseudo-key, matching the legacy wire shape consumers already read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalSummary {
    sections: IndexMap<String, Section>,
}

impl CanonicalSummary {
    pub fn new() -> Self {
        CanonicalSummary::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sections.contains_key(key)
    }

    /// Insert a section under `key`. Callers resolve key collisions before
    /// inserting; inserting an existing key replaces the section in place.
    pub fn insert(&mut self, key: String, section: Section) {
        self.sections.insert(key, section);
    }

    pub fn get(&self, key: &str) -> Option<&Section> {
        self.sections.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The display order, reconstructible independently of the map itself.
    pub fn section_order(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    /// Whether any section holds at least one block. A completed summary
    /// where this is false is the "empty summary" state the UI surfaces
    /// instead of rendering a blank page.
    pub fn has_content(&self) -> bool {
        self.sections.values().any(|s| !s.blocks.is_empty())
    }
}

impl Serialize for CanonicalSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len() + 1))?;
        for (key, section) in &self.sections {
            map.serialize_entry(key, section)?;
        }
        map.serialize_entry(SECTION_ORDER_KEY, &self.section_order())?;
        map.end()
    }
}

/// Opaque markdown-document summary. When the backend produces this form
/// it supersedes structured-section handling entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownSummary {
    pub markdown: String,
}

/// The normalized view handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryView {
    /// Sections normalized from one of the legacy formats.
    Canonical(CanonicalSummary),
    /// Markdown document, rendered as-is.
    Markdown(MarkdownSummary),
    /// BlockNote-compatible `summary_json` payload, passed through unchanged.
    Structured(Value),
}

impl SummaryView {
    pub fn as_canonical(&self) -> Option<&CanonicalSummary> {
        match self {
            SummaryView::Canonical(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn as_markdown(&self) -> Option<&str> {
        match self {
            SummaryView::Markdown(doc) => Some(&doc.markdown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_from_raw_trims_and_forces_color() {
        let raw = json!({"content": "  Do X  ", "color": "red", "type": "bullet"});
        let block = Block::from_raw(&raw).unwrap();
        assert_eq!(block.content, "Do X");
        assert_eq!(block.color, "default");
        assert_eq!(block.extra.get("type"), Some(&json!("bullet")));
        assert!(!block.extra.contains_key("content"));
    }

    #[test]
    fn block_from_raw_missing_content_becomes_empty() {
        let block = Block::from_raw(&json!({"type": "bullet"})).unwrap();
        assert_eq!(block.content, "");
    }

    #[test]
    fn block_from_raw_rejects_non_objects() {
        assert!(Block::from_raw(&json!("just text")).is_none());
        assert!(Block::from_raw(&json!(null)).is_none());
    }

    #[test]
    fn summary_serializes_with_section_order() {
        let mut summary = CanonicalSummary::new();
        summary.insert(
            "B".to_string(),
            Section {
                title: "B".to_string(),
                blocks: vec![],
            },
        );
        summary.insert(
            "A".to_string(),
            Section {
                title: "A".to_string(),
                blocks: vec![],
            },
        );

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value[SECTION_ORDER_KEY], json!(["B", "A"]));
        assert_eq!(value["A"]["title"], "A");
    }

    #[test]
    fn has_content_requires_at_least_one_block() {
        let mut summary = CanonicalSummary::new();
        summary.insert(
            "Empty".to_string(),
            Section {
                title: "Empty".to_string(),
                blocks: vec![],
            },
        );
        assert!(!summary.has_content());

        summary.insert(
            "Full".to_string(),
            Section {
                title: "Full".to_string(),
                blocks: vec![Block {
                    content: "x".to_string(),
                    color: "default".to_string(),
                    extra: serde_json::Map::new(),
                }],
            },
        );
        assert!(summary.has_content());
    }
}
