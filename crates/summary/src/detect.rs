//! Summary payload format detection.
//!
//! Four format generations coexist in persisted summary data. Detection is
//! a single ordered classification over the decoded payload (more specific
//! shapes are checked before the generic flat-map fallback) and never
//! fails: anything unrecognizable degrades to [`SummaryFormat::NotAvailable`].

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::types::{MEETING_NOTES_KEY, SECTION_ORDER_KEY};

/// Classification of a raw summary payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    /// Undecodable or non-object payload; the caller shows "no summary yet".
    NotAvailable,
    /// Manual-edit format: `{ MeetingNotes: { sections: [...] } }`.
    LegacyNestedSections,
    /// BlockNote-compatible structured form carrying a `summary_json` field.
    StructuredJson,
    /// Markdown-document form: `{ markdown: "..." }`.
    MarkdownDocument,
    /// Anything else object-shaped, treated as a legacy flat section map.
    UnknownObject,
}

impl SummaryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryFormat::NotAvailable => "not-available",
            SummaryFormat::LegacyNestedSections => "legacy-nested-sections",
            SummaryFormat::StructuredJson => "structured-json",
            SummaryFormat::MarkdownDocument => "markdown-document",
            SummaryFormat::UnknownObject => "legacy-flat-sections",
        }
    }
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a possibly string-encoded payload.
///
/// The backend may return double-encoded JSON; exactly one decode pass is
/// applied. `None` means the string could not be parsed, never an error.
pub fn decode(raw: &Value) -> Option<Cow<'_, Value>> {
    match raw {
        Value::String(encoded) => serde_json::from_str(encoded).ok().map(Cow::Owned),
        other => Some(Cow::Borrowed(other)),
    }
}

/// Classify an already-decoded payload value.
pub fn classify(decoded: &Value) -> SummaryFormat {
    let Some(obj) = decoded.as_object() else {
        return SummaryFormat::NotAvailable;
    };

    let nested_sections = obj.get(MEETING_NOTES_KEY).and_then(|n| n.get("sections"));
    if nested_sections.is_some_and(Value::is_array) {
        return SummaryFormat::LegacyNestedSections;
    }

    if obj.contains_key("summary_json") {
        return SummaryFormat::StructuredJson;
    }

    if obj.get("markdown").is_some_and(Value::is_string) {
        return SummaryFormat::MarkdownDocument;
    }

    SummaryFormat::UnknownObject
}

/// Decode and classify in one step. Total over any input value.
pub fn detect_format(raw: &Value) -> SummaryFormat {
    match decode(raw) {
        Some(decoded) => classify(&decoded),
        None => SummaryFormat::NotAvailable,
    }
}

/// The section display order hint, when the payload carries one.
pub fn section_order_hint(obj: &serde_json::Map<String, Value>) -> Option<Vec<String>> {
    let order = obj.get(SECTION_ORDER_KEY)?.as_array()?;
    Some(
        order
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}
