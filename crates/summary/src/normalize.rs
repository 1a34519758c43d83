//! Legacy section normalization.
//!
//! Rewrites both legacy payload shapes (the nested-section array from
//! manual edits and the flat top-level section map) into a
//! [`CanonicalSummary`]. Containment rule: one malformed section is skipped
//! (with a warning), never allowed to abort its siblings, and neither entry
//! point can fail.

use serde_json::Value;
use tracing::warn;

use crate::types::{
    Block, CanonicalSummary, Section, MEETING_NAME_KEY, SECTION_ORDER_KEY,
};

/// Resolve a key collision by appending `_2`, `_3`, … until unused.
///
/// The first occurrence of a duplicated title keeps the unqualified key.
pub fn unique_key(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let mut suffix = 2u32;
    loop {
        let candidate = format!("{}_{}", base, suffix);
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Derive the base key for a section title: whitespace runs become
/// underscores; blank titles fall back to a positional key.
fn section_key_base(title: &str, index: usize) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        format!("section_{}", index + 1)
    } else {
        trimmed.split_whitespace().collect::<Vec<_>>().join("_")
    }
}

/// Normalize a raw `blocks` field. Anything that is not an array yields an
/// empty block list; non-object elements are dropped.
fn normalize_blocks(raw: Option<&Value>) -> Vec<Block> {
    match raw.and_then(Value::as_array) {
        Some(blocks) => blocks.iter().filter_map(Block::from_raw).collect(),
        None => Vec::new(),
    }
}

/// Normalize the array form (`MeetingNotes.sections`).
///
/// Array order is display order. Missing or blank titles become
/// `Section {n}` (1-based); duplicate titles get suffixed keys.
pub fn normalize_section_array(sections: &[Value]) -> CanonicalSummary {
    let mut summary = CanonicalSummary::new();

    for (index, raw) in sections.iter().enumerate() {
        let Some(obj) = raw.as_object() else {
            warn!(index, "skipping non-object section element");
            continue;
        };

        let title = match obj.get("title").and_then(Value::as_str) {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => format!("Section {}", index + 1),
        };

        let base = section_key_base(&title, index);
        let key = unique_key(&base, |candidate| summary.contains_key(candidate));
        let blocks = normalize_blocks(obj.get("blocks"));
        summary.insert(key, Section { title, blocks });
    }

    summary
}

/// Normalize the flat-object form (legacy top-level section map).
///
/// Reserved keys are never sections. Iteration order comes from a non-empty
/// `order_hint` when supplied, else the map's own key order. A key named by
/// the hint but absent, already emitted, or not section-shaped is skipped.
pub fn normalize_section_map(
    map: &serde_json::Map<String, Value>,
    order_hint: Option<&[String]>,
) -> CanonicalSummary {
    let keys: Vec<String> = match order_hint {
        Some(hint) if !hint.is_empty() => hint.to_vec(),
        _ => map.keys().cloned().collect(),
    };

    let mut summary = CanonicalSummary::new();

    for key in &keys {
        if key == MEETING_NAME_KEY || key == SECTION_ORDER_KEY {
            continue;
        }
        if summary.contains_key(key) {
            // A duplicated hint entry must not be visited twice.
            continue;
        }
        let Some(raw) = map.get(key) else {
            continue;
        };
        let Some(obj) = raw.as_object() else {
            warn!(key = %key, "skipping non-object section value");
            continue;
        };
        if !obj.contains_key("title") || !obj.contains_key("blocks") {
            warn!(key = %key, "skipping section without title/blocks fields");
            continue;
        }

        let title = obj
            .get("title")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| key.clone());
        let blocks = normalize_blocks(obj.get("blocks"));
        summary.insert(key.clone(), Section { title, blocks });
    }

    summary
}
