//! Pipeline orchestration: raw payload in, display-ready view out.
//!
//! [`build_summary_view`] is the single entry point the UI layer consumes.
//! It is pure, synchronous, and idempotent (safe to re-run on every poll
//! tick) and total: any input yields `Some(view)` or `None`, never a panic.

use serde_json::Value;
use tracing::debug;

use crate::detect::{self, SummaryFormat};
use crate::normalize::{normalize_section_array, normalize_section_map};
use crate::types::{MarkdownSummary, SummaryView, MEETING_NAME_KEY, MEETING_NOTES_KEY};

/// Build the display view for a raw summary payload.
///
/// `None` means "no summary yet": the caller renders the generate prompt,
/// not an error state.
pub fn build_summary_view(raw: &Value, meeting_id: &str) -> Option<SummaryView> {
    let decoded = detect::decode(raw)?;
    let format = detect::classify(&decoded);
    debug!(meeting_id = %meeting_id, format = %format, "classified summary payload");

    match format {
        SummaryFormat::NotAvailable => None,

        SummaryFormat::LegacyNestedSections => {
            let sections = decoded
                .get(MEETING_NOTES_KEY)
                .and_then(|n| n.get("sections"))
                .and_then(Value::as_array)?;
            Some(SummaryView::Canonical(normalize_section_array(sections)))
        }

        // Already canonical: pass through without reprocessing.
        SummaryFormat::StructuredJson => Some(SummaryView::Structured(decoded.into_owned())),
        SummaryFormat::MarkdownDocument => {
            let markdown = decoded.get("markdown")?.as_str()?.to_string();
            Some(SummaryView::Markdown(MarkdownSummary { markdown }))
        }

        SummaryFormat::UnknownObject => {
            let obj = decoded.as_object()?;
            let hint = detect::section_order_hint(obj);
            Some(SummaryView::Canonical(normalize_section_map(
                obj,
                hint.as_deref(),
            )))
        }
    }
}

/// Recover the meeting title carried alongside the sections, if any.
/// The UI uses it to retitle the meeting after generation completes.
pub fn meeting_name(raw: &Value) -> Option<String> {
    let decoded = detect::decode(raw)?;
    let name = decoded.get(MEETING_NAME_KEY)?.as_str()?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn undecodable_payload_yields_none() {
        assert!(build_summary_view(&json!("{not valid json"), "m1").is_none());
        assert!(build_summary_view(&json!(null), "m1").is_none());
    }

    #[test]
    fn structured_json_passes_through_unchanged() {
        let payload = json!({"summary_json": {"anything": [1, 2, {"deep": true}]}});
        let view = build_summary_view(&payload, "m1").unwrap();
        assert_eq!(view, SummaryView::Structured(payload));
    }

    #[test]
    fn markdown_document_passes_through() {
        let payload = json!({"markdown": "# Notes\n- point"});
        let view = build_summary_view(&payload, "m1").unwrap();
        assert_eq!(view.as_markdown(), Some("# Notes\n- point"));
    }

    #[test]
    fn nested_sections_are_normalized() {
        let payload = json!({
            "MeetingNotes": {"sections": [
                {"title": "Aufgaben", "blocks": [{"content": " Do X "}]}
            ]}
        });
        let view = build_summary_view(&payload, "m1").unwrap();
        let summary = view.as_canonical().unwrap();
        assert_eq!(summary.section_order(), vec!["Aufgaben".to_string()]);
        assert_eq!(summary.get("Aufgaben").unwrap().blocks[0].content, "Do X");
    }

    #[test]
    fn flat_map_uses_embedded_order_hint() {
        let payload = json!({
            "MeetingName": "Weekly",
            "_section_order": ["Zweiter", "Erster"],
            "Erster": {"title": "Erster", "blocks": []},
            "Zweiter": {"title": "Zweiter", "blocks": []}
        });
        let view = build_summary_view(&payload, "m1").unwrap();
        let keys: Vec<&str> = view.as_canonical().unwrap().keys().collect();
        assert_eq!(keys, vec!["Zweiter", "Erster"]);
    }

    #[test]
    fn meeting_name_extraction() {
        assert_eq!(
            meeting_name(&json!({"MeetingName": " Weekly Sync "})),
            Some("Weekly Sync".to_string())
        );
        assert_eq!(meeting_name(&json!({"MeetingName": "  "})), None);
        assert_eq!(meeting_name(&json!({"markdown": "x"})), None);
        assert_eq!(meeting_name(&json!("{broken")), None);
    }
}
