//! protokoll-tasks: action-item extraction from meeting-notes markdown.
//!
//! Locates the action-item section of a markdown summary (whatever heading
//! convention produced it) and parses its lines into typed [`ActionTask`]
//! records for the cross-meeting dashboard.
//!
//! # Public API
//!
//! - [`extract_action_tasks()`] -- locate + parse with the default config
//! - [`extract_action_tasks_with()`] -- same, with a custom [`ExtractionConfig`]
//! - [`locate_section()`] / [`parse_tasks()`] -- the two halves, separately

pub mod config;
pub mod parse;
pub mod section;

pub use config::{ConfigError, ExtractionConfig};
pub use parse::{parse_tasks, rollup, ActionTask, TaskRollup, TaskStatus};
pub use section::{locate_section, HeadingStyle, HEADING_STYLES};

/// Extract action tasks from a meeting's markdown notes.
///
/// `meeting_id` namespaces the task ids so ids stay unique across meetings
/// on the dashboard. Missing section or empty input yields an empty list,
/// never an error.
pub fn extract_action_tasks(markdown: &str, meeting_id: &str) -> Vec<ActionTask> {
    extract_action_tasks_with(markdown, meeting_id, &ExtractionConfig::default())
}

/// [`extract_action_tasks`] with a caller-supplied config.
pub fn extract_action_tasks_with(
    markdown: &str,
    meeting_id: &str,
    config: &ExtractionConfig,
) -> Vec<ActionTask> {
    match locate_section(markdown, &config.section_titles) {
        Some(body) => parse_tasks(&body, meeting_id, config),
        None => Vec::new(),
    }
}
