//! Extraction configuration.
//!
//! Section titles and header-row keywords are heuristics tuned to observed
//! historical documents (German app versions plus legacy English ones), so
//! they are configuration rather than hardcoded logic, so future localized
//! titles only need a config change.

use serde::{Deserialize, Serialize};

/// Errors from loading an [`ExtractionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config document is not valid JSON for this shape.
    #[error("invalid extraction config: {0}")]
    Json(#[from] serde_json::Error),

    /// A keyword list was emptied out; extraction would match nothing.
    #[error("extraction config field '{field}' must not be empty")]
    EmptyList { field: &'static str },
}

/// Tunable word lists driving section lookup and table-header detection.
///
/// Unset fields fall back to the defaults, so a config file may override
/// just one list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Candidate action-item section titles, tried in order.
    pub section_titles: Vec<String>,
    /// Terms marking the "owner/responsible" column of a task table header.
    pub owner_keywords: Vec<String>,
    /// Terms marking the "task" column of a task table header.
    pub task_keywords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            section_titles: vec![
                "Aufgaben".to_string(),
                "Action Items".to_string(),
                "Nächste Schritte".to_string(),
                "Tasks".to_string(),
            ],
            owner_keywords: vec![
                "verantwortlich".to_string(),
                "zuständig".to_string(),
                "owner".to_string(),
                "wer".to_string(),
            ],
            task_keywords: vec![
                "aufgabe".to_string(),
                "task".to_string(),
                "todo".to_string(),
                "to-do".to_string(),
            ],
        }
    }
}

impl ExtractionConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<ExtractionConfig, ConfigError> {
        let config: ExtractionConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.section_titles.is_empty() {
            return Err(ConfigError::EmptyList {
                field: "section_titles",
            });
        }
        if self.owner_keywords.is_empty() {
            return Err(ConfigError::EmptyList {
                field: "owner_keywords",
            });
        }
        if self.task_keywords.is_empty() {
            return Err(ConfigError::EmptyList {
                field: "task_keywords",
            });
        }
        Ok(())
    }
}
