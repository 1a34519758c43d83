//! Fetch/poll boundary: what one backend summary response means.
//!
//! A long-running generation job is polled by a caller-owned mechanism;
//! each response is evaluated independently here; no state is retained
//! between polls, so a late or repeated response simply replaces the prior
//! view.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pipeline;
use crate::types::SummaryView;

/// Wire status of a summary-generation process, parsed case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryStatus {
    Idle,
    Pending,
    Processing,
    Summarizing,
    Regenerating,
    Completed,
    Error,
    Failed,
    /// Unrecognized status, kept verbatim (lowercased) for display.
    Other(String),
}

impl SummaryStatus {
    pub fn from_wire(raw: &str) -> SummaryStatus {
        match raw.trim().to_lowercase().as_str() {
            "idle" => SummaryStatus::Idle,
            "pending" => SummaryStatus::Pending,
            "processing" => SummaryStatus::Processing,
            "summarizing" => SummaryStatus::Summarizing,
            "regenerating" => SummaryStatus::Regenerating,
            "completed" => SummaryStatus::Completed,
            "error" => SummaryStatus::Error,
            "failed" => SummaryStatus::Failed,
            other => SummaryStatus::Other(other.to_string()),
        }
    }

    /// Terminal states end polling; everything else means "keep waiting".
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SummaryStatus::Completed | SummaryStatus::Error | SummaryStatus::Failed
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SummaryStatus::Error | SummaryStatus::Failed)
    }
}

impl fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SummaryStatus::Idle => "idle",
            SummaryStatus::Pending => "pending",
            SummaryStatus::Processing => "processing",
            SummaryStatus::Summarizing => "summarizing",
            SummaryStatus::Regenerating => "regenerating",
            SummaryStatus::Completed => "completed",
            SummaryStatus::Error => "error",
            SummaryStatus::Failed => "failed",
            SummaryStatus::Other(other) => other,
        };
        f.write_str(s)
    }
}

/// One fetch-summary / poll response from the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, alias = "meetingName")]
    pub meeting_name: Option<String>,
}

/// What one poll response means for the consuming view.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Generation still running (or not started); keep polling.
    Pending(SummaryStatus),
    /// Backend-reported failure; `message` is surfaced verbatim.
    Failed { message: String },
    /// Completed but with no usable payload; show the generate prompt.
    NoSummary,
    /// Completed, but every normalized section is empty. Shown as a
    /// dedicated empty state rather than a blank successful summary.
    CompletedEmpty,
    /// Completed with a displayable view.
    Completed {
        view: SummaryView,
        meeting_name: Option<String>,
    },
}

/// Evaluate one poll response. Total over any response shape.
pub fn evaluate_poll(response: &SummaryResponse, meeting_id: &str) -> PollOutcome {
    let status = SummaryStatus::from_wire(response.status.as_deref().unwrap_or("idle"));

    if status.is_failure() {
        let message = response
            .error
            .clone()
            .unwrap_or_else(|| "summary generation failed".to_string());
        return PollOutcome::Failed { message };
    }

    if status != SummaryStatus::Completed {
        return PollOutcome::Pending(status);
    }

    let Some(data) = response.data.as_ref() else {
        return PollOutcome::NoSummary;
    };
    let Some(view) = pipeline::build_summary_view(data, meeting_id) else {
        return PollOutcome::NoSummary;
    };

    if let SummaryView::Canonical(summary) = &view {
        if !summary.has_content() {
            return PollOutcome::CompletedEmpty;
        }
    }

    let meeting_name = pipeline::meeting_name(data).or_else(|| response.meeting_name.clone());
    PollOutcome::Completed { view, meeting_name }
}
