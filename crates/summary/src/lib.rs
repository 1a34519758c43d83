//! protokoll-summary: summary normalization engine.
//!
//! Ingests heterogeneous persisted/generated summary payloads (JSON or
//! markdown, across several historical format generations) and produces the
//! canonical in-memory representation the UI renders.
//!
//! # Public API
//!
//! Key entry points are re-exported at the crate root:
//!
//! - [`build_summary_view()`] -- full pipeline: raw payload → display view
//! - [`evaluate_poll()`] -- interpret one backend poll response
//! - [`detect_format()`] -- classify a payload without normalizing it
//! - [`CanonicalSummary`] -- the ordered-section display model
//!
//! The pipeline is pure and total: it holds no state between calls, does no
//! I/O, and degrades to "no summary" instead of failing on malformed input.

pub mod detect;
pub mod markdown;
pub mod normalize;
pub mod pipeline;
pub mod status;
pub mod types;

// ── Convenience re-exports: key types ────────────────────────────────

pub use types::{
    Block, CanonicalSummary, MarkdownSummary, Section, SummaryView, MEETING_NAME_KEY,
    MEETING_NOTES_KEY, SECTION_ORDER_KEY,
};

pub use detect::SummaryFormat;
pub use status::{PollOutcome, SummaryResponse, SummaryStatus};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use detect::detect_format;
pub use markdown::{clean_generated_markdown, extract_meeting_name};
pub use normalize::{normalize_section_array, normalize_section_map, unique_key};
pub use pipeline::{build_summary_view, meeting_name};
pub use status::evaluate_poll;
