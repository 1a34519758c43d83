//! Hygiene for generated markdown documents.
//!
//! Summary generation hands back raw model output; before the document is
//! stored or rendered it is stripped of reasoning blocks and stray outer
//! code fences. Both helpers are pure string transforms.

use once_cell::sync::Lazy;
use regex::Regex;

static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think(?:ing)?>.*?</think(?:ing)?>").unwrap());

/// Strip `<think>`/`<thinking>` blocks and a single outer code fence.
///
/// Only a fence wrapping the entire document is removed (```` ``` ````,
/// ```` ```markdown ````, …); fences inside the document survive.
pub fn clean_generated_markdown(markdown: &str) -> String {
    let without_thinking = THINK_BLOCK.replace_all(markdown, "");
    let trimmed = without_thinking.trim();

    if trimmed.starts_with("```") && trimmed.ends_with("```") {
        if let Some(first_newline) = trimmed.find('\n') {
            let inner = &trimmed[first_newline + 1..trimmed.len() - 3];
            return inner.trim().to_string();
        }
    }

    trimmed.to_string()
}

/// The meeting name is the first H1 heading of the document, if any.
pub fn extract_meeting_name(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_thinking_blocks() {
        let raw = "<think>internal</think># Notes\n- a";
        assert_eq!(clean_generated_markdown(raw), "# Notes\n- a");

        let raw = "<thinking>\nmulti\nline\n</thinking>\n# Notes";
        assert_eq!(clean_generated_markdown(raw), "# Notes");
    }

    #[test]
    fn strips_single_outer_fence() {
        let raw = "```markdown\n# Notes\n- a\n```";
        assert_eq!(clean_generated_markdown(raw), "# Notes\n- a");
    }

    #[test]
    fn keeps_inner_fences() {
        let raw = "# Notes\n```sh\nls\n```\ndone";
        assert_eq!(clean_generated_markdown(raw), raw);
    }

    #[test]
    fn unfenced_output_is_only_trimmed() {
        assert_eq!(clean_generated_markdown("  # Notes \n"), "# Notes");
    }

    #[test]
    fn meeting_name_from_first_h1() {
        assert_eq!(
            extract_meeting_name("intro\n# Weekly Sync \n# Second"),
            Some("Weekly Sync".to_string())
        );
        assert_eq!(extract_meeting_name("## only h2"), None);
        assert_eq!(extract_meeting_name("# "), None);
    }
}
