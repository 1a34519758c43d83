//! Markdown section location.
//!
//! Source documents were produced across several app versions with two
//! heading conventions: bold pseudo-headings (`**Aufgaben**`) and ATX
//! headings (`# Aufgaben`, `## Aufgaben`). The conventions form an explicit
//! ordered strategy list; appending a new [`HeadingStyle`] variant is all a
//! future convention needs.

/// One heading convention the locator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// A line that is entirely `**Title**`.
    Bold,
    /// A line starting with one or more `#` followed by the title.
    Atx,
}

/// Strategy order: bold headings are the current generation's convention,
/// ATX the older fallback.
pub const HEADING_STYLES: [HeadingStyle; 2] = [HeadingStyle::Bold, HeadingStyle::Atx];

/// Find the body of the first section matching any candidate title.
///
/// All candidates are tried under one style before falling back to the
/// next. Title matching is case-insensitive. The body runs to the next
/// heading of the same style or end of document; a whitespace-only body
/// counts as not-found so later candidates still get a chance.
pub fn locate_section<S: AsRef<str>>(markdown: &str, titles: &[S]) -> Option<String> {
    if markdown.trim().is_empty() {
        return None;
    }
    let normalized = markdown.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    for style in HEADING_STYLES {
        for title in titles {
            if let Some(body) = extract(&lines, style, title.as_ref()) {
                return Some(body);
            }
        }
    }
    None
}

fn extract(lines: &[&str], style: HeadingStyle, title: &str) -> Option<String> {
    for (index, line) in lines.iter().enumerate() {
        if !matches_heading(line, style, title) {
            continue;
        }

        let mut body_lines: Vec<&str> = Vec::new();
        for &line in &lines[index + 1..] {
            if terminates_section(line, style) {
                break;
            }
            body_lines.push(line);
        }

        let body = body_lines.join("\n");
        if !body.trim().is_empty() {
            return Some(body);
        }
        // Blank section under this heading: keep scanning for a later
        // occurrence of the same title.
    }
    None
}

fn matches_heading(line: &str, style: HeadingStyle, title: &str) -> bool {
    let trimmed = line.trim();
    match style {
        HeadingStyle::Bold => {
            trimmed.len() > 4
                && trimmed.starts_with("**")
                && trimmed.ends_with("**")
                && trimmed[2..trimmed.len() - 2].trim().to_lowercase() == title.to_lowercase()
        }
        HeadingStyle::Atx => {
            let stripped = trimmed.trim_start_matches('#');
            stripped.len() != trimmed.len()
                && stripped.trim().to_lowercase() == title.to_lowercase()
        }
    }
}

/// Whether `line` starts the next section under the given style.
fn terminates_section(line: &str, style: HeadingStyle) -> bool {
    match style {
        HeadingStyle::Bold => line
            .strip_prefix("**")
            .is_some_and(|rest| rest.find("**").is_some_and(|i| i > 0)),
        HeadingStyle::Atx => line.starts_with('#'),
    }
}
