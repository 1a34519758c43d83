//! Task line parsing.
//!
//! Turns the free-text body of an action-item section into structured
//! [`ActionTask`] records. Three line shapes occur in the wild: plain list
//! items, checkbox items, and markdown table rows. Ids are derived from the
//! filtered line index, so re-extraction from unchanged text yields the
//! same ids and a completion-tracking overlay keyed by id stays valid.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;

/// A markdown table separator: pipes, dashes, colons, whitespace only.
static TABLE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|[\s|:-]*-[\s|:-]*$").unwrap());

/// Leading list markers: `-`, `*`, digits + `.`, whitespace.
static LEADING_LIST_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*\d.\s]+").unwrap());

/// A checkbox token, consumed together with its trailing whitespace.
static CHECKBOX_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[ xX]\]\s*").unwrap());

/// A checked box anywhere in the line marks the task done.
static DONE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[x\]").unwrap());

/// Completion state of an extracted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
    Done,
}

/// One actionable line item extracted from meeting notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTask {
    /// Deterministic within one extraction run: `{ns}-line-{i}` or
    /// `{ns}-table-{i}` over the filtered line index.
    pub id: String,
    /// Non-empty after trimming.
    pub description: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

/// Aggregate counts for dashboard display across meetings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskRollup {
    pub total: usize,
    pub open: usize,
    pub done: usize,
}

pub fn rollup(tasks: &[ActionTask]) -> TaskRollup {
    let done = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .count();
    TaskRollup {
        total: tasks.len(),
        open: tasks.len() - done,
        done,
    }
}

/// Parse the body of an action-item section into tasks.
///
/// Lines are trimmed and empties dropped before classification; the line
/// index used for ids counts the surviving lines. A row with any populated
/// cell is never silently dropped.
pub fn parse_tasks(
    section: &str,
    id_namespace: &str,
    config: &ExtractionConfig,
) -> Vec<ActionTask> {
    let normalized = section.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut tasks = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if TABLE_SEPARATOR.is_match(line) {
            continue;
        }

        // Status derivation is independent of the line shape.
        let status = if DONE_TOKEN.is_match(line) {
            TaskStatus::Done
        } else {
            TaskStatus::Open
        };

        if line.starts_with('|') {
            if let Some(task) = parse_table_row(line, index, id_namespace, status, config) {
                tasks.push(task);
            }
            continue;
        }

        let without_markers = LEADING_LIST_MARKERS.replace(line, "");
        let description = CHECKBOX_TOKEN
            .replace(&without_markers, "")
            .trim()
            .to_string();
        if description.is_empty() {
            continue;
        }

        tasks.push(ActionTask {
            id: format!("{}-line-{}", id_namespace, index),
            description,
            status,
            due: None,
        });
    }

    tasks
}

fn parse_table_row(
    line: &str,
    index: usize,
    id_namespace: &str,
    status: TaskStatus,
    config: &ExtractionConfig,
) -> Option<ActionTask> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    while cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    if cells.is_empty() || is_header_row(&cells, config) {
        return None;
    }

    // Second cell is the description (owner | task | due layout); a row
    // whose only populated cell is the first still yields a task.
    let description = cells
        .get(1)
        .copied()
        .filter(|c| !c.is_empty())
        .or_else(|| cells.first().copied().filter(|c| !c.is_empty()))?;
    let due = cells
        .get(2)
        .copied()
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Some(ActionTask {
        id: format!("{}-table-{}", id_namespace, index),
        description: description.to_string(),
        status,
        due,
    })
}

/// A header row names both an owner column and a task column, in any
/// language variant the config lists.
fn is_header_row(cells: &[&str], config: &ExtractionConfig) -> bool {
    let folded: Vec<String> = cells
        .iter()
        .map(|cell| fold_diacritics(&cell.to_lowercase()))
        .collect();
    let contains_any = |keywords: &[String]| {
        keywords.iter().any(|keyword| {
            let needle = fold_diacritics(&keyword.to_lowercase());
            folded.iter().any(|cell| cell.contains(&needle))
        })
    };
    contains_any(&config.owner_keywords) && contains_any(&config.task_keywords)
}

/// Latin-1 diacritics fold, just enough for keyword matching across the
/// German/English header variants seen in historical documents.
pub(crate) fn fold_diacritics(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'ä' | 'à' | 'á' | 'â' | 'ã' | 'å' => 'a',
            'ö' | 'ò' | 'ó' | 'ô' | 'õ' => 'o',
            'ü' | 'ù' | 'ú' | 'û' => 'u',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ñ' => 'n',
            'ç' => 'c',
            'ß' => 's',
            other => other,
        })
        .collect()
}
