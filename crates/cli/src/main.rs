use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use protokoll_summary::{build_summary_view, detect_format, evaluate_poll};
use protokoll_summary::{PollOutcome, SummaryResponse};
use protokoll_tasks::{extract_action_tasks_with, rollup, ExtractionConfig, TaskStatus};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Protokoll meeting-summary toolchain.
#[derive(Parser)]
#[command(name = "protokoll", version, about = "Meeting summary normalization toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the format generation of a stored summary payload
    Detect {
        /// Path to the payload JSON file
        payload: PathBuf,
    },

    /// Normalize a summary payload to the canonical display view
    Normalize {
        /// Path to the payload JSON file
        payload: PathBuf,
        /// Meeting identifier (namespaces logging and derived ids)
        #[arg(long, default_value = "meeting")]
        meeting_id: String,
    },

    /// Evaluate one summary poll response from the backend
    Poll {
        /// Path to the poll response JSON file ({status, data?, error?})
        response: PathBuf,
        /// Meeting identifier
        #[arg(long, default_value = "meeting")]
        meeting_id: String,
    },

    /// Extract action tasks from meeting-notes markdown
    Tasks {
        /// Path to the markdown notes file
        notes: PathBuf,
        /// Meeting identifier (namespaces task ids)
        #[arg(long, default_value = "meeting")]
        meeting_id: String,
        /// Path to an extraction config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect { payload } => {
            cmd_detect(&payload, cli.output);
        }
        Commands::Normalize {
            payload,
            meeting_id,
        } => {
            cmd_normalize(&payload, &meeting_id, cli.output, cli.quiet);
        }
        Commands::Poll {
            response,
            meeting_id,
        } => {
            cmd_poll(&response, &meeting_id, cli.output);
        }
        Commands::Tasks {
            notes,
            meeting_id,
            config,
        } => {
            cmd_tasks(&notes, &meeting_id, config.as_deref(), cli.output, cli.quiet);
        }
    }
}

fn read_to_string(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error reading file '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn read_json(path: &Path) -> Value {
    let raw = read_to_string(path);
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("error parsing JSON in '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn print_pretty(value: &Value) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}

fn cmd_detect(payload_path: &Path, output: OutputFormat) {
    let payload = read_json(payload_path);
    let format = detect_format(&payload);
    match output {
        OutputFormat::Text => println!("format: {}", format),
        OutputFormat::Json => print_pretty(&json!({ "format": format.to_string() })),
    }
}

fn cmd_normalize(payload_path: &Path, meeting_id: &str, output: OutputFormat, quiet: bool) {
    let payload = read_json(payload_path);
    match build_summary_view(&payload, meeting_id) {
        Some(view) => {
            let value = match serde_json::to_value(&view) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("error serializing summary view: {}", e);
                    process::exit(1);
                }
            };
            print_pretty(&value);
        }
        None => match output {
            // Absence is a valid outcome, not an error.
            OutputFormat::Json => println!("null"),
            OutputFormat::Text => {
                if !quiet {
                    println!("no summary available");
                }
            }
        },
    }
}

fn cmd_poll(response_path: &Path, meeting_id: &str, output: OutputFormat) {
    let raw = read_json(response_path);
    let response: SummaryResponse = match serde_json::from_value(raw) {
        Ok(response) => response,
        Err(e) => {
            eprintln!(
                "error parsing poll response in '{}': {}",
                response_path.display(),
                e
            );
            process::exit(1);
        }
    };

    match evaluate_poll(&response, meeting_id) {
        PollOutcome::Pending(status) => match output {
            OutputFormat::Text => println!("pending ({})", status),
            OutputFormat::Json => {
                print_pretty(&json!({ "outcome": "pending", "status": status.to_string() }))
            }
        },
        PollOutcome::Failed { message } => {
            match output {
                OutputFormat::Text => eprintln!("failed: {}", message),
                OutputFormat::Json => {
                    print_pretty(&json!({ "outcome": "failed", "error": message }))
                }
            }
            process::exit(1);
        }
        PollOutcome::NoSummary => match output {
            OutputFormat::Text => println!("no summary available"),
            OutputFormat::Json => print_pretty(&json!({ "outcome": "no-summary" })),
        },
        PollOutcome::CompletedEmpty => match output {
            OutputFormat::Text => println!("completed, but the summary has no content"),
            OutputFormat::Json => print_pretty(&json!({ "outcome": "completed-empty" })),
        },
        PollOutcome::Completed { view, meeting_name } => {
            let view_value = serde_json::to_value(&view).unwrap_or(Value::Null);
            match output {
                OutputFormat::Text => {
                    if let Some(name) = &meeting_name {
                        println!("completed: {}", name);
                    } else {
                        println!("completed");
                    }
                    print_pretty(&view_value);
                }
                OutputFormat::Json => print_pretty(&json!({
                    "outcome": "completed",
                    "meeting_name": meeting_name,
                    "view": view_value,
                })),
            }
        }
    }
}

fn cmd_tasks(
    notes_path: &Path,
    meeting_id: &str,
    config_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let config = match config_path {
        Some(path) => {
            let raw = read_to_string(path);
            match ExtractionConfig::from_json_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("error in config '{}': {}", path.display(), e);
                    process::exit(1);
                }
            }
        }
        None => ExtractionConfig::default(),
    };

    let markdown = read_to_string(notes_path);
    let tasks = extract_action_tasks_with(&markdown, meeting_id, &config);

    match output {
        OutputFormat::Json => {
            let value = serde_json::to_value(&tasks).unwrap_or(Value::Null);
            print_pretty(&value);
        }
        OutputFormat::Text => {
            for task in &tasks {
                let marker = match task.status {
                    TaskStatus::Done => "[x]",
                    TaskStatus::Open => "[ ]",
                };
                match &task.due {
                    Some(due) => println!("{} {} (due: {})", marker, task.description, due),
                    None => println!("{} {}", marker, task.description),
                }
            }
            if !quiet {
                let counts = rollup(&tasks);
                println!(
                    "{} tasks: {} open, {} done",
                    counts.total, counts.open, counts.done
                );
            }
        }
    }
}
