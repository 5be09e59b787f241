//! # Workload Files
//!
//! Reads workload descriptions from disk.
//!
//! ## Format
//!
//! Text files hold one process per line:
//! - `arrival burst` or `arrival burst priority`
//! - Fields are separated by whitespace or commas
//! - `#` starts a comment, either on its own line or after the fields
//! - Blank lines are skipped
//!
//! Files ending in `.json` hold an array of objects instead:
//!
//! ```json
//! [
//!   { "arrival_time": 0, "burst_time": 5 },
//!   { "arrival_time": 1, "burst_time": 3, "priority": 2 }
//! ]
//! ```
//!
//! Values are signed so that out-of-range numbers reach the loader and are
//! rejected there with a proper workload error.
//!
//! ## Example
//!
//! ```text
//! # arrival burst priority
//! 0 5 1
//! 1 3 2    # interactive
//! 2,8,1
//! ```

use sim_scheduler::WorkloadEntry;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Workload file error types
#[derive(Debug, Error)]
pub enum WorkloadFileError {
    #[error("Failed to read workload file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid JSON workload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty workload")]
    EmptyWorkload,
}

/// On-disk encoding of a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadFormat {
    Text,
    Json,
}

impl WorkloadFormat {
    /// Picks the format from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => WorkloadFormat::Json,
            _ => WorkloadFormat::Text,
        }
    }
}

/// Reads and parses the workload at `path`
pub fn load_workload_file(path: &Path) -> Result<Vec<WorkloadEntry>, WorkloadFileError> {
    let text = fs::read_to_string(path)?;
    parse_workload(&text, WorkloadFormat::from_path(path))
}

pub fn parse_workload(
    text: &str,
    format: WorkloadFormat,
) -> Result<Vec<WorkloadEntry>, WorkloadFileError> {
    let entries = match format {
        WorkloadFormat::Text => parse_text(text)?,
        WorkloadFormat::Json => serde_json::from_str(text)?,
    };

    if entries.is_empty() {
        return Err(WorkloadFileError::EmptyWorkload);
    }
    Ok(entries)
}

/// Parses the line-based text format
pub fn parse_text(text: &str) -> Result<Vec<WorkloadEntry>, WorkloadFileError> {
    let mut entries = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        entries.push(parse_line(content, line_num + 1)?);
    }

    Ok(entries)
}

fn parse_line(line: &str, line_num: usize) -> Result<WorkloadEntry, WorkloadFileError> {
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .collect();

    if !(2..=3).contains(&fields.len()) {
        return Err(WorkloadFileError::ParseError {
            line: line_num,
            message: format!(
                "expected 'arrival burst [priority]', found {} fields",
                fields.len()
            ),
        });
    }

    let arrival = parse_field(fields[0], "arrival time", line_num)?;
    let burst = parse_field(fields[1], "burst time", line_num)?;
    let entry = WorkloadEntry::new(arrival, burst);

    match fields.get(2) {
        Some(priority) => Ok(entry.with_priority(parse_field(priority, "priority", line_num)?)),
        None => Ok(entry),
    }
}

fn parse_field(field: &str, name: &str, line_num: usize) -> Result<i64, WorkloadFileError> {
    field.parse().map_err(|_| WorkloadFileError::ParseError {
        line: line_num,
        message: format!("invalid {}: '{}'", name, field),
    })
}
