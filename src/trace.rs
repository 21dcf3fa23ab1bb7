//! Memory reference traces.
//!
//! A trace is an ordered list of `(pid, page)` access requests, one per
//! simulated tick. The driver feeds it to the engine access by access and,
//! for the optimal policy, registers the whole trace up front so victim
//! selection can look ahead.
//!
//! Text format: one `<pid> <page>` pair per line; blank lines and lines
//! starting with `#` are ignored.

use crate::memory::frame::PageNumber;
use crate::process::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// One simulated memory reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    pid: ProcessId,
    page: PageNumber,
}

impl AccessRequest {
    pub fn new(pid: impl Into<ProcessId>, page: PageNumber) -> Self {
        Self {
            pid: pid.into(),
            page,
        }
    }

    pub fn pid(&self) -> &ProcessId {
        &self.pid
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }
}

impl fmt::Display for AccessRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:P{}", self.pid, self.page)
    }
}

/// Errors raised while reading a trace.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Malformed trace line {line}: expected `<pid> <page>`, got {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("Invalid page number on trace line {line}: {content:?}")]
    InvalidPage { line: usize, content: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a text trace into access requests.
pub fn parse_trace(input: &str) -> Result<Vec<AccessRequest>, TraceError> {
    let mut requests = Vec::new();

    for (number, raw) in input.lines().enumerate() {
        let line = number + 1;
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let mut fields = content.split_whitespace();
        let (pid, page) = match (fields.next(), fields.next(), fields.next()) {
            (Some(pid), Some(page), None) => (pid, page),
            _ => {
                return Err(TraceError::MalformedLine {
                    line,
                    content: content.to_string(),
                })
            }
        };

        let page: PageNumber = page.parse().map_err(|_| TraceError::InvalidPage {
            line,
            content: content.to_string(),
        })?;
        requests.push(AccessRequest::new(pid, page));
    }

    Ok(requests)
}

/// Reads and parses a trace file.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<AccessRequest>, TraceError> {
    let input = std::fs::read_to_string(path)?;
    parse_trace(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_trace() {
        let trace = parse_trace("P1 0\nP1 1\nP2 0\n").unwrap();
        assert_eq!(
            trace,
            vec![
                AccessRequest::new("P1", 0),
                AccessRequest::new("P1", 1),
                AccessRequest::new("P2", 0),
            ]
        );
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let trace = parse_trace("# header\n\nP1 3\n  \n# tail\n").unwrap();
        assert_eq!(trace, vec![AccessRequest::new("P1", 3)]);
    }

    #[test]
    fn test_parse_rejects_malformed_line() {
        let err = parse_trace("P1 0\nP2\n").unwrap_err();
        match err {
            TraceError::MalformedLine { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_negative_page() {
        let err = parse_trace("P1 -4\n").unwrap_err();
        match err {
            TraceError::InvalidPage { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_trace_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "P1 0").unwrap();
        writeln!(file, "P2 7").unwrap();

        let trace = load_trace(file.path()).unwrap();
        assert_eq!(
            trace,
            vec![AccessRequest::new("P1", 0), AccessRequest::new("P2", 7)]
        );
    }
}
