use rep_coach_core::models::{PoseFrame, SessionCommand};
use serde::Deserialize;
use thiserror::Error;

/// Errors reading the pose stream
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Malformed input line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Input line {line} is not valid UTF-8: {source}")]
    Encoding {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// One line of the pose stream produced by the pose estimator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerInput {
    Frame(PoseFrame),
    Command { command: SessionCommand },
}

/// Parse one JSON line; blank lines and `#` comments yield `None`
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<TrackerInput>, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| InputError::Malformed {
            line: line_number,
            source,
        })
}

/// Decode one raw line, then parse it like `parse_line`
pub fn parse_bytes(line_number: usize, bytes: &[u8]) -> Result<Option<TrackerInput>, InputError> {
    let line = std::str::from_utf8(bytes).map_err(|source| InputError::Encoding {
        line: line_number,
        source,
    })?;
    parse_line(line_number, line)
}
