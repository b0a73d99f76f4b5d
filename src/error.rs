use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a search index.
///
/// Queries never fail; every error surfaces at load time and no partial
/// index is ever returned alongside one.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The input does not decode into `{"docs": [...]}` with well-formed entries.
    #[error("malformed search index at line {line}, column {column}: {reason}")]
    Malformed {
        line: usize,
        column: usize,
        reason: String,
    },

    #[error("failed to read search index {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    pub(crate) fn malformed(line: usize, column: usize, reason: impl Into<String>) -> Self {
        IndexError::Malformed {
            line,
            column,
            reason: reason.into(),
        }
    }

    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        Self::malformed(err.line(), err.column(), strip_position(&err.to_string()))
    }

    /// True for the malformed-input variant.
    pub fn is_malformed(&self) -> bool {
        matches!(self, IndexError::Malformed { .. })
    }
}

/// serde_json appends " at line X column Y" to its messages; we report the
/// position separately.
fn strip_position(msg: &str) -> String {
    match msg.rfind(" at line ") {
        Some(pos) => msg[..pos].to_string(),
        None => msg.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
