//! Error type shared by the document model, typed accessors and file handle.

use std::path::PathBuf;

use super::parse::ParseError;
use super::typed::ValueKind;

/// Errors returned by INI document operations.
#[derive(Debug, thiserror::Error)]
pub enum IniError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("section [{0}] already exists")]
    DuplicateSection(String),
    #[error("key {key:?} already exists in section [{section}]")]
    DuplicateKey { section: String, key: String },
    #[error("key {key:?} with value {value:?} cannot be written to section [{section}]")]
    InvalidKeyValuePair {
        section: String,
        key: String,
        value: String,
    },
    #[error("section name {0:?} cannot be written as a header")]
    InvalidSectionName(String),
    #[error("section [{0}] not found")]
    SectionNotFound(String),
    #[error("key {key:?} not found in section [{section}]")]
    NotFound { section: String, key: String },
    #[error("malformed {kind} value {value:?} for key {key:?} in section [{section}]")]
    MalformedValue {
        section: String,
        key: String,
        value: String,
        kind: ValueKind,
    },
    #[error("{kind} value {value:?} for key {key:?} in section [{section}] is out of range")]
    OutOfRange {
        section: String,
        key: String,
        value: String,
        kind: ValueKind,
    },
    #[error("unsupported radix {0} (expected 10 or 16)")]
    UnsupportedRadix(u32),
    #[error("refusing to overwrite source file {}", .0.display())]
    OverwriteNotSupported(PathBuf),
}

/// Result alias defaulting to [`IniError`].
pub type Result<T, E = IniError> = std::result::Result<T, E>;
