//! Error type shared by the header rewriting pipeline.
//!
//! Every variant is scoped to a single file: the driver records it against
//! that file and keeps going with the rest of the batch.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SanitizeError {
    /// A contributor address that does not contain exactly one `@`.
    #[error("malformed contributor address {address:?}: expected exactly one '@'")]
    MalformedAddress { address: String },

    #[error("copyright notice has no year: {line:?}")]
    NoticeMissingYear { line: String },

    #[error("copyright notice has no holder: {line:?}")]
    NoticeMissingHolder { line: String },

    #[error("copyright notice year out of range in {line:?}")]
    NoticeYearOutOfRange { line: String },

    /// A header comment mentions `Copyright` but matches no notice idiom.
    #[error("unrecognized copyright notice: {line:?}")]
    UnrecognizedNotice { line: String },

    /// The file ends while a `/*` comment is still open.
    #[error("block comment opened on line {line} is never closed")]
    UnterminatedBlockComment { line: usize },

    #[error("no include guard or '#pragma once' found")]
    MissingIncludeGuard,

    #[error("include guard '#ifndef {ifndef}' is not followed by '#define {ifndef}'")]
    MismatchedIncludeGuard { ifndef: String },

    #[error("version control query failed for {path}: {reason}")]
    HistoryQuery { path: PathBuf, reason: String },

    #[error("malformed version control record {record:?}")]
    HistoryRecord { record: String },

    #[error("{path} is not inside repository root {root}")]
    OutsideRepository { path: PathBuf, root: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SanitizeError>;
