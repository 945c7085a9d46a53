use serde::Serialize;

use crate::notice::AuthorSpanRegistry;
use crate::utils::language::FileKind;

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
    /// Already canonical.
    Unchanged,
    Rewritten,
    /// Dry run: the file is not canonical.
    WouldChange,
    /// Classified but not text; left alone.
    Skipped,
    Failed,
}

/// One author line of the synthesized header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCredit {
    pub author: String,
    pub years: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub status: FileStatus,
    /// Content differs from the canonical form (written unless dry run).
    pub changed: bool,
    pub authors: Vec<AuthorCredit>,
    pub unknown_addresses: Vec<String>,
    pub errors: Vec<String>,
}

impl FileReport {
    pub fn new(path: String, kind: FileKind, status: FileStatus) -> Self {
        FileReport {
            path,
            kind,
            status,
            changed: false,
            authors: Vec::new(),
            unknown_addresses: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn failed(path: String, kind: FileKind, error: impl ToString) -> Self {
        let mut report = FileReport::new(path, kind, FileStatus::Failed);
        report.errors.push(error.to_string());
        report
    }

    pub fn with_authors(mut self, registry: &AuthorSpanRegistry) -> Self {
        self.authors = registry
            .iter()
            .map(|(author, span)| AuthorCredit {
                author: author.to_string(),
                years: span.to_string(),
            })
            .collect();
        self
    }
}
