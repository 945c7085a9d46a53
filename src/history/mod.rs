//! Contribution history of a file.
//!
//! The version control system is consulted through [`ContributionHistory`];
//! [`git::GitHistory`] is the implementation used by the command line tool.

pub mod git;

use std::path::Path;

use crate::error::Result;
use crate::notice::Year;

pub use git::{GitHistory, repository_root};

/// One revision that touched a file: who committed it and in which year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContribution {
    pub address: String,
    pub year: Year,
}

/// Source of per-file contribution records.
///
/// A failed query must be reported as an error; an empty vector means the
/// file genuinely has no recorded history.
pub trait ContributionHistory: Sync {
    fn contributions(&self, path: &Path) -> Result<Vec<RawContribution>>;
}
