//! `git log` backed contribution history.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use super::{ContributionHistory, RawContribution};
use crate::error::{Result, SanitizeError};

/// `%ae;%ad` with `%ad` formatted as the four digit year.
const LOG_FORMAT: &str = "--pretty=format:%ae;%ad";
const DATE_FORMAT: &str = "--date=format:%Y";

/// History of files inside one git working tree.
#[derive(Debug, Clone)]
pub struct GitHistory {
    root: PathBuf,
}

impl GitHistory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContributionHistory for GitHistory {
    fn contributions(&self, path: &Path) -> Result<Vec<RawContribution>> {
        debug!("Querying git log for {:?}", path);
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(["log", LOG_FORMAT, DATE_FORMAT, "--"])
            .arg(path)
            .output()
            .map_err(|e| SanitizeError::HistoryQuery {
                path: path.to_path_buf(),
                reason: format!("failed to execute git: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SanitizeError::HistoryQuery {
                path: path.to_path_buf(),
                reason: format!(
                    "git log exited with {:?}: {}",
                    output.status.code(),
                    stderr.trim()
                ),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| SanitizeError::HistoryQuery {
            path: path.to_path_buf(),
            reason: format!("git log output is not valid UTF-8: {}", e),
        })?;
        parse_log(&stdout)
    }
}

/// Parse `address;year` records, one per line. Blank lines are skipped.
pub fn parse_log(text: &str) -> Result<Vec<RawContribution>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| -> Result<RawContribution> {
            let malformed = || SanitizeError::HistoryRecord {
                record: line.to_string(),
            };
            let (address, year) = line.rsplit_once(';').ok_or_else(malformed)?;
            let year = year.trim().parse().map_err(|_| malformed())?;
            Ok(RawContribution {
                address: address.trim().to_string(),
                year,
            })
        })
        .collect()
}

/// Top level directory of the working tree containing `dir`.
pub fn repository_root(dir: &Path) -> Result<PathBuf> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .map_err(|e| SanitizeError::HistoryQuery {
            path: dir.to_path_buf(),
            reason: format!("failed to execute git: {}", e),
        })?;

    if !output.status.success() {
        return Err(SanitizeError::HistoryQuery {
            path: dir.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(PathBuf::from(
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
    ))
}
