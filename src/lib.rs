pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod history;
pub mod models;
pub mod notice;
pub mod sanitize;
pub mod scanner;
pub mod utils;

pub use config::{Overrides, Settings};
pub use error::SanitizeError;
pub use history::{ContributionHistory, GitHistory, RawContribution};
pub use models::{ExtraData, FileReport, FileStatus, Header, Output};
pub use sanitize::{Sanitized, Sanitizer};
pub use scanner::{Counts, ProcessResult, count, process};
