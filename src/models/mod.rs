mod file_report;
mod output;

pub use file_report::{AuthorCredit, FileReport, FileStatus};
pub use output::{ExtraData, Header, Output, REPORT_FORMAT_VERSION};
