use super::FileReport;
use serde::Serialize;

pub const REPORT_FORMAT_VERSION: &str = "1.0.0";

#[derive(Serialize, Debug)]
pub struct Output {
    pub headers: Vec<Header>,
    pub files: Vec<FileReport>,
}

#[derive(Serialize, Debug)]
pub struct Header {
    pub tool_name: String,
    pub tool_version: String,
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub duration: f64,
    pub dry_run: bool,
    pub extra_data: ExtraData,
    pub errors: Vec<String>,
    pub output_format_version: String,
}

#[derive(Serialize, Debug, Default, PartialEq, Eq)]
pub struct ExtraData {
    pub files_count: usize,
    pub directories_count: usize,
    pub excluded_count: usize,
    pub rewritten_count: usize,
    pub unchanged_count: usize,
    pub would_change_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
}
