use crate::models::FileReport;
use crate::sanitize::Sanitizer;
use crate::scanner::ProcessResult;
use crate::utils::file::is_path_excluded;
use crate::utils::language::{FileKind, classify};
use anyhow::Error;
use glob::Pattern;
use indicatif::ProgressBar;
use log::{debug, warn};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Sanitize every classified file under `path` (or `path` itself if it is a
/// file). Files of one directory are handled in parallel; unclassified files
/// are not reported at all.
pub fn process<P: AsRef<Path>>(
    path: P,
    max_depth: usize,
    progress_bar: Arc<ProgressBar>,
    exclude_patterns: &[Pattern],
    sanitizer: &Sanitizer<'_>,
    dry_run: bool,
) -> Result<ProcessResult, Error> {
    let path = path.as_ref();

    if is_path_excluded(path, exclude_patterns) {
        return Ok(ProcessResult {
            files: Vec::new(),
            excluded_count: 1,
        });
    }

    let classes = &sanitizer.settings().files;

    if fs::metadata(path)?.is_file() {
        let files = match classify(path, classes) {
            Some(kind) => {
                let report = sanitizer.sanitize_file(path, kind, dry_run);
                progress_bar.inc(1);
                vec![report]
            }
            None => {
                debug!("Ignoring unclassified file {}", path.display());
                Vec::new()
            }
        };
        return Ok(ProcessResult {
            files,
            excluded_count: 0,
        });
    }

    let mut all_files = Vec::new();
    let mut total_excluded = 0;

    let entries: Vec<_> = fs::read_dir(path)?.filter_map(Result::ok).collect();

    let mut file_entries: Vec<(PathBuf, FileKind)> = Vec::new();
    let mut dir_entries = Vec::new();

    for entry in entries {
        let path = entry.path();

        if is_path_excluded(&path, exclude_patterns) {
            total_excluded += 1;
            continue;
        }

        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => {
                if let Some(kind) = classify(&path, classes) {
                    file_entries.push((path, kind));
                }
            }
            Ok(metadata) if metadata.is_dir() => dir_entries.push(path),
            _ => continue,
        }
    }

    file_entries.sort_by(|a, b| a.0.cmp(&b.0));
    dir_entries.sort();

    all_files.append(
        &mut file_entries
            .par_iter()
            .map(|(path, kind)| {
                let report: FileReport = sanitizer.sanitize_file(path, *kind, dry_run);
                progress_bar.inc(1);
                report
            })
            .collect(),
    );

    if max_depth > 0 {
        for path in dir_entries {
            match process(
                &path,
                max_depth - 1,
                progress_bar.clone(),
                exclude_patterns,
                sanitizer,
                dry_run,
            ) {
                Ok(mut result) => {
                    all_files.append(&mut result.files);
                    total_excluded += result.excluded_count;
                }
                Err(e) => warn!("Error processing directory {}: {}", path.display(), e),
            }
        }
    }

    Ok(ProcessResult {
        files: all_files,
        excluded_count: total_excluded,
    })
}
