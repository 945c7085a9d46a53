use crate::config::FileClasses;
use crate::utils::file::is_path_excluded;
use crate::utils::language::classify;
use glob::Pattern;
use std::fs;
use std::path::Path;

/// Totals of a dry walk, used to size the progress bar and the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    /// Files whose kind is known.
    pub files: usize,
    pub directories: usize,
    pub excluded: usize,
}

pub fn count<P: AsRef<Path>>(
    path: P,
    max_depth: usize,
    exclude_patterns: &[Pattern],
    classes: &FileClasses,
) -> std::io::Result<Counts> {
    let path = path.as_ref();

    if is_path_excluded(path, exclude_patterns) {
        return Ok(Counts {
            excluded: 1,
            ..Counts::default()
        });
    }

    let metadata = fs::metadata(path)?;
    if metadata.is_file() {
        return Ok(Counts {
            files: usize::from(classify(path, classes).is_some()),
            ..Counts::default()
        });
    }

    let mut counts = Counts {
        directories: 1,
        ..Counts::default()
    };

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();

        if is_path_excluded(&entry_path, exclude_patterns) {
            counts.excluded += 1;
            continue;
        }

        let metadata = entry.metadata()?;
        if metadata.is_file() {
            if classify(&entry_path, classes).is_some() {
                counts.files += 1;
            }
        } else if metadata.is_dir() {
            if max_depth > 0 {
                let sub = count(&entry_path, max_depth - 1, exclude_patterns, classes)?;
                counts.files += sub.files;
                counts.directories += sub.directories;
                counts.excluded += sub.excluded;
            } else {
                counts.directories += 1;
            }
        }
    }

    Ok(counts)
}
