use serde::Serialize;
use std::path::Path;

use crate::config::FileClasses;
use crate::notice::CommentStyle;

/// How a file is treated, decided by its name and extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    /// C/C++/CUDA header: notice and include guard.
    Header,
    /// C/C++/CUDA translation unit: notice.
    Source,
    /// Python script: notice and shebang.
    PythonScript,
    /// Shell script: notice and shebang.
    ShellScript,
    /// CMake file: notice.
    BuildFile,
}

impl FileKind {
    pub fn comment_style(self) -> CommentStyle {
        match self {
            FileKind::Header | FileKind::Source => CommentStyle::C_FAMILY,
            FileKind::PythonScript | FileKind::ShellScript | FileKind::BuildFile => {
                CommentStyle::HASH
            }
        }
    }

    pub fn has_include_guard(self) -> bool {
        self == FileKind::Header
    }

    /// Interpreter named in the shebang of executable scripts.
    pub fn interpreter(self) -> Option<&'static str> {
        match self {
            FileKind::PythonScript => Some("python3"),
            FileKind::ShellScript => Some("sh"),
            _ => None,
        }
    }
}

/// Classify `path`, or `None` if the file is not handled at all.
pub fn classify(path: &Path, classes: &FileClasses) -> Option<FileKind> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if classes.cmake_file_names.iter().any(|name| name == file_name) {
        return Some(FileKind::BuildFile);
    }

    let extension = path.extension()?.to_str()?.to_lowercase();
    let listed = |list: &[String]| list.iter().any(|e| *e == extension);

    if listed(&classes.header_extensions) {
        Some(FileKind::Header)
    } else if listed(&classes.source_extensions) {
        Some(FileKind::Source)
    } else if listed(&classes.python_extensions) {
        Some(FileKind::PythonScript)
    } else if listed(&classes.shell_extensions) {
        Some(FileKind::ShellScript)
    } else if listed(&classes.cmake_extensions) {
        Some(FileKind::BuildFile)
    } else {
        None
    }
}
