//! Per-file rewrite pipeline.
//!
//! notice header → include guard (headers) → shebang (executable scripts)
//! → trailing newline. Each file is handled on its own; nothing is shared
//! between files except the read-only [`Sanitizer`].

use content_inspector::{ContentType, inspect};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Result, SanitizeError};
use crate::guard::{canonicalize_guard, guard_name};
use crate::history::{ContributionHistory, RawContribution};
use crate::models::{FileReport, FileStatus};
use crate::notice::{AuthorSpanRegistry, IdentityResolver, NoticeContext, Year, rewrite_notice};
use crate::utils::file::is_executable;
use crate::utils::language::FileKind;
use crate::utils::normalize::{apply_shebang, join_lines, split_lines};

/// Canonical content of one file.
#[derive(Debug)]
pub struct Sanitized {
    pub text: String,
    pub registry: AuthorSpanRegistry,
    pub unknown_addresses: Vec<String>,
    /// Guard canonicalization failed; the notice was still rewritten.
    pub guard_error: Option<SanitizeError>,
}

pub struct Sanitizer<'a> {
    settings: &'a Settings,
    resolver: IdentityResolver,
    history: &'a dyn ContributionHistory,
    root: PathBuf,
    current_year: Year,
}

impl<'a> Sanitizer<'a> {
    pub fn new(
        settings: &'a Settings,
        history: &'a dyn ContributionHistory,
        root: impl Into<PathBuf>,
        current_year: Year,
    ) -> Self {
        Self {
            settings,
            resolver: IdentityResolver::new(&settings.authors),
            history,
            root: root.into(),
            current_year,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn notice_context(&self) -> NoticeContext<'_> {
        NoticeContext {
            resolver: &self.resolver,
            maintainer: self.settings.maintainer.as_deref(),
            license: &self.settings.license,
            current_year: self.current_year,
        }
    }

    /// Compute the canonical form of `text`.
    pub fn sanitize_text(
        &self,
        text: &str,
        kind: FileKind,
        relative_path: &Path,
        executable: bool,
        contributions: &[RawContribution],
    ) -> Result<Sanitized> {
        let lines = split_lines(text);
        let rewritten = rewrite_notice(
            &lines,
            kind.comment_style(),
            contributions,
            &self.notice_context(),
        )?;
        let mut lines = rewritten.lines;

        let mut guard_error = None;
        if kind.has_include_guard() {
            let name = guard_name(&self.settings.project_name, relative_path);
            match canonicalize_guard(&lines, name) {
                Ok(guarded) => lines = guarded,
                Err(e) => guard_error = Some(e),
            }
        }

        if executable && let Some(interpreter) = kind.interpreter() {
            lines = apply_shebang(&lines, interpreter);
        }

        Ok(Sanitized {
            text: join_lines(&lines),
            registry: rewritten.registry,
            unknown_addresses: rewritten.unknown_addresses,
            guard_error,
        })
    }

    /// Rewrite `path` in place (or only compare when `dry_run`) and report
    /// the outcome. Errors never escape: they end up in the report.
    pub fn sanitize_file(&self, path: &Path, kind: FileKind, dry_run: bool) -> FileReport {
        let display = path.to_string_lossy().to_string();
        match self.try_sanitize_file(path, kind, dry_run) {
            Ok(report) => report,
            Err(e) => {
                warn!("{}: {}", display, e);
                FileReport::failed(display, kind, e)
            }
        }
    }

    fn try_sanitize_file(&self, path: &Path, kind: FileKind, dry_run: bool) -> Result<FileReport> {
        let display = path.to_string_lossy().to_string();
        let relative_path =
            path.strip_prefix(&self.root)
                .map_err(|_| SanitizeError::OutsideRepository {
                    path: path.to_path_buf(),
                    root: self.root.clone(),
                })?;

        let metadata = fs::metadata(path)?;
        let buffer = fs::read(path)?;
        if inspect(&buffer) != ContentType::UTF_8 {
            debug!("Skipping binary file {}", display);
            return Ok(FileReport::new(display, kind, FileStatus::Skipped));
        }
        // Never write back a lossy decoding.
        let Ok(text) = String::from_utf8(buffer) else {
            warn!("Skipping {}: not valid UTF-8", display);
            return Ok(FileReport::new(display, kind, FileStatus::Skipped));
        };

        let contributions = self.history.contributions(path)?;
        let sanitized = self.sanitize_text(
            &text,
            kind,
            relative_path,
            is_executable(&metadata),
            &contributions,
        )?;

        let changed = sanitized.text != text;
        if changed && !dry_run {
            fs::write(path, &sanitized.text)?;
        }

        let status = match (&sanitized.guard_error, changed, dry_run) {
            (Some(_), _, _) => FileStatus::Failed,
            (None, false, _) => FileStatus::Unchanged,
            (None, true, true) => FileStatus::WouldChange,
            (None, true, false) => FileStatus::Rewritten,
        };

        let mut report = FileReport::new(display.clone(), kind, status).with_authors(&sanitized.registry);
        report.changed = changed;
        report.unknown_addresses = sanitized.unknown_addresses;
        if let Some(e) = sanitized.guard_error {
            warn!("{}: {}", display, e);
            report.errors.push(e.to_string());
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoHistory;

    impl ContributionHistory for NoHistory {
        fn contributions(&self, _path: &Path) -> Result<Vec<RawContribution>> {
            Ok(Vec::new())
        }
    }

    fn settings() -> Settings {
        let settings = Settings::from_toml_str(
            r#"
maintainer = "Org A"
license = "BSD-3-Clause"
project_name = "Utils"

[authors.domains]
"a.org" = "Org A"
"b.org" = "Org B"
"#,
        )
        .unwrap();
        settings.validate().unwrap();
        settings
    }

    fn contributions(records: &[(&str, Year)]) -> Vec<RawContribution> {
        records
            .iter()
            .map(|&(address, year)| RawContribution {
                address: address.to_string(),
                year,
            })
            .collect()
    }

    #[test]
    fn test_header_file_full_pipeline() {
        let settings = settings();
        let sanitizer = Sanitizer::new(&settings, &NoHistory, "/repo", 2025);
        let input = "/**\n * @file\n * Copyright 2014 Technische Universitaet Muenchen\n */\n\n#ifndef UTILS_PATH_H\n#define UTILS_PATH_H\n\nint f();\n\n#endif\n";

        let sanitized = sanitizer
            .sanitize_text(
                input,
                FileKind::Header,
                Path::new("include/utils/path.h"),
                false,
                &contributions(&[("x@b.org", 2016), ("y@a.org", 2015)]),
            )
            .unwrap();

        assert!(sanitized.guard_error.is_none());
        assert_eq!(
            sanitized.text,
            "// SPDX-FileCopyrightText: 2015-2025 Org A\n\
             // SPDX-FileCopyrightText: 2016 Org B\n\
             // SPDX-FileCopyrightText: 2014 Technische Universitaet Muenchen\n\
             // \n\
             // SPDX-License-Identifier: BSD-3-Clause\n\
             \n\
             #ifndef UTILS_INCLUDE_UTILS_PATH_H_\n\
             #define UTILS_INCLUDE_UTILS_PATH_H_\n\
             \n\
             int f();\n\
             \n\
             #endif // UTILS_INCLUDE_UTILS_PATH_H_\n"
        );
    }

    #[test]
    fn test_guard_failure_keeps_notice_rewrite() {
        let settings = settings();
        let sanitizer = Sanitizer::new(&settings, &NoHistory, "/repo", 2025);
        let sanitized = sanitizer
            .sanitize_text("int f();\n", FileKind::Header, Path::new("a.h"), false, &[])
            .unwrap();

        assert!(matches!(
            sanitized.guard_error,
            Some(SanitizeError::MissingIncludeGuard)
        ));
        assert!(sanitized.text.starts_with("// SPDX-FileCopyrightText: 2025 Org A\n"));
        assert!(sanitized.text.ends_with("int f();\n"));
    }

    #[test]
    fn test_executable_script_gets_shebang() {
        let settings = settings();
        let sanitizer = Sanitizer::new(&settings, &NoHistory, "/repo", 2025);
        let input = "#!/usr/bin/python\n# Copyright 2019 Org B\nimport os\n";

        let once = sanitizer
            .sanitize_text(input, FileKind::PythonScript, Path::new("x.py"), true, &[])
            .unwrap();
        assert_eq!(
            once.text,
            "#!/usr/bin/env python3\n\
             \n\
             # SPDX-FileCopyrightText: 2025 Org A\n\
             # SPDX-FileCopyrightText: 2019 Org B\n\
             # \n\
             # SPDX-License-Identifier: BSD-3-Clause\n\
             import os\n"
        );

        let twice = sanitizer
            .sanitize_text(&once.text, FileKind::PythonScript, Path::new("x.py"), true, &[])
            .unwrap();
        assert_eq!(twice.text, once.text);
    }

    #[test]
    fn test_non_executable_script_keeps_shebang() {
        let settings = settings();
        let sanitizer = Sanitizer::new(&settings, &NoHistory, "/repo", 2025);
        let sanitized = sanitizer
            .sanitize_text("#!/bin/bash\necho hi\n", FileKind::ShellScript, Path::new("x.sh"), false, &[])
            .unwrap();
        assert!(sanitized.text.starts_with("#!/bin/bash\n# SPDX-FileCopyrightText"));
    }

    #[test]
    fn test_malformed_notice_fails_the_file() {
        let settings = settings();
        let sanitizer = Sanitizer::new(&settings, &NoHistory, "/repo", 2025);
        let result = sanitizer.sanitize_text(
            "// Copyright Nobody Knows When\nint x;\n",
            FileKind::Source,
            Path::new("a.cpp"),
            false,
            &[],
        );
        assert!(matches!(result, Err(SanitizeError::NoticeMissingYear { .. })));
    }

    #[test]
    fn test_colon_notice_keeps_its_holder() {
        let settings = settings();
        let sanitizer = Sanitizer::new(&settings, &NoHistory, "/repo", 2025);
        let sanitized = sanitizer
            .sanitize_text("// Copyright: 2014 Acme Corp\nint x;\n", FileKind::Source, Path::new("a.cpp"), false, &[])
            .unwrap();
        assert_eq!(
            sanitized.text,
            "// SPDX-FileCopyrightText: 2025 Org A\n\
             // SPDX-FileCopyrightText: 2014 Acme Corp\n\
             // \n\
             // SPDX-License-Identifier: BSD-3-Clause\n\
             int x;\n"
        );
    }

    #[test]
    fn test_crlf_input_is_normalized() {
        let settings = settings();
        let sanitizer = Sanitizer::new(&settings, &NoHistory, "/repo", 2025);
        let sanitized = sanitizer
            .sanitize_text("# old\r\nset(X 1)\r\n", FileKind::BuildFile, Path::new("CMakeLists.txt"), false, &[])
            .unwrap();
        assert!(!sanitized.text.contains('\r'));
        assert!(sanitized.text.ends_with("set(X 1)\n"));
    }

    #[test]
    fn test_trailing_blank_lines_collapse_to_one_newline() {
        let settings = settings();
        let sanitizer = Sanitizer::new(&settings, &NoHistory, "/repo", 2025);
        let once = sanitizer
            .sanitize_text("int x;\n\n\n", FileKind::Source, Path::new("a.cpp"), false, &[])
            .unwrap();
        assert!(once.text.ends_with("BSD-3-Clause\nint x;\n"), "{:?}", once.text);

        let twice = sanitizer
            .sanitize_text(&once.text, FileKind::Source, Path::new("a.cpp"), false, &[])
            .unwrap();
        assert_eq!(twice.text, once.text);
    }
}
