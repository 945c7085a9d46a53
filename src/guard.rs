//! Canonical include guards for C/C++ headers.
//!
//! The existing guard (`#pragma once`, or an `#ifndef`/`#define`/`#endif`
//! triple) is located and replaced by one whose macro name is derived from
//! the header's path relative to the repository root, so repeated runs on the
//! same path always produce the same guard.

use std::path::{Component, Path};

use crate::error::{Result, SanitizeError};
use crate::notice::header::{CommentStyle, ScanState, scan_block_line};

/// A header split around its include guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeGuardRegion<'a> {
    /// Everything before the guard, usually the license header.
    pub pre_guard: &'a [String],
    /// Everything between the guard's opening and closing directives.
    pub inner: &'a [String],
    pub guard_name: String,
}

impl IncludeGuardRegion<'_> {
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.pre_guard.len() + self.inner.len() + 3);
        lines.extend_from_slice(self.pre_guard);
        lines.push(format!("#ifndef {}", self.guard_name));
        lines.push(format!("#define {}", self.guard_name));
        lines.extend_from_slice(self.inner);
        lines.push(format!("#endif // {}", self.guard_name));
        lines
    }
}

/// Guard macro for `relative_path` in project `project_name`.
///
/// `include/foo/bar.hpp` in project `Utils` becomes `UTILS_INCLUDE_FOO_BAR_HPP_`.
pub fn guard_name(project_name: &str, relative_path: &Path) -> String {
    let path = relative_path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("{}_{}_", sanitize_identifier(project_name), sanitize_identifier(&path))
}

fn sanitize_identifier(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Indices of lines that are code (not blank, not comment), in order.
fn code_lines(lines: &[String]) -> Vec<usize> {
    let style = CommentStyle::C_FAMILY;
    let mut state = ScanState::Outside;
    let mut code = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let inside = matches!(state, ScanState::InsideBlock { .. });
        if !inside && (trimmed.is_empty() || style.is_line_comment(trimmed)) {
            continue;
        }
        if !inside && !style.opens_block(trimmed) {
            code.push(i);
            continue;
        }
        let scan = scan_block_line(line, style, inside);
        if scan.trailing_code {
            code.push(i);
        }
        state = if scan.inside_after {
            ScanState::InsideBlock { opened_at: i }
        } else {
            ScanState::Outside
        };
    }
    code
}

fn directive_argument<'l>(line: &'l str, directive: &str) -> Option<&'l str> {
    let rest = line.trim().strip_prefix('#')?.trim_start();
    let rest = rest.strip_prefix(directive)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

fn is_pragma_once(line: &str) -> bool {
    directive_argument(line, "pragma").is_some_and(|arg| arg == "once")
}

/// Locate the include guard of `lines`.
pub fn find_guard<'a>(lines: &'a [String], guard_name: String) -> Result<IncludeGuardRegion<'a>> {
    let code = code_lines(lines);
    let Some(&first) = code.first() else {
        return Err(SanitizeError::MissingIncludeGuard);
    };

    if is_pragma_once(&lines[first]) {
        return Ok(IncludeGuardRegion {
            pre_guard: &lines[..first],
            inner: &lines[first + 1..],
            guard_name,
        });
    }

    let Some(ifndef) =
        directive_argument(&lines[first], "ifndef").and_then(|arg| arg.split_whitespace().next())
    else {
        return Err(SanitizeError::MissingIncludeGuard);
    };
    let define = code
        .get(1)
        .and_then(|&i| directive_argument(&lines[i], "define").map(|m| (i, m)));
    let define_at = match define {
        Some((i, name)) if name.split_whitespace().next() == Some(ifndef) => i,
        _ => {
            return Err(SanitizeError::MismatchedIncludeGuard {
                ifndef: ifndef.to_string(),
            });
        }
    };

    let after_define = &lines[define_at + 1..];
    let inner_end = code
        .last()
        .filter(|&&last| last > define_at)
        .map(|&last| {
            if directive_argument(&lines[last], "endif").is_some() {
                last
            } else {
                last + 1
            }
        })
        .unwrap_or(define_at + 1);

    Ok(IncludeGuardRegion {
        pre_guard: &lines[..first],
        inner: &after_define[..inner_end - (define_at + 1)],
        guard_name,
    })
}

/// Replace the include guard of `lines` with the canonical one.
pub fn canonicalize_guard(lines: &[String], guard_name: String) -> Result<Vec<String>> {
    Ok(find_guard(lines, guard_name)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    const GUARD: &str = "UTILS_A_H_";

    #[test]
    fn test_guard_name_from_relative_path() {
        assert_eq!(
            guard_name("UTILS", Path::new("include/foo/bar.hpp")),
            "UTILS_INCLUDE_FOO_BAR_HPP_"
        );
        assert_eq!(guard_name("Utils", Path::new("common.h")), "UTILS_COMMON_H_");
        assert_eq!(
            guard_name("my-lib", Path::new("./src/x-y.cuh")),
            "MY_LIB_SRC_X_Y_CUH_"
        );
    }

    #[test]
    fn test_guard_name_is_stable() {
        let path = Path::new("include/foo/bar.hpp");
        assert_eq!(guard_name("UTILS", path), guard_name("UTILS", path));
    }

    #[test]
    fn test_replace_classic_guard() {
        let input = lines(
            "// SPDX-License-Identifier: MIT\n\n#ifndef UTILS_PATH_H\n#define UTILS_PATH_H\n\nint f();\n\n#endif // UTILS_PATH_H\n",
        );
        let output = canonicalize_guard(&input, GUARD.to_string()).unwrap();
        assert_eq!(
            output,
            lines(
                "// SPDX-License-Identifier: MIT\n\n#ifndef UTILS_A_H_\n#define UTILS_A_H_\n\nint f();\n\n#endif // UTILS_A_H_"
            )
        );
    }

    #[test]
    fn test_replace_pragma_once() {
        let input = lines("// header\n#pragma once\n\nint f();");
        let output = canonicalize_guard(&input, GUARD.to_string()).unwrap();
        assert_eq!(
            output,
            lines("// header\n#ifndef UTILS_A_H_\n#define UTILS_A_H_\n\nint f();\n#endif // UTILS_A_H_")
        );
    }

    #[test]
    fn test_trailing_comments_after_endif_are_dropped() {
        let input = lines("#ifndef X\n#define X\nint f();\n#endif\n// end of file\n\n");
        let region = find_guard(&input, GUARD.to_string()).unwrap();
        assert_eq!(region.inner, &input[2..3]);
    }

    #[test]
    fn test_guard_without_endif_keeps_last_code_line() {
        let input = lines("#ifndef X\n#define X\nint f();\n/* trailing */");
        let region = find_guard(&input, GUARD.to_string()).unwrap();
        assert_eq!(region.inner, &input[2..3]);
    }

    #[test]
    fn test_nested_conditionals_are_kept() {
        let input = lines("#ifndef X\n#define X\n#ifdef Y\nint y;\n#endif\nint f();\n#endif // X");
        let region = find_guard(&input, GUARD.to_string()).unwrap();
        assert_eq!(region.inner, &input[2..6]);
    }

    #[test]
    fn test_block_comment_before_guard() {
        let input = lines("/**\n * @file\n * #ifndef NOT_THIS\n */\n#ifndef X\n#define X\n#endif");
        let region = find_guard(&input, GUARD.to_string()).unwrap();
        assert_eq!(region.pre_guard, &input[..4]);
        assert!(region.inner.is_empty());
    }

    #[test]
    fn test_canonical_output_is_a_fixed_point() {
        let input = lines("// c\n#pragma once\nint f();\n");
        let once = canonicalize_guard(&input, GUARD.to_string()).unwrap();
        let twice = canonicalize_guard(&once, GUARD.to_string()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_guard_is_an_error() {
        for text in ["// only a comment\nint f();", "", "// nothing\n\n"] {
            assert!(
                matches!(
                    canonicalize_guard(&lines(text), GUARD.to_string()),
                    Err(SanitizeError::MissingIncludeGuard)
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_ifndef_without_matching_define() {
        let input = lines("#ifndef X\nint f();\n#endif");
        assert!(matches!(
            canonicalize_guard(&input, GUARD.to_string()),
            Err(SanitizeError::MismatchedIncludeGuard { .. })
        ));

        let input = lines("#ifndef X\n#define Y\n#endif");
        assert!(matches!(
            canonicalize_guard(&input, GUARD.to_string()),
            Err(SanitizeError::MismatchedIncludeGuard { .. })
        ));
    }
}
