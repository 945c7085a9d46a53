//! Location of the leading comment header of a file.
//!
//! A forward scan over the lines, driven by a two-state automaton
//! ([`ScanState`]): outside any comment, or inside a block comment. The header
//! is the leading run of comment lines; the first line that is neither a
//! line comment, a block-comment opener, nor inside a block comment starts the
//! body. Body lines are handed back untouched.

use crate::error::{Result, SanitizeError};

/// Token whose presence marks a comment segment as a notice candidate.
const NOTICE_TOKEN: &str = "Copyright";

/// Comment syntax of one file class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub line: &'static str,
    pub block: Option<(&'static str, &'static str)>,
}

impl CommentStyle {
    /// `//` line comments and `/* */` block comments.
    pub const C_FAMILY: CommentStyle = CommentStyle {
        line: "//",
        block: Some(("/*", "*/")),
    };

    /// `#` line comments only (Python, shell, CMake).
    pub const HASH: CommentStyle = CommentStyle {
        line: "#",
        block: None,
    };

    /// True if the trimmed line is a line comment.
    pub fn is_line_comment(&self, trimmed: &str) -> bool {
        trimmed.starts_with(self.line)
    }

    /// True if the trimmed line opens a block comment.
    pub fn opens_block(&self, trimmed: &str) -> bool {
        self.block.is_some_and(|(open, _)| trimmed.starts_with(open))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    Outside,
    /// `opened_at` is the line on which the enclosing run of block comments
    /// started.
    InsideBlock { opened_at: usize },
}

/// A file split around its leading comment header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentHeader<'a> {
    /// Shebang line and the blank lines right after it.
    pub pre_header: &'a [String],
    pub header: &'a [String],
    pub body: &'a [String],
    /// Comment text of header segments that contain `Copyright`.
    pub candidates: Vec<String>,
}

impl CommentHeader<'_> {
    /// `pre_header`, then `replacement`, then the untouched body.
    pub fn splice(&self, replacement: &[String]) -> Vec<String> {
        let mut lines =
            Vec::with_capacity(self.pre_header.len() + replacement.len() + self.body.len());
        lines.extend_from_slice(self.pre_header);
        lines.extend_from_slice(replacement);
        lines.extend_from_slice(self.body);
        lines
    }
}

/// Result of scanning one line that involves block comment markers.
#[derive(Debug, Default)]
pub(crate) struct BlockLine<'l> {
    pub segments: Vec<&'l str>,
    pub inside_after: bool,
    /// Non-comment text follows a closed block on this line.
    pub trailing_code: bool,
}

/// Split `line` into comment segments, starting inside a block comment if
/// `inside` is set.
pub(crate) fn scan_block_line<'l>(line: &'l str, style: CommentStyle, inside: bool) -> BlockLine<'l> {
    let mut scan = BlockLine::default();
    let Some((open, close)) = style.block else {
        return scan;
    };

    let mut rest = line;
    let mut inside = inside;
    loop {
        if inside {
            match rest.find(close) {
                Some(pos) => {
                    scan.segments.push(&rest[..pos]);
                    rest = &rest[pos + close.len()..];
                    inside = false;
                }
                None => {
                    scan.segments.push(rest);
                    break;
                }
            }
        } else {
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                break;
            }
            if let Some(after) = trimmed.strip_prefix(open) {
                rest = after;
                inside = true;
            } else if let Some(after) = trimmed.strip_prefix(style.line) {
                scan.segments.push(after);
                break;
            } else {
                scan.trailing_code = true;
                break;
            }
        }
    }
    scan.inside_after = inside;
    scan
}

/// Number of leading lines that form the pre-header: a `#!` line followed
/// by any blank lines.
fn pre_header_len(lines: &[String]) -> usize {
    match lines.first() {
        Some(first) if first.starts_with("#!") => {
            1 + lines[1..]
                .iter()
                .take_while(|line| line.trim().is_empty())
                .count()
        }
        _ => 0,
    }
}

/// Split `lines` into pre-header, comment header and body.
pub fn extract_header(lines: &[String], style: CommentStyle) -> Result<CommentHeader<'_>> {
    let start = pre_header_len(lines);
    let mut state = ScanState::Outside;
    let mut candidates: Vec<(usize, String)> = Vec::new();
    let mut end = lines.len();

    for (i, line) in lines.iter().enumerate().skip(start) {
        let trimmed = line.trim();

        let origin = match state {
            ScanState::InsideBlock { opened_at } => opened_at,
            ScanState::Outside => {
                if style.is_line_comment(trimmed) {
                    if trimmed.contains(NOTICE_TOKEN) {
                        candidates.push((i, trimmed[style.line.len()..].to_string()));
                    }
                    continue;
                }
                if !style.opens_block(trimmed) {
                    end = i;
                    break;
                }
                i
            }
        };

        let scan = scan_block_line(line, style, state != ScanState::Outside);
        if scan.trailing_code {
            // The block cannot be split from the code after it: leave the
            // whole block in the body.
            end = origin;
            candidates.retain(|(line_no, _)| *line_no < origin);
            state = ScanState::Outside;
            break;
        }

        candidates.extend(
            scan.segments
                .into_iter()
                .filter(|segment| segment.contains(NOTICE_TOKEN))
                .map(|segment| (i, segment.to_string())),
        );
        state = if scan.inside_after {
            ScanState::InsideBlock { opened_at: origin }
        } else {
            ScanState::Outside
        };
    }

    if let ScanState::InsideBlock { opened_at } = state {
        return Err(SanitizeError::UnterminatedBlockComment {
            line: opened_at + 1,
        });
    }

    Ok(CommentHeader {
        pre_header: &lines[..start],
        header: &lines[start..end],
        body: &lines[end..],
        candidates: candidates.into_iter().map(|(_, text)| text).collect(),
    })
}
