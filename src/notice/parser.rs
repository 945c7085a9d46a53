//! Parsing of copyright notices already present in a file header.
//!
//! Recognized idioms (case-insensitive):
//! - `Copyright 2014 Holder`
//! - `SPDX-FileCopyrightText: 2014-2019 Holder`
//! - `(C) 2014 Holder`, `[c] 2014 Holder`, `Copyright (c) 2014, Holder`
//! - `Copyright: 2014 Holder`, `Copyright© 2014 Holder`, `© 2014 Holder`

use std::sync::LazyLock;

use regex::Regex;

use super::span::{Year, YearSpan};
use crate::error::{Result, SanitizeError};

/// Copyright marker(s), optional year or year range, separators, holder.
static NOTICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:copyright[\s:©]+|spdx-filecopyrighttext:\s*|[(\[]\s*c\s*[)\]]|©)+\s*(?:(\d+)(?:\s*-\s*(\d+))?)?[\s,;]*(.*)$",
    )
    .unwrap()
});

/// Trailing "All rights reserved." that is not part of the holder name.
static RIGHTS_RESERVED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[\s,;]*all\s+rights\s+reserved\.?$").unwrap());

/// A notice found in an existing header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingNotice {
    pub start_year: Year,
    pub end_year: Option<Year>,
    pub holder: String,
}

impl ExistingNotice {
    pub fn span(&self) -> YearSpan {
        YearSpan::new(self.start_year, self.end_year.unwrap_or(self.start_year))
    }
}

/// Parse one comment line. `Ok(None)` means the line is not a notice.
pub fn parse_notice(line: &str) -> Result<Option<ExistingNotice>> {
    let Some(caps) = NOTICE_RE.captures(line) else {
        return Ok(None);
    };

    let Some(start) = caps.get(1) else {
        return Err(SanitizeError::NoticeMissingYear {
            line: line.trim().to_string(),
        });
    };
    let start_year = parse_year(start.as_str(), line)?;
    let end_year = caps
        .get(2)
        .map(|m| parse_year(m.as_str(), line))
        .transpose()?;

    let holder = caps.get(3).map_or("", |m| m.as_str()).trim();
    let holder = RIGHTS_RESERVED_RE.replace(holder, "");
    let holder = holder.trim().trim_end_matches([',', ';']).trim_end();
    if !holder.chars().any(char::is_alphanumeric) {
        return Err(SanitizeError::NoticeMissingHolder {
            line: line.trim().to_string(),
        });
    }

    Ok(Some(ExistingNotice {
        start_year,
        end_year,
        holder: holder.to_string(),
    }))
}

/// Parse header candidates, failing on the first one that is malformed or
/// not a notice at all. Candidates are replaced by the rewrite, so none may
/// be skipped.
pub fn parse_notices<S: AsRef<str>>(candidates: &[S]) -> Result<Vec<ExistingNotice>> {
    candidates
        .iter()
        .map(|candidate| {
            let line = candidate.as_ref();
            parse_notice(line)?.ok_or_else(|| SanitizeError::UnrecognizedNotice {
                line: line.trim().to_string(),
            })
        })
        .collect()
}

fn parse_year(digits: &str, line: &str) -> Result<Year> {
    digits
        .parse::<Year>()
        .map_err(|_| SanitizeError::NoticeYearOutOfRange {
            line: line.trim().to_string(),
        })
}
