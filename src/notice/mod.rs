//! License notice synthesis.
//!
//! Builds the canonical SPDX header of one file in four steps:
//! 1. Resolve version control contributors to authors ([`identity`])
//! 2. Parse notices already present in the comment header ([`parser`], [`header`])
//! 3. Merge both into per-author year spans ([`registry`])
//! 4. Render and splice the new header ([`synthesize`])

pub mod header;
pub mod identity;
pub mod parser;
pub mod registry;
pub mod span;
pub mod synthesize;


pub use header::{CommentHeader, CommentStyle, extract_header};
pub use identity::{IdentityResolver, Resolution};
pub use parser::{ExistingNotice, parse_notice, parse_notices};
pub use registry::{AuthorSpanRegistry, RegistryBuilder};
pub use span::{Year, YearSpan};
pub use synthesize::render_header;

use crate::error::Result;
use crate::history::RawContribution;

/// Inputs shared by every file of a run.
#[derive(Debug, Clone, Copy)]
pub struct NoticeContext<'a> {
    pub resolver: &'a IdentityResolver,
    pub maintainer: Option<&'a str>,
    pub license: &'a str,
    pub current_year: Year,
}

/// A rewritten file together with what was learned while rewriting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenNotice {
    pub lines: Vec<String>,
    pub registry: AuthorSpanRegistry,
    /// Contributor addresses no table recognized.
    pub unknown_addresses: Vec<String>,
}

/// Replace the comment header of `lines` with the canonical SPDX header.
pub fn rewrite_notice(
    lines: &[String],
    style: CommentStyle,
    contributions: &[RawContribution],
    context: &NoticeContext<'_>,
) -> Result<RewrittenNotice> {
    let header = extract_header(lines, style)?;
    let notices = parse_notices(&header.candidates)?;

    let mut builder = RegistryBuilder::new();
    let unknown_addresses = builder.add_contributions(context.resolver, contributions)?;
    builder.add_notices(&notices);
    let registry = builder.finish(context.maintainer, context.current_year);

    let rendered = render_header(&registry, context.maintainer, context.license, style.line);

    Ok(RewrittenNotice {
        lines: header.splice(&rendered),
        registry,
        unknown_addresses,
    })
}
