//! Per-file author → year span registry.
//!
//! Accumulation happens on [`RegistryBuilder`]; [`RegistryBuilder::finish`]
//! credits the maintainer for the current year and hands out the read-only
//! [`AuthorSpanRegistry`] that the header is rendered from.

use log::warn;

use super::identity::{IdentityResolver, Resolution};
use super::parser::ExistingNotice;
use super::span::{Year, YearSpan};
use crate::error::Result;
use crate::history::RawContribution;

/// Write-only accumulator. Entries keep first-insertion order.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<(String, YearSpan)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend `author`'s span to cover `year`, creating it if absent.
    pub fn extend(&mut self, author: &str, year: Year) {
        self.unite(author, YearSpan::single(year));
    }

    /// Merge `span` into `author`'s span, creating it if absent.
    pub fn unite(&mut self, author: &str, span: YearSpan) {
        match self.entries.iter_mut().find(|(name, _)| name == author) {
            Some((_, existing)) => *existing = existing.union(span),
            None => self.entries.push((author.to_string(), span)),
        }
    }

    /// History pass. Returns the distinct unrecognized addresses, in first-seen
    /// order; a malformed address aborts the pass.
    pub fn add_contributions(
        &mut self,
        resolver: &IdentityResolver,
        contributions: &[RawContribution],
    ) -> Result<Vec<String>> {
        let mut unknown: Vec<String> = Vec::new();

        for contribution in contributions {
            match resolver.resolve(&contribution.address)? {
                Resolution::Author(author) => self.extend(author, contribution.year),
                Resolution::Ignored => {}
                Resolution::Unknown => {
                    if !unknown.contains(&contribution.address) {
                        warn!("Unknown mail address/suffix: {}", contribution.address);
                        unknown.push(contribution.address.clone());
                    }
                }
            }
        }

        Ok(unknown)
    }

    /// Notice pass. Holder text is used verbatim as the author key.
    pub fn add_notices(&mut self, notices: &[ExistingNotice]) {
        for notice in notices {
            self.unite(&notice.holder, notice.span());
        }
    }

    /// Credit `maintainer` (if any) for `current_year` and freeze.
    pub fn finish(mut self, maintainer: Option<&str>, current_year: Year) -> AuthorSpanRegistry {
        if let Some(maintainer) = maintainer {
            self.extend(maintainer, current_year);
        }
        AuthorSpanRegistry {
            entries: self.entries,
        }
    }
}

/// Finished registry, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSpanRegistry {
    entries: Vec<(String, YearSpan)>,
}

impl AuthorSpanRegistry {
    pub fn get(&self, author: &str) -> Option<YearSpan> {
        self.entries
            .iter()
            .find(|(name, _)| name == author)
            .map(|(_, span)| *span)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, YearSpan)> {
        self.entries.iter().map(|(name, span)| (name.as_str(), *span))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by author, for order-insensitive comparison.
    pub fn sorted_entries(&self) -> Vec<(&str, YearSpan)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}
