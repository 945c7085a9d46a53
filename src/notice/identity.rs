//! Contributor address → canonical author resolution.
//!
//! Three ordered lookups: exact address, domain suffix, ignored domain
//! suffix. Anything else is unknown and only reported.

use std::collections::BTreeMap;

use crate::config::AuthorTables;
use crate::error::{Result, SanitizeError};

/// Outcome of resolving one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Author(&'a str),
    /// Matched the ignore list; excluded without a diagnostic.
    Ignored,
    /// Matched nothing; excluded and reported.
    Unknown,
}

#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    exact: BTreeMap<String, String>,
    domains: BTreeMap<String, String>,
    ignore: Vec<String>,
}

impl IdentityResolver {
    pub fn new(tables: &AuthorTables) -> Self {
        Self {
            exact: tables.exact.clone(),
            domains: tables
                .domains
                .iter()
                .map(|(suffix, author)| (normalize_suffix(suffix), author.clone()))
                .collect(),
            ignore: tables.ignore.iter().map(|s| normalize_suffix(s)).collect(),
        }
    }

    pub fn resolve(&self, address: &str) -> Result<Resolution<'_>> {
        let domain = split_domain(address)?;

        if let Some(author) = self.exact.get(address) {
            return Ok(Resolution::Author(author));
        }

        let best = self
            .domains
            .iter()
            .filter(|(suffix, _)| domain_matches(&domain, suffix))
            .max_by_key(|(suffix, _)| suffix.len());
        if let Some((_, author)) = best {
            return Ok(Resolution::Author(author));
        }

        if self.ignore.iter().any(|suffix| domain_matches(&domain, suffix)) {
            return Ok(Resolution::Ignored);
        }

        Ok(Resolution::Unknown)
    }
}

/// Lowercased domain part of `address`; fails unless there is exactly one `@`.
fn split_domain(address: &str) -> Result<String> {
    let mut parts = address.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(domain), None) => Ok(domain.to_ascii_lowercase()),
        _ => Err(SanitizeError::MalformedAddress {
            address: address.to_string(),
        }),
    }
}

fn normalize_suffix(suffix: &str) -> String {
    suffix.trim().trim_start_matches(['@', '.']).to_ascii_lowercase()
}

/// `tum.de` matches `tum.de` and `in.tum.de`, but not `mytum.de`.
fn domain_matches(domain: &str, suffix: &str) -> bool {
    domain == suffix
        || domain
            .strip_suffix(suffix)
            .is_some_and(|head| head.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> IdentityResolver {
        let mut tables = AuthorTables::default();
        tables
            .exact
            .insert("lukas@krenz.land".to_string(), "Org A".to_string());
        tables
            .exact
            .insert("someone@intel.com".to_string(), "Org C".to_string());
        tables.domains.insert("tum.de".to_string(), "Org A".to_string());
        tables.domains.insert("lrz.de".to_string(), "Org B".to_string());
        tables
            .domains
            .insert("intel.com".to_string(), "Intel Corporation".to_string());
        tables
            .domains
            .insert("geo.tum.de".to_string(), "Org G".to_string());
        tables.ignore.push("users.noreply.github.com".to_string());
        IdentityResolver::new(&tables)
    }

    #[test]
    fn test_exact_match_wins_over_domain() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve("someone@intel.com").unwrap(),
            Resolution::Author("Org C")
        );
        assert_eq!(
            resolver.resolve("other@intel.com").unwrap(),
            Resolution::Author("Intel Corporation")
        );
    }

    #[test]
    fn test_exact_match_on_unlisted_domain() {
        assert_eq!(
            resolver().resolve("lukas@krenz.land").unwrap(),
            Resolution::Author("Org A")
        );
    }

    #[test]
    fn test_domain_suffix_matches_subdomains() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve("a@in.tum.de").unwrap(),
            Resolution::Author("Org A")
        );
        assert_eq!(
            resolver.resolve("a@LRZ.DE").unwrap(),
            Resolution::Author("Org B")
        );
        assert_eq!(resolver.resolve("a@mytum.de").unwrap(), Resolution::Unknown);
    }

    #[test]
    fn test_longest_domain_suffix_wins() {
        assert_eq!(
            resolver().resolve("a@geo.tum.de").unwrap(),
            Resolution::Author("Org G")
        );
    }

    #[test]
    fn test_ignored_suffix() {
        assert_eq!(
            resolver()
                .resolve("12345+user@users.noreply.github.com")
                .unwrap(),
            Resolution::Ignored
        );
    }

    #[test]
    fn test_unknown_address() {
        assert_eq!(
            resolver().resolve("someone@example.org").unwrap(),
            Resolution::Unknown
        );
    }

    #[test]
    fn test_malformed_addresses() {
        let resolver = resolver();
        for address in ["no-at-sign", "two@@tum.de", "a@b@tum.de"] {
            assert!(
                matches!(
                    resolver.resolve(address),
                    Err(SanitizeError::MalformedAddress { .. })
                ),
                "{address} should be rejected"
            );
        }
    }
}
