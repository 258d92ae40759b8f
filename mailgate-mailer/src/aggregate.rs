//! Best-effort recipient aggregation.
//!
//! A raw header value may hold several addresses separated by commas and/or
//! whitespace. Each one is validated on its own; invalid ones are dropped and
//! recorded in a [`FailureSummary`] instead of failing the whole header.

use std::collections::BTreeMap;

use mailgate_dns::Resolver;
use mailgate_validate::{EmailResult, EmailValidator};
use tracing::debug;

use crate::header::Header;

/// Splits a raw address list on runs of commas and whitespace.
pub fn split_addresses(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|token| !token.is_empty())
}

/// Rejected addresses, per header, in the order they were rejected.
///
/// Entries are only ever added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureSummary(BTreeMap<Header, Vec<EmailResult>>);

impl FailureSummary {
    fn record(&mut self, header: Header, result: EmailResult) {
        self.0.entry(header).or_default().push(result);
    }

    /// Rejected addresses for `header`.
    #[must_use]
    pub fn get(&self, header: Header) -> &[EmailResult] {
        self.0.get(&header).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of rejected addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Header, &[EmailResult])> {
        self.0.iter().map(|(header, results)| (*header, results.as_slice()))
    }
}

/// Validates address lists and keeps track of what it had to drop.
#[derive(Clone, Debug, Default)]
pub struct RecipientAggregator {
    summary: FailureSummary,
    error_count: usize,
}

impl RecipientAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every address in `raw` for `header`.
    ///
    /// Returns the canonical forms of the valid addresses joined with `,`,
    /// or an empty string if none survived.
    pub fn add<R: Resolver>(
        &mut self,
        validator: &EmailValidator<R>,
        header: Header,
        raw: &str,
    ) -> String {
        let mut accepted = Vec::new();

        for token in split_addresses(raw) {
            let result = validator.validate(token);

            if result.is_valid() {
                accepted.push(result.canonical().to_string());
            } else {
                debug!("Dropping {header} address {token:?}: {}", result.outcome());
                self.summary.record(header, result);
                self.error_count += 1;
            }
        }

        accepted.join(",")
    }

    /// Number of addresses dropped so far, across all headers.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }

    #[must_use]
    pub const fn summary(&self) -> &FailureSummary {
        &self.summary
    }
}

/// Filters `raw` down to its valid addresses without recording anything.
///
/// Returns `None` when no address survives.
pub fn prepare<R: Resolver>(validator: &EmailValidator<R>, raw: &str) -> Option<String> {
    let accepted = split_addresses(raw)
        .map(|token| validator.validate(token))
        .filter(EmailResult::is_valid)
        .map(|result| result.canonical().to_string())
        .collect::<Vec<_>>();

    (!accepted.is_empty()).then(|| accepted.join(","))
}
