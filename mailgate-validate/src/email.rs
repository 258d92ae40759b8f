//! Email address validation.
//!
//! Checks run strictly in order and stop at the first failure:
//!
//! 1. sanitise the raw input,
//! 2. check the address grammar,
//! 3. resolve the domain,
//! 4. require an MX record for the domain.
//!
//! A domain that resolves but publishes no MX record is rejected even though
//! some mail systems would fall back to its address record. That fallback is
//! deliberately not taken here.

use core::fmt::{self, Display, Formatter};
use std::net::{IpAddr, Ipv4Addr};

use mailgate_dns::{RecordType, Resolver};
use serde::Serialize;
use tracing::debug;

use crate::{
    domain::DomainValidator,
    syntax::{check_address, sanitize},
};

/// Outcome of validating an email address, in the order checks are made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EmailOutcome {
    /// Valid and the input needed no cleaning.
    Ok,
    /// Valid once the input was cleaned, e.g. `<a@b.c>` became `a@b.c`.
    OkButRaw,
    /// Does not match the address grammar.
    InvalidSyntax,
    /// The domain does not resolve.
    InvalidDomain,
    /// The domain resolves but has no MX record.
    MissingMxRecord,
}

impl EmailOutcome {
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Ok | Self::OkButRaw)
    }

    /// Numeric status: `0` usable, `1` bad domain, `2` no MX, `3` malformed.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Ok | Self::OkButRaw => 0,
            Self::InvalidDomain => 1,
            Self::MissingMxRecord => 2,
            Self::InvalidSyntax => 3,
        }
    }
}

impl Display for EmailOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "ok",
            Self::OkButRaw => "ok (cleaned)",
            Self::InvalidSyntax => "invalid syntax",
            Self::InvalidDomain => "invalid domain",
            Self::MissingMxRecord => "missing MX record",
        })
    }
}

/// The result of a single address validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmailResult {
    outcome: EmailOutcome,
    raw: String,
    canonical: String,
    domain: String,
    ip: Option<IpAddr>,
}

impl EmailResult {
    #[must_use]
    pub const fn outcome(&self) -> EmailOutcome {
        self.outcome
    }

    /// The input exactly as given.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The cleaned address; empty when the grammar check failed.
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The part after the `@`; empty when the grammar check failed.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The domain's address, present once the domain has resolved.
    #[must_use]
    pub const fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    #[must_use]
    pub fn ip_or_unspecified(&self) -> IpAddr {
        self.ip.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }
}

impl Display for EmailResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.raw, self.outcome)
    }
}

/// Validates email addresses against a [`Resolver`].
#[derive(Debug, Clone)]
pub struct EmailValidator<R> {
    domains: DomainValidator<R>,
}

impl<R: Resolver> EmailValidator<R> {
    pub const fn new(resolver: R) -> Self {
        Self {
            domains: DomainValidator::new(resolver),
        }
    }

    pub const fn domains(&self) -> &DomainValidator<R> {
        &self.domains
    }

    pub fn validate(&self, raw: &str) -> EmailResult {
        let canonical = sanitize(raw);

        let domain = match check_address(&canonical) {
            Ok((_, domain)) => domain.to_string(),
            Err(err) => {
                debug!("Address {raw:?} rejected: {err}");
                return EmailResult {
                    outcome: EmailOutcome::InvalidSyntax,
                    raw: raw.to_string(),
                    canonical: String::new(),
                    domain: String::new(),
                    ip: None,
                };
            }
        };

        let resolved = self.domains.lookup(&domain);
        let outcome = if !resolved.is_resolvable() {
            EmailOutcome::InvalidDomain
        } else if !self.domains.is_dns_record(&resolved, RecordType::MX) {
            EmailOutcome::MissingMxRecord
        } else if canonical == raw {
            EmailOutcome::Ok
        } else {
            EmailOutcome::OkButRaw
        };

        debug!("Address {raw:?} validated: {outcome}");

        EmailResult {
            outcome,
            raw: raw.to_string(),
            canonical: canonical.into_owned(),
            domain,
            ip: resolved.ip(),
        }
    }

    /// Shorthand for `self.validate(raw).is_valid()`.
    pub fn is_email(&self, raw: &str) -> bool {
        self.validate(raw).is_valid()
    }
}

/// Returns the domain part of an address-like string.
///
/// One surrounding `<...>` pair is ignored. The text between the first `@`
/// and the next one (or the end) is returned; input without an `@` is
/// returned as-is.
#[must_use]
pub fn domain_of(input: &str) -> &str {
    let inner = input.strip_prefix('<').unwrap_or(input);
    let inner = inner.strip_suffix('>').unwrap_or(inner);

    inner.split('@').nth(1).unwrap_or(inner)
}
