//! Domain name validation.
//!
//! A domain is checked in two stages, cheapest first: the host name rules
//! from [`syntax`](crate::syntax), then a host lookup through the
//! [`Resolver`]. A name the resolver echoes back did not resolve.

use core::fmt::{self, Display, Formatter};
use std::net::{IpAddr, Ipv4Addr};

use mailgate_dns::{RecordType, Resolver};
use serde::Serialize;
use tracing::debug;

use crate::syntax;

/// Outcome of validating a domain name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DomainOutcome {
    /// Well-formed and resolves.
    Ok,
    /// Not a well-formed host name. No lookup was made.
    InvalidSyntax,
    /// Well-formed, but does not resolve.
    NotExists,
}

impl Display for DomainOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "ok",
            Self::InvalidSyntax => "invalid syntax",
            Self::NotExists => "does not exist",
        })
    }
}

/// The result of a single domain validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DomainResult {
    outcome: DomainOutcome,
    domain: String,
    ip: Option<IpAddr>,
}

impl DomainResult {
    #[must_use]
    pub const fn outcome(&self) -> DomainOutcome {
        self.outcome
    }

    /// The domain exactly as it was given.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The resolved address; only present when the outcome is `Ok`.
    #[must_use]
    pub const fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    /// The resolved address, or `0.0.0.0` when there is none.
    #[must_use]
    pub fn ip_or_unspecified(&self) -> IpAddr {
        self.ip.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }

    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        matches!(self.outcome, DomainOutcome::Ok)
    }
}

/// Reachability of a domain as a mail destination.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ServerStatus {
    /// Resolves and publishes an MX record.
    Ok = 0,
    /// Malformed or does not resolve.
    Unreachable = 1,
    /// Resolves but publishes no MX record.
    NoMailExchanger = 2,
}

impl ServerStatus {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl Display for ServerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "accepts mail",
            Self::Unreachable => "unreachable",
            Self::NoMailExchanger => "no mail exchanger",
        })
    }
}

/// Validates domain names against a [`Resolver`].
///
/// Nothing is cached: every call performs its own lookups.
#[derive(Debug, Clone)]
pub struct DomainValidator<R> {
    resolver: R,
}

impl<R: Resolver> DomainValidator<R> {
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn validate(&self, domain: &str) -> DomainResult {
        if let Err(err) = syntax::check_hostname(domain) {
            debug!("Domain {domain:?} rejected: {err}");
            return DomainResult {
                outcome: DomainOutcome::InvalidSyntax,
                domain: domain.to_string(),
                ip: None,
            };
        }

        let result = self.lookup(domain);
        debug!("Domain {domain} validated: {}", result.outcome);
        result
    }

    /// Resolves an already well-formed domain.
    pub(crate) fn lookup(&self, domain: &str) -> DomainResult {
        let answer = self.resolver.resolve_host(domain);

        let ip = if answer == domain {
            None
        } else {
            let parsed = answer.parse::<IpAddr>().ok();
            if parsed.is_none() {
                debug!("Resolver answered {answer:?} for {domain}, treating as unresolved");
            }
            parsed
        };

        DomainResult {
            outcome: if ip.is_some() {
                DomainOutcome::Ok
            } else {
                DomainOutcome::NotExists
            },
            domain: domain.to_string(),
            ip,
        }
    }

    /// Does the validated domain publish a record of type `record`?
    ///
    /// Always `false` without querying when `result` did not validate.
    pub fn is_dns_record(&self, result: &DomainResult, record: RecordType) -> bool {
        result.is_resolvable() && self.resolver.has_record(&result.domain, record)
    }

    /// Classifies `domain` as a mail destination.
    pub fn server_status(&self, domain: &str) -> ServerStatus {
        let result = self.validate(domain);

        if !result.is_resolvable() {
            ServerStatus::Unreachable
        } else if self.is_dns_record(&result, RecordType::MX) {
            ServerStatus::Ok
        } else {
            ServerStatus::NoMailExchanger
        }
    }
}
