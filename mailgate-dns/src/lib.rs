//! DNS capability consumed by the mailgate validators.
//!
//! Validation code never talks to the network directly. It goes through the
//! [`Resolver`] trait, which has a live implementation backed by
//! `hickory-resolver` ([`HickoryResolver`]) and a table-driven one for tests
//! and dry runs ([`MemoryResolver`]).

pub mod config;
pub mod error;
pub mod hickory;
pub mod memory;

pub use config::DnsConfig;
pub use error::DnsError;
pub use hickory::HickoryResolver;
pub use hickory_resolver::proto::rr::RecordType;
pub use memory::MemoryResolver;

/// Blocking host and record lookups.
///
/// `resolve_host` follows the classic host-lookup convention: on failure the
/// input is returned unchanged. Callers detect "did not resolve" by comparing
/// the answer against the name they asked for, so implementations must not
/// substitute an empty string or a placeholder address.
pub trait Resolver: Send + Sync {
    /// Resolve `name` to a textual IPv4 address, or echo `name` back.
    fn resolve_host(&self, name: &str) -> String;

    /// Does `domain` publish at least one record of type `record`?
    fn has_record(&self, domain: &str, record: RecordType) -> bool;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve_host(&self, name: &str) -> String {
        (**self).resolve_host(name)
    }

    fn has_record(&self, domain: &str, record: RecordType) -> bool {
        (**self).has_record(domain, record)
    }
}

impl<R: Resolver + ?Sized> Resolver for std::sync::Arc<R> {
    fn resolve_host(&self, name: &str) -> String {
        (**self).resolve_host(name)
    }

    fn has_record(&self, domain: &str, record: RecordType) -> bool {
        (**self).has_record(domain, record)
    }
}
