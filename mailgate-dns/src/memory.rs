//! Table-driven resolver for tests and dry runs.

use std::{
    collections::{HashMap, HashSet},
    net::IpAddr,
};

use parking_lot::{Mutex, RwLock};

use crate::{RecordType, Resolver};

/// A query observed by a [`MemoryResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Host(String),
    Record(String, RecordType),
}

/// Answers lookups from in-memory tables.
///
/// Names are matched case-insensitively. Every query is recorded so callers
/// can check which lookups were (or were not) issued.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    hosts: RwLock<HashMap<String, IpAddr>>,
    records: RwLock<HashSet<(String, RecordType)>>,
    queries: Mutex<Vec<Query>>,
}

impl MemoryResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an address for `name`.
    #[must_use]
    pub fn with_host(self, name: &str, ip: IpAddr) -> Self {
        self.insert_host(name, ip);
        self
    }

    /// Registers a record of type `record` for `domain`.
    #[must_use]
    pub fn with_record(self, domain: &str, record: RecordType) -> Self {
        self.insert_record(domain, record);
        self
    }

    /// Registers a domain that resolves and accepts mail (address plus MX).
    #[must_use]
    pub fn with_mail_domain(self, domain: &str, ip: IpAddr) -> Self {
        self.with_host(domain, ip).with_record(domain, RecordType::MX)
    }

    pub fn insert_host(&self, name: &str, ip: IpAddr) {
        self.hosts.write().insert(name.to_ascii_lowercase(), ip);
        self.insert_record(name, RecordType::A);
    }

    pub fn insert_record(&self, domain: &str, record: RecordType) {
        self.records
            .write()
            .insert((domain.to_ascii_lowercase(), record));
    }

    pub fn remove_record(&self, domain: &str, record: RecordType) {
        self.records
            .write()
            .remove(&(domain.to_ascii_lowercase(), record));
    }

    /// All queries issued so far, oldest first.
    #[must_use]
    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().clone()
    }

    pub fn clear_queries(&self) {
        self.queries.lock().clear();
    }
}

impl Resolver for MemoryResolver {
    fn resolve_host(&self, name: &str) -> String {
        self.queries.lock().push(Query::Host(name.to_string()));

        self.hosts
            .read()
            .get(&name.to_ascii_lowercase())
            .map_or_else(|| name.to_string(), ToString::to_string)
    }

    fn has_record(&self, domain: &str, record: RecordType) -> bool {
        self.queries
            .lock()
            .push(Query::Record(domain.to_string(), record));

        self.records
            .read()
            .contains(&(domain.to_ascii_lowercase(), record))
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use pretty_assertions::assert_eq;

    use super::*;

    const IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10));

    #[test]
    fn echoes_unknown_hosts() {
        let resolver = MemoryResolver::new();
        assert_eq!(resolver.resolve_host("nowhere.test"), "nowhere.test");
        assert!(!resolver.has_record("nowhere.test", RecordType::MX));
    }

    #[test]
    fn answers_registered_hosts_case_insensitively() {
        let resolver = MemoryResolver::new().with_mail_domain("Example.com", IP);

        assert_eq!(resolver.resolve_host("example.COM"), "192.0.2.10");
        assert!(resolver.has_record("example.com", RecordType::MX));
        assert!(resolver.has_record("example.com", RecordType::A));
        assert!(!resolver.has_record("example.com", RecordType::TXT));
    }

    #[test]
    fn records_queries_in_order() {
        let resolver = MemoryResolver::new().with_host("a.test", IP);
        resolver.resolve_host("a.test");
        resolver.has_record("a.test", RecordType::MX);

        assert_eq!(
            resolver.queries(),
            vec![
                Query::Host("a.test".to_string()),
                Query::Record("a.test".to_string(), RecordType::MX),
            ]
        );

        resolver.clear_queries();
        assert!(resolver.queries().is_empty());
    }

    #[test]
    fn removing_mx_keeps_host() {
        let resolver = MemoryResolver::new().with_mail_domain("a.test", IP);
        resolver.remove_record("a.test", RecordType::MX);

        assert_eq!(resolver.resolve_host("a.test"), "192.0.2.10");
        assert!(!resolver.has_record("a.test", RecordType::MX));
    }
}
