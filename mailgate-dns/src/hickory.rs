//! Live DNS lookups through `hickory-resolver`.
//!
//! The validators are blocking, so this resolver owns a private
//! current-thread tokio runtime and drives each query to completion on it.
//! It must not be called from inside another tokio runtime.

use std::{net::IpAddr, time::Duration};

use hickory_resolver::{
    TokioResolver,
    config::{ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::rr::RecordType,
};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use crate::{DnsConfig, DnsError, Resolver};

/// Blocking resolver backed by the system DNS configuration.
#[derive(Debug)]
pub struct HickoryResolver {
    runtime: Runtime,
    resolver: TokioResolver,
}

impl HickoryResolver {
    /// Creates a resolver from the system configuration with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the system DNS configuration cannot be loaded or
    /// the lookup runtime cannot be started.
    pub fn new() -> Result<Self, DnsError> {
        Self::with_dns_config(&DnsConfig::default())
    }

    /// Creates a resolver from the system configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the system DNS configuration cannot be loaded or
    /// the lookup runtime cannot be started.
    pub fn with_dns_config(config: &DnsConfig) -> Result<Self, DnsError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let resolver = {
            let _guard = runtime.enter();
            TokioResolver::builder(TokioConnectionProvider::default())?
                .with_options(options(config))
                .build()
        };

        Ok(Self { runtime, resolver })
    }

    /// Creates a resolver against explicit name servers.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup runtime cannot be started.
    pub fn with_resolver_config(
        resolver_config: ResolverConfig,
        config: &DnsConfig,
    ) -> Result<Self, DnsError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let resolver = {
            let _guard = runtime.enter();
            TokioResolver::builder_with_config(resolver_config, TokioConnectionProvider::default())
                .with_options(options(config))
                .build()
        };

        Ok(Self { runtime, resolver })
    }
}

fn options(config: &DnsConfig) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(config.timeout_secs);
    opts.attempts = config.attempts;
    opts
}

impl Resolver for HickoryResolver {
    fn resolve_host(&self, name: &str) -> String {
        match self.runtime.block_on(self.resolver.lookup_ip(name)) {
            Ok(lookup) => {
                if let Some(ip) = lookup.iter().find(IpAddr::is_ipv4) {
                    debug!("Resolved {name} to {ip}");
                    ip.to_string()
                } else {
                    debug!("No IPv4 address for {name}");
                    name.to_string()
                }
            }
            Err(err) => {
                if err.is_no_records_found() || err.is_nx_domain() {
                    debug!("Host {name} does not resolve");
                } else {
                    warn!("Host lookup failed for {name}: {err}");
                }
                name.to_string()
            }
        }
    }

    fn has_record(&self, domain: &str, record: RecordType) -> bool {
        match self.runtime.block_on(self.resolver.lookup(domain, record)) {
            Ok(lookup) => {
                let found = lookup
                    .records()
                    .iter()
                    .any(|r| r.record_type() == record);
                debug!("{record} lookup for {domain}: found={found}");
                found
            }
            Err(err) => {
                if !(err.is_no_records_found() || err.is_nx_domain()) {
                    warn!("{record} lookup failed for {domain}: {err}");
                }
                false
            }
        }
    }
}
