use thiserror::Error;

/// Errors raised while setting up a resolver.
///
/// Individual lookups never fail with these; a failed lookup is reported
/// through the [`Resolver`](crate::Resolver) conventions instead.
#[derive(Debug, Error)]
pub enum DnsError {
    /// The system resolver configuration could not be loaded.
    #[error("Failed to load resolver configuration: {0}")]
    Configuration(#[from] hickory_resolver::ResolveError),

    /// The runtime driving lookups could not be started.
    #[error("Failed to start DNS runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl DnsError {
    /// Returns `true` if retrying construction may succeed.
    #[must_use]
    pub const fn is_temporary(&self) -> bool {
        matches!(self, Self::Runtime(_))
    }
}
