//! Syntax and DNS validation for domain names and email addresses.
//!
//! ```
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! use mailgate_dns::MemoryResolver;
//! use mailgate_validate::{EmailOutcome, EmailValidator};
//!
//! let resolver = MemoryResolver::new()
//!     .with_mail_domain("example.com", IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
//! let validator = EmailValidator::new(resolver);
//!
//! let result = validator.validate("<user@example.com>");
//! assert_eq!(result.outcome(), EmailOutcome::OkButRaw);
//! assert_eq!(result.canonical(), "user@example.com");
//! ```

pub mod domain;
pub mod email;
pub mod syntax;

pub use domain::{DomainOutcome, DomainResult, DomainValidator, ServerStatus};
pub use email::{EmailOutcome, EmailResult, EmailValidator, domain_of};
pub use syntax::{SyntaxError, sanitize};
