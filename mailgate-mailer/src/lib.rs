//! Recipient aggregation, send-readiness policy and header assembly for
//! outbound mail.
//!
//! ```
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! use mailgate_dns::MemoryResolver;
//! use mailgate_mailer::{Header, MailerConfig, MemoryTransport, MessageComposer};
//!
//! let resolver = MemoryResolver::new()
//!     .with_mail_domain("example.com", IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
//! let transport = MemoryTransport::new();
//!
//! let mut composer = MessageComposer::new(resolver, &transport, &MailerConfig::default())
//!     .with_addresses("me@example.com", "you@example.com, not-an-address");
//! composer.send_incomplete();
//!
//! assert_eq!(composer.header(Header::To), "you@example.com");
//! assert_eq!(composer.error_count(), 1);
//! assert!(composer.send("Hello", Some("Greetings")).is_ok());
//! ```

pub mod aggregate;
pub mod composer;
pub mod config;
pub mod encoding;
pub mod error;
pub mod header;
pub mod transport;

pub use aggregate::{FailureSummary, RecipientAggregator, prepare, split_addresses};
pub use composer::{MessageComposer, Phase};
pub use config::MailerConfig;
pub use encoding::{encode_subject, is_printable_ascii};
pub use error::{MailerError, TransportError};
pub use header::{Header, MessageHeaders};
pub use transport::{
    MailTransport, MemoryTransport, OutgoingMessage, SendmailTransport, TransportConfig,
};
