//! Error types for the mailer.

use std::io;

use thiserror::Error;

/// Errors raised by a [`MailTransport`](crate::transport::MailTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not start or talk to the delivery agent.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The delivery agent exited unsuccessfully.
    #[error("Delivery agent exited with {}", .0.map_or_else(|| "a signal".to_string(), |code| format!("status {code}")))]
    Exit(Option<i32>),

    /// The transport refused the message.
    #[error("Message rejected: {0}")]
    Rejected(String),
}

/// Errors returned by the [`MessageComposer`](crate::MessageComposer).
#[derive(Debug, Error)]
pub enum MailerError {
    /// A header name that is neither a known header nor an alias.
    #[error("Unknown header: {0}")]
    UnknownHeader(String),

    /// The readiness check failed; nothing was sent.
    #[error("Message is not ready to send")]
    NotReady,

    /// The message already went to the transport once.
    #[error("Message was already handed to the transport")]
    AlreadySent,

    /// The transport failed to deliver.
    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),
}

impl MailerError {
    /// Returns `true` if the transport was never invoked.
    #[must_use]
    pub const fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            TransportError::Exit(Some(75)).to_string(),
            "Delivery agent exited with status 75"
        );
        assert_eq!(
            TransportError::Exit(None).to_string(),
            "Delivery agent exited with a signal"
        );
        assert_eq!(
            MailerError::UnknownHeader("X-Foo".to_string()).to_string(),
            "Unknown header: X-Foo"
        );
    }

    #[test]
    fn classification() {
        assert!(MailerError::NotReady.is_not_ready());
        assert!(!MailerError::AlreadySent.is_not_ready());
    }

    #[test]
    fn transport_source_is_kept() {
        let err = MailerError::from(TransportError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "no sendmail",
        )));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Transport failed: I/O error: no sendmail");
    }
}
