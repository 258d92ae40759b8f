//! Delivery of composed messages.
//!
//! The composer never speaks a mail protocol itself. It hands an
//! [`OutgoingMessage`] to a [`MailTransport`] and takes the answer as final.

mod memory;
mod sendmail;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use self::{memory::MemoryTransport, sendmail::SendmailTransport};
use crate::error::TransportError;

/// A fully composed message, ready to be delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Comma-separated recipient list.
    pub to: String,
    /// Subject, already encoded for the header if it needed to be.
    pub subject: String,
    pub body: String,
    /// CRLF-terminated header lines, excluding `To` and `Subject`.
    pub headers: String,
}

impl OutgoingMessage {
    /// Renders the message as it would appear on the wire.
    #[must_use]
    pub fn render(&self) -> String {
        let mut message = String::with_capacity(
            self.to.len() + self.subject.len() + self.headers.len() + self.body.len() + 32,
        );

        message.push_str("To: ");
        message.push_str(&self.to);
        message.push_str("\r\n");
        message.push_str("Subject: ");
        message.push_str(&self.subject);
        message.push_str("\r\n");
        message.push_str(&self.headers);
        message.push_str("\r\n");
        message.push_str(&self.body);
        message
    }
}

/// Something that can attempt delivery of a composed message.
pub trait MailTransport: Send + Sync {
    /// Attempts delivery once.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be handed off.
    fn send(&self, message: &OutgoingMessage) -> Result<(), TransportError>;
}

impl<T: MailTransport + ?Sized> MailTransport for &T {
    fn send(&self, message: &OutgoingMessage) -> Result<(), TransportError> {
        (**self).send(message)
    }
}

impl<T: MailTransport + ?Sized> MailTransport for Box<T> {
    fn send(&self, message: &OutgoingMessage) -> Result<(), TransportError> {
        (**self).send(message)
    }
}

impl<T: MailTransport + ?Sized> MailTransport for std::sync::Arc<T> {
    fn send(&self, message: &OutgoingMessage) -> Result<(), TransportError> {
        (**self).send(message)
    }
}

/// Which transport to build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportConfig {
    /// Pipe through a local sendmail-compatible binary.
    Sendmail {
        #[serde(default = "default_sendmail_path")]
        path: PathBuf,
        #[serde(default = "default_sendmail_args")]
        args: Vec<String>,
    },
    /// Keep messages in memory.
    Memory,
}

fn default_sendmail_path() -> PathBuf {
    PathBuf::from("/usr/sbin/sendmail")
}

fn default_sendmail_args() -> Vec<String> {
    vec!["-t".to_string(), "-i".to_string()]
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Sendmail {
            path: default_sendmail_path(),
            args: default_sendmail_args(),
        }
    }
}

impl TransportConfig {
    #[must_use]
    pub fn build(&self) -> Box<dyn MailTransport> {
        match self {
            Self::Sendmail { path, args } => {
                Box::new(SendmailTransport::new(path.clone(), args.clone()))
            }
            Self::Memory => Box::new(MemoryTransport::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn render_layout() {
        let message = OutgoingMessage {
            to: "a@example.com,b@example.com".to_string(),
            subject: "Hi".to_string(),
            body: "Body\r\n".to_string(),
            headers: "MIME-Version: 1.0\r\nFrom: c@example.com\r\n".to_string(),
        };

        assert_eq!(
            message.render(),
            "To: a@example.com,b@example.com\r\nSubject: Hi\r\nMIME-Version: 1.0\r\nFrom: c@example.com\r\n\r\nBody\r\n"
        );
    }

    #[test]
    fn transport_config_from_ron() {
        let config: TransportConfig = ron::from_str("Sendmail()").unwrap();
        assert_eq!(config, TransportConfig::default());

        let config: TransportConfig =
            ron::from_str(r#"Sendmail(path: "/opt/bin/sendmail", args: ["-t"])"#).unwrap();
        assert_eq!(
            config,
            TransportConfig::Sendmail {
                path: PathBuf::from("/opt/bin/sendmail"),
                args: vec!["-t".to_string()],
            }
        );

        let config: TransportConfig = ron::from_str("Memory").unwrap();
        assert_eq!(config, TransportConfig::Memory);
    }
}
