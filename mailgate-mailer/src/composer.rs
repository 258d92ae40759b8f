//! Message composition and the send-readiness policy.
//!
//! # Lifecycle
//!
//! A composer starts out [`Phase::Building`]. Headers may be assigned any
//! number of times; address headers go through the [`RecipientAggregator`],
//! which drops and records invalid addresses. [`MessageComposer::send`] then
//! either refuses (readiness check failed, nothing changes and no transport
//! call is made) or hands the message to the transport exactly once, moving
//! to [`Phase::Sent`] or [`Phase::TransportFailed`]. Both are final.

use std::borrow::Cow;

use mailgate_common::{ErrorReporter, Severity, TracingReporter};
use mailgate_dns::Resolver;
use mailgate_validate::EmailValidator;
use tracing::{debug, info};

use crate::{
    aggregate::{FailureSummary, RecipientAggregator},
    config::MailerConfig,
    encoding::encode_subject,
    error::MailerError,
    header::{Header, MessageHeaders, single_line},
    transport::{MailTransport, OutgoingMessage},
};

pub const EOL: &str = "\r\n";

/// Optional headers emitted after `From`, in this order, when non-empty.
const OPTIONAL_HEADERS: [Header; 7] = [
    Header::Sender,
    Header::Cc,
    Header::Bcc,
    Header::ReplyTo,
    Header::ReturnPath,
    Header::ReturnReceiptTo,
    Header::DispositionNotificationTo,
];

/// Where a composer is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Building,
    Sent,
    TransportFailed,
}

/// Collects validated headers for one message and sends it once.
///
/// A composer belongs to a single send operation; it is not meant to be
/// shared between concurrent compositions.
pub struct MessageComposer<R, T> {
    validator: EmailValidator<R>,
    transport: T,
    reporter: Box<dyn ErrorReporter>,
    headers: MessageHeaders,
    recipients: RecipientAggregator,
    tolerate_partial_failure: bool,
    allow_cc_as_to: bool,
    default_subject: String,
    phase: Phase,
}

impl<R: Resolver, T: MailTransport> MessageComposer<R, T> {
    pub fn new(resolver: R, transport: T, config: &MailerConfig) -> Self {
        Self {
            validator: EmailValidator::new(resolver),
            transport,
            reporter: Box::new(TracingReporter),
            headers: MessageHeaders::new(&config.content_type, &config.charset),
            recipients: RecipientAggregator::new(),
            tolerate_partial_failure: config.tolerate_partial_failure,
            allow_cc_as_to: config.allow_cc_as_to,
            default_subject: config.default_subject.clone(),
            phase: Phase::Building,
        }
    }

    /// Replaces the default [`TracingReporter`].
    #[must_use]
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Assigns the initial sender and recipients; empty values are skipped.
    #[must_use]
    pub fn with_addresses(mut self, from: &str, to: &str) -> Self {
        if !from.is_empty() {
            self.set(Header::From, from);
        }
        if !to.is_empty() {
            self.set(Header::To, to);
        }
        self
    }

    /// Builds a composer with default policy, assigns `from` and `to`, and sends.
    ///
    /// # Errors
    ///
    /// See [`MessageComposer::send`].
    pub fn text(
        resolver: R,
        transport: T,
        from: &str,
        to: &str,
        message: &str,
        subject: Option<&str>,
    ) -> Result<(), MailerError> {
        Self::new(resolver, transport, &MailerConfig::default())
            .with_addresses(from, to)
            .send(message, subject)
    }

    /// Assigns `value` to `header` and returns what was stored.
    ///
    /// Address headers keep only their valid addresses, in canonical form;
    /// content type, charset and subject are stored without CR or LF.
    pub fn set(&mut self, header: Header, value: &str) -> &str {
        self.headers[header] = if header.is_address() {
            self.recipients.add(&self.validator, header, value)
        } else {
            single_line(value)
        };

        &self.headers[header]
    }

    /// Like [`set`](Self::set), resolving `name` through the header aliases.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::UnknownHeader`] if `name` is not a known header.
    pub fn set_named(&mut self, name: &str, value: &str) -> Result<&str, MailerError> {
        let header = name.parse::<Header>()?;
        Ok(self.set(header, value))
    }

    #[must_use]
    pub fn header(&self, header: Header) -> &str {
        self.headers.get(header)
    }

    /// Allow sending even when some addresses were dropped.
    pub const fn send_incomplete(&mut self) {
        self.tolerate_partial_failure = true;
    }

    /// Allow the Cc list to stand in for an empty To list.
    pub const fn use_cc_as_to(&mut self) {
        self.allow_cc_as_to = true;
    }

    /// Number of addresses dropped so far.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.recipients.error_count()
    }

    /// Dropped addresses, per header.
    #[must_use]
    pub const fn summary(&self) -> &FailureSummary {
        self.recipients.summary()
    }

    /// `true` when no address has been dropped.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error_count() == 0
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Would [`send`](Self::send) hand the message to the transport?
    #[must_use]
    pub fn ready_to_send(&self) -> bool {
        let has_recipients = self.headers.is_set(Header::To)
            || (self.allow_cc_as_to && self.headers.is_set(Header::Cc));

        self.headers.is_set(Header::From)
            && has_recipients
            && (self.tolerate_partial_failure || self.is_complete())
    }

    /// The header block handed to the transport, one CRLF-terminated line each:
    /// `MIME-Version`, `Content-Type`, `From`, then every non-empty optional
    /// header in fixed order.
    #[must_use]
    pub fn header_block(&self) -> String {
        let content_type = format!(
            "{}; charset={}",
            self.headers[Header::ContentType],
            self.headers[Header::Charset]
        );

        let lines = [
            ("MIME-Version", "1.0"),
            ("Content-Type", content_type.as_str()),
            ("From", self.headers.get(Header::From)),
        ]
        .into_iter()
        .chain(
            OPTIONAL_HEADERS
                .iter()
                .filter(|header| self.headers.is_set(**header))
                .map(|header| (header.wire_name(), self.headers.get(*header))),
        );

        let mut block = String::with_capacity(256);
        for (name, value) in lines {
            block.push_str(name);
            block.push_str(": ");
            block.push_str(value);
            block.push_str(EOL);
        }
        block
    }

    fn subject<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .filter(|subject| !subject.is_empty())
            .or_else(|| Some(self.headers.get(Header::Subject)).filter(|s| !s.is_empty()))
            .unwrap_or(&self.default_subject)
    }

    /// Sends the message through the transport, at most once.
    ///
    /// # Errors
    ///
    /// - [`MailerError::AlreadySent`] if a previous call reached the transport.
    /// - [`MailerError::NotReady`] if [`ready_to_send`](Self::ready_to_send)
    ///   is `false`; nothing is changed.
    /// - [`MailerError::Transport`] if delivery failed. The failure is also
    ///   reported to the [`ErrorReporter`] and not retried.
    pub fn send(&mut self, message: &str, subject: Option<&str>) -> Result<(), MailerError> {
        if self.phase != Phase::Building {
            return Err(MailerError::AlreadySent);
        }

        if !self.ready_to_send() {
            debug!(
                "Message not ready: from={:?} to={:?} cc={:?} errors={}",
                self.headers.get(Header::From),
                self.headers.get(Header::To),
                self.headers.get(Header::Cc),
                self.error_count()
            );
            return Err(MailerError::NotReady);
        }

        if !self.headers.is_set(Header::To) {
            debug!("Using Cc as To");
            self.headers[Header::To] = self.headers.take(Header::Cc);
        }

        let subject = match encode_subject(self.subject(subject), self.headers.get(Header::Charset))
        {
            Cow::Borrowed(subject) => subject.to_string(),
            Cow::Owned(encoded) => encoded,
        };

        let outgoing = OutgoingMessage {
            to: self.headers.get(Header::To).to_string(),
            subject,
            body: message.to_string(),
            headers: self.header_block(),
        };

        match self.transport.send(&outgoing) {
            Ok(()) => {
                info!("Email to {} sent", outgoing.to);
                self.phase = Phase::Sent;
                Ok(())
            }
            Err(err) => {
                self.reporter.log(
                    &format!("Email to {} was not sent: {err}", outgoing.to),
                    Severity::User,
                );
                self.phase = Phase::TransportFailed;
                Err(err.into())
            }
        }
    }
}
