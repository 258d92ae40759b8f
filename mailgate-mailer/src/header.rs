//! Header keys understood by the composer.

use core::{
    fmt::{self, Display, Formatter},
    ops::{Index, IndexMut},
    str::FromStr,
};

use phf::phf_map;
use serde::Serialize;

use crate::error::MailerError;

/// A header the composer can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Header {
    From,
    To,
    Cc,
    Bcc,
    Sender,
    ReplyTo,
    ReturnPath,
    ReturnReceiptTo,
    DispositionNotificationTo,
    ContentType,
    Charset,
    Subject,
}

impl Header {
    pub const ALL: [Self; 12] = [
        Self::From,
        Self::To,
        Self::Cc,
        Self::Bcc,
        Self::Sender,
        Self::ReplyTo,
        Self::ReturnPath,
        Self::ReturnReceiptTo,
        Self::DispositionNotificationTo,
        Self::ContentType,
        Self::Charset,
        Self::Subject,
    ];

    /// Name as written in a message.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::From => "From",
            Self::To => "To",
            Self::Cc => "Cc",
            Self::Bcc => "Bcc",
            Self::Sender => "Sender",
            Self::ReplyTo => "Reply-To",
            Self::ReturnPath => "Return-Path",
            Self::ReturnReceiptTo => "Return-Receipt-To",
            Self::DispositionNotificationTo => "Disposition-Notification-To",
            Self::ContentType => "Content-Type",
            Self::Charset => "charset",
            Self::Subject => "Subject",
        }
    }

    /// Whether values of this header are address lists.
    #[must_use]
    pub const fn is_address(self) -> bool {
        !matches!(self, Self::ContentType | Self::Charset | Self::Subject)
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Every accepted spelling, lowercased, mapped to its header.
static ALIASES: phf::Map<&'static str, Header> = phf_map! {
    "from" => Header::From,
    "to" => Header::To,
    "cc" => Header::Cc,
    "bcc" => Header::Bcc,
    "sender" => Header::Sender,
    "replyto" => Header::ReplyTo,
    "reply-to" => Header::ReplyTo,
    "reply" => Header::ReplyTo,
    "returnpath" => Header::ReturnPath,
    "return-path" => Header::ReturnPath,
    "path" => Header::ReturnPath,
    "returnreceiptto" => Header::ReturnReceiptTo,
    "return-receipt-to" => Header::ReturnReceiptTo,
    "receipt" => Header::ReturnReceiptTo,
    "dispositionnotificationto" => Header::DispositionNotificationTo,
    "disposition-notification-to" => Header::DispositionNotificationTo,
    "disp" => Header::DispositionNotificationTo,
    "contenttype" => Header::ContentType,
    "content-type" => Header::ContentType,
    "content" => Header::ContentType,
    "charset" => Header::Charset,
    "subject" => Header::Subject,
    "title" => Header::Subject,
};

impl FromStr for Header {
    type Err = MailerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ALIASES
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| MailerError::UnknownHeader(name.to_string()))
    }
}

/// `value` with every CR and LF removed.
#[must_use]
pub fn single_line(value: &str) -> String {
    value.chars().filter(|ch| !matches!(ch, '\r' | '\n')).collect()
}

/// Current value of every header, empty when unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageHeaders([String; Header::ALL.len()]);

impl MessageHeaders {
    /// Headers with the given content type and charset, everything else empty.
    #[must_use]
    pub fn new(content_type: &str, charset: &str) -> Self {
        let mut headers = Self::default();
        headers[Header::ContentType] = single_line(content_type);
        headers[Header::Charset] = single_line(charset);
        headers
    }

    #[must_use]
    pub fn get(&self, header: Header) -> &str {
        &self[header]
    }

    #[must_use]
    pub fn is_set(&self, header: Header) -> bool {
        !self[header].is_empty()
    }

    /// Takes the value of `header`, leaving it empty.
    pub fn take(&mut self, header: Header) -> String {
        std::mem::take(&mut self[header])
    }
}

impl Index<Header> for MessageHeaders {
    type Output = String;

    fn index(&self, header: Header) -> &Self::Output {
        &self.0[header.slot()]
    }
}

impl IndexMut<Header> for MessageHeaders {
    fn index_mut(&mut self, header: Header) -> &mut Self::Output {
        &mut self.0[header.slot()]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn canonical_names_parse() {
        for header in Header::ALL {
            assert_eq!(format!("{header:?}").parse::<Header>().unwrap(), header);
            assert_eq!(header.wire_name().parse::<Header>().unwrap(), header);
        }
    }

    #[test]
    fn aliases_parse_case_insensitively() {
        assert_eq!("title".parse::<Header>().unwrap(), Header::Subject);
        assert_eq!("Content".parse::<Header>().unwrap(), Header::ContentType);
        assert_eq!("REPLY".parse::<Header>().unwrap(), Header::ReplyTo);
        assert_eq!("path".parse::<Header>().unwrap(), Header::ReturnPath);
        assert_eq!("receipt".parse::<Header>().unwrap(), Header::ReturnReceiptTo);
        assert_eq!(
            "disp".parse::<Header>().unwrap(),
            Header::DispositionNotificationTo
        );
        assert_eq!(" cc ".parse::<Header>().unwrap(), Header::Cc);
    }

    #[test]
    fn unknown_header_is_an_error() {
        let err = "X-Mailer".parse::<Header>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown header: X-Mailer");
    }

    #[test]
    fn scalar_headers() {
        assert!(!Header::Subject.is_address());
        assert!(!Header::ContentType.is_address());
        assert!(!Header::Charset.is_address());
        assert!(Header::ReplyTo.is_address());
        assert!(Header::From.is_address());
    }

    #[test]
    fn line_breaks_are_removed() {
        assert_eq!(single_line("text/plain\r\nBcc: x@evil.test"), "text/plainBcc: x@evil.test");

        let headers = MessageHeaders::new("text/html\n", "utf-8\r\n");
        assert_eq!(headers.get(Header::ContentType), "text/html");
        assert_eq!(headers.get(Header::Charset), "utf-8");
    }

    #[test]
    fn header_storage() {
        let mut headers = MessageHeaders::new("text/plain", "utf-8");
        assert_eq!(headers.get(Header::ContentType), "text/plain");
        assert_eq!(headers.get(Header::Charset), "utf-8");
        assert!(!headers.is_set(Header::Cc));

        headers[Header::Cc] = "a@example.com".to_string();
        assert!(headers.is_set(Header::Cc));
        assert_eq!(headers.take(Header::Cc), "a@example.com");
        assert!(!headers.is_set(Header::Cc));
    }
}
