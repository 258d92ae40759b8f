//! Subject line encoding.

use std::borrow::Cow;

use base64::{Engine, engine::general_purpose::STANDARD};
use encoding_rs::{Encoding, UTF_8};

/// Is `text` non-empty and made only of printable ASCII (0x20 to 0x7E)?
#[must_use]
pub fn is_printable_ascii(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Wraps `subject` in a single base64 encoded word unless it is printable ASCII.
///
/// The subject is converted to `charset` before encoding. Labels
/// `encoding_rs` does not know are tagged as given and carry UTF-8 bytes.
/// Charsets that cannot be produced (UTF-16), or that cannot represent every
/// character of the subject, are replaced by UTF-8 and tagged accordingly.
/// An empty subject is returned as is.
#[must_use]
pub fn encode_subject<'a>(subject: &'a str, charset: &str) -> Cow<'a, str> {
    if subject.is_empty() || is_printable_ascii(subject) {
        return Cow::Borrowed(subject);
    }

    let (label, bytes) = match Encoding::for_label(charset.as_bytes()) {
        Some(encoding) => match encoding.encode(subject) {
            (_, _, true) => (UTF_8.name(), Cow::Borrowed(subject.as_bytes())),
            (bytes, used, false) if used == encoding => (charset, bytes),
            (bytes, used, false) => (used.name(), bytes),
        },
        None => (charset, Cow::Borrowed(subject.as_bytes())),
    };

    Cow::Owned(format!("=?{label}?B?{}?=", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn printable_ascii() {
        assert!(is_printable_ascii("Hello, world ~"));
        assert!(!is_printable_ascii(""));
        assert!(!is_printable_ascii("tab\there"));
        assert!(!is_printable_ascii("caf\u{e9}"));
    }

    #[test]
    fn ascii_passes_through() {
        let subject = encode_subject("Quarterly report", "utf-8");
        assert!(matches!(subject, Cow::Borrowed("Quarterly report")));
    }

    #[test]
    fn utf8_encoded_word() {
        // "Привет" in UTF-8
        assert_eq!(
            encode_subject("Привет", "utf-8"),
            "=?utf-8?B?0J/RgNC40LLQtdGC?="
        );
    }

    #[test]
    fn legacy_charset_is_transcoded() {
        // 0xE9 in ISO-8859-1 / windows-1252
        assert_eq!(encode_subject("caf\u{e9}", "iso-8859-1"), "=?iso-8859-1?B?Y2Fm6Q==?=");
    }

    #[test]
    fn unknown_charset_keeps_label() {
        assert_eq!(encode_subject("caf\u{e9}", "x-unknown"), "=?x-unknown?B?Y2Fmw6k=?=");
    }

    #[test]
    fn utf16_falls_back_to_utf8() {
        assert_eq!(encode_subject("caf\u{e9}", "utf-16le"), "=?UTF-8?B?Y2Fmw6k=?=");
    }

    #[test]
    fn unmappable_characters_fall_back_to_utf8() {
        let encoded = encode_subject("caf\u{e9} \u{2603}", "iso-8859-1");
        assert_eq!(encoded, "=?UTF-8?B?Y2Fmw6kg4piD?=");

        let line = format!("Subject: {encoded}");
        let (header, _) = mailparse::parse_header(line.as_bytes()).unwrap();
        assert_eq!(header.get_value(), "caf\u{e9} \u{2603}");
    }

    #[test]
    fn empty_subject_passes_through() {
        assert!(matches!(encode_subject("", "utf-8"), Cow::Borrowed("")));
    }

    #[test]
    fn decodes_with_mailparse() {
        let encoded = encode_subject("Grüße aus Köln", "utf-8");
        let line = format!("Subject: {encoded}");
        let (header, _) = mailparse::parse_header(line.as_bytes()).unwrap();
        assert_eq!(header.get_value(), "Grüße aus Köln");
    }
}
