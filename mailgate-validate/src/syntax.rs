//! Lexical rules for host names and email addresses.
//!
//! # Grammar
//!
//! ```text
//! hostname   = label *("." label)          ; at most 253 octets
//! label      = let-dig [*ldh let-dig]      ; 1 to 63 octets
//! let-dig    = ALPHA / DIGIT
//! ldh        = let-dig / "-"
//!
//! address    = local-part "@" mail-domain  ; at most 254 octets
//! local-part = atom *("." atom)            ; at most 64 octets
//! atom       = 1*atext
//! mail-domain = hostname                   ; with at least two labels
//!
//! atext      = ALPHA / DIGIT / "!" / "#" / "$" / "%" / "&" / "'" /
//!              "*" / "+" / "-" / "/" / "=" / "?" / "^" / "_" / "`" /
//!              "{" / "|" / "}" / "~"
//! ```
//!
//! Quoted local parts and address literals are not accepted; the sanitiser
//! strips quotes before the grammar ever sees them.

use std::borrow::Cow;

use thiserror::Error;

pub const MAX_HOSTNAME_LEN: usize = 253;
pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_ADDRESS_LEN: usize = 254;
pub const MAX_LOCAL_PART_LEN: usize = 64;

/// Why a string failed a lexical check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Empty input")]
    Empty,

    #[error("Host name exceeds 253 octets")]
    HostnameTooLong,

    #[error("Label exceeds 63 octets: {0}")]
    LabelTooLong(String),

    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    #[error("Address exceeds 254 octets")]
    AddressTooLong,

    #[error("Local-part exceeds 64 octets")]
    LocalPartTooLong,

    #[error("Missing '@' separator")]
    MissingAtSign,

    #[error("Invalid local-part: {0}")]
    InvalidLocalPart(String),

    #[error("Mail domain must have at least two labels: {0}")]
    UnqualifiedDomain(String),
}

/// Result type for lexical checks.
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Characters permitted in an atom of the local part.
#[must_use]
pub const fn is_atext(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
        )
}

/// Characters that survive [`sanitize`].
///
/// Narrower than [`is_atext`]: `/` is stripped.
#[must_use]
pub const fn is_address_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
                | '@'
                | '.'
                | '['
                | ']'
        )
}

/// Strips every character that cannot appear in an address.
///
/// This does not validate anything: `"<a b@c>"` becomes `"ab@c"`. Input that
/// is already clean is returned borrowed.
#[must_use]
pub fn sanitize(input: &str) -> Cow<'_, str> {
    if input.chars().all(is_address_char) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.chars().filter(|&ch| is_address_char(ch)).collect())
    }
}

/// Checks `input` against the host name rules.
///
/// # Errors
///
/// Returns the first rule the input breaks.
pub fn check_hostname(input: &str) -> Result<()> {
    if input.is_empty() {
        return Err(SyntaxError::Empty);
    }

    if input.len() > MAX_HOSTNAME_LEN {
        return Err(SyntaxError::HostnameTooLong);
    }

    input.split('.').try_for_each(check_label)
}

fn check_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(SyntaxError::InvalidLabel("empty label".to_string()));
    }

    if label.len() > MAX_LABEL_LEN {
        return Err(SyntaxError::LabelTooLong(label.to_string()));
    }

    if let Some(ch) = label
        .chars()
        .find(|&ch| !ch.is_ascii_alphanumeric() && ch != '-')
    {
        return Err(SyntaxError::InvalidLabel(format!(
            "invalid character '{ch}' in '{label}'"
        )));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(SyntaxError::InvalidLabel(format!(
            "'{label}' must start and end with a letter or digit"
        )));
    }

    Ok(())
}

/// Checks `input` against the address grammar and splits it at the `@`.
///
/// # Errors
///
/// Returns the first rule the input breaks.
pub fn check_address(input: &str) -> Result<(&str, &str)> {
    if input.is_empty() {
        return Err(SyntaxError::Empty);
    }

    if input.len() > MAX_ADDRESS_LEN {
        return Err(SyntaxError::AddressTooLong);
    }

    let (local_part, domain) = input.rsplit_once('@').ok_or(SyntaxError::MissingAtSign)?;

    check_local_part(local_part)?;
    check_hostname(domain)?;

    if !domain.contains('.') {
        return Err(SyntaxError::UnqualifiedDomain(domain.to_string()));
    }

    Ok((local_part, domain))
}

fn check_local_part(input: &str) -> Result<()> {
    if input.is_empty() {
        return Err(SyntaxError::InvalidLocalPart("empty local-part".to_string()));
    }

    if input.len() > MAX_LOCAL_PART_LEN {
        return Err(SyntaxError::LocalPartTooLong);
    }

    for atom in input.split('.') {
        if atom.is_empty() {
            return Err(SyntaxError::InvalidLocalPart(
                "empty atom (leading, trailing or doubled '.')".to_string(),
            ));
        }

        if let Some(ch) = atom.chars().find(|&ch| !is_atext(ch)) {
            return Err(SyntaxError::InvalidLocalPart(format!(
                "invalid character '{ch}' in atom"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sanitize_strips_brackets_and_spaces() {
        assert_eq!(sanitize("<user@example.com>"), "user@example.com");
        assert_eq!(sanitize(" a b@c.d "), "ab@c.d");
        assert_eq!(sanitize("Pelé@example.com"), "Pel@example.com");
        assert_eq!(sanitize("\"quoted\"@example.com"), "quoted@example.com");
        assert_eq!(sanitize("a/b@example.com"), "ab@example.com");
    }

    #[test]
    fn sanitize_borrows_clean_input() {
        assert!(matches!(sanitize("user@example.com"), Cow::Borrowed(_)));
        assert!(matches!(sanitize("<user@example.com>"), Cow::Owned(_)));
    }

    #[test]
    fn hostnames() {
        assert_eq!(check_hostname("example.com"), Ok(()));
        assert_eq!(check_hostname("localhost"), Ok(()));
        assert_eq!(check_hostname("a-b.c0.example"), Ok(()));
        assert_eq!(check_hostname("123.example"), Ok(()));

        assert_eq!(check_hostname(""), Err(SyntaxError::Empty));
        assert!(matches!(
            check_hostname("-lead.example"),
            Err(SyntaxError::InvalidLabel(_))
        ));
        assert!(matches!(
            check_hostname("trail-.example"),
            Err(SyntaxError::InvalidLabel(_))
        ));
        assert!(matches!(
            check_hostname("under_score.example"),
            Err(SyntaxError::InvalidLabel(_))
        ));
        assert!(matches!(
            check_hostname("double..dot"),
            Err(SyntaxError::InvalidLabel(_))
        ));
        assert!(matches!(
            check_hostname(".leading"),
            Err(SyntaxError::InvalidLabel(_))
        ));
    }

    #[test]
    fn hostname_lengths() {
        let label = "a".repeat(63);
        assert_eq!(check_hostname(&label), Ok(()));
        assert!(matches!(
            check_hostname(&"a".repeat(64)),
            Err(SyntaxError::LabelTooLong(_))
        ));

        // 4 * 63 + 3 dots = 255
        let long = [label.as_str(); 4].join(".");
        assert_eq!(check_hostname(&long), Err(SyntaxError::HostnameTooLong));

        // 3 * 63 + 61 + 3 dots = 253
        let max = format!("{label}.{label}.{label}.{}", "b".repeat(61));
        assert_eq!(max.len(), 253);
        assert_eq!(check_hostname(&max), Ok(()));
    }

    #[test]
    fn addresses() {
        assert_eq!(
            check_address("user@example.com"),
            Ok(("user", "example.com"))
        );
        assert_eq!(
            check_address("first.last+tag@mail.example.org"),
            Ok(("first.last+tag", "mail.example.org"))
        );
        assert_eq!(
            check_address("!#$%&'*+-/=?^_`{}|~@example.com"),
            Ok(("!#$%&'*+-/=?^_`{}|~", "example.com"))
        );
    }

    #[test]
    fn invalid_addresses() {
        assert_eq!(check_address(""), Err(SyntaxError::Empty));
        assert_eq!(
            check_address("not-an-email"),
            Err(SyntaxError::MissingAtSign)
        );
        assert!(matches!(
            check_address("@example.com"),
            Err(SyntaxError::InvalidLocalPart(_))
        ));
        assert!(matches!(
            check_address("user@"),
            Err(SyntaxError::Empty)
        ));
        assert!(matches!(
            check_address("bad@@@"),
            Err(SyntaxError::InvalidLocalPart(_))
        ));
        assert!(matches!(
            check_address("a@b@example.com"),
            Err(SyntaxError::InvalidLocalPart(_))
        ));
        assert!(matches!(
            check_address("no..dots@example.com"),
            Err(SyntaxError::InvalidLocalPart(_))
        ));
        assert!(matches!(
            check_address("user@localhost"),
            Err(SyntaxError::UnqualifiedDomain(_))
        ));
        assert!(matches!(
            check_address("user@[192.0.2.1]"),
            Err(SyntaxError::InvalidLabel(_))
        ));
    }

    #[test]
    fn address_lengths() {
        let local = "a".repeat(65);
        assert_eq!(
            check_address(&format!("{local}@example.com")),
            Err(SyntaxError::LocalPartTooLong)
        );

        let local = "a".repeat(64);
        let domain = format!("{}.{}.{}", "b".repeat(63), "b".repeat(63), "c".repeat(62));
        assert_eq!(local.len() + 1 + domain.len(), 255);
        assert_eq!(
            check_address(&format!("{local}@{domain}")),
            Err(SyntaxError::AddressTooLong)
        );
    }
}
