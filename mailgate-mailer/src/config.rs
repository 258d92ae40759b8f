use serde::{Deserialize, Serialize};

/// Composer policy and header defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailerConfig {
    /// Send even if some addresses were dropped (default: false)
    #[serde(default)]
    pub tolerate_partial_failure: bool,

    /// Use the Cc list as recipients when To ends up empty (default: false)
    #[serde(default)]
    pub allow_cc_as_to: bool,

    /// Content type of the body (default: "text/plain")
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Charset of the body and of encoded subjects (default: "utf-8")
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Subject used when none is given (default: "no subject")
    #[serde(default = "default_subject")]
    pub default_subject: String,
}

pub const TEXT: &str = "text/plain";
pub const HTML: &str = "text/html";

fn default_content_type() -> String {
    TEXT.to_string()
}

fn default_charset() -> String {
    "utf-8".to_string()
}

fn default_subject() -> String {
    "no subject".to_string()
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            tolerate_partial_failure: false,
            allow_cc_as_to: false,
            content_type: default_content_type(),
            charset: default_charset(),
            default_subject: default_subject(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config: MailerConfig = ron::from_str("()").unwrap();
        assert_eq!(config, MailerConfig::default());
        assert!(!config.tolerate_partial_failure);
        assert!(!config.allow_cc_as_to);
        assert_eq!(config.content_type, "text/plain");
        assert_eq!(config.charset, "utf-8");
        assert_eq!(config.default_subject, "no subject");
    }

    #[test]
    fn overrides() {
        let config: MailerConfig = ron::from_str(
            r#"(tolerate_partial_failure: true, content_type: "text/html", charset: "koi8-r")"#,
        )
        .unwrap();

        assert!(config.tolerate_partial_failure);
        assert_eq!(config.content_type, HTML);
        assert_eq!(config.charset, "koi8-r");
        assert_eq!(config.default_subject, "no subject");
    }
}
