//! Out-of-band error reporting.
//!
//! Components that recover from a failure locally (or give up on it without
//! raising) hand a human-readable note to an [`ErrorReporter`]. The host
//! application decides where those notes go; [`TracingReporter`] simply
//! forwards them into the `tracing` pipeline.

use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// How serious a reported condition is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Worth recording, nothing went wrong.
    Notice,
    /// Something was dropped or degraded but work carried on.
    Warning,
    /// An operation failed.
    Error,
    /// An operation failed because of what the caller asked for.
    User,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::User => "user",
        })
    }
}

/// Sink for conditions that are reported rather than returned.
pub trait ErrorReporter: Send + Sync {
    fn log(&self, message: &str, severity: Severity);
}

/// Reports through `tracing` events under the `mailgate::report` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Notice => info!(target: "mailgate::report", %severity, "{message}"),
            Severity::Warning => warn!(target: "mailgate::report", %severity, "{message}"),
            Severity::Error | Severity::User => {
                error!(target: "mailgate::report", %severity, "{message}");
            }
        }
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &R {
    fn log(&self, message: &str, severity: Severity) {
        (**self).log(message, severity);
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for std::sync::Arc<R> {
    fn log(&self, message: &str, severity: Severity) {
        (**self).log(message, severity);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Collect(Mutex<Vec<(String, Severity)>>);

    impl ErrorReporter for Collect {
        fn log(&self, message: &str, severity: Severity) {
            self.0
                .lock()
                .unwrap()
                .push((message.to_string(), severity));
        }
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Notice.to_string(), "notice");
        assert_eq!(Severity::User.to_string(), "user");
        assert!(Severity::Error > Severity::Warning);
    }

    #[test]
    fn reporter_through_arc() {
        let sink = Arc::new(Collect::default());
        let reporter: Arc<dyn ErrorReporter> = sink.clone();

        reporter.log("first", Severity::Warning);
        (&*reporter).log("second", Severity::User);

        assert_eq!(
            *sink.0.lock().unwrap(),
            vec![
                ("first".to_string(), Severity::Warning),
                ("second".to_string(), Severity::User),
            ]
        );
    }

    #[test]
    fn tracing_reporter_does_not_panic_without_subscriber() {
        TracingReporter.log("nobody is listening", Severity::Error);
    }
}
