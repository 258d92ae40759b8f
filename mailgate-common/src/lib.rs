pub mod logging;
pub mod report;

pub use report::{ErrorReporter, Severity, TracingReporter};
pub use tracing;
