//! Progress reporting for long-running uv operations

use tracing::{error, info, warn};

/// Severity of a progress message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Receives classified progress messages while a command runs
///
/// The CLI implements this on top of its spinner; library callers can use
/// [`TracingReporter`].
pub trait ProgressReporter {
    fn report(&self, level: ProgressLevel, message: &str);
}

/// Reporter that forwards everything to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, level: ProgressLevel, message: &str) {
        match level {
            ProgressLevel::Info | ProgressLevel::Success => info!("{}", message),
            ProgressLevel::Warning => warn!("{}", message),
            ProgressLevel::Error => error!("{}", message),
        }
    }
}
