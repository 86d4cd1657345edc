use crate::interfaces::{LogLevel, LogSink};
use tracing::{error, info, warn};

/// Log sink that forwards host log entries to `tracing`.
#[derive(Debug, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn append_log(&self, level: LogLevel, lines: &[String]) {
        for line in lines {
            match level {
                LogLevel::Info => info!(target: "saga", "{line}"),
                LogLevel::Warning => warn!(target: "saga", "{line}"),
                LogLevel::Error => error!(target: "saga", "{line}"),
            }
        }
    }
}
