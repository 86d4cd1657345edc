/// Severity of a host log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// The host application's logging facility.
///
/// Whether executed command lines are mirrored here is gated by the
/// `log_commands` setting, not by the sink itself.
pub trait LogSink {
    fn append_log(&self, level: LogLevel, lines: &[String]);
}
