use crate::error::Result;

/// Hand-off point to the external SAGA process.
///
/// `run_batch` receives the full ordered command list (export commands
/// first, then the main invocation, then any follow-up conversions) and
/// blocks until the engine finishes. Cancellation and timeouts, if any,
/// live behind this interface.
pub trait EngineRunner {
    fn run_batch(&mut self, commands: &[String]) -> Result<()>;

    /// Progress reporting for a single command line, independent of the
    /// host log.
    fn log_command_line(&mut self, line: &str);
}
