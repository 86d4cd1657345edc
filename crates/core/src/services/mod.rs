//! Default implementations of the collaborator interfaces.
//!
//! These cover standalone use, where there is no host application
//! providing its own resolver, exporter or logging facility.

pub mod saga_batch_runner;
pub mod system_temp_allocator;
pub mod tracing_log_sink;

pub use saga_batch_runner::SagaBatchRunner;
pub use system_temp_allocator::SystemTempAllocator;
pub use tracing_log_sink::TracingLogSink;
