//! Execution orchestrator: turns a bound descriptor into an ordered
//! command batch and drives the engine through it.

use crate::{
    command,
    config::Settings,
    error::Result,
    export::ExportContext,
    ext::ExtensionRegistry,
    interfaces::{EngineRunner, LayerExporter, LayerResolver, LogLevel, LogSink, TempFileAllocator},
    translate,
    types::AlgorithmDescriptor,
    validation, SessionExportCache,
};
use std::path::Path;
use tracing::debug;

/// Coordinates one algorithm run against a set of host collaborators.
///
/// Single-threaded and blocking throughout; the session export cache is
/// shared across runs by the owning host, which is safe because runs are
/// never concurrent.
pub struct AlgorithmRunner<'a> {
    resolver: &'a dyn LayerResolver,
    exporter: &'a dyn LayerExporter,
    temp: &'a dyn TempFileAllocator,
    engine: &'a mut dyn EngineRunner,
    log: &'a dyn LogSink,
    extensions: &'a ExtensionRegistry,
    session_cache: &'a mut SessionExportCache,
    settings: &'a Settings,
}

impl<'a> AlgorithmRunner<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        resolver: &'a dyn LayerResolver,
        exporter: &'a dyn LayerExporter,
        temp: &'a dyn TempFileAllocator,
        engine: &'a mut dyn EngineRunner,
        log: &'a dyn LogSink,
        extensions: &'a ExtensionRegistry,
        session_cache: &'a mut SessionExportCache,
        settings: &'a Settings,
    ) -> Self {
        Self {
            resolver,
            exporter,
            temp,
            engine,
            log,
            extensions,
            session_cache,
            settings,
        }
    }

    /// Pre-flight check; a returned message means the bound inputs are
    /// unusable as-is and the run should not be started.
    pub fn validate(&self, alg: &AlgorithmDescriptor) -> Option<String> {
        validation::check_before_execution(alg, self.resolver)
    }

    /// Builds the full ordered command batch without executing anything:
    /// export commands first, then the main invocation, then follow-up
    /// conversions, all filtered through the algorithm's extension hooks.
    ///
    /// Mutates the descriptor: companion references are rewritten and
    /// output destinations resolved.
    pub fn build_commands(&mut self, alg: &mut AlgorithmDescriptor) -> Result<Vec<String>> {
        if let Some(extension) = self.extensions.lookup(&alg.command_line_name) {
            debug!("running pre-process hook for {}", alg.command_line_name);
            extension.pre_process_inputs(alg)?;
        }

        let mut ctx = ExportContext::new(
            self.resolver,
            self.exporter,
            self.temp,
            self.session_cache,
        );
        let mut commands = translate::schedule_exports(alg, &mut ctx)?;
        commands.push(command::build_main_command(alg, &mut ctx)?);
        commands.extend(command::follow_up_commands(alg));

        if let Some(extension) = self.extensions.lookup(&alg.command_line_name) {
            commands = extension.edit_commands(commands);
        }
        Ok(commands)
    }

    /// Runs the algorithm: builds the batch, reports it, hands it to the
    /// engine, and writes projection sidecars for spatial outputs when a
    /// coordinate reference system (as well-known text) is attached.
    ///
    /// Returns the executed batch.
    pub fn run(
        &mut self,
        alg: &mut AlgorithmDescriptor,
        crs_wkt: Option<&str>,
    ) -> Result<Vec<String>> {
        let commands = self.build_commands(alg)?;

        for line in &commands {
            self.engine.log_command_line(line);
        }
        if self.settings.log_commands {
            let mut lines = vec!["SAGA execution commands".to_string()];
            lines.extend(commands.iter().cloned());
            self.log.append_log(LogLevel::Info, &lines);
        }

        self.engine.run_batch(&commands)?;

        if let Some(wkt) = crs_wkt {
            write_projection_sidecars(alg, wkt)?;
        }
        Ok(commands)
    }
}

/// Writes a `.prj` file with the well-known text next to every resolved
/// spatial output.
fn write_projection_sidecars(alg: &AlgorithmDescriptor, wkt: &str) -> Result<()> {
    for output in &alg.outputs {
        if !output.kind.is_spatial() {
            continue;
        }
        let Some(destination) = &output.destination else {
            continue;
        };
        let sidecar = Path::new(destination).with_extension("prj");
        std::fs::write(&sidecar, wkt)?;
    }
    Ok(())
}
