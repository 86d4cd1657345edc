use crate::{
    config::Settings,
    error::{Error, Result},
    interfaces::EngineRunner,
};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

#[cfg(windows)]
const SAGA_CMD: &str = "saga_cmd.exe";
#[cfg(not(windows))]
const SAGA_CMD: &str = "saga_cmd";

/// Runs a command batch through the `saga_cmd` console.
///
/// The batch is written to a script file and executed through the shell,
/// one `saga_cmd` invocation per command, mirroring how the engine is
/// driven interactively. Blocking; a non-zero exit of the script is an
/// execution error.
#[derive(Debug)]
pub struct SagaBatchRunner {
    saga_cmd: PathBuf,
    log_console_output: bool,
}

impl SagaBatchRunner {
    pub fn new(settings: &Settings) -> Self {
        let saga_cmd = match &settings.saga_folder {
            Some(folder) => folder.join(SAGA_CMD),
            None => PathBuf::from(SAGA_CMD),
        };
        Self {
            saga_cmd,
            log_console_output: settings.log_console_output,
        }
    }

    fn write_batch_file(&self, commands: &[String]) -> Result<PathBuf> {
        let mut script = String::new();
        #[cfg(not(windows))]
        script.push_str("#!/bin/sh\n");
        for command in commands {
            script.push_str(&format!("{} {}\n", self.saga_cmd.display(), command));
        }

        let suffix = if cfg!(windows) { ".bat" } else { ".sh" };
        let file = tempfile::Builder::new()
            .prefix("saga_batch")
            .suffix(suffix)
            .tempfile()?;
        std::fs::write(file.path(), script)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o755))?;
        }
        let (_, path) = file
            .keep()
            .map_err(|e| Error::Other(format!("cannot keep batch file: {e}")))?;
        Ok(path)
    }

    fn execute(&self, batch_file: &Path) -> Result<std::process::Output> {
        let output = if cfg!(windows) {
            Command::new("cmd").arg("/C").arg(batch_file).output()?
        } else {
            Command::new("sh").arg(batch_file).output()?
        };
        Ok(output)
    }
}

impl EngineRunner for SagaBatchRunner {
    fn run_batch(&mut self, commands: &[String]) -> Result<()> {
        let batch_file = self.write_batch_file(commands)?;
        debug!("executing SAGA batch file {}", batch_file.display());

        let output = self.execute(&batch_file)?;
        if self.log_console_output {
            for line in String::from_utf8_lossy(&output.stdout).lines() {
                info!(target: "saga", "{line}");
            }
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ExecutionError(format!(
                "SAGA exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }

    fn log_command_line(&mut self, line: &str) {
        info!(target: "saga", "{line}");
    }
}
