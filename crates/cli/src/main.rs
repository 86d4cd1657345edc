use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use saga_runner_core::{
    error::Error,
    interfaces::{LayerExporter, NoLiveLayers},
    services::{SagaBatchRunner, SystemTempAllocator, TracingLogSink},
    types::{Layer, ParameterKind},
    AlgorithmRunner, ExtensionRegistry, SessionExportCache, Settings,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Run SAGA tools from declarative description files
#[derive(Parser)]
#[command(name = "saga-runner")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a description file declares
    Analyze {
        /// Path to the description file
        description: PathBuf,

        /// Show verbose JSON output
        #[arg(short = 'j', long = "json")]
        json: bool,
    },
    /// Build and execute the command batch for a description file
    Run {
        /// Path to the description file
        description: PathBuf,

        /// Bind a parameter value (repeatable)
        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        /// Bind an output destination (repeatable)
        #[arg(short = 'o', long = "output", value_name = "NAME=PATH")]
        outputs: Vec<String>,

        /// Show the command batch without executing
        #[arg(short = 'd', long = "dry-run")]
        dry_run: bool,

        /// Well-known text of a CRS to write as .prj sidecars
        #[arg(long = "crs-wkt", value_name = "WKT")]
        crs_wkt: Option<String>,

        /// Settings file (JSON); defaults apply when omitted
        #[arg(short = 's', long = "settings", value_name = "FILE")]
        settings: Option<PathBuf>,
    },
}

/// Standalone mode has no host application holding live layers, so
/// export requests cannot be satisfied.
struct NoExportsAvailable;

impl LayerExporter for NoExportsAvailable {
    fn export_vector(&self, layer: &Layer) -> saga_runner_core::Result<PathBuf> {
        Err(Error::ExportError(format!(
            "cannot export layer {:?} without a host application",
            layer.name
        )))
    }

    fn export_table(&self, table: &Layer) -> saga_runner_core::Result<PathBuf> {
        Err(Error::ExportError(format!(
            "cannot export table {:?} without a host application",
            table.name
        )))
    }
}

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Commands::Analyze { description, json } => analyze_command(&description, json),
        Commands::Run {
            description,
            params,
            outputs,
            dry_run,
            crs_wkt,
            settings,
        } => run_command(
            &description,
            &params,
            &outputs,
            dry_run,
            crs_wkt.as_deref(),
            settings.as_deref(),
        ),
    }
}

fn analyze_command(description: &Path, json: bool) -> Result<()> {
    debug!("analyzing description file: {}", description.display());
    let alg = saga_runner_core::parse_description_file(description)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&alg)?);
        return Ok(());
    }

    println!("{} ({})", alg.display_name, alg.command_line_name);
    println!("SAGA tool: {} \"{}\"", alg.group, alg.saga_name);
    println!("Group: {}", alg.display_group);
    if !alg.hardcoded_tokens.is_empty() {
        println!("Hardcoded: {}", alg.hardcoded_tokens.join(" "));
    }

    println!("\nParameters:");
    for param in &alg.parameters {
        let kind = describe_kind(&param.kind);
        match &param.value {
            Some(value) => println!("  -{} <{}> = {} ({})", param.name, kind, value, param.description),
            None => println!("  -{} <{}> ({})", param.name, kind, param.description),
        }
    }

    println!("\nOutputs:");
    for output in &alg.outputs {
        println!("  -{} <{:?}> ({})", output.name, output.kind, output.description);
    }
    Ok(())
}

fn describe_kind(kind: &ParameterKind) -> String {
    match kind {
        ParameterKind::Raster => "raster".to_string(),
        ParameterKind::Vector => "vector".to_string(),
        ParameterKind::Table => "table".to_string(),
        ParameterKind::MultipleInput(datatype) => format!("multiple {datatype:?}"),
        ParameterKind::Boolean => "boolean".to_string(),
        ParameterKind::Number => "number".to_string(),
        ParameterKind::Selection { options } => format!("selection of {}", options.len()),
        ParameterKind::FixedTable { columns } => format!("table with {} columns", columns.len()),
        ParameterKind::Extent => "extent".to_string(),
        ParameterKind::Generic(token) => token.to_lowercase(),
    }
}

fn run_command(
    description: &Path,
    params: &[String],
    outputs: &[String],
    dry_run: bool,
    crs_wkt: Option<&str>,
    settings_file: Option<&Path>,
) -> Result<()> {
    let mut alg = saga_runner_core::parse_description_file(description)?;

    for binding in params {
        let (name, value) = split_binding(binding)?;
        if !alg.set_parameter_value(name, value) {
            bail!("{} has no parameter named {name}", alg.command_line_name);
        }
    }
    for binding in outputs {
        let (name, path) = split_binding(binding)?;
        if !alg.set_output_destination(name, path) {
            bail!("{} has no output named {name}", alg.command_line_name);
        }
    }

    let settings = match settings_file {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let resolver = NoLiveLayers;
    let exporter = NoExportsAvailable;
    let temp = match &settings.shared_temp_dir {
        Some(dir) => SystemTempAllocator::with_root(dir.clone())?,
        None => SystemTempAllocator::new()?,
    };
    let mut engine = SagaBatchRunner::new(&settings);
    let log = TracingLogSink;
    let extensions = ExtensionRegistry::new();
    let mut cache = SessionExportCache::new();

    let mut runner = AlgorithmRunner::new(
        &resolver, &exporter, &temp, &mut engine, &log, &extensions, &mut cache, &settings,
    );

    if let Some(message) = runner.validate(&alg) {
        bail!("{message}");
    }

    if dry_run {
        let commands = runner.build_commands(&mut alg)?;
        for command in &commands {
            println!("{command}");
        }
        return Ok(());
    }

    let commands = runner.run(&mut alg, crs_wkt)?;
    println!("Executed {} command(s)", commands.len());
    for output in &alg.outputs {
        if let Some(destination) = &output.destination {
            println!("  -{}: {}", output.name, destination);
        }
    }
    Ok(())
}

fn split_binding(binding: &str) -> Result<(&str, &str)> {
    binding
        .split_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
        .with_context(|| format!("Binding must look like NAME=VALUE, got {binding:?}"))
}
