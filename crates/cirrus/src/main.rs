//! Cirrus command-line tool.
//!
//! Compiles a `serverless.yml` service description into the Cloud Functions
//! resources of a deployment template.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use cirrus_compiler::{compile, Compilation, ServiceConfig};
use cirrus_telemetry::{
    log_compile_failed, log_compile_finished, log_compile_started, log_function_compiled,
    log_template_written, LogFormat, TelemetryConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "cirrus",
    about = "Compile serverless services into Cloud Functions deployment templates",
    version
)]
struct Cli {
    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "info", env = "CIRRUS_LOG_LEVEL")]
    log_level: String,

    /// Log format (pretty or json).
    #[arg(long, global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a service into a deployment template.
    Compile {
        /// Service configuration file (YAML or JSON).
        #[arg(short, long, default_value = "serverless.yml")]
        config: PathBuf,

        /// Output template path. Writes to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// Validate a service without producing a template.
    Validate {
        /// Service configuration file (YAML or JSON).
        #[arg(short, long, default_value = "serverless.yml")]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

/// Load and compile a service configuration file.
fn load_and_compile(config_path: &Path) -> anyhow::Result<Compilation> {
    if !config_path.exists() {
        bail!("config file not found: {}", config_path.display());
    }

    let config = ServiceConfig::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    log_compile_started!(
        service = %config.service,
        functions = config.functions.len(),
        "compiling service"
    );

    let compilation = compile(&config)?;
    for resource in &compilation.template.resources {
        log_function_compiled!(
            function = %resource.name,
            runtime = %resource.properties.runtime,
            location = %resource.properties.location,
            "compiled function"
        );
    }
    Ok(compilation)
}

/// Run the compile command.
fn run_compile(
    config_path: &Path,
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let compilation = load_and_compile(config_path)?;

    log_compile_finished!(
        resources = compilation.template.resources.len(),
        artifact = %compilation.artifact_file_path,
        "compiled service"
    );

    let rendered = match format {
        OutputFormat::Yaml => compilation.template.to_yaml()?,
        OutputFormat::Json => compilation.template.to_json()?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log_template_written!(path = %path.display(), "wrote deployment template");
        }
        None => println!("{}", rendered.trim_end()),
    }

    Ok(())
}

/// Run the validate command.
fn run_validate(config_path: &Path) -> anyhow::Result<()> {
    let compilation = load_and_compile(config_path)?;

    println!(
        "{}: ok ({} function(s))",
        config_path.display(),
        compilation.template.resources.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(log_format) = LogFormat::parse(&cli.log_format) else {
        eprintln!("error: invalid log format: {}", cli.log_format);
        return ExitCode::from(1);
    };
    let telemetry = TelemetryConfig::new()
        .with_log_level(&cli.log_level)
        .with_log_format(log_format);
    if let Err(e) = cirrus_telemetry::init(&telemetry) {
        eprintln!("error: {}", e);
        return ExitCode::from(1);
    }

    let result = match &cli.command {
        Commands::Compile {
            config,
            output,
            format,
        } => run_compile(config, output.as_deref(), *format),
        Commands::Validate { config } => run_validate(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error = format!("{:#}", e);
            log_compile_failed!(error = %error, "compilation failed");
            eprintln!("error: {}", error);
            ExitCode::from(1)
        }
    }
}
