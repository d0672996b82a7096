//! magictree - detect file content types from their leading bytes.

mod inputs;
mod logging;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use magictree_core::{Config, Registry};
use rayon::prelude::*;

use crate::inputs::Input;
use crate::output::Detection;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = ".magictree.toml";

#[derive(Parser)]
#[command(
    name = "magictree",
    version,
    about = "Detect file content types from their leading bytes"
)]
struct Cli {
    // A first path naming a subcommand runs that subcommand; `detect list`
    // inspects a file called `list`.
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    detect: DetectArgs,

    /// Config file (default: .magictree.toml if present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the content type of files or stdin
    Detect(DetectArgs),

    /// List every supported content type
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the JSON schema of the config file
    Schema,
}

#[derive(Args, Default)]
struct DetectArgs {
    /// Files or directories to inspect ("-" or nothing reads stdin)
    paths: Vec<PathBuf>,

    /// Bytes examined per input (overrides read_limit from the config)
    #[arg(long)]
    limit: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Descend into directories
    #[arg(long, short)]
    recursive: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Schema) => {
            let schema = serde_json::to_string_pretty(&Config::json_schema())
                .context("Failed to serialize config schema")?;
            println!("{schema}");
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::List { format }) => {
            let registry = load_registry(cli.config.as_deref())?;
            output::print_list(&registry.supported(), format)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Detect(args)) => detect(cli.config.as_deref(), args),
        None => detect(cli.config.as_deref(), cli.detect),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }
    let default = Path::new(DEFAULT_CONFIG_FILE);
    if default.is_file() {
        return Config::load(default)
            .with_context(|| format!("Failed to load config from {DEFAULT_CONFIG_FILE}"));
    }
    Ok(Config::default())
}

fn load_registry(explicit: Option<&Path>) -> Result<Registry> {
    let config = load_config(explicit)?;
    Registry::from_config(&config).context("Failed to apply config signatures")
}

fn detect(config: Option<&Path>, args: DetectArgs) -> Result<ExitCode> {
    let registry = load_registry(config)?;
    if let Some(limit) = args.limit {
        registry.set_limit(limit);
    }

    let inputs = inputs::collect(&args.paths, args.recursive);
    tracing::debug!(inputs = inputs.len(), limit = registry.limit(), "detecting");

    let detections: Vec<Detection> = inputs
        .into_par_iter()
        .map(|input| classify(&registry, input))
        .collect();

    output::print_detections(&detections, args.format)?;

    if detections.iter().any(|detection| detection.error.is_some()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn classify(registry: &Registry, input: Input) -> Detection {
    match input {
        Input::Stdin => {
            let stdin = std::io::stdin();
            Detection::from_result("-".to_string(), registry.detect_reader(stdin.lock()))
        }
        Input::File(path) => {
            let source = path.display().to_string();
            Detection::from_result(source, registry.detect_file(&path))
        }
        Input::Invalid { path, reason } => Detection::failed(path.display().to_string(), reason),
    }
}
