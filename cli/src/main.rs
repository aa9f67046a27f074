use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use optspec_core::{Registry, SpecFile};
use optspec_parser::{ParsedArgs, help_text, usage_text};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "optspec", version)]
#[command(about = "Check option spec files and parse arguments against them")]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. warn, debug).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a spec file.
    Check(SpecArgs),
    /// Print the help text a spec file renders to.
    RenderHelp(SpecArgs),
    /// Print the usage block a spec file renders to.
    RenderUsage(SpecArgs),
    /// Parse arguments against a spec file and print the result.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct SpecArgs {
    /// Spec file (.json, .yaml or .yml).
    spec: PathBuf,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Spec file (.json, .yaml or .yml).
    spec: PathBuf,
    /// Output format for the parsed result.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to parse, after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::RenderHelp(args) => run_render_help(args),
        Command::RenderUsage(args) => run_render_usage(args),
        Command::Parse(args) => run_parse(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_registry(path: &Path) -> Result<Registry, String> {
    debug!(path = %path.display(), "Loading spec file");
    SpecFile::load(path)
        .and_then(SpecFile::into_registry)
        .map_err(|e| format!("{}: {e}", path.display()))
}

fn run_check(args: SpecArgs) -> Result<(), String> {
    let registry = load_registry(&args.spec)?;
    println!(
        "ok: {} ({} options)",
        registry.command().name,
        registry.len()
    );
    Ok(())
}

fn run_render_help(args: SpecArgs) -> Result<(), String> {
    let registry = load_registry(&args.spec)?;
    print!("{}", help_text(&registry));
    Ok(())
}

fn run_render_usage(args: SpecArgs) -> Result<(), String> {
    let registry = load_registry(&args.spec)?;
    print!("{}", usage_text(&registry));
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let registry = load_registry(&args.spec)?;
    let parsed = optspec_parser::Parser::new(&registry).parse_or_exit(&args.args);
    println!("{}", format_parsed(&parsed, args.format)?);
    Ok(())
}

fn format_parsed(parsed: &ParsedArgs, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(parsed)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(parsed)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|e| format!("YAML serialization failed: {e}")),
    }
}
