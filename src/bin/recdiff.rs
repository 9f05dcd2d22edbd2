//! recdiff - compare two exported record documents.
//!
//! A command line front end over the diff engine: load a type registry and
//! two record trees, print what must change on the first to reach the
//! second.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use record_diff::record::DynamicRecord;
use record_diff::registry::Registry;
use record_diff::{diff, value};

#[derive(Parser)]
#[command(name = "recdiff", version, about = "Structured record diff tool")]
struct Cli {
    /// Registry document (YAML or JSON) with the per-type configuration
    #[arg(short, long)]
    registry: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered types
    ListTypes,
    /// Diff two record documents
    Diff {
        /// Current-side record document
        #[arg(long)]
        current: PathBuf,
        /// Other-side (replacement) record document
        #[arg(long)]
        other: PathBuf,
        /// Output location. Use '-' for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let registry = load_registry(&cli.registry)?;

    match cli.command {
        Command::ListTypes => list_types(&registry),
        Command::Diff {
            current,
            other,
            output,
            format,
        } => {
            let current = load_record(&current)?;
            let other = load_record(&other)?;

            let report = diff(&registry, &current, &other)?;

            let rendered = match format {
                Format::Json => {
                    let mut json = serde_json::to_string_pretty(&report)?;
                    json.push('\n');
                    json
                }
                Format::Yaml => value::to_yaml(&report.to_value())?,
            };

            let mut out: Box<dyn Write> = if output == "-" {
                Box::new(io::stdout())
            } else {
                Box::new(fs::File::create(&output).map_err(|e| {
                    format!("Failed to create output file {}: {}", output, e)
                })?)
            };
            out.write_all(rendered.as_bytes())?;
            Ok(())
        }
    }
}

fn list_types(registry: &Registry) -> Result<(), Box<dyn std::error::Error>> {
    println!("Registered types:");
    for config in &registry.types {
        let mut notes = Vec::new();
        if let Some(base) = &config.base {
            notes.push(format!("base {}", base));
        }
        if let Some(identity) = &config.identity_field {
            notes.push(format!("identity {}", identity));
        }
        if !config.excluded_fields.is_empty() {
            notes.push(format!("{} excluded", config.excluded_fields.len()));
        }
        if !config.conditional_fields.is_empty() {
            notes.push(format!("{} conditional", config.conditional_fields.len()));
        }

        if notes.is_empty() {
            println!("  - {}", config.name);
        } else {
            println!("  - {} ({})", config.name, notes.join(", "));
        }
    }
    Ok(())
}

fn load_registry(path: &Path) -> Result<Registry, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read registry file {:?}: {}", path, e))?;

    let registry = if is_json(path) {
        Registry::from_json(&content)
            .map_err(|e| format!("Failed to parse registry: {}", e))?
    } else {
        Registry::from_yaml(&content)
            .map_err(|e| format!("Failed to parse registry: {}", e))?
    };
    Ok(registry)
}

fn load_record(path: &Path) -> Result<DynamicRecord, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read record file {:?}: {}", path, e))?;

    let record = if is_json(path) {
        DynamicRecord::from_json(&content)
            .map_err(|e| format!("Failed to parse record {:?}: {}", path, e))?
    } else {
        DynamicRecord::from_yaml(&content)
            .map_err(|e| format!("Failed to parse record {:?}: {}", path, e))?
    };
    Ok(record)
}

fn is_json(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("json")
    )
}
