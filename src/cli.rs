//! # revisionctl
//!
//! Command-line interface for inspecting and replaying Revision conditions.
//!
//! ## Usage
//!
//! ```bash
//! # Start from an empty status and replay a rollout
//! revisionctl apply --op initialize --op initialize-build \
//!     --op propagate-build:True --op mark-container-healthy --op mark-resources-available
//!
//! # Apply an observation to a saved status document
//! revisionctl apply --file status.yaml --op mark-inactive-pending --output json
//!
//! # Show the derived predicates of a status document
//! revisionctl inspect --file status.yaml --now 2024-01-01T12:00:00Z
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use revision_condition_manager::config::{ControllerConfig, LoggingConfig};
use revision_condition_manager::crd::time::format_rfc3339;
use revision_condition_manager::observability::{logging, metrics};
use revision_condition_manager::revision::Operation;
use revision_condition_manager::RevisionStatus;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Revision condition CLI
#[derive(Parser)]
#[command(name = "revisionctl")]
#[command(about = "Inspect and replay Revision status conditions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Evaluation time (RFC3339); defaults to the current time
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    /// Print Prometheus metrics collected during the run to stderr
    #[arg(long, global = true)]
    metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply operations to a status document and print the result
    Apply {
        /// Status document (YAML or JSON); starts from an empty status when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Operation to apply, in order (e.g. `mark-deploying:Updating`)
        #[arg(long = "op", value_name = "OPERATION")]
        operations: Vec<Operation>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        output: OutputFormat,
    },
    /// Show conditions and derived predicates of a status document
    Inspect {
        /// Status document (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    let config = ControllerConfig::from_env();
    let filter = LoggingConfig::from_map(&env_log_levels(), &["revisionctl"])
        .context("Failed to parse logging levels from environment")?
        .env_filter_directives(&config.log_filter);
    logging::init_tracing(&filter);

    let cli = Cli::parse();
    if cli.metrics {
        metrics::register_metrics()?;
    }
    let now = cli.now.unwrap_or_else(Utc::now);

    match cli.command {
        Commands::Apply {
            file,
            operations,
            output,
        } => apply_command(file.as_deref(), &operations, output, now)?,
        Commands::Inspect { file } => inspect_command(&file, &config, now)?,
    }

    if cli.metrics {
        eprint!("{}", metrics::gather_metrics()?);
    }
    Ok(())
}

/// `LOGLEVEL_<COMPONENT>` environment variables in logging-ConfigMap form
fn env_log_levels() -> BTreeMap<String, String> {
    std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix("LOGLEVEL_")
                .map(|component| (format!("loglevel.{}", component.to_lowercase()), value))
        })
        .collect()
}

fn load_status(path: &Path) -> Result<RevisionStatus> {
    let document = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read status document {}", path.display()))?;
    RevisionStatus::from_yaml(&document)
        .with_context(|| format!("Failed to parse status document {}", path.display()))
}

fn apply_command(
    file: Option<&Path>,
    operations: &[Operation],
    output: OutputFormat,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut status = match file {
        Some(path) => load_status(path)?,
        None => RevisionStatus::default(),
    };

    for operation in operations {
        debug!(?operation, "applying operation");
        operation.apply(&mut status, now);
    }
    info!(
        "Applied {} operation(s), ready={}",
        operations.len(),
        status.is_ready()
    );

    let rendered = match output {
        OutputFormat::Yaml => status.to_yaml().context("Failed to render status as YAML")?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(&status).context("Failed to render status as JSON")?
        }
    };
    println!("{rendered}");
    Ok(())
}

fn inspect_command(file: &Path, config: &ControllerConfig, now: DateTime<Utc>) -> Result<()> {
    let status = load_status(file)?;

    println!("Status for {} at {}:\n", file.display(), format_rfc3339(&now));
    if let Some(ref service_name) = status.service_name {
        println!("  Service Name: {service_name}");
    }
    if let Some(generation) = status.observed_generation {
        println!("  Observed Generation: {generation}");
    }

    if status.conditions.is_empty() {
        println!("  Conditions: none");
    } else {
        println!("Conditions:");
        for condition in &status.conditions {
            println!("  {}: {}", condition.r#type, condition.status);
            if let Some(ref reason) = condition.reason {
                println!("    Reason: {reason}");
            }
            if let Some(ref message) = condition.message {
                println!("    Message: {message}");
            }
            if let Some(ref time) = condition.last_transition_time {
                println!("    Last Transition: {}", format_rfc3339(time));
            }
        }
    }

    println!("\nPredicates:");
    println!("  Ready: {}", status.is_ready());
    println!("  Routable: {}", status.is_routable());
    println!("  Active: {}", status.is_active());
    println!(
        "  Safe To Tear Down ({}s grace): {}",
        config.pending_deactivation_seconds,
        status.is_safe_to_tear_down_resources_after(now, config.pending_deactivation())
    );

    Ok(())
}
