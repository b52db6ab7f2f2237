//! Resource timeout planner.
//!
//! Loads a plan document, resolves every instance's timeouts against its
//! resource type and prints the resulting diff metadata as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use resource_timeouts::config::load_config;
use resource_timeouts::observability::init_logging;

#[derive(Parser)]
#[command(name = "resource-timeouts")]
#[command(about = "Resolve and encode per-operation resource timeouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan every instance of a document and print the diff metadata
    Plan {
        /// Path to the plan document (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    init_logging("resource_timeouts=info");

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Plan { config, pretty } => {
            let doc = load_config(&config)?;
            let planner = doc.planner();

            tracing::info!(
                resources = doc.resources.len(),
                instances = doc.instances.len(),
                "Plan document loaded"
            );

            let mut configs = Vec::with_capacity(doc.instances.len());
            for instance in &doc.instances {
                configs.push(instance.resource_config()?);
            }
            let results = planner.plan_all(
                doc.instances
                    .iter()
                    .zip(&configs)
                    .map(|(i, c)| (i.name.as_str(), i.resource_type.as_str(), c)),
            );

            // `serde_json::Map` keeps keys sorted, so emit document order by hand.
            let mut output = Vec::with_capacity(results.len());
            let mut all_ok = true;
            for (name, result) in results {
                match result {
                    Ok(diff) => {
                        output.push((name, serde_json::to_value(diff.meta.unwrap_or_default())?));
                    }
                    Err(e) => {
                        eprintln!("{}: {}", name, e);
                        all_ok = false;
                    }
                }
            }

            let output = OrderedObject(output);
            if pretty {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", serde_json::to_string(&output)?);
            }

            Ok(all_ok)
        }
    }
}

/// JSON object whose keys are written in insertion order.
struct OrderedObject(Vec<(String, Value)>);

impl Serialize for OrderedObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
