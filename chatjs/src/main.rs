#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::process::ExitCode;

use anyhow::Context;
use args::{Args, Command, ErrorFormat};
use chatjs_config::{AiConfig, Capability, Gateway, ResolveError};
use clap::Parser;
use serde::Serialize;
use serde_json::{Map, Value, json};
use strum::IntoEnumIterator;

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    init_logging(&args.log_level);

    match args.command {
        Command::Config { config, errors } => {
            tracing::info!(config_path = %config.display(), "resolving configuration");

            let input = chatjs_config::load_input(&config)?;
            match chatjs_config::resolve(&input) {
                Ok(resolved) => print_json(&resolved)?,
                Err(err) if errors == ErrorFormat::Json => {
                    print_json(&error_report(&err))?;
                    return Ok(ExitCode::FAILURE);
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("failed to resolve {}", config.display()));
                }
            }
        }
        Command::Defaults { gateway } => {
            let defaults = chatjs_config::defaults_for(gateway).clone();
            print_json(&AiConfig::new(gateway, defaults))?;
        }
        Command::Models { gateway, capability } => {
            let capabilities: Vec<Capability> = capability.map_or_else(|| Capability::iter().collect(), |c| vec![c]);

            let mut spaces = Map::new();
            for capability in capabilities {
                spaces.insert(capability.to_string(), space_json(gateway, capability));
            }
            print_json(&spaces)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Install the fmt subscriber on stderr so stdout only carries JSON
fn init_logging(log_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{rendered}");
    Ok(())
}

/// Machine-readable form of a resolution failure
fn error_report(err: &ResolveError) -> Value {
    json!({
        "error": err.to_string(),
        "violations": err.violations(),
    })
}

/// Identifiers of one space, or a marker for gateways that accept any id
fn space_json(gateway: Gateway, capability: Capability) -> Value {
    gateway
        .models(capability)
        .ids()
        .map_or_else(|| json!({ "open": true }), |ids| json!(ids))
}
