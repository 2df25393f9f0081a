use std::path::PathBuf;

use chatjs_config::{Capability, DEFAULT_GATEWAY, Gateway};
use clap::{Parser, Subcommand, ValueEnum};

/// ChatJS configuration tool
#[derive(Debug, Parser)]
#[command(name = "chatjs", about = "Resolve and inspect ChatJS configuration")]
pub struct Args {
    /// Log filter for diagnostics written to stderr
    #[arg(long, global = true, default_value = "warn", env = "CHATJS_LOG")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the fully resolved configuration as JSON
    Config {
        /// Path to configuration file (.toml or .json)
        #[arg(short, long, default_value = "chat.config.toml", env = "CHATJS_CONFIG")]
        config: PathBuf,

        /// How to report validation errors
        #[arg(long, value_enum, default_value_t = ErrorFormat::Text)]
        errors: ErrorFormat,
    },

    /// Print the built-in defaults of a gateway
    Defaults {
        #[arg(short, long, default_value_t = DEFAULT_GATEWAY)]
        gateway: Gateway,
    },

    /// List the model identifiers a gateway accepts
    Models {
        #[arg(short, long, default_value_t = DEFAULT_GATEWAY)]
        gateway: Gateway,

        /// Only this capability
        #[arg(long)]
        capability: Option<Capability>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ErrorFormat {
    Text,
    Json,
}
