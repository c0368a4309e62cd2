//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for shiftwatch using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// shiftwatch - schedule change notifier
#[derive(Parser, Debug)]
#[command(name = "shiftwatch")]
#[command(version, about, long_about = None)]
#[command(author = "Shiftwatch Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shiftwatch.toml", env = "SHIFTWATCH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHIFTWATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the schedule, report changes and save it
    Check(commands::check::CheckArgs),

    /// Print the saved schedule
    Show(commands::show::ShowArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
