//! Command Line Interface module
//!
//! Implements the CLI commands and argument parsing for MarketMood.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "marketmood")]
#[command(about = "MarketMood Sentiment Dashboard")]
#[command(long_about = "A terminal dashboard for financial-news sentiment and market returns")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    #[arg(long, default_value = "config.toml")]
    pub config_file: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Dry-run mode: show welcome page and configuration without starting UI
    #[arg(long)]
    pub dry_run: bool,

    /// Fetch data from the configured backend API instead of the sample feed
    #[arg(long)]
    pub live: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive dashboard
    #[command(hide = true)]
    Dashboard,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Run one sample refresh cycle and print the results (for testing)
    Demo,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Dashboard
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the actual command, using default if none provided
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }

    /// Check if we're running the interactive dashboard
    pub fn is_dashboard_mode(&self) -> bool {
        matches!(self.command(), Commands::Dashboard)
    }

    /// Adjust log level based on verbose flag
    pub fn effective_log_level(&self) -> String {
        if self.verbose {
            "debug".to_string()
        } else {
            self.log_level.clone()
        }
    }

    /// Check if we're running in dry-run mode
    pub fn is_dry_run_mode(&self) -> bool {
        self.dry_run
    }
}
