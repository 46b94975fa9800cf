//! CLI module for stackset-status
//!
//! Command-line flags override values from the configuration file.

use clap::Parser;
use stackset_status_common::config::{ServerSettings, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

/// Stack-set status probe service
#[derive(Parser, Debug)]
#[command(name = "stackset-status")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    STACKSET_STATUS_CONFIG                  Configuration file (default: setup.conf)
    STACKSET_STATUS__AWS__AWS_REGION        Overrides [aws] aws_region
    STACKSET_STATUS__PROBE__TIMEOUT_MS      Overrides [probe] timeout_ms
    STACKSET_STATUS_LOG_LEVEL               Log level (default: info)
    STACKSET_STATUS_LOG_FORMAT              Log format ("json" for JSON output)
    STACKSET_STATUS_LOG_DIR                 Directory for daily-rotated log files
"#)]
pub struct Cli {
    /// Path to the INI configuration file
    #[arg(short, long, env = "STACKSET_STATUS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Bind address (overrides [server] host)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides [server] port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log level filter (e.g. "debug", "stackset_status=trace")
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Apply host/port flags on top of the loaded server settings.
    pub fn apply(&self, server: &mut ServerSettings) {
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
    }
}
