//! Stack-Set Status Server Entry Point

use clap::Parser;
use stackset_status::cli::Cli;
use stackset_status::logging::{self, LogOptions};
use stackset_status::probe::CloudFormationProbeClient;
use stackset_status::{server, AppState};
use stackset_status_common::config::load_settings;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&LogOptions::from_env(cli.log_level.as_deref())) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Stack-set status v{}", env!("CARGO_PKG_VERSION"));

    // 設定の欠落・不正は起動時に致命的エラーとする
    let mut settings = match load_settings(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            error!(config = %cli.config.display(), "{}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut settings.server);

    info!(
        region = %settings.aws.aws_region,
        timeout_ms = settings.probe.timeout_ms,
        max_num_requests = settings.probe.max_num_requests,
        "Configuration loaded"
    );

    let client = CloudFormationProbeClient::from_settings(&settings.aws).await;
    let state = AppState::new(Arc::new(client), &settings.probe);

    if let Err(e) = server::run(state, &settings.server.bind_addr()).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
