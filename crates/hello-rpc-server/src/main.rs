//! hello-rpc-server
//!
//! Usage: `hello-rpc-server [CONFIG]`. Without an argument, `hello-rpc.yaml`
//! is loaded when present, otherwise built-in defaults are used.

use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hello_rpc_server::config::{self, ServerConfig};
use hello_rpc_server::server;

const DEFAULT_CONFIG: &str = "hello-rpc.yaml";

fn load_config() -> hello_rpc_core::Result<ServerConfig> {
    match std::env::args().nth(1) {
        Some(path) => config::load_from_file(path),
        None if Path::new(DEFAULT_CONFIG).exists() => config::load_from_file(DEFAULT_CONFIG),
        None => {
            tracing::info!("no config file, using defaults");
            let cfg = ServerConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    match server::run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "hello-rpc-server exited with error");
            ExitCode::FAILURE
        }
    }
}
