use anyhow::Context;
use clap::Parser;
use filedrop_core::AppConfig;
use filedrop_server::{AppState, FiledropServer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Minimal file-sharing server.
#[derive(Parser, Debug)]
#[command(name = "filedrop", version, about)]
struct Args {
    /// Path to the TOML configuration file (default: ./filedrop.toml if present)
    #[arg(short, long, env = "FILEDROP_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, overrides `[server].bind`
    #[arg(long, env = "FILEDROP_BIND")]
    bind: Option<String>,

    /// Upload directory, overrides `[storage].upload_dir`
    #[arg(long, env = "FILEDROP_UPLOAD_DIR")]
    upload_dir: Option<PathBuf>,

    /// Users file, overrides `[storage].users_file`
    #[arg(long, env = "FILEDROP_USERS_FILE")]
    users_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut cfg = AppConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(bind) = args.bind {
        cfg.server.bind = bind;
    }
    if let Some(dir) = args.upload_dir {
        cfg.storage.upload_dir = dir;
    }
    if let Some(path) = args.users_file {
        cfg.storage.users_file = path;
    }
    let cfg = cfg.validated().context("invalid configuration")?;

    tracing::info!(
        upload_dir = %cfg.storage.upload_dir.display(),
        users_file = %cfg.storage.users_file.display(),
        password_scheme = ?cfg.auth.password_scheme,
        "Starting filedrop"
    );

    let state = AppState::init(&cfg)
        .await
        .context("failed to initialize application state")?;
    FiledropServer::new(state).run().await?;

    Ok(())
}
