//! Personnel server - serves the personnel REST API

use anyhow::Context;
use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use personnel_service::{Config, PersonnelModule};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Personnel records API server
#[derive(Parser, Debug)]
#[command(name = "personnel-server", version, about)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "PERSONNEL_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "PERSONNEL_LISTEN", default_value = "0.0.0.0:8087")]
    listen: SocketAddr,

    /// Emit logs as JSON
    #[arg(long, env = "PERSONNEL_LOG_JSON")]
    log_json: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

/// Defaults, then the YAML file, then `PERSONNEL_*` variables
/// (`__` separates nested keys, e.g. `PERSONNEL_RETRY__RETRIES`)
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
    if let Some(path) = path {
        figment = figment.merge(Yaml::file(path));
    }
    figment
        .merge(
            Env::prefixed("PERSONNEL_")
                .ignore(&["config", "listen", "log_json"])
                .split("__"),
        )
        .extract()
        .context("failed to load configuration")
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("personnel_service={level},personnel_server={level},tower_http=info").into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    if args.print_config {
        print!("{}", serde_yaml::to_string(&config).context("failed to render configuration")?);
        return Ok(());
    }

    init_tracing(&args.log_level, args.log_json);
    info!(
        api_base_url = %config.api_base_url,
        identity = config.identity_url.is_some(),
        "Configuration loaded"
    );

    let module = PersonnelModule::from_config(config)?;
    let app = module.router();

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    info!(listen = %args.listen, "Personnel server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Personnel server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
