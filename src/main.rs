use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use counters::config::Config;
use counters::domain::InMemoryCountersRepository;
use counters::logging::init_tracing;
use counters::server::CountersServer;

#[derive(Debug, Parser)]
#[command(name = "counters", version, about = "REST API for named counters")]
struct Cli {
    /// Config file (default: ~/.config/counters/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on; overrides PORT and the config file
    #[arg(long)]
    port: Option<u16>,

    /// Interface to bind; overrides the config file
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(error) = run(cli).await {
        eprintln!("Error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = config.with_env_port(std::env::var("PORT").ok().as_deref())?;
    let port = match cli.port {
        Some(port) => port,
        None => config.resolve_port()?,
    };
    let host = cli.host.unwrap_or_else(|| config.server.host.clone());

    let repository = Arc::new(InMemoryCountersRepository::with_counters(
        config.seed_counters(),
    ));
    let mut server = CountersServer::new(repository);
    let addr = server
        .try_bind(&host, port)
        .await
        .context("Failed to start counters API")?;
    tracing::info!(%addr, seeded = config.seed.len(), "Listening");

    server.run().await?;
    Ok(())
}
