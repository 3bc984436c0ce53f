use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gemma_chat::{
    cli::{self, Args, Commands},
    config::Config,
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gemma_chat=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Some(Commands::Chat { proxy_url }) => cli::run_chat(&proxy_url).await,
        Some(Commands::Serve { backend_url, port }) => serve(backend_url, port).await,
        None => serve(None, None).await,
    }
}

async fn serve(backend_url: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = Config::from_env()?.with_overrides(backend_url, port);
    let state = Arc::new(AppState::new(&config));

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;

    tracing::info!(
        port = config.port,
        backend = %config.backend_url,
        "chat proxy running at http://localhost:{}",
        config.port
    );
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
