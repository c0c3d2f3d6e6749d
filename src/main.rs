//! Entry point for the fragment render service.

use std::path::PathBuf;
use std::process::ExitCode;

use admin_fragment_renderer::RendererState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries responses, so logs go to stderr.
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .init();

    let site_root = std::env::args().nth(1).map(PathBuf::from);
    let state = RendererState::new();

    if let Err(e) = state.load_settings(site_root).await {
        tracing::error!("Failed to load settings: {e}");
        return ExitCode::FAILURE;
    }
    match state.index_catalogs().await {
        Ok(count) => tracing::info!("Ready with {count} catalogs"),
        Err(e) => {
            tracing::error!("Failed to index catalogs: {e}");
            return ExitCode::FAILURE;
        }
    }

    let (stdin, stdout) = (tokio::io::stdin(), tokio::io::stdout());
    if let Err(e) = admin_fragment_renderer::serve(state, stdin, stdout).await {
        tracing::error!("Transport error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
