//! Terminal client entry point.
mod app;
mod command;
mod config;
mod logging;
mod view;

use anyhow::{Context, Result};
use runtime::RuntimeConfig;

use app::App;
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let client_config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&client_config).with_context(|| {
        format!(
            "failed to initialize logging in {}",
            client_config.log_dir.display()
        )
    })?;

    let runtime_config = RuntimeConfig::from_env().context("invalid runtime configuration")?;
    tracing::info!(
        "Catalogs: {} ({})",
        runtime_config.data_dir.display(),
        runtime_config.persistence
    );

    let mut session = runtime_config
        .open_session()
        .context("failed to open catalog storage")?;
    let failures = session.load().context("failed to load catalogs")?;
    for (name, error) in failures {
        eprintln!("warning: catalog {name:?} could not be loaded: {error}");
    }

    let mut app = App::new(session);
    app.run(tokio::io::BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
