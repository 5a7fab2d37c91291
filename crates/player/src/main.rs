//! UDH Player - terminal composition root.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use udh_player::infrastructure::config::load_dotenv;
use udh_player::infrastructure::{ApiConfig, CoordinatorConfig, TerminalSignOut, TokenStore};
use udh_player::runner::{Runner, RunnerDeps};
use udh_player::GameSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // stdout belongs to the game; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "udh_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting UDH Player");

    let api_config = ApiConfig::from_env()?;
    let coordinator_config = CoordinatorConfig::from_env();
    tracing::info!(
        base_url = %api_config.base_url,
        timeout_secs = api_config.timeout.as_secs(),
        "Configuration loaded"
    );

    let tokens = Arc::new(TokenStore::from_env());
    let sign_out = Arc::new(TerminalSignOut::new(tokens.clone()));
    let session = GameSession::connect(
        &api_config,
        coordinator_config,
        tokens.clone(),
        sign_out.clone(),
    );

    Runner::new(RunnerDeps {
        session,
        tokens,
        sign_out,
    })
    .run()
    .await
}
