//! Ad Revenue Predictor - Main Entry Point

use api::settings::Settings;
use api::{run_server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    telemetry::init_logging(&settings.logging)?;

    info!("=== Ad Revenue Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Model artifact: {}", settings.model.artifact_path.display());

    run_server(settings).await
}
