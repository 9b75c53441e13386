use anyhow::Context;
use taranova_contact::configuration::get_configuration;
use taranova_contact::startup::Application;
use taranova_contact::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        "taranova_contact".into(),
        "info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    // Provider keys usually live in a local `.env` during development
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let configuration = get_configuration().context("Failed to read configuration")?;
    let application = Application::build(configuration)?;
    application.run_until_stopped().await?;
    Ok(())
}
