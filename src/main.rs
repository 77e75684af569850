use anyhow::Context;
use techhub_comments::configuration::get_config;
use techhub_comments::startup::Application;
use techhub_comments::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("techhub-comments".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let config = get_config().context("Failed to read configuration")?;
    let application = Application::build(config).await?;
    application.run_until_stopped().await
}
