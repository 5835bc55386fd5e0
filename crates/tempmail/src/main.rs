//! `tempmail` - disposable email inbox in the terminal
//!
//! Generates a throwaway address, watches its inbox and shows incoming mail.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod app;
mod command;
mod settings;
mod view;

use anyhow::Context;
use tempmail_api::MailTmClient;
use tempmail_core::Controller;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use settings::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the rendered screens
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempmail=info,tempmail_core=info,tempmail_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting tempmail");

    let settings = load_settings().await;
    let client_config = settings
        .client_config()
        .context("invalid service settings")?;
    info!(base_url = %client_config.base_url, "using mailbox service");
    let client = MailTmClient::new(client_config).context("failed to build HTTP client")?;

    let (controller, handle) = Controller::new(client, settings.controller_config());
    let controller_task = tokio::spawn(controller.run());

    println!("Type h for help.");
    App::new(handle, settings.address_ttl(), settings.desktop_notifications)
        .run()
        .await;

    controller_task.await.context("controller task failed")?;
    info!("tempmail stopped");
    Ok(())
}
