mod cli;
mod components;
mod config;
mod error;
mod startup;
mod utils;

use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting calscribe");

    // Load configuration
    let config = startup::load_config()?;

    // Run the selected command
    startup::run(config).await
}
