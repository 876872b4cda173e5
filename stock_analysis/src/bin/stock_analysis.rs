use analysis_report::export::SHEET_NAMES;
use anyhow::{Context, Result};
use clap::Parser;
use stock_analysis::{cli::Cli, pipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Provider credentials may live in .env; a missing file is fine.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Cli::parse().into_config()?;
    let provider = config
        .provider
        .build()
        .with_context(|| format!("failed to initialise {} provider", config.provider))?;
    let renderer = config.render.renderer(&config.chart_dir);

    let outcome = pipeline::run(&config, provider.as_ref(), renderer.as_ref()).await?;

    println!(
        "\nData exported to {} ({} sheets: {})",
        outcome.report_path.display(),
        SHEET_NAMES.len(),
        SHEET_NAMES.join(", ")
    );
    Ok(())
}
