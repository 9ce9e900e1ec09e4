use clap::{Parser, Subcommand};

use shopkeeper_engine::{RunMode, SweepOptions};
use shopkeeper_shopify::AdminClient;

#[derive(Debug, Parser)]
#[command(name = "shopkeeper-cli")]
#[command(about = "Bulk catalog maintenance for a Shopify store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rewrite product descriptions to the standard template.
    Descriptions {
        /// Write the changes instead of printing a preview.
        #[arg(long)]
        apply: bool,
    },
    /// Move products whose tracked variants are all out of stock to draft.
    Hide,
    /// Adjust every variant price by a percentage (+10 means x1.10).
    Reprice {
        #[arg(long, default_value_t = 0.0)]
        percent: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = shopkeeper_core::load_app_config()?;

    let Some(creds) = &config.shop else {
        anyhow::bail!(
            "not configured: set SHOPKEEPER_SHOP_DOMAIN and SHOPKEEPER_ADMIN_TOKEN before running"
        );
    };
    let client = AdminClient::new(
        &creds.shop_domain,
        &creds.admin_token,
        &config.api_version,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let options = SweepOptions {
        page_size: config.page_size,
        write_concurrency: config.write_concurrency,
    };

    let report = match cli.command {
        Commands::Descriptions { apply } => {
            let mode = if apply {
                RunMode::Apply
            } else {
                RunMode::Preview
            };
            let outcome = shopkeeper_engine::rewrite_descriptions(
                &client,
                &options,
                &config.default_vendor,
                mode,
            )
            .await?;
            serde_json::to_string_pretty(&outcome)?
        }
        Commands::Hide => {
            let outcome = shopkeeper_engine::hide_out_of_stock(&client, &options).await?;
            serde_json::to_string_pretty(&outcome)?
        }
        Commands::Reprice { percent } => {
            let outcome = shopkeeper_engine::reprice(&client, &options, percent).await?;
            serde_json::to_string_pretty(&outcome)?
        }
    };

    println!("{report}");
    Ok(())
}
