mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use shopkeeper_shopify::AdminClient;

use crate::{
    api::{build_app, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(shopkeeper_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = match &config.shop {
        Some(creds) => Some(Arc::new(AdminClient::new(
            &creds.shop_domain,
            &creds.admin_token,
            &config.api_version,
            config.request_timeout_secs,
            &config.user_agent,
        )?)),
        None => {
            tracing::warn!(
                "shop credentials not set; catalog operations will answer \"not configured\""
            );
            None
        }
    };
    if config.control_secret.is_none() {
        tracing::warn!(
            "SHOPKEEPER_CONTROL_SECRET not set; operation routes will answer \"not configured\""
        );
    }

    let auth = AuthState::from_config(&config);
    let app = build_app(
        AppState {
            config: Arc::clone(&config),
            client,
        },
        auth,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "control surface listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
