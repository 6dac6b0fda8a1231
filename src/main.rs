mod article;
mod config;
mod extract;
mod fetcher;
mod forms;
mod mailer;
mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::mailer::Mailer;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bsa_site=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load_or_default("site.toml")?;
    info!("Aggregating articles from {}", config.articles.feed_url);

    // Form notifications are best-effort; a misconfigured mailer must not
    // keep the site from starting
    let mailer = match Mailer::from_env() {
        Ok(Some(mailer)) => {
            info!("SMTP mailer configured");
            Some(mailer)
        }
        Ok(None) => {
            info!("SMTP not configured, form notifications disabled");
            None
        }
        Err(e) => {
            warn!("Mailer disabled: {}", e);
            None
        }
    };

    // Create app state
    let state = Arc::new(AppState {
        fetcher: Fetcher::new(config.articles.clone()),
        mailer,
    });

    // Build router
    let app = Router::new()
        .route("/api/articles", get(routes::articles))
        .route("/api/contact", post(routes::contact))
        .route("/api/join", post(routes::join))
        .route("/health", get(routes::health))
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Server starting on http://localhost:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
