use std::sync::Arc;

use anyhow::Context;

use health_records_api::app::{app, AppState};
use health_records_api::bootstrap;
use health_records_api::cloudant::{auth, CloudantClient, DocumentStore};
use health_records_api::config::{self, AppConfig, CredentialsSource, LegacyCredentials};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up CLOUDANT_URL / CLOUDANT_APIKEY.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();

    // Sequential startup: credentials -> client -> bootstrap -> listener.
    // A failure before the listener leaves the process stopped; a bootstrap
    // failure is per-collection and non-fatal.
    let store = match init_store(config).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!("startup failed: {:#}", err);
            std::process::exit(1);
        }
    };

    let summary = bootstrap::run(store.as_ref(), &config.bootstrap.data_dir).await;
    tracing::info!(
        "done importing data: {} collections seeded, {} failed",
        summary.imported.len(),
        summary.failed.len()
    );

    let app = app(AppState { store });

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("health records API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

/// Resolve credentials and build the Cloudant client: the IAM env pair
/// first, then the legacy credentials file.
async fn init_store(config: &AppConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.cloudant.source() {
        CredentialsSource::Iam { url, api_key } => {
            let http = reqwest::Client::new();
            let token = auth::fetch_iam_token(&http, &config.cloudant.iam_token_endpoint, &api_key)
                .await
                .context("unable to retrieve IAM access token")?;
            tracing::info!("IAM access token retrieved successfully");

            let client = CloudantClient::with_iam_token(&url, token)?;
            tracing::info!("connected to Cloudant with IAM token");
            Ok(Arc::new(client))
        }
        CredentialsSource::LegacyFile(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let credentials: LegacyCredentials = serde_json::from_str(&raw)
                .with_context(|| format!("invalid credentials file {}", path.display()))?;

            let client = CloudantClient::from_legacy_url(&credentials.url)?;
            tracing::info!("connected to Cloudant using URL from {}", path.display());
            Ok(Arc::new(client))
        }
        CredentialsSource::Missing => {
            anyhow::bail!("Cannot find Cloudant credentials in environment or credentials.json")
        }
    }
}
