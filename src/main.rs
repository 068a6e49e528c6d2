//! Pharmacy Orders - order fulfillment backend

use std::sync::Arc;

use anyhow::Result;
use pharmacy_orders::api::{self, AppState, SERVICE_NAME};
use pharmacy_orders::events::EventPublisher;
use pharmacy_orders::store::{
    CapacityConfigStore, InMemoryCapacityConfigStore, InMemoryOrderBacklog, OrderBacklog, PgCapacityConfigStore,
    PgOrderBacklog,
};
use pharmacy_orders::{AppConfig, CapacityEstimator};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let config = AppConfig::from_env()?;
    tracing::info!(weekly_capacity = config.estimator.weekly_capacity, lead_days = config.estimator.lead_days, "estimator configured");

    let (backlog, settings): (Arc<dyn OrderBacklog>, Arc<dyn CapacityConfigStore>) = match &config.database_url {
        Some(url) => {
            let db = PgPoolOptions::new().max_connections(config.max_connections).connect(url).await?;
            sqlx::migrate!("./migrations").run(&db).await?;
            let backlog: Arc<dyn OrderBacklog> = Arc::new(PgOrderBacklog::new(db.clone()));
            let settings: Arc<dyn CapacityConfigStore> = Arc::new(PgCapacityConfigStore::new(db));
            (backlog, settings)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores; data is lost on restart");
            let backlog: Arc<dyn OrderBacklog> = Arc::new(InMemoryOrderBacklog::default());
            let settings: Arc<dyn CapacityConfigStore> = Arc::new(InMemoryCapacityConfigStore::new());
            (backlog, settings)
        }
    };

    let nats = match &config.nats_url {
        Some(url) => async_nats::connect(url.as_str()).await
            .map_err(|e| tracing::warn!(error = %e, "NATS unavailable, events will not be published"))
            .ok(),
        None => None,
    };

    let estimator = CapacityEstimator::new(config.estimator.clone(), backlog, settings.clone());
    let app = api::router(AppState { estimator, settings, events: EventPublisher::new(nats) });

    tracing::info!("🚀 {} listening on 0.0.0.0:{}", SERVICE_NAME, config.port);
    axum::serve(tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?, app).await?;
    Ok(())
}
