use std::net::SocketAddr;
use std::sync::Arc;

use ecotour_api::{
    app,
    state::{AdminConfig, AppState},
};
use ecotour_domain::{BookingLedger, BookingService, TourCatalog};
use ecotour_store::{DbClient, MemoryStore, PgStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecotour_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ecotour_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting EcoTour API on port {}", config.server.port);

    let (catalog, ledger): (Arc<dyn TourCatalog>, Arc<dyn BookingLedger>) = match &config.database {
        Some(database) => {
            let db = DbClient::connect(&database.url)
                .await
                .expect("Failed to connect to Postgres");
            db.migrate().await.expect("Failed to run migrations");
            let store = Arc::new(PgStore::new(db.pool.clone()));
            (store.clone(), store)
        }
        None => {
            tracing::info!("No database configured, serving the in-memory demo catalog");
            let store = Arc::new(MemoryStore::with_demo_catalog());
            (store.clone(), store)
        }
    };

    let app_state = AppState {
        catalog,
        ledger: ledger.clone(),
        bookings: Arc::new(BookingService::new(ledger)),
        admin: AdminConfig {
            secret: config.admin.secret.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
