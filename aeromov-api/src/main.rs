use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use aeromov_api::{app, AppState};
use aeromov_service::{
    AirlineService, AirportService, FlightService, MovementTypeService, ReadCache,
    StackExchangeService,
};
use aeromov_store::{
    DbClient, PostgresAirlineRepository, PostgresAirportRepository, PostgresFlightRepository,
    PostgresMovementTypeRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "aeromov_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = aeromov_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Aeromov API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let cache = Arc::new(ReadCache::new(Duration::from_secs(config.cache.ttl_seconds)));

    let airline_repo = Arc::new(PostgresAirlineRepository::new(db.pool.clone()));
    let airport_repo = Arc::new(PostgresAirportRepository::new(db.pool.clone()));
    let movement_repo = Arc::new(PostgresMovementTypeRepository::new(db.pool.clone()));
    let flight_repo = Arc::new(PostgresFlightRepository::new(db.pool.clone()));

    let stackexchange = StackExchangeService::new(
        config.stackexchange.base_url.clone(),
        config.stackexchange.default_tag.clone(),
        Duration::from_secs(config.stackexchange.timeout_seconds),
    )
    .expect("Failed to build Stack Exchange client");

    let app_state = AppState {
        airlines: Arc::new(AirlineService::new(airline_repo, cache.clone())),
        airports: Arc::new(AirportService::new(
            airport_repo,
            flight_repo.clone(),
            cache.clone(),
        )),
        movements: Arc::new(MovementTypeService::new(movement_repo, cache.clone())),
        flights: Arc::new(FlightService::new(flight_repo, cache)),
        stackexchange: Arc::new(stackexchange),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
