pub mod airline_repo;
pub mod airport_repo;
pub mod app_config;
pub mod database;
pub mod flight_repo;
pub mod movement_repo;

pub use airline_repo::PostgresAirlineRepository;
pub use airport_repo::PostgresAirportRepository;
pub use database::DbClient;
pub use flight_repo::PostgresFlightRepository;
pub use movement_repo::PostgresMovementTypeRepository;
