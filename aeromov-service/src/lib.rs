pub mod airline;
pub mod airport;
pub mod cache;
pub mod flight;
pub mod movement;
pub mod stackexchange;

pub use airline::AirlineService;
pub use airport::AirportService;
pub use cache::ReadCache;
pub use flight::FlightService;
pub use movement::MovementTypeService;
pub use stackexchange::StackExchangeService;
