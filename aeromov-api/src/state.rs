use std::sync::Arc;

use aeromov_service::{
    AirlineService, AirportService, FlightService, MovementTypeService, StackExchangeService,
};

#[derive(Clone)]
pub struct AppState {
    pub airlines: Arc<AirlineService>,
    pub airports: Arc<AirportService>,
    pub movements: Arc<MovementTypeService>,
    pub flights: Arc<FlightService>,
    pub stackexchange: Arc<StackExchangeService>,
}
