//! Repository traits implemented by the Postgres store.
//!
//! Lookups return explicit `RepoError::NotFound` instead of aborting the
//! request; the grouped-count methods return raw `GROUP BY` rows and leave
//! the boundary selection (ties, top-N, daily threshold) to
//! [`crate::reports`].

use async_trait::async_trait;

use crate::error::RepoError;
use aeromov_shared::models::reports::{
    AirlineDayFlights, AirlineFlights, AirportFlights, AirportMovements, DayFlights,
    FlightWithNames, MovementDescriptionCount, MovementFlightCount, MovementTotals,
};
use aeromov_shared::models::{
    Airline, Airport, Flight, MovementType, NewAirline, NewAirport, NewFlight, NewMovementType,
};

#[async_trait]
pub trait AirlineRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Airline>, RepoError>;
    async fn get(&self, id: i32) -> Result<Airline, RepoError>;
    async fn create(&self, new: &NewAirline) -> Result<Airline, RepoError>;
    /// Full-row write of an already-merged record. `NotFound` if the id is
    /// absent.
    async fn update(&self, airline: &Airline) -> Result<(), RepoError>;
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    /// Total flights recorded for the airline.
    async fn flight_count(&self, id: i32) -> Result<i64, RepoError>;
    /// Flight counts grouped by movement type id.
    async fn movement_counts(&self, id: i32) -> Result<Vec<MovementFlightCount>, RepoError>;
    /// Flight counts per airport, descending by count.
    async fn airport_counts(&self, id: i32) -> Result<Vec<AirportFlights>, RepoError>;
}

#[async_trait]
pub trait AirportRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Airport>, RepoError>;
    async fn get(&self, id: i32) -> Result<Airport, RepoError>;
    async fn create(&self, new: &NewAirport) -> Result<Airport, RepoError>;
    async fn update(&self, airport: &Airport) -> Result<(), RepoError>;
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    /// Flight counts grouped by movement-type description.
    async fn movement_counts(&self, id: i32) -> Result<Vec<MovementDescriptionCount>, RepoError>;
    /// Flight counts per airline, descending by count (no limit).
    async fn airline_counts(&self, id: i32) -> Result<Vec<AirlineFlights>, RepoError>;
}

#[async_trait]
pub trait MovementTypeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<MovementType>, RepoError>;
    async fn get(&self, id: i32) -> Result<MovementType, RepoError>;
    async fn create(&self, new: &NewMovementType) -> Result<MovementType, RepoError>;
    async fn update(&self, movement_type: &MovementType) -> Result<(), RepoError>;
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    /// Flight totals per movement type, joined with the description.
    async fn totals(&self) -> Result<Vec<MovementTotals>, RepoError>;
    /// Flight counts per airline for one movement type, descending.
    async fn airline_counts(&self, id: i32) -> Result<Vec<AirlineFlights>, RepoError>;
    /// Flight counts per airport for one movement type, descending.
    async fn airport_counts(&self, id: i32) -> Result<Vec<AirportFlights>, RepoError>;
    /// Flights for one movement type, date descending, with display names.
    async fn flights(&self, id: i32) -> Result<Vec<FlightWithNames>, RepoError>;
}

#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Flight>, RepoError>;
    async fn get(&self, id: i32) -> Result<Flight, RepoError>;
    async fn create(&self, new: &NewFlight) -> Result<Flight, RepoError>;
    async fn update(&self, flight: &Flight) -> Result<(), RepoError>;
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    /// Movement counts grouped by airport.
    async fn airport_counts(&self) -> Result<Vec<AirportMovements>, RepoError>;
    /// Flight counts grouped by airline.
    async fn airline_counts(&self) -> Result<Vec<AirlineFlights>, RepoError>;
    /// Flight counts grouped by calendar date.
    async fn day_counts(&self) -> Result<Vec<DayFlights>, RepoError>;
    /// Flight counts grouped by (airline, date).
    async fn airline_day_counts(&self) -> Result<Vec<AirlineDayFlights>, RepoError>;
}
