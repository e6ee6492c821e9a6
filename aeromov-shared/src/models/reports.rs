//! Row and response shapes for the reporting queries.
//!
//! The grouped-count rows come straight out of SQL `GROUP BY` queries; the
//! response shapes are what the services hand to the HTTP layer (and what
//! the read cache stores).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Airline, Airport, MovementType};

/// Flights grouped by airport. Airports count both departures and
/// arrivals, so the field is named for movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportMovements {
    pub airport_id: i32,
    pub airport_name: String,
    pub total_movements: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineFlights {
    pub airline_id: i32,
    pub airline_name: String,
    pub total_flights: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportFlights {
    pub airport_id: i32,
    pub airport_name: String,
    pub total_flights: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFlights {
    pub flight_date: NaiveDate,
    pub total_flights: i64,
}

/// One (airline, date) pair with its flight count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineDayFlights {
    pub airline_id: i32,
    pub airline_name: String,
    pub flight_date: NaiveDate,
    pub total_flights: i64,
}

/// Flights for an airline grouped by movement type id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFlightCount {
    pub movement_type_id: i32,
    pub total_flights: i64,
}

/// Flights grouped by movement-type description ("Salida"/"Llegada").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementDescriptionCount {
    pub description: String,
    pub total_flights: i64,
}

/// Per-movement-type totals (joined with the description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementTotals {
    pub movement_type_id: i32,
    pub description: String,
    pub total_flights: i64,
}

/// Flight enriched with the airline and airport display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightWithNames {
    pub id: i32,
    pub airline_id: i32,
    pub airline_name: String,
    pub airport_id: i32,
    pub airport_name: String,
    pub movement_type_id: i32,
    pub flight_date: NaiveDate,
}

// ============================================================================
// Shaped responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineStats {
    pub airline: Airline,
    pub total_flights: i64,
    pub flights_by_movement: Vec<MovementFlightCount>,
    pub top_airports: Vec<AirportFlights>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportStats {
    pub airport: Airport,
    pub movements: Vec<MovementDescriptionCount>,
    pub airlines: Vec<AirlineFlights>,
}

/// All airports tied at the maximum movement count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusiestAirports {
    pub airports: Vec<AirportMovements>,
    pub total_movements: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementTypeStats {
    pub movement_type_id: i32,
    pub description: String,
    pub total_flights: i64,
    pub top_airlines: Vec<AirlineFlights>,
    pub top_airports: Vec<AirportFlights>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementStatsReport {
    pub statistics: Vec<MovementTypeStats>,
    pub total_flights: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFlightsReport {
    pub movement_type: MovementType,
    pub total_flights: i64,
    pub flights: Vec<FlightWithNames>,
}

/// The consolidated metrics bundle served at `/flights/metrics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightMetrics {
    pub busiest_airport: Vec<AirportMovements>,
    pub busiest_airline: Vec<AirlineFlights>,
    pub busiest_day: Vec<DayFlights>,
    pub airlines_over_two_daily: Vec<AirlineDayFlights>,
}
