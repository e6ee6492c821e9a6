use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod reports;
pub mod stackexchange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: i32,
    pub name: String,
}

/// Movement classification for a flight record. The description is
/// constrained to "Salida" (departure) or "Llegada" (arrival).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementType {
    pub id: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: i32,
    pub airline_id: i32,
    pub airport_id: i32,
    pub movement_type_id: i32,
    pub flight_date: NaiveDate,
}

// ============================================================================
// Request payloads
// ============================================================================
//
// Every field is optional so the same payload type serves both create
// (all required fields must be present, enforced by validation) and
// partial update (only provided fields are merged).

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirlinePayload {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirportPayload {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementTypePayload {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightPayload {
    pub airline_id: Option<i32>,
    pub airport_id: Option<i32>,
    pub movement_type_id: Option<i32>,
    pub flight_date: Option<NaiveDate>,
}

// ============================================================================
// Validated create records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAirline {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAirport {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovementType {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlight {
    pub airline_id: i32,
    pub airport_id: i32,
    pub movement_type_id: i32,
    pub flight_date: NaiveDate,
}

// ============================================================================
// Patch merge
// ============================================================================

impl Airline {
    pub fn apply(&mut self, patch: &AirlinePayload) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
    }
}

impl Airport {
    pub fn apply(&mut self, patch: &AirportPayload) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
    }
}

impl MovementType {
    pub fn apply(&mut self, patch: &MovementTypePayload) {
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }
}

impl Flight {
    pub fn apply(&mut self, patch: &FlightPayload) {
        if let Some(airline_id) = patch.airline_id {
            self.airline_id = airline_id;
        }
        if let Some(airport_id) = patch.airport_id {
            self.airport_id = airport_id;
        }
        if let Some(movement_type_id) = patch.movement_type_id {
            self.movement_type_id = movement_type_id;
        }
        if let Some(flight_date) = patch.flight_date {
            self.flight_date = flight_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_patch_merges_only_provided_fields() {
        let mut flight = Flight {
            id: 7,
            airline_id: 1,
            airport_id: 2,
            movement_type_id: 1,
            flight_date: NaiveDate::from_ymd_opt(2021, 5, 2).unwrap(),
        };

        flight.apply(&FlightPayload {
            airport_id: Some(4),
            ..Default::default()
        });

        assert_eq!(flight.airport_id, 4);
        assert_eq!(flight.airline_id, 1);
        assert_eq!(flight.movement_type_id, 1);
        assert_eq!(
            flight.flight_date,
            NaiveDate::from_ymd_opt(2021, 5, 2).unwrap()
        );
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut airline = Airline {
            id: 1,
            name: "Volaris".to_string(),
        };
        airline.apply(&AirlinePayload::default());
        assert_eq!(airline.name, "Volaris");
    }
}
