//! Field-level payload validation, independent of persistence.
//!
//! Create validation requires every field and returns a typed record the
//! repositories insert as-is; patch validation checks only the fields that
//! were provided. Failures come back as a field -> messages map.

use crate::error::FieldErrors;
use aeromov_shared::models::{
    AirlinePayload, AirportPayload, FlightPayload, MovementTypePayload, NewAirline, NewAirport,
    NewFlight, NewMovementType,
};

pub const MAX_NAME_LEN: usize = 50;

/// The only admitted movement descriptions.
pub const MOVEMENT_DESCRIPTIONS: [&str; 2] = ["Salida", "Llegada"];

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

fn check_name(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        push(errors, field, "must not be empty");
    } else if value.chars().count() > MAX_NAME_LEN {
        push(
            errors,
            field,
            format!("must be at most {MAX_NAME_LEN} characters"),
        );
    }
}

fn check_description(errors: &mut FieldErrors, value: &str) {
    if !MOVEMENT_DESCRIPTIONS.contains(&value) {
        push(
            errors,
            "description",
            "must be one of \"Salida\" or \"Llegada\"",
        );
    }
}

fn check_id(errors: &mut FieldErrors, field: &str, value: i32) {
    if value <= 0 {
        push(errors, field, "must be a positive id");
    }
}

fn finish(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn airline_create(payload: &AirlinePayload) -> Result<NewAirline, FieldErrors> {
    let mut errors = FieldErrors::new();
    match &payload.name {
        Some(name) => check_name(&mut errors, "name", name),
        None => push(&mut errors, "name", "is required"),
    }
    finish(errors)?;
    Ok(NewAirline {
        name: payload.name.clone().unwrap_or_default(),
    })
}

pub fn airline_patch(payload: &AirlinePayload) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some(name) = &payload.name {
        check_name(&mut errors, "name", name);
    }
    finish(errors)
}

pub fn airport_create(payload: &AirportPayload) -> Result<NewAirport, FieldErrors> {
    let mut errors = FieldErrors::new();
    match &payload.name {
        Some(name) => check_name(&mut errors, "name", name),
        None => push(&mut errors, "name", "is required"),
    }
    finish(errors)?;
    Ok(NewAirport {
        name: payload.name.clone().unwrap_or_default(),
    })
}

pub fn airport_patch(payload: &AirportPayload) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some(name) = &payload.name {
        check_name(&mut errors, "name", name);
    }
    finish(errors)
}

pub fn movement_type_create(payload: &MovementTypePayload) -> Result<NewMovementType, FieldErrors> {
    let mut errors = FieldErrors::new();
    match &payload.description {
        Some(description) => check_description(&mut errors, description),
        None => push(&mut errors, "description", "is required"),
    }
    finish(errors)?;
    Ok(NewMovementType {
        description: payload.description.clone().unwrap_or_default(),
    })
}

pub fn movement_type_patch(payload: &MovementTypePayload) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some(description) = &payload.description {
        check_description(&mut errors, description);
    }
    finish(errors)
}

pub fn flight_create(payload: &FlightPayload) -> Result<NewFlight, FieldErrors> {
    let mut errors = FieldErrors::new();
    match payload.airline_id {
        Some(id) => check_id(&mut errors, "airline_id", id),
        None => push(&mut errors, "airline_id", "is required"),
    }
    match payload.airport_id {
        Some(id) => check_id(&mut errors, "airport_id", id),
        None => push(&mut errors, "airport_id", "is required"),
    }
    match payload.movement_type_id {
        Some(id) => check_id(&mut errors, "movement_type_id", id),
        None => push(&mut errors, "movement_type_id", "is required"),
    }
    if payload.flight_date.is_none() {
        push(&mut errors, "flight_date", "is required");
    }
    finish(errors)?;
    Ok(NewFlight {
        airline_id: payload.airline_id.unwrap_or_default(),
        airport_id: payload.airport_id.unwrap_or_default(),
        movement_type_id: payload.movement_type_id.unwrap_or_default(),
        flight_date: payload.flight_date.unwrap_or_default(),
    })
}

pub fn flight_patch(payload: &FlightPayload) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some(id) = payload.airline_id {
        check_id(&mut errors, "airline_id", id);
    }
    if let Some(id) = payload.airport_id {
        check_id(&mut errors, "airport_id", id);
    }
    if let Some(id) = payload.movement_type_id {
        check_id(&mut errors, "movement_type_id", id);
    }
    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn airline_create_requires_name() {
        let err = airline_create(&AirlinePayload { name: None }).unwrap_err();
        assert_eq!(err["name"], vec!["is required"]);
    }

    #[test]
    fn airline_name_length_is_bounded() {
        let err = airline_create(&AirlinePayload {
            name: Some("x".repeat(51)),
        })
        .unwrap_err();
        assert!(err["name"][0].contains("at most 50"));

        assert!(airline_create(&AirlinePayload {
            name: Some("x".repeat(50)),
        })
        .is_ok());
    }

    #[test]
    fn blank_airport_name_is_rejected() {
        let err = airport_create(&AirportPayload {
            name: Some("   ".to_string()),
        })
        .unwrap_err();
        assert_eq!(err["name"], vec!["must not be empty"]);
    }

    #[test]
    fn movement_description_is_restricted_to_the_two_values() {
        for description in MOVEMENT_DESCRIPTIONS {
            assert!(movement_type_create(&MovementTypePayload {
                description: Some(description.to_string()),
            })
            .is_ok());
        }

        let err = movement_type_create(&MovementTypePayload {
            description: Some("Escala".to_string()),
        })
        .unwrap_err();
        assert!(err.contains_key("description"));
    }

    #[test]
    fn movement_patch_rejects_invalid_description() {
        assert!(movement_type_patch(&MovementTypePayload {
            description: Some("Despegue".to_string()),
        })
        .is_err());
        assert!(movement_type_patch(&MovementTypePayload { description: None }).is_ok());
    }

    #[test]
    fn flight_create_reports_every_missing_field() {
        let err = flight_create(&FlightPayload::default()).unwrap_err();
        assert_eq!(err.len(), 4);
        for field in ["airline_id", "airport_id", "movement_type_id", "flight_date"] {
            assert_eq!(err[field], vec!["is required"]);
        }
    }

    #[test]
    fn flight_create_returns_the_typed_record() {
        let new = flight_create(&FlightPayload {
            airline_id: Some(1),
            airport_id: Some(2),
            movement_type_id: Some(1),
            flight_date: NaiveDate::from_ymd_opt(2021, 5, 2),
        })
        .unwrap();
        assert_eq!(new.airline_id, 1);
        assert_eq!(new.airport_id, 2);
        assert_eq!(
            new.flight_date,
            NaiveDate::from_ymd_opt(2021, 5, 2).unwrap()
        );
    }

    #[test]
    fn flight_patch_validates_only_provided_fields() {
        assert!(flight_patch(&FlightPayload::default()).is_ok());
        let err = flight_patch(&FlightPayload {
            airline_id: Some(0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err["airline_id"], vec!["must be a positive id"]);
    }
}
