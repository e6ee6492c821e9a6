use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::AppError;
use crate::state::AppState;
use aeromov_shared::models::reports::{AirlineDayFlights, FlightMetrics};
use aeromov_shared::models::{Flight, FlightPayload};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights", get(list_flights).post(create_flight))
        .route("/flights/metrics", get(flight_metrics))
        .route("/flights/over-two-daily", get(over_two_daily))
        .route(
            "/flights/{id}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
}

/// GET /flights
async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.flights.list().await?))
}

/// POST /flights
async fn create_flight(
    State(state): State<AppState>,
    Json(payload): Json<FlightPayload>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    let flight = state.flights.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

/// GET /flights/metrics
async fn flight_metrics(State(state): State<AppState>) -> Result<Json<FlightMetrics>, AppError> {
    Ok(Json(state.flights.metrics().await?))
}

/// GET /flights/over-two-daily
async fn over_two_daily(
    State(state): State<AppState>,
) -> Result<Json<Vec<AirlineDayFlights>>, AppError> {
    Ok(Json(state.flights.over_two_daily().await?))
}

/// GET /flights/{id}
async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Flight>, AppError> {
    Ok(Json(state.flights.get(id).await?))
}

/// PUT /flights/{id}
async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<FlightPayload>,
) -> Result<Json<Flight>, AppError> {
    Ok(Json(state.flights.update(id, &payload).await?))
}

/// DELETE /flights/{id}
async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.flights.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
