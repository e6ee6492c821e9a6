use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::AppError;
use crate::state::AppState;
use aeromov_shared::models::reports::{AirportStats, BusiestAirports};
use aeromov_shared::models::{Airport, AirportPayload};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/airports", get(list_airports).post(create_airport))
        .route("/airports/busiest", get(busiest_airport))
        .route(
            "/airports/{id}",
            get(get_airport).put(update_airport).delete(delete_airport),
        )
        .route("/airports/{id}/statistics", get(airport_statistics))
}

/// GET /airports
async fn list_airports(State(state): State<AppState>) -> Result<Json<Vec<Airport>>, AppError> {
    Ok(Json(state.airports.list().await?))
}

/// POST /airports
async fn create_airport(
    State(state): State<AppState>,
    Json(payload): Json<AirportPayload>,
) -> Result<(StatusCode, Json<Airport>), AppError> {
    let airport = state.airports.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(airport)))
}

/// GET /airports/busiest
async fn busiest_airport(
    State(state): State<AppState>,
) -> Result<Json<BusiestAirports>, AppError> {
    Ok(Json(state.airports.busiest().await?))
}

/// GET /airports/{id}
async fn get_airport(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Airport>, AppError> {
    Ok(Json(state.airports.get(id).await?))
}

/// PUT /airports/{id}
async fn update_airport(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AirportPayload>,
) -> Result<Json<Airport>, AppError> {
    Ok(Json(state.airports.update(id, &payload).await?))
}

/// DELETE /airports/{id}
async fn delete_airport(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.airports.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /airports/{id}/statistics
async fn airport_statistics(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AirportStats>, AppError> {
    Ok(Json(state.airports.statistics(id).await?))
}
