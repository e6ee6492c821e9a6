use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::AppError;
use crate::state::AppState;
use aeromov_shared::models::reports::AirlineStats;
use aeromov_shared::models::{Airline, AirlinePayload};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/airlines", get(list_airlines).post(create_airline))
        .route(
            "/airlines/{id}",
            get(get_airline).put(update_airline).delete(delete_airline),
        )
        .route("/airlines/{id}/statistics", get(airline_statistics))
}

/// GET /airlines
async fn list_airlines(State(state): State<AppState>) -> Result<Json<Vec<Airline>>, AppError> {
    Ok(Json(state.airlines.list().await?))
}

/// POST /airlines
async fn create_airline(
    State(state): State<AppState>,
    Json(payload): Json<AirlinePayload>,
) -> Result<(StatusCode, Json<Airline>), AppError> {
    let airline = state.airlines.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(airline)))
}

/// GET /airlines/{id}
async fn get_airline(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Airline>, AppError> {
    Ok(Json(state.airlines.get(id).await?))
}

/// PUT /airlines/{id}
async fn update_airline(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AirlinePayload>,
) -> Result<Json<Airline>, AppError> {
    Ok(Json(state.airlines.update(id, &payload).await?))
}

/// DELETE /airlines/{id}
async fn delete_airline(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.airlines.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /airlines/{id}/statistics
async fn airline_statistics(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AirlineStats>, AppError> {
    Ok(Json(state.airlines.statistics(id).await?))
}
