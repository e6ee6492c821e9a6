use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::AppError;
use crate::state::AppState;
use aeromov_shared::models::reports::{MovementFlightsReport, MovementStatsReport};
use aeromov_shared::models::{MovementType, MovementTypePayload};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movement-types",
            get(list_movement_types).post(create_movement_type),
        )
        .route("/movement-types/statistics", get(movement_statistics))
        .route(
            "/movement-types/{id}",
            get(get_movement_type)
                .put(update_movement_type)
                .delete(delete_movement_type),
        )
        .route("/movement-types/{id}/flights", get(movement_flights))
}

/// GET /movement-types
async fn list_movement_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovementType>>, AppError> {
    Ok(Json(state.movements.list().await?))
}

/// POST /movement-types
async fn create_movement_type(
    State(state): State<AppState>,
    Json(payload): Json<MovementTypePayload>,
) -> Result<(StatusCode, Json<MovementType>), AppError> {
    let movement_type = state.movements.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(movement_type)))
}

/// GET /movement-types/statistics
async fn movement_statistics(
    State(state): State<AppState>,
) -> Result<Json<MovementStatsReport>, AppError> {
    Ok(Json(state.movements.statistics().await?))
}

/// GET /movement-types/{id}
async fn get_movement_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MovementType>, AppError> {
    Ok(Json(state.movements.get(id).await?))
}

/// PUT /movement-types/{id}
async fn update_movement_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<MovementTypePayload>,
) -> Result<Json<MovementType>, AppError> {
    Ok(Json(state.movements.update(id, &payload).await?))
}

/// DELETE /movement-types/{id}
async fn delete_movement_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.movements.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /movement-types/{id}/flights
async fn movement_flights(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MovementFlightsReport>, AppError> {
    Ok(Json(state.movements.flights(id).await?))
}
