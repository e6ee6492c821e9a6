use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod airlines;
pub mod airports;
pub mod error;
pub mod flights;
pub mod movements;
pub mod stackexchange;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .merge(airlines::routes())
        .merge(airports::routes())
        .merge(movements::routes())
        .merge(flights::routes())
        .merge(stackexchange::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
