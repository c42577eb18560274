//! Router builder for the application routes

use crate::server::handlers::{
    AppState, create_session, get_final_order, get_menu, get_session, join_session, list_items,
    list_restaurants, submit_items,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build all routes:
/// - GET /restaurants - Restaurant catalogue
/// - GET /restaurants/{restaurant_id}/menu?lat=&lng= - Normalized upstream menu
/// - POST /sessions - Create a session
/// - GET /sessions/{id} - Session with participants
/// - POST /sessions/{id}/participants - Join a session
/// - POST /sessions/{id}/items - Submit cart lines
/// - GET /sessions/{id}/items - Raw submitted lines
/// - GET /sessions/{id}/order - Aggregated final order
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants/{restaurant_id}/menu", get(get_menu))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session))
        .route("/sessions/{id}/participants", post(join_session))
        .route("/sessions/{id}/items", post(submit_items).get(list_items))
        .route("/sessions/{id}/order", get(get_final_order))
        .with_state(state)
}
