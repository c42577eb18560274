//! HTTP handlers for menus, sessions and the final order
//!
//! Handlers only move data: the menu goes through the normalizer and the
//! stored lines through the aggregator, both as plain values.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::config::KapiConfig;
use crate::core::error::{KapiError, KapiResult, SessionError};
use crate::core::menu::MenuResponse;
use crate::core::order::{NewLineItem, OrderLineItem};
use crate::core::restaurant::Restaurant;
use crate::core::service::SessionStore;
use crate::core::session::{NewParticipant, NewSession, Participant, Session};
use crate::menu::{MenuNormalizer, MenuSource, fetch_menu};
use crate::order::FinalOrder;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<KapiConfig>,
    pub normalizer: Arc<MenuNormalizer>,
    pub menu_source: Arc<dyn MenuSource>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    async fn session(&self, id: &Uuid) -> KapiResult<Session> {
        self.sessions
            .get_session(id)
            .await?
            .ok_or_else(|| SessionError::NotFound { id: *id }.into())
    }
}

/// Coordinates the upstream menu is resolved for
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub lat: f64,
    pub lng: f64,
}

/// Request body for submitting cart lines
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitItemsRequest {
    pub participant_id: Uuid,
    #[validate(length(min = 1, message = "must contain at least one item"))]
    pub items: Vec<NewLineItem>,
}

/// GET /restaurants
pub async fn list_restaurants(State(state): State<AppState>) -> Json<Vec<Restaurant>> {
    Json(state.config.restaurants.clone())
}

/// GET /restaurants/{restaurant_id}/menu?lat=&lng=
pub async fn get_menu(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<MenuResponse>, KapiError> {
    let menu = fetch_menu(
        state.menu_source.as_ref(),
        &state.normalizer,
        &restaurant_id,
        query.lat,
        query.lng,
    )
    .await?;
    Ok(Json(menu))
}

/// POST /sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<NewSession>,
) -> Result<(StatusCode, Json<Session>), KapiError> {
    let now = Utc::now();
    request.check(now, state.config.session.max_duration())?;

    let session = state
        .sessions
        .create_session(Session::from_request(request, now))
        .await?;

    tracing::info!(
        session_id = %session.id,
        restaurant = %session.restaurant_name,
        cutoff = %session.cutoff_time,
        "session created"
    );
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, KapiError> {
    Ok(Json(state.session(&id).await?))
}

/// POST /sessions/{id}/participants
pub async fn join_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NewParticipant>,
) -> Result<(StatusCode, Json<Participant>), KapiError> {
    request.validate()?;
    let participant = state.sessions.add_participant(&id, request.name).await?;
    tracing::debug!(session_id = %id, participant_id = %participant.id, "participant joined");
    Ok((StatusCode::CREATED, Json(participant)))
}

/// POST /sessions/{id}/items
pub async fn submit_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitItemsRequest>,
) -> Result<(StatusCode, Json<Vec<OrderLineItem>>), KapiError> {
    request.validate()?;
    let lines = state
        .sessions
        .add_items(&id, &request.participant_id, request.items)
        .await?;
    tracing::debug!(session_id = %id, lines = lines.len(), "items submitted");
    Ok((StatusCode::CREATED, Json(lines)))
}

/// GET /sessions/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<OrderLineItem>>, KapiError> {
    Ok(Json(state.sessions.list_items(&id).await?))
}

/// GET /sessions/{id}/order
///
/// Stays available after the cutoff.
pub async fn get_final_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinalOrder>, KapiError> {
    let session = state.session(&id).await?;
    let lines = state.sessions.list_items(&id).await?;
    Ok(Json(FinalOrder::build(session, &lines)))
}
