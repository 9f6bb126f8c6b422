use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use showbill_booking::venues::{self, VenueDetail, VenueInput};
use showbill_booking::{directory, search, AreaGroup, MutationOutcome, SearchResults, VenueSearch};
use showbill_db::AppState;

use super::{booking_error, db_error, form_fields, outcome_response, EditForm, FormPairs};

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: SearchResults,
    pub search_term: String,
}

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AreaGroup>>, (StatusCode, String)> {
    let areas = directory::venue_directory(&state.db)
        .await
        .map_err(db_error)?;
    Ok(Json(areas))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    form: FormPairs,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let criteria = VenueSearch::from_form(&form_fields(form));
    let results = search::search_venues(&state.db, &criteria)
        .await
        .map_err(db_error)?;
    Ok(Json(SearchResponse {
        results,
        search_term: criteria.search_term,
    }))
}

/// GET /venues/:id
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>, (StatusCode, String)> {
    let detail = venues::venue_detail(&state.db, id, chrono::Utc::now())
        .await
        .map_err(booking_error)?;
    Ok(Json(detail))
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    form: FormPairs,
) -> (StatusCode, Json<MutationOutcome>) {
    let outcome = venues::create_venue(&state.db, &form_fields(form)).await;
    outcome_response(outcome, StatusCode::CREATED)
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EditForm<VenueInput>>, (StatusCode, String)> {
    let fields = venues::venue_form(&state.db, id)
        .await
        .map_err(booking_error)?;
    Ok(Json(EditForm { id, fields }))
}

/// POST /venues/:id/edit
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    form: FormPairs,
) -> (StatusCode, Json<MutationOutcome>) {
    let outcome = venues::update_venue(&state.db, id, &form_fields(form)).await;
    outcome_response(outcome, StatusCode::OK)
}

/// DELETE /venues/:id (also GET /venues/:id/delete)
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> (StatusCode, Json<MutationOutcome>) {
    let outcome = venues::delete_venue(&state.db, id).await;
    outcome_response(outcome, StatusCode::OK)
}
