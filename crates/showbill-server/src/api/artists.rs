use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use showbill_booking::artists::{self, ArtistDetail, ArtistInput};
use showbill_booking::{search, MutationOutcome};
use showbill_db::entities::artist;
use showbill_db::AppState;

use super::venues::SearchResponse;
use super::{booking_error, db_error, form_fields, outcome_response, EditForm, FormPairs};

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<artist::Model>>, (StatusCode, String)> {
    let artists = artists::list_artists(&state.db).await.map_err(db_error)?;
    Ok(Json(artists))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    form: FormPairs,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let search_term = form_fields(form)
        .get("search_term")
        .unwrap_or_default()
        .to_string();
    let results = search::search_artists(&state.db, &search_term)
        .await
        .map_err(db_error)?;
    Ok(Json(SearchResponse {
        results,
        search_term,
    }))
}

/// GET /artists/:id
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>, (StatusCode, String)> {
    let detail = artists::artist_detail(&state.db, id, chrono::Utc::now())
        .await
        .map_err(booking_error)?;
    Ok(Json(detail))
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    form: FormPairs,
) -> (StatusCode, Json<MutationOutcome>) {
    let outcome = artists::create_artist(&state.db, &form_fields(form)).await;
    outcome_response(outcome, StatusCode::CREATED)
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EditForm<ArtistInput>>, (StatusCode, String)> {
    let fields = artists::artist_form(&state.db, id)
        .await
        .map_err(booking_error)?;
    Ok(Json(EditForm { id, fields }))
}

/// POST /artists/:id/edit
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    form: FormPairs,
) -> (StatusCode, Json<MutationOutcome>) {
    let outcome = artists::update_artist(&state.db, id, &form_fields(form)).await;
    outcome_response(outcome, StatusCode::OK)
}

/// DELETE /artists/:id
pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> (StatusCode, Json<MutationOutcome>) {
    let outcome = artists::delete_artist(&state.db, id).await;
    outcome_response(outcome, StatusCode::OK)
}
