use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use showbill_booking::shows::{self, ShowListing};
use showbill_booking::MutationOutcome;
use showbill_db::AppState;

use super::{db_error, form_fields, outcome_response, FormPairs};

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, (StatusCode, String)> {
    let listings = shows::list_shows(&state.db).await.map_err(db_error)?;
    Ok(Json(listings))
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    form: FormPairs,
) -> (StatusCode, Json<MutationOutcome>) {
    let outcome = shows::create_show(&state.db, &form_fields(form)).await;
    outcome_response(outcome, StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::StatusCode;

    async fn seed(app: &axum::Router) -> (String, String) {
        let venue = json_body(send(app, form_request("POST", "/venues/create", VENUE_FORM)).await).await;
        let artist =
            json_body(send(app, form_request("POST", "/artists/create", ARTIST_FORM)).await).await;
        (artist["id"].to_string(), venue["id"].to_string())
    }

    #[tokio::test]
    async fn test_same_day_booking_conflicts() {
        let app = crate::router(test_state().await);
        let (artist_id, venue_id) = seed(&app).await;

        let first = [
            ("artist_id", artist_id.as_str()),
            ("venue_id", venue_id.as_str()),
            ("start_time", "2035-04-08 20:00:00"),
        ];
        let resp = send(&app, form_request("POST", "/shows/create", &first)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(json_body(resp).await["message"], "Show was successfully listed!");

        let second = [
            ("artist_id", artist_id.as_str()),
            ("venue_id", venue_id.as_str()),
            ("start_time", "2035-04-08 09:00:00"),
        ];
        let resp = send(&app, form_request("POST", "/shows/create", &second)).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "conflict");
        assert_eq!(body["message"], "Artist is busy in this day !!");

        let listings = json_body(send(&app, get("/shows")).await).await;
        assert_eq!(listings.as_array().unwrap().len(), 1);
        assert_eq!(listings[0]["artist_name"], "Guns N Petals");
        assert_eq!(listings[0]["venue_name"], "The Musical Hop");
        assert_eq!(listings[0]["start_time"], "2035-04-08 20:00:00");

        let detail = json_body(send(&app, get(&format!("/venues/{venue_id}"))).await).await;
        assert_eq!(detail["upcoming_shows_count"], 1);
        assert_eq!(detail["upcoming_shows"][0]["artist_name"], "Guns N Petals");
    }

    #[tokio::test]
    async fn test_show_for_unknown_artist_is_404() {
        let app = crate::router(test_state().await);
        let (_, venue_id) = seed(&app).await;
        let form = [
            ("artist_id", "999"),
            ("venue_id", venue_id.as_str()),
            ("start_time", "2035-04-08 20:00:00"),
        ];
        let resp = send(&app, form_request("POST", "/shows/create", &form)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_start_time_is_error() {
        let app = crate::router(test_state().await);
        let (artist_id, venue_id) = seed(&app).await;
        let form = [
            ("artist_id", artist_id.as_str()),
            ("venue_id", venue_id.as_str()),
            ("start_time", "next tuesday"),
        ];
        let resp = send(&app, form_request("POST", "/shows/create", &form)).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(resp).await["message"],
            "An error occurred. Show could not be listed."
        );
    }
}
