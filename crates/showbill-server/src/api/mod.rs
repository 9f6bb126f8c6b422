pub mod artists;
pub mod shows;
pub mod venues;

use axum::{http::StatusCode, Json};
use serde::Serialize;
use showbill_booking::{BookingError, FormFields, MutationOutcome};

/// Raw form body; keys may repeat.
pub type FormPairs = axum::Form<Vec<(String, String)>>;

pub fn form_fields(axum::Form(pairs): FormPairs) -> FormFields {
    FormFields::from(pairs)
}

/// Map a read failure onto a status code and message.
pub fn booking_error(err: BookingError) -> (StatusCode, String) {
    match err {
        BookingError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        BookingError::MissingField(_) | BookingError::InvalidField { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        BookingError::Database(e) => {
            tracing::error!(error = %e, "read failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}"))
        }
    }
}

pub fn db_error(err: showbill_db::sea_orm::DbErr) -> (StatusCode, String) {
    booking_error(BookingError::Database(err))
}

/// Status code for a mutation outcome; the body is the outcome itself.
pub fn outcome_response(
    outcome: MutationOutcome,
    success: StatusCode,
) -> (StatusCode, Json<MutationOutcome>) {
    let status = match &outcome {
        MutationOutcome::Success { .. } => success,
        MutationOutcome::Conflict { .. } => StatusCode::CONFLICT,
        MutationOutcome::NotFound { .. } => StatusCode::NOT_FOUND,
        MutationOutcome::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(outcome))
}

/// Edit-form payload: the record id plus its stored field values.
#[derive(Debug, Serialize)]
pub struct EditForm<T: Serialize> {
    pub id: i32,
    #[serde(flatten)]
    pub fields: T,
}
