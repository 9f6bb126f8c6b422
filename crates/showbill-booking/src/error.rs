//! Booking error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("{entity} {id} was not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("missing form field: {0}")]
    MissingField(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl BookingError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_not_found() {
        let err = BookingError::not_found("Venue", 12);
        assert_eq!(err.to_string(), "Venue 12 was not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_display_missing_field() {
        let err = BookingError::MissingField("phone".into());
        assert_eq!(err.to_string(), "missing form field: phone");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_invalid_field() {
        let err = BookingError::InvalidField {
            field: "start_time",
            reason: "expected YYYY-MM-DD HH:MM:SS".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for start_time: expected YYYY-MM-DD HH:MM:SS"
        );
    }

    #[test]
    fn test_from_db_err() {
        let err: BookingError = sea_orm::DbErr::Custom("disk full".into()).into();
        assert!(matches!(err, BookingError::Database(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
