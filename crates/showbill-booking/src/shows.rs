//! Show listing and booking.

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    LoaderTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use showbill_db::entities::{artist, show, venue};

use crate::classify::format_start_time;
use crate::error::BookingError;
use crate::form::FormFields;
use crate::mutation::{commit_or_rollback, MutationOutcome};

pub const ARTIST_BUSY_MESSAGE: &str = "Artist is busy in this day !!";

/// Accepted `start_time` layouts. The first is the canonical one; the others
/// cover ISO-8601 and `datetime-local` inputs. Fractional seconds are optional.
const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub venue_id: i32,
    pub venue_name: String,
    pub start_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowInput {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

impl ShowInput {
    pub fn from_form(form: &FormFields) -> Result<Self, BookingError> {
        Ok(Self {
            artist_id: form.require_id("artist_id")?,
            venue_id: form.require_id("venue_id")?,
            start_time: parse_start_time(&form.require("start_time")?)?,
        })
    }
}

pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime, BookingError> {
    let raw = raw.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| BookingError::InvalidField {
            field: "start_time",
            reason: format!("expected YYYY-MM-DD HH:MM:SS, got {raw:?}"),
        })
}

/// Every show with both endpoints resolved, earliest first.
pub async fn list_shows<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>, DbErr> {
    let shows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;
    let artists = shows.load_one(artist::Entity, db).await?;
    let venues = shows.load_one(venue::Entity, db).await?;

    Ok(shows
        .into_iter()
        .zip(artists.into_iter().zip(venues))
        .filter_map(|(s, pair)| match pair {
            (Some(a), Some(v)) => Some(ShowListing {
                artist_id: a.id,
                artist_name: a.name,
                artist_image_link: a.image_link,
                venue_id: v.id,
                venue_name: v.name,
                start_time: format_start_time(s.start_time),
            }),
            _ => {
                tracing::warn!(show_id = s.id, "show references a missing artist or venue");
                None
            }
        })
        .collect())
}

/// True when the artist already has a show on the calendar date of
/// `start_time`, at any hour.
pub async fn artist_is_busy<C: ConnectionTrait>(
    db: &C,
    artist_id: i32,
    start_time: NaiveDateTime,
) -> Result<bool, DbErr> {
    let day = start_time.date();
    let existing = show::Entity::find()
        .filter(show::Column::ArtistId.eq(artist_id))
        .all(db)
        .await?;
    Ok(existing.iter().any(|s| s.start_time.date() == day))
}

pub async fn create_show(db: &DatabaseConnection, form: &FormFields) -> MutationOutcome {
    const FAILURE: &str = "An error occurred. Show could not be listed.";

    let input = match ShowInput::from_form(form) {
        Ok(input) => input,
        Err(err) => return MutationOutcome::failed(FAILURE, err),
    };

    match check_endpoints(db, &input).await {
        Ok(None) => {}
        Ok(Some(outcome)) => return outcome,
        Err(err) => return MutationOutcome::failed(FAILURE, err),
    }

    let result = commit_or_rollback::<_, BookingError, _>(db, move |txn| {
        Box::pin(async move {
            let created = show::ActiveModel {
                start_time: Set(input.start_time),
                artist_id: Set(input.artist_id),
                venue_id: Set(input.venue_id),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            Ok(created)
        })
    })
    .await;

    match result {
        Ok(created) => {
            tracing::info!(
                show_id = created.id,
                artist_id = created.artist_id,
                venue_id = created.venue_id,
                "show listed"
            );
            MutationOutcome::success(created.id, "Show was successfully listed!")
        }
        Err(err) => MutationOutcome::failed(FAILURE, err),
    }
}

/// Both endpoints must exist and the artist must be free that day. Returns the
/// rejection outcome, if any.
async fn check_endpoints(
    db: &DatabaseConnection,
    input: &ShowInput,
) -> Result<Option<MutationOutcome>, DbErr> {
    if artist::Entity::find_by_id(input.artist_id).one(db).await?.is_none() {
        return Ok(Some(MutationOutcome::not_found(format!(
            "Artist {} was not found.",
            input.artist_id
        ))));
    }
    if venue::Entity::find_by_id(input.venue_id).one(db).await?.is_none() {
        return Ok(Some(MutationOutcome::not_found(format!(
            "Venue {} was not found.",
            input.venue_id
        ))));
    }
    if artist_is_busy(db, input.artist_id, input.start_time).await? {
        tracing::info!(
            artist_id = input.artist_id,
            date = %input.start_time.date(),
            "artist already booked that day"
        );
        return Ok(Some(MutationOutcome::conflict(ARTIST_BUSY_MESSAGE)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_artist, seed_show, seed_venue, test_db};
    use chrono::NaiveDate;
    use sea_orm::PaginatorTrait;

    fn show_form(artist_id: i32, venue_id: i32, start_time: &str) -> FormFields {
        FormFields::new()
            .with("artist_id", artist_id.to_string())
            .with("venue_id", venue_id.to_string())
            .with("start_time", start_time)
    }

    #[test]
    fn test_parse_start_time_formats() {
        let expected = NaiveDate::from_ymd_opt(2035, 4, 8)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        assert_eq!(parse_start_time("2035-04-08 20:00:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-08T20:00:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-08T20:00").unwrap(), expected);
        assert_eq!(parse_start_time(" 2035-04-08 20:00:00.000 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_start_time_rejects_garbage() {
        let err = parse_start_time("next tuesday").unwrap_err();
        assert!(matches!(err, BookingError::InvalidField { field: "start_time", .. }));
    }

    #[test]
    fn test_show_input_requires_numeric_ids() {
        let form = show_form(1, 1, "2035-04-08 20:00:00").with("artist_id", "ignored");
        assert!(ShowInput::from_form(&form).is_ok());

        let bad = FormFields::new()
            .with("artist_id", "abc")
            .with("venue_id", "1")
            .with("start_time", "2035-04-08 20:00:00");
        assert!(ShowInput::from_form(&bad).is_err());
    }

    #[tokio::test]
    async fn test_create_show_success() {
        let db = test_db().await;
        let a = seed_artist(&db, "Guns N Petals").await;
        let v = seed_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        let outcome = create_show(&db, &show_form(a.id, v.id, "2035-04-08 20:00:00")).await;
        assert_eq!(outcome.message(), "Show was successfully listed!");

        let stored = show::Entity::find_by_id(outcome.id().unwrap())
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.artist_id, a.id);
        assert_eq!(stored.venue_id, v.id);
        assert_eq!(format_start_time(stored.start_time), "2035-04-08 20:00:00");
    }

    #[tokio::test]
    async fn test_same_day_is_busy_and_writes_nothing() {
        let db = test_db().await;
        let a = seed_artist(&db, "Guns N Petals").await;
        let hop = seed_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let park = seed_venue(&db, "Park Square", "San Francisco", "CA").await;
        seed_show(&db, a.id, hop.id, "2035-04-08 20:00:00").await;

        let outcome = create_show(&db, &show_form(a.id, park.id, "2035-04-08 09:15:00")).await;
        assert_eq!(outcome, MutationOutcome::conflict(ARTIST_BUSY_MESSAGE));
        assert_eq!(show::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_different_day_or_artist_is_free() {
        let db = test_db().await;
        let a = seed_artist(&db, "Guns N Petals").await;
        let b = seed_artist(&db, "Matt Quevedo").await;
        let v = seed_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        seed_show(&db, a.id, v.id, "2035-04-08 23:59:59").await;

        assert!(create_show(&db, &show_form(a.id, v.id, "2035-04-09 00:00:00"))
            .await
            .is_success());
        assert!(create_show(&db, &show_form(b.id, v.id, "2035-04-08 20:00:00"))
            .await
            .is_success());
        assert_eq!(show::Entity::find().count(&db).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_show_unknown_endpoints() {
        let db = test_db().await;
        let a = seed_artist(&db, "Guns N Petals").await;
        let v = seed_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        let no_artist = create_show(&db, &show_form(999, v.id, "2035-04-08 20:00:00")).await;
        assert_eq!(no_artist, MutationOutcome::not_found("Artist 999 was not found."));

        let no_venue = create_show(&db, &show_form(a.id, 999, "2035-04-08 20:00:00")).await;
        assert_eq!(no_venue, MutationOutcome::not_found("Venue 999 was not found."));

        assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_show_bad_time_fails() {
        let db = test_db().await;
        let a = seed_artist(&db, "Guns N Petals").await;
        let v = seed_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        let outcome = create_show(&db, &show_form(a.id, v.id, "soon")).await;
        assert!(matches!(outcome, MutationOutcome::Failed { .. }));
        assert_eq!(outcome.message(), "An error occurred. Show could not be listed.");
    }

    #[tokio::test]
    async fn test_list_shows_flattened() {
        let db = test_db().await;
        let a = seed_artist(&db, "Guns N Petals").await;
        let b = seed_artist(&db, "The Wild Sax Band").await;
        let v = seed_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        seed_show(&db, b.id, v.id, "2035-04-01 20:00:00").await;
        seed_show(&db, a.id, v.id, "2019-05-21 21:30:00").await;

        let listings = list_shows(&db).await.unwrap();
        assert_eq!(
            listings,
            vec![
                ShowListing {
                    artist_id: a.id,
                    artist_name: a.name.clone(),
                    artist_image_link: a.image_link.clone(),
                    venue_id: v.id,
                    venue_name: v.name.clone(),
                    start_time: "2019-05-21 21:30:00".into(),
                },
                ShowListing {
                    artist_id: b.id,
                    artist_name: b.name.clone(),
                    artist_image_link: b.image_link.clone(),
                    venue_id: v.id,
                    venue_name: v.name.clone(),
                    start_time: "2035-04-01 20:00:00".into(),
                },
            ]
        );
    }
}
