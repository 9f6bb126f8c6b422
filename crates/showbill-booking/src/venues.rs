//! Venue reads and writes.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use showbill_db::entities::{artist, show, venue, Genres};

use crate::classify::{classify, format_start_time, ClassifiedShows};
use crate::error::BookingError;
use crate::form::FormFields;
use crate::mutation::{commit_or_rollback, MutationOutcome};

/// Every mutable venue field, as submitted by the venue form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueInput {
    pub fn from_form(form: &FormFields) -> Result<Self, BookingError> {
        Ok(Self {
            name: form.require("name")?,
            city: form.require("city")?,
            state: form.require("state")?,
            address: form.require("address")?,
            phone: form.require("phone")?,
            genres: form.get_all("genres"),
            facebook_link: form.require("facebook_link")?,
            image_link: form.require("image_link")?,
            website_link: form.require("website_link")?,
            seeking_talent: form.flag("seeking_talent"),
            seeking_description: form.require("seeking_description")?,
        })
    }

    /// Overwrite every mutable column of `active`.
    pub fn apply(self, active: &mut venue::ActiveModel) {
        active.name = Set(self.name);
        active.city = Set(self.city);
        active.state = Set(self.state);
        active.address = Set(self.address);
        active.phone = Set(self.phone);
        active.genres = Set(Genres(self.genres));
        active.facebook_link = Set(self.facebook_link);
        active.image_link = Set(self.image_link);
        active.website_link = Set(self.website_link);
        active.seeking_talent = Set(self.seeking_talent);
        active.seeking_description = Set(self.seeking_description);
    }

    pub fn into_active_model(self) -> venue::ActiveModel {
        let mut active = <venue::ActiveModel as Default>::default();
        self.apply(&mut active);
        active
    }
}

impl From<venue::Model> for VenueInput {
    fn from(v: venue::Model) -> Self {
        Self {
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone,
            genres: v.genres.0,
            facebook_link: v.facebook_link,
            image_link: v.image_link,
            website_link: v.website_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
        }
    }
}

/// A show as seen from the venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub image_link: String,
    #[serde(flatten)]
    pub shows: ClassifiedShows<ArtistAppearance>,
}

async fn find_venue<C: ConnectionTrait>(db: &C, id: i32) -> Result<venue::Model, BookingError> {
    venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(BookingError::not_found("Venue", id))
}

/// Venue fields plus its shows split into past and upcoming relative to `now`.
pub async fn venue_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<VenueDetail, BookingError> {
    let v = find_venue(db, id).await?;

    let shows = v
        .find_related(show::Entity)
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;
    let artists = shows.load_one(artist::Entity, db).await?;

    let appearances = shows.into_iter().zip(artists).filter_map(|(s, a)| {
        let Some(a) = a else {
            tracing::warn!(show_id = s.id, artist_id = s.artist_id, "show references a missing artist");
            return None;
        };
        Some((
            s.start_time,
            ArtistAppearance {
                artist_id: a.id,
                artist_name: a.name,
                artist_image_link: a.image_link,
                start_time: format_start_time(s.start_time),
            },
        ))
    });

    Ok(VenueDetail {
        id: v.id,
        name: v.name,
        genres: v.genres.0,
        address: v.address,
        city: v.city,
        state: v.state,
        phone: v.phone,
        website: v.website_link,
        facebook_link: v.facebook_link,
        seeking_talent: v.seeking_talent,
        seeking_description: v.seeking_description,
        image_link: v.image_link,
        shows: classify(appearances, now),
    })
}

/// Stored values for pre-filling the edit form.
pub async fn venue_form<C: ConnectionTrait>(db: &C, id: i32) -> Result<VenueInput, BookingError> {
    Ok(find_venue(db, id).await?.into())
}

pub async fn create_venue(db: &DatabaseConnection, form: &FormFields) -> MutationOutcome {
    let submitted_name = form.get("name").unwrap_or_default().to_string();
    let failure = || format!("An error occurred. Venue {submitted_name} could not be listed.");

    let input = match VenueInput::from_form(form) {
        Ok(input) => input,
        Err(err) => return MutationOutcome::failed(failure(), err),
    };

    let result = commit_or_rollback::<_, BookingError, _>(db, move |txn| {
        Box::pin(async move { Ok(input.into_active_model().insert(txn).await?) })
    })
    .await;

    match result {
        Ok(created) => {
            tracing::info!(venue_id = created.id, name = %created.name, "venue listed");
            MutationOutcome::success(
                created.id,
                format!("Venue {} was successfully listed!", created.name),
            )
        }
        Err(err) => MutationOutcome::failed(failure(), err),
    }
}

/// Full replace: every mutable field takes the submitted value.
pub async fn update_venue(db: &DatabaseConnection, id: i32, form: &FormFields) -> MutationOutcome {
    let existing = match find_venue(db, id).await {
        Ok(v) => v,
        Err(BookingError::NotFound { .. }) => {
            return MutationOutcome::not_found(format!("Venue {id} was not found."))
        }
        Err(err) => {
            return MutationOutcome::failed(
                format!("An error occurred. Venue {id} could not be updated."),
                err,
            )
        }
    };
    let failure = format!(
        "An error occurred. Venue {} could not be updated.",
        existing.name
    );

    let input = match VenueInput::from_form(form) {
        Ok(input) => input,
        Err(err) => return MutationOutcome::failed(failure, err),
    };

    let result = commit_or_rollback::<_, BookingError, _>(db, move |txn| {
        Box::pin(async move {
            let mut active: venue::ActiveModel = existing.into();
            input.apply(&mut active);
            Ok(active.update(txn).await?)
        })
    })
    .await;

    match result {
        Ok(updated) => {
            tracing::info!(venue_id = updated.id, "venue updated");
            MutationOutcome::success(
                updated.id,
                format!("Venue {} was successfully updated!", updated.name),
            )
        }
        Err(err) => MutationOutcome::failed(failure, err),
    }
}

/// Deletes the venue together with its shows.
pub async fn delete_venue(db: &DatabaseConnection, id: i32) -> MutationOutcome {
    let existing = match find_venue(db, id).await {
        Ok(v) => v,
        Err(BookingError::NotFound { .. }) => {
            return MutationOutcome::not_found(format!("Venue {id} was not found."))
        }
        Err(err) => {
            return MutationOutcome::failed(
                format!("An error occurred. Venue {id} could not be deleted."),
                err,
            )
        }
    };
    let name = existing.name.clone();

    let result = commit_or_rollback::<_, BookingError, _>(db, move |txn| {
        Box::pin(async move {
            let shows = show::Entity::delete_many()
                .filter(show::Column::VenueId.eq(existing.id))
                .exec(txn)
                .await?;
            existing.delete(txn).await?;
            Ok(shows.rows_affected)
        })
    })
    .await;

    match result {
        Ok(shows_removed) => {
            tracing::info!(venue_id = id, shows_removed, "venue deleted");
            MutationOutcome::success(id, format!("Venue {name} was successfully deleted."))
        }
        Err(err) => MutationOutcome::failed(
            format!("An error occurred. Venue {name} could not be deleted."),
            err,
        ),
    }
}
