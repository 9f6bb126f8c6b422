//! Artist reads and writes.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    LoaderTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use showbill_db::entities::{artist, show, venue, Genres};

use crate::classify::{classify, format_start_time, ClassifiedShows};
use crate::error::BookingError;
use crate::form::FormFields;
use crate::mutation::{commit_or_rollback, MutationOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistInput {
    pub fn from_form(form: &FormFields) -> Result<Self, BookingError> {
        Ok(Self {
            name: form.require("name")?,
            city: form.require("city")?,
            state: form.require("state")?,
            phone: form.require("phone")?,
            genres: form.get_all("genres"),
            facebook_link: form.require("facebook_link")?,
            image_link: form.require("image_link")?,
            website_link: form.require("website_link")?,
            seeking_venue: form.flag("seeking_venue"),
            seeking_description: form.require("seeking_description")?,
        })
    }

    pub fn apply(self, active: &mut artist::ActiveModel) {
        active.name = Set(self.name);
        active.city = Set(self.city);
        active.state = Set(self.state);
        active.phone = Set(self.phone);
        active.genres = Set(Genres(self.genres));
        active.facebook_link = Set(self.facebook_link);
        active.image_link = Set(self.image_link);
        active.website_link = Set(self.website_link);
        active.seeking_venue = Set(self.seeking_venue);
        active.seeking_description = Set(self.seeking_description);
    }

    pub fn into_active_model(self) -> artist::ActiveModel {
        let mut active = <artist::ActiveModel as Default>::default();
        self.apply(&mut active);
        active
    }
}

impl From<artist::Model> for ArtistInput {
    fn from(a: artist::Model) -> Self {
        Self {
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone,
            genres: a.genres.0,
            facebook_link: a.facebook_link,
            image_link: a.image_link,
            website_link: a.website_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
        }
    }
}

/// A show as seen from the artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueAppearance {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: String,
    #[serde(flatten)]
    pub shows: ClassifiedShows<VenueAppearance>,
}

/// Every artist record, in id order.
pub async fn list_artists<C: ConnectionTrait>(db: &C) -> Result<Vec<artist::Model>, DbErr> {
    artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await
}

async fn find_artist<C: ConnectionTrait>(db: &C, id: i32) -> Result<artist::Model, BookingError> {
    artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(BookingError::not_found("Artist", id))
}

pub async fn artist_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<ArtistDetail, BookingError> {
    let a = find_artist(db, id).await?;

    let shows = a
        .find_related(show::Entity)
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;
    let venues = shows.load_one(venue::Entity, db).await?;

    let appearances = shows.into_iter().zip(venues).filter_map(|(s, v)| {
        let Some(v) = v else {
            tracing::warn!(show_id = s.id, venue_id = s.venue_id, "show references a missing venue");
            return None;
        };
        Some((
            s.start_time,
            VenueAppearance {
                venue_id: v.id,
                venue_name: v.name,
                venue_image_link: v.image_link,
                start_time: format_start_time(s.start_time),
            },
        ))
    });

    Ok(ArtistDetail {
        id: a.id,
        name: a.name,
        genres: a.genres.0,
        city: a.city,
        state: a.state,
        phone: a.phone,
        website: a.website_link,
        facebook_link: a.facebook_link,
        seeking_venue: a.seeking_venue,
        seeking_description: a.seeking_description,
        image_link: a.image_link,
        shows: classify(appearances, now),
    })
}

pub async fn artist_form<C: ConnectionTrait>(db: &C, id: i32) -> Result<ArtistInput, BookingError> {
    Ok(find_artist(db, id).await?.into())
}

pub async fn create_artist(db: &DatabaseConnection, form: &FormFields) -> MutationOutcome {
    let submitted_name = form.get("name").unwrap_or_default().to_string();
    let failure = || format!("An error occurred. Artist {submitted_name} could not be listed.");

    let input = match ArtistInput::from_form(form) {
        Ok(input) => input,
        Err(err) => return MutationOutcome::failed(failure(), err),
    };

    let result = commit_or_rollback::<_, BookingError, _>(db, move |txn| {
        Box::pin(async move { Ok(input.into_active_model().insert(txn).await?) })
    })
    .await;

    match result {
        Ok(created) => {
            tracing::info!(artist_id = created.id, name = %created.name, "artist listed");
            MutationOutcome::success(
                created.id,
                format!("Artist {} was successfully listed!", created.name),
            )
        }
        Err(err) => MutationOutcome::failed(failure(), err),
    }
}

pub async fn update_artist(db: &DatabaseConnection, id: i32, form: &FormFields) -> MutationOutcome {
    let existing = match find_artist(db, id).await {
        Ok(a) => a,
        Err(BookingError::NotFound { .. }) => {
            return MutationOutcome::not_found(format!("Artist {id} was not found."))
        }
        Err(err) => {
            return MutationOutcome::failed(
                format!("An error occurred. Artist {id} could not be updated."),
                err,
            )
        }
    };
    let failure = format!(
        "An error occurred. Artist {} could not be updated.",
        existing.name
    );

    let input = match ArtistInput::from_form(form) {
        Ok(input) => input,
        Err(err) => return MutationOutcome::failed(failure, err),
    };

    let result = commit_or_rollback::<_, BookingError, _>(db, move |txn| {
        Box::pin(async move {
            let mut active: artist::ActiveModel = existing.into();
            input.apply(&mut active);
            Ok(active.update(txn).await?)
        })
    })
    .await;

    match result {
        Ok(updated) => {
            tracing::info!(artist_id = updated.id, "artist updated");
            MutationOutcome::success(
                updated.id,
                format!("Artist {} was successfully updated!", updated.name),
            )
        }
        Err(err) => MutationOutcome::failed(failure, err),
    }
}

/// Deletes the artist together with its shows.
pub async fn delete_artist(db: &DatabaseConnection, id: i32) -> MutationOutcome {
    let existing = match find_artist(db, id).await {
        Ok(a) => a,
        Err(BookingError::NotFound { .. }) => {
            return MutationOutcome::not_found(format!("Artist {id} was not found."))
        }
        Err(err) => {
            return MutationOutcome::failed(
                format!("An error occurred. Artist {id} could not be deleted."),
                err,
            )
        }
    };
    let name = existing.name.clone();

    let result = commit_or_rollback::<_, BookingError, _>(db, move |txn| {
        Box::pin(async move {
            let shows = show::Entity::delete_many()
                .filter(show::Column::ArtistId.eq(existing.id))
                .exec(txn)
                .await?;
            existing.delete(txn).await?;
            Ok(shows.rows_affected)
        })
    })
    .await;

    match result {
        Ok(shows_removed) => {
            tracing::info!(artist_id = id, shows_removed, "artist deleted");
            MutationOutcome::success(id, format!("Artist {name} was successfully deleted."))
        }
        Err(err) => MutationOutcome::failed(
            format!("An error occurred. Artist {name} could not be deleted."),
            err,
        ),
    }
}
