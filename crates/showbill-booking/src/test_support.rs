// Shared fixtures for the in-crate tests.
use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use showbill_db::entities::{artist, show, venue, Genres};
use showbill_migration::{Migrator, MigratorTrait};
use std::time::Duration;

use crate::form::FormFields;

/// Fresh in-memory SQLite database with the real schema.
///
/// The pool holds exactly one connection so that a leaked transaction shows
/// up as an acquire timeout instead of passing silently.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .sqlx_logging(false);
    let db = Database::connect(opt).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn venue_fields(name: &str) -> FormFields {
    FormFields::new()
        .with("name", name)
        .with("city", "San Francisco")
        .with("state", "CA")
        .with("address", "1015 Folsom Street")
        .with("phone", "123-123-1234")
        .with("genres", "Jazz")
        .with("genres", "Reggae")
        .with("facebook_link", "https://www.facebook.com/TheMusicalHop")
        .with("image_link", "https://images.example.com/venue.jpg")
        .with("website_link", "https://www.themusicalhop.com")
        .with("seeking_description", "We are on the lookout for a local artist")
}

pub fn artist_fields(name: &str) -> FormFields {
    FormFields::new()
        .with("name", name)
        .with("city", "San Francisco")
        .with("state", "CA")
        .with("phone", "326-123-5000")
        .with("genres", "Rock n Roll")
        .with("facebook_link", "https://www.facebook.com/GunsNPetals")
        .with("image_link", "https://images.example.com/artist.jpg")
        .with("website_link", "https://www.gunsnpetalsband.com")
        .with("seeking_description", "Looking for shows to perform at")
}

pub async fn seed_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venue::Model {
    venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1 Main St".to_string()),
        phone: Set("555-0100".to_string()),
        genres: Set(Genres(vec!["Jazz".to_string()])),
        facebook_link: Set(String::new()),
        image_link: Set(format!("https://images.example.com/{}.jpg", name.len())),
        website_link: Set(String::new()),
        seeking_talent: Set(false),
        seeking_description: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed venue")
}

pub async fn seed_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set("New York".to_string()),
        state: Set("NY".to_string()),
        phone: Set("555-0199".to_string()),
        genres: Set(Genres(vec!["Jazz".to_string()])),
        facebook_link: Set(String::new()),
        image_link: Set(format!("https://images.example.com/artist-{}.jpg", name.len())),
        website_link: Set(String::new()),
        seeking_venue: Set(false),
        seeking_description: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed artist")
}

pub async fn seed_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: &str,
) -> show::Model {
    let start_time = NaiveDateTime::parse_from_str(start_time, "%Y-%m-%d %H:%M:%S")
        .expect("fixture start_time");
    show::ActiveModel {
        start_time: Set(start_time),
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed show")
}
