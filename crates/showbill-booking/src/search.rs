//! Case-insensitive substring search over venue and artist names.

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait, QueryFilter, QueryOrder, Select,
};
use serde::{Deserialize, Serialize};
use showbill_db::entities::{artist, venue};

use crate::form::FormFields;

/// `{id, name}` projection used by listings and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    pub id: i32,
    pub name: String,
}

impl NameRef {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<NameRef>,
}

impl FromIterator<NameRef> for SearchResults {
    fn from_iter<I: IntoIterator<Item = NameRef>>(iter: I) -> Self {
        let data: Vec<NameRef> = iter.into_iter().collect();
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Venue search criteria. `city` and `state`, when `Some`, must match exactly
/// and are ANDed with the name match. Blank form values become `None` in
/// [`VenueSearch::from_form`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VenueSearch {
    pub search_term: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl VenueSearch {
    pub fn term(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..Default::default()
        }
    }

    /// Reads `search_term`, `city` and `state`; blank filters are dropped.
    pub fn from_form(form: &FormFields) -> Self {
        Self {
            search_term: form.get("search_term").unwrap_or_default().to_string(),
            city: form.non_empty("city"),
            state: form.non_empty("state"),
        }
    }
}

pub async fn search_venues<C: ConnectionTrait>(
    db: &C,
    criteria: &VenueSearch,
) -> Result<SearchResults, DbErr> {
    let mut query = venue::Entity::find().order_by_asc(venue::Column::Id);
    if let Some(city) = &criteria.city {
        query = query.filter(venue::Column::City.eq(city.as_str()));
    }
    if let Some(state) = &criteria.state {
        query = query.filter(venue::Column::State.eq(state.as_str()));
    }

    let venues = find_by_name(db, query, venue::Column::Name, &criteria.search_term, |v| {
        v.name.as_str()
    })
    .await?;
    tracing::debug!(term = %criteria.search_term, hits = venues.len(), "venue search");

    Ok(venues
        .into_iter()
        .map(|v| NameRef::new(v.id, v.name))
        .collect())
}

pub async fn search_artists<C: ConnectionTrait>(
    db: &C,
    search_term: &str,
) -> Result<SearchResults, DbErr> {
    let query = artist::Entity::find().order_by_asc(artist::Column::Id);
    let artists =
        find_by_name(db, query, artist::Column::Name, search_term, |a| a.name.as_str()).await?;
    tracing::debug!(term = %search_term, hits = artists.len(), "artist search");

    Ok(artists
        .into_iter()
        .map(|a| NameRef::new(a.id, a.name))
        .collect())
}

/// Rows of `query` whose name contains `term`, ignoring case.
///
/// Postgres does the match itself with `ILIKE`. SQLite's `LOWER` and `LIKE`
/// only fold ASCII, so there the rows are filtered after loading with
/// Unicode lowercasing.
async fn find_by_name<E, C>(
    db: &C,
    query: Select<E>,
    column: E::Column,
    term: &str,
    name: impl Fn(&E::Model) -> &str,
) -> Result<Vec<E::Model>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if db.get_database_backend() == DbBackend::Postgres {
        let pattern = format!("%{}%", escape_like(term));
        return query
            .filter(Expr::col(column).ilike(LikeExpr::new(pattern).escape('\\')))
            .all(db)
            .await;
    }

    let needle = term.to_lowercase();
    let rows = query.all(db).await?;
    Ok(rows
        .into_iter()
        .filter(|row| name(row).to_lowercase().contains(&needle))
        .collect())
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
