//! Venue listing grouped by area.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder};
use serde::Serialize;
use showbill_db::entities::venue;

use crate::search::NameRef;

/// All venues sharing one (state, city) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaGroup {
    pub state: String,
    pub city: String,
    pub venues: Vec<NameRef>,
}

/// Venues grouped by (state, city), groups ordered by state then city and
/// venues within a group by id.
pub async fn venue_directory<C: ConnectionTrait>(db: &C) -> Result<Vec<AreaGroup>, DbErr> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::State)
        .order_by_asc(venue::Column::City)
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;

    Ok(group_by_area(venues))
}

/// Groups consecutive venues with equal (state, city); input must already be
/// sorted on that pair.
fn group_by_area(venues: Vec<venue::Model>) -> Vec<AreaGroup> {
    let mut groups: Vec<AreaGroup> = Vec::new();
    for v in venues {
        match groups.last_mut() {
            Some(group) if group.state == v.state && group.city == v.city => {
                group.venues.push(NameRef::new(v.id, v.name));
            }
            _ => groups.push(AreaGroup {
                venues: vec![NameRef::new(v.id, v.name)],
                state: v.state,
                city: v.city,
            }),
        }
    }
    groups
}
