use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use super::{name_contains, upcoming_counts, DeleteOutcome, Listed, SearchResults};
use crate::choices::{join_genres, split_genres, Genre};
use crate::entities::{artist, show, venue};
use crate::error::RepoError;
use crate::schedule::{format_start_time, partition, DateFormat};

/// Validated field set for creating or replacing a venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<Genre>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    fn apply(self, active: &mut venue::ActiveModel) {
        active.name = Set(self.name);
        active.city = Set(self.city);
        active.state = Set(self.state);
        active.address = Set(self.address);
        active.phone = Set(self.phone);
        active.image_link = Set(self.image_link);
        active.facebook_link = Set(self.facebook_link);
        active.website_link = Set(self.website_link);
        active.genres = Set(join_genres(&self.genres));
        active.seeking_talent = Set(self.seeking_talent);
        active.seeking_description = Set(self.seeking_description);
    }
}

/// Venues sharing a (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locality {
    pub city: String,
    pub state: String,
    pub venues: Vec<Listed>,
}

/// An artist playing at the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
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
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<venue::Model, RepoError> {
    venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(RepoError::NotFound {
            entity: "venue",
            id,
        })
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    input: VenueInput,
) -> Result<venue::Model, RepoError> {
    let name = input.name.clone();
    let mut active = venue::ActiveModel {
        ..Default::default()
    };
    input.apply(&mut active);

    let created = active
        .insert(db)
        .await
        .map_err(|e| RepoError::from_write(e, "venue", &name))?;

    tracing::info!(venue_id = created.id, name = %created.name, "venue listed");
    Ok(created)
}

/// Replace every form-managed column of an existing venue.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    input: VenueInput,
) -> Result<venue::Model, RepoError> {
    let existing = find(db, id).await?;
    let name = input.name.clone();
    let mut active: venue::ActiveModel = existing.into();
    input.apply(&mut active);

    let updated = active
        .update(db)
        .await
        .map_err(|e| RepoError::from_write(e, "venue", &name))?;

    tracing::info!(venue_id = id, name = %updated.name, "venue updated");
    Ok(updated)
}

/// Delete a venue and all of its shows in one transaction.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteOutcome, RepoError> {
    let txn = db.begin().await?;

    let Some(existing) = venue::Entity::find_by_id(id).one(&txn).await? else {
        txn.rollback().await?;
        tracing::warn!(venue_id = id, "venue not found, nothing deleted");
        return Ok(DeleteOutcome::Missing);
    };

    let removed = show::Entity::delete_many()
        .filter(show::Column::VenueId.eq(id))
        .exec(&txn)
        .await?;
    venue::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        venue_id = id,
        shows_removed = removed.rows_affected,
        "venue deleted"
    );
    Ok(DeleteOutcome::Deleted {
        name: existing.name,
        shows_removed: removed.rows_affected,
    })
}

/// All venues grouped by (city, state), ordered by state, city, then name.
pub async fn list_by_locality<C: ConnectionTrait>(
    db: &C,
    now: DateTimeWithTimeZone,
) -> Result<Vec<Locality>, RepoError> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::State)
        .order_by_asc(venue::Column::City)
        .order_by_asc(venue::Column::Name)
        .all(db)
        .await?;
    let counts = upcoming_counts(db, show::Column::VenueId, None, now).await?;

    let mut areas: Vec<Locality> = Vec::new();
    for v in venues {
        let listed = Listed {
            id: v.id,
            name: v.name,
            num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
        };
        match areas.last_mut() {
            Some(area) if area.city == v.city && area.state == v.state => area.venues.push(listed),
            _ => areas.push(Locality {
                city: v.city,
                state: v.state,
                venues: vec![listed],
            }),
        }
    }
    Ok(areas)
}

/// Case-insensitive substring search on name. An empty term matches every venue.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTimeWithTimeZone,
) -> Result<SearchResults, RepoError> {
    let matches = venue::Entity::find()
        .filter(name_contains(venue::Column::Name, term))
        .order_by_asc(venue::Column::Name)
        .all(db)
        .await?;
    let ids: Vec<i32> = matches.iter().map(|v| v.id).collect();
    let counts = upcoming_counts(db, show::Column::VenueId, Some(&ids), now).await?;

    Ok(SearchResults::new(
        matches
            .into_iter()
            .map(|v| Listed {
                num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
                id: v.id,
                name: v.name,
            })
            .collect(),
    ))
}

/// Venue with its shows split into past and upcoming relative to `now`.
pub async fn detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTimeWithTimeZone,
) -> Result<VenueDetail, RepoError> {
    let v = find(db, id).await?;

    let rows = show::Entity::find()
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(artist::Entity)
        .all(db)
        .await?;

    let appearances = rows.into_iter().filter_map(|(s, a)| match a {
        Some(a) => Some((
            s.start_time,
            ArtistAppearance {
                artist_id: a.id,
                artist_name: a.name,
                artist_image_link: a.image_link,
                start_time: format_start_time(s.start_time, DateFormat::Medium),
            },
        )),
        None => {
            tracing::warn!(show_id = s.id, venue_id = id, "show is missing its artist, skipping");
            None
        }
    });
    let split = partition(appearances, now, |(start, _)| *start);
    let past_shows: Vec<ArtistAppearance> = split.past.into_iter().map(|(_, a)| a).collect();
    let upcoming_shows: Vec<ArtistAppearance> =
        split.upcoming.into_iter().map(|(_, a)| a).collect();

    Ok(VenueDetail {
        id: v.id,
        name: v.name,
        genres: split_genres(&v.genres),
        address: v.address,
        city: v.city,
        state: v.state,
        phone: v.phone,
        website: v.website_link,
        facebook_link: v.facebook_link,
        seeking_talent: v.seeking_talent,
        seeking_description: v.seeking_description,
        image_link: v.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}
