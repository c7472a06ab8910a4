use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;

use super::{name_contains, upcoming_counts, DeleteOutcome, Listed, SearchResults};
use crate::choices::{join_genres, split_genres, Genre};
use crate::entities::{artist, show, venue};
use crate::error::RepoError;
use crate::schedule::{format_start_time, partition, DateFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    fn apply(self, active: &mut artist::ActiveModel) {
        active.name = Set(self.name);
        active.city = Set(self.city);
        active.state = Set(self.state);
        active.phone = Set(self.phone);
        active.genres = Set(join_genres(&self.genres));
        active.image_link = Set(self.image_link);
        active.facebook_link = Set(self.facebook_link);
        active.website_link = Set(self.website_link);
        active.seeking_venue = Set(self.seeking_venue);
        active.seeking_description = Set(self.seeking_description);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sea_orm::FromQueryResult)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueAppearance {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<artist::Model, RepoError> {
    artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(RepoError::NotFound {
            entity: "artist",
            id,
        })
}

/// Every artist, ordered by name.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<ArtistSummary>, RepoError> {
    let rows = artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Name)
        .into_model::<ArtistSummary>()
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    input: ArtistInput,
) -> Result<artist::Model, RepoError> {
    let name = input.name.clone();
    let mut active = artist::ActiveModel {
        ..Default::default()
    };
    input.apply(&mut active);

    let created = active
        .insert(db)
        .await
        .map_err(|e| RepoError::from_write(e, "artist", &name))?;

    tracing::info!(artist_id = created.id, name = %created.name, "artist listed");
    Ok(created)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    input: ArtistInput,
) -> Result<artist::Model, RepoError> {
    let existing = find(db, id).await?;
    let name = input.name.clone();
    let mut active: artist::ActiveModel = existing.into();
    input.apply(&mut active);

    let updated = active
        .update(db)
        .await
        .map_err(|e| RepoError::from_write(e, "artist", &name))?;

    tracing::info!(artist_id = id, name = %updated.name, "artist updated");
    Ok(updated)
}

/// Delete an artist and all of their shows in one transaction.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteOutcome, RepoError> {
    let txn = db.begin().await?;

    let Some(existing) = artist::Entity::find_by_id(id).one(&txn).await? else {
        txn.rollback().await?;
        tracing::warn!(artist_id = id, "artist not found, nothing deleted");
        return Ok(DeleteOutcome::Missing);
    };

    let removed = show::Entity::delete_many()
        .filter(show::Column::ArtistId.eq(id))
        .exec(&txn)
        .await?;
    artist::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        artist_id = id,
        shows_removed = removed.rows_affected,
        "artist deleted"
    );
    Ok(DeleteOutcome::Deleted {
        name: existing.name,
        shows_removed: removed.rows_affected,
    })
}

pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTimeWithTimeZone,
) -> Result<SearchResults, RepoError> {
    let matches = artist::Entity::find()
        .filter(name_contains(artist::Column::Name, term))
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?;
    let ids: Vec<i32> = matches.iter().map(|a| a.id).collect();
    let counts = upcoming_counts(db, show::Column::ArtistId, Some(&ids), now).await?;

    Ok(SearchResults::new(
        matches
            .into_iter()
            .map(|a| Listed {
                num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
                id: a.id,
                name: a.name,
            })
            .collect(),
    ))
}

pub async fn detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTimeWithTimeZone,
) -> Result<ArtistDetail, RepoError> {
    let a = find(db, id).await?;

    let rows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(venue::Entity)
        .all(db)
        .await?;

    let appearances = rows.into_iter().filter_map(|(s, v)| match v {
        Some(v) => Some((
            s.start_time,
            VenueAppearance {
                venue_id: v.id,
                venue_name: v.name,
                venue_image_link: v.image_link,
                start_time: format_start_time(s.start_time, DateFormat::Medium),
            },
        )),
        None => {
            tracing::warn!(show_id = s.id, artist_id = id, "show is missing its venue, skipping");
            None
        }
    });
    let split = partition(appearances, now, |(start, _)| *start);
    let past_shows: Vec<VenueAppearance> = split.past.into_iter().map(|(_, v)| v).collect();
    let upcoming_shows: Vec<VenueAppearance> =
        split.upcoming.into_iter().map(|(_, v)| v).collect();

    Ok(ArtistDetail {
        id: a.id,
        name: a.name,
        genres: split_genres(&a.genres),
        city: a.city,
        state: a.state,
        phone: a.phone,
        website: a.website_link,
        facebook_link: a.facebook_link,
        seeking_venue: a.seeking_venue,
        seeking_description: a.seeking_description,
        image_link: a.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}
