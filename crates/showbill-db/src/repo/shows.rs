use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::Serialize;

use crate::entities::{artist, show, venue};
use crate::error::RepoError;
use crate::schedule::{format_start_time, DateFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTimeWithTimeZone,
}

/// One entry of the global show listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, FromQueryResult)]
struct ShowRow {
    id: i32,
    start_time: DateTimeWithTimeZone,
    venue_id: Option<i32>,
    venue_name: Option<String>,
    artist_id: Option<i32>,
    artist_name: Option<String>,
    artist_image_link: Option<String>,
}

impl ShowRow {
    /// `None` when either side of the join is gone.
    fn into_listing(self, format: DateFormat) -> Option<ShowListing> {
        Some(ShowListing {
            venue_id: self.venue_id?,
            venue_name: self.venue_name?,
            artist_id: self.artist_id?,
            artist_name: self.artist_name?,
            artist_image_link: self.artist_image_link,
            start_time: format_start_time(self.start_time, format),
        })
    }
}

/// Insert a show after checking that both the artist and the venue exist.
/// Nothing is written when either lookup misses.
pub async fn create(db: &DatabaseConnection, input: ShowInput) -> Result<show::Model, RepoError> {
    let txn = db.begin().await?;

    if artist::Entity::find_by_id(input.artist_id)
        .one(&txn)
        .await?
        .is_none()
    {
        txn.rollback().await?;
        return Err(RepoError::MissingReference {
            field: "artist_id",
            id: input.artist_id,
        });
    }
    if venue::Entity::find_by_id(input.venue_id)
        .one(&txn)
        .await?
        .is_none()
    {
        txn.rollback().await?;
        return Err(RepoError::MissingReference {
            field: "venue_id",
            id: input.venue_id,
        });
    }

    let created = show::ActiveModel {
        start_time: Set(to_utc(input.start_time)),
        artist_id: Set(input.artist_id),
        venue_id: Set(input.venue_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        show_id = created.id,
        artist_id = created.artist_id,
        venue_id = created.venue_id,
        "show listed"
    );
    Ok(created)
}

/// Start times are stored in UTC so that SQL comparison and ordering follow
/// the instant on every backend.
pub(crate) fn to_utc(value: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    value.with_timezone(&Utc).fixed_offset()
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<show::Model, RepoError> {
    show::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(RepoError::NotFound { entity: "show", id })
}

/// Every show, most recent first, with venue and artist display fields.
pub async fn list_all<C: ConnectionTrait>(
    db: &C,
    format: DateFormat,
) -> Result<Vec<ShowListing>, RepoError> {
    let rows = show::Entity::find()
        .select_only()
        .column(show::Column::Id)
        .column(show::Column::StartTime)
        .column_as(venue::Column::Id, "venue_id")
        .column_as(venue::Column::Name, "venue_name")
        .column_as(artist::Column::Id, "artist_id")
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .join(JoinType::LeftJoin, show::Relation::Venue.def())
        .join(JoinType::LeftJoin, show::Relation::Artist.def())
        .order_by_desc(show::Column::StartTime)
        .into_model::<ShowRow>()
        .all(db)
        .await?;

    Ok(collect_listings(rows, format))
}

fn collect_listings(rows: Vec<ShowRow>, format: DateFormat) -> Vec<ShowListing> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            let listing = row.into_listing(format);
            if listing.is_none() {
                tracing::warn!(show_id = id, "show is missing its venue or artist, skipping");
            }
            listing
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::testing::*;
    use crate::repo::venues;

    fn row(id: i32, venue: Option<(i32, &str)>, artist: Option<(i32, &str)>) -> ShowRow {
        ShowRow {
            id,
            start_time: now(),
            venue_id: venue.map(|v| v.0),
            venue_name: venue.map(|v| v.1.to_string()),
            artist_id: artist.map(|a| a.0),
            artist_name: artist.map(|a| a.1.to_string()),
            artist_image_link: None,
        }
    }

    #[test]
    fn test_orphaned_rows_are_skipped() {
        let rows = vec![
            row(1, Some((1, "Hop")), Some((4, "Petals"))),
            row(2, None, Some((4, "Petals"))),
            row(3, Some((1, "Hop")), None),
        ];
        let listings = collect_listings(rows, DateFormat::Medium);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].venue_name, "Hop");
        assert_eq!(listings[0].artist_name, "Petals");
    }

    #[tokio::test]
    async fn test_create_with_missing_artist_writes_nothing() {
        let db = test_db().await;
        let v = venue(&db, "The Fillmore").await;

        let err = create(
            &db,
            ShowInput {
                artist_id: 404,
                venue_id: v.id,
                start_time: now() + days(1),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            RepoError::MissingReference {
                field: "artist_id",
                id: 404
            }
        ));
        assert!(show::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_missing_venue_writes_nothing() {
        let db = test_db().await;
        let a = artist(&db, "Guns N Petals").await;

        let err = create(
            &db,
            ShowInput {
                artist_id: a.id,
                venue_id: 77,
                start_time: now() + days(1),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::MissingReference { field: "venue_id", .. }));
        assert!(show::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_most_recent_first() {
        let db = test_db().await;
        let now = now();
        let a = artist(&db, "Guns N Petals").await;
        let v = venue(&db, "The Musical Hop").await;
        let w = venue(&db, "Park Square").await;
        for (venue_id, start_time) in [
            (v.id, now - days(30)),
            (w.id, now + days(30)),
            (v.id, now + days(1)),
        ] {
            create(
                &db,
                ShowInput {
                    artist_id: a.id,
                    venue_id,
                    start_time,
                },
            )
            .await
            .unwrap();
        }

        let listing = list_all(&db, DateFormat::Medium).await.unwrap();
        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0].venue_name, "Park Square");
        assert_eq!(listing[1].venue_name, "The Musical Hop");
        assert_eq!(
            listing[2].start_time,
            format_start_time(now - days(30), DateFormat::Medium)
        );
        assert!(listing.iter().all(|s| s.artist_name == "Guns N Petals"));
        assert_eq!(
            listing[0].artist_image_link.as_deref(),
            Some("https://img.example.com/a.jpg")
        );
    }

    #[tokio::test]
    async fn test_offset_start_times_order_and_count_by_instant() {
        use crate::repo::upcoming_counts;
        use chrono::{FixedOffset, TimeZone};

        let db = test_db().await;
        let a = artist(&db, "Guns N Petals").await;
        let v = venue(&db, "The Musical Hop").await;
        let sydney = FixedOffset::east_opt(10 * 3600).unwrap();
        // 20:00 at +10:00 is 10:00 UTC, earlier than 15:00 UTC
        let early = sydney.with_ymd_and_hms(2099, 4, 1, 20, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2099, 4, 1, 15, 0, 0).unwrap().fixed_offset();
        for start_time in [early, late] {
            create(
                &db,
                ShowInput {
                    artist_id: a.id,
                    venue_id: v.id,
                    start_time,
                },
            )
            .await
            .unwrap();
        }

        let stored = show::Entity::find().all(&db).await.unwrap();
        assert!(stored.iter().all(|s| s.start_time.offset().local_minus_utc() == 0));

        let listing = list_all(&db, DateFormat::Medium).await.unwrap();
        let times: Vec<&str> = listing.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(times, vec!["Wed 04, 01, 2099 3:00PM", "Wed 04, 01, 2099 10:00AM"]);

        let noon = sydney.with_ymd_and_hms(2099, 4, 1, 22, 0, 0).unwrap();
        let counts = upcoming_counts(&db, show::Column::VenueId, None, noon)
            .await
            .unwrap();
        assert_eq!(counts.get(&v.id), Some(&1));
    }

    #[tokio::test]
    async fn test_list_all_full_format() {
        use chrono::TimeZone;

        let db = test_db().await;
        let a = artist(&db, "Guns N Petals").await;
        let v = venue(&db, "The Musical Hop").await;
        let start_time = Utc.with_ymd_and_hms(2035, 4, 1, 8, 5, 0).unwrap().fixed_offset();
        create(
            &db,
            ShowInput {
                artist_id: a.id,
                venue_id: v.id,
                start_time,
            },
        )
        .await
        .unwrap();

        let listing = list_all(&db, DateFormat::Full).await.unwrap();
        assert_eq!(listing[0].start_time, "Sunday April, 1, 2035 at 8:05AM");
    }

    #[tokio::test]
    async fn test_find_after_venue_delete() {
        let db = test_db().await;
        let a = artist(&db, "Band").await;
        let v = venue(&db, "Gone").await;
        let s = create(
            &db,
            ShowInput {
                artist_id: a.id,
                venue_id: v.id,
                start_time: now(),
            },
        )
        .await
        .unwrap();
        assert!(find(&db, s.id).await.is_ok());

        venues::delete(&db, v.id).await.unwrap();
        assert!(matches!(
            find(&db, s.id).await,
            Err(RepoError::NotFound { entity: "show", .. })
        ));
        assert!(list_all(&db, DateFormat::Medium).await.unwrap().is_empty());
    }
}
