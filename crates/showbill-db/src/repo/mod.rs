//! Explicit repository functions over the three tables.
//!
//! Every function takes the connection or transaction to run on; nothing is
//! fetched lazily. Callers pass `now` so that past/upcoming classification is
//! decided once per request.

pub mod artists;
pub mod shows;
pub mod venues;

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};
use serde::Serialize;
use std::collections::HashMap;

use crate::entities::show;

/// One row of a venue/artist listing or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listed {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<Listed>,
}

impl SearchResults {
    fn new(data: Vec<Listed>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { name: String, shows_removed: u64 },
    Missing,
}

/// Case-insensitive substring filter on `column`. LIKE wildcards in `term`
/// match literally. Both sides are folded by the database's `LOWER`.
pub(crate) fn name_contains<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Expr::cust_with_exprs(
        r"LOWER($1) LIKE LOWER($2) ESCAPE '\'",
        [Expr::col(column).into(), Expr::val(format!("%{escaped}%")).into()],
    )
}

/// Count of upcoming shows per parent id, as one grouped query.
///
/// `parent` is `show::Column::VenueId` or `show::Column::ArtistId`. Parents
/// with no upcoming shows are absent from the map.
pub(crate) async fn upcoming_counts<C: ConnectionTrait>(
    db: &C,
    parent: show::Column,
    only: Option<&[i32]>,
    now: DateTimeWithTimeZone,
) -> Result<HashMap<i32, u64>, DbErr> {
    let mut query = show::Entity::find()
        .select_only()
        .column(parent)
        .column_as(Expr::col((show::Entity, show::Column::Id)).count(), "num_upcoming_shows")
        .filter(show::Column::StartTime.gt(shows::to_utc(now)))
        .group_by(parent);

    if let Some(ids) = only {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        query = query.filter(parent.is_in(ids.iter().copied()));
    }

    let rows: Vec<(i32, i64)> = query.into_tuple().all(db).await?;
    Ok(rows
        .into_iter()
        .map(|(id, n)| (id, n.max(0) as u64))
        .collect())
}
