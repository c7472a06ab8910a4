//! Repository error types.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{entity} named {name:?} already exists")]
    Duplicate { entity: &'static str, name: String },

    #[error("{field} {id} does not reference an existing row")]
    MissingReference { field: &'static str, id: i32 },

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl RepoError {
    /// Map a unique-constraint violation on insert/update to [`RepoError::Duplicate`].
    pub(crate) fn from_write(err: DbErr, entity: &'static str, name: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => RepoError::Duplicate {
                entity,
                name: name.to_string(),
            },
            _ => RepoError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_not_found() {
        let err = RepoError::NotFound {
            entity: "venue",
            id: 7,
        };
        assert_eq!(err.to_string(), "venue 7 not found");
    }

    #[test]
    fn test_display_duplicate() {
        let err = RepoError::Duplicate {
            entity: "artist",
            name: "Guns N Petals".into(),
        };
        assert_eq!(err.to_string(), "artist named \"Guns N Petals\" already exists");
    }

    #[test]
    fn test_display_missing_reference() {
        let err = RepoError::MissingReference {
            field: "artist_id",
            id: 42,
        };
        assert_eq!(err.to_string(), "artist_id 42 does not reference an existing row");
    }

    #[test]
    fn test_from_write_passes_through_other_errors() {
        let err = RepoError::from_write(DbErr::Custom("boom".into()), "venue", "x");
        assert!(matches!(err, RepoError::Database(_)));
    }
}
