pub mod artists;
pub mod shows;
pub mod venues;

use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use showbill_db::choices::{Genre, STATE_CODES};
use showbill_db::sea_orm::prelude::DateTimeWithTimeZone;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET / and GET /healthz
pub async fn status() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("page not found".to_string())
}

/// Body of POST /venues/search and POST /artists/search.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// A form to render along with the choices its select fields offer.
#[derive(Debug, Serialize)]
pub struct FormPage<F> {
    pub form: F,
    pub genre_choices: Vec<&'static str>,
    pub state_choices: &'static [&'static str],
}

impl<F> FormPage<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            genre_choices: Genre::ALL.iter().map(|g| g.as_str()).collect(),
            state_choices: &STATE_CODES,
        }
    }
}

/// Reference time for past/upcoming classification, fixed once per request.
pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}
