use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::Form;
use serde::Deserialize;
use std::sync::Arc;

use showbill_db::repo::shows::{self, ShowListing};
use showbill_db::schedule::DateFormat;
use showbill_db::AppState;

use super::{now, FormPage};
use crate::error::ApiError;
use crate::forms::ShowForm;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingParams {
    /// `medium` (default) or `full`.
    pub format: DateFormat,
}

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Vec<ShowListing>>, ApiError> {
    Ok(Json(shows::list_all(&state.db, params.format).await?))
}

/// GET /shows/create
pub async fn create_show_form() -> Json<FormPage<ShowForm>> {
    Json(FormPage::new(ShowForm::blank(now())))
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> Result<Redirect, ApiError> {
    let input = form
        .validate()
        .map_err(|errors| ApiError::invalid(errors, &form))?;

    shows::create(&state.db, input).await.map_err(|e| {
        ApiError::from_submission(
            e,
            &form,
            "An error occurred. Show could not be listed.".to_string(),
        )
    })?;

    Ok(Redirect::to("/"))
}
