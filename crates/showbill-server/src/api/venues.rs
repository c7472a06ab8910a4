use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::Form;
use std::sync::Arc;

use showbill_db::repo::venues::{self, Locality, VenueDetail};
use showbill_db::repo::SearchResults;
use showbill_db::{AppState, RepoError};

use super::{now, FormPage, SearchForm};
use crate::error::ApiError;
use crate::forms::VenueForm;

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Locality>>, ApiError> {
    let areas = venues::list_by_locality(&state.db, now()).await?;
    Ok(Json(areas))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(body): Form<SearchForm>,
) -> Result<Json<SearchResults>, ApiError> {
    let results = venues::search(&state.db, &body.search_term, now()).await?;
    Ok(Json(results))
}

/// GET /venues/{id}
///
/// An unknown id is a 404; any other failure sends the caller back to the index.
pub async fn get_venue(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Response {
    match venues::detail(&state.db, id, now()).await {
        Ok(detail) => Json::<VenueDetail>(detail).into_response(),
        Err(e @ RepoError::NotFound { .. }) => ApiError::from(e).into_response(),
        Err(e) => {
            tracing::error!(venue_id = id, error = %e, "failed to load venue");
            Redirect::to("/").into_response()
        }
    }
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<FormPage<VenueForm>> {
    Json(FormPage::new(VenueForm::default()))
}

/// POST /venues
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> Result<Redirect, ApiError> {
    let input = form
        .validate()
        .map_err(|errors| ApiError::invalid(errors, &form))?;

    venues::create(&state.db, input).await.map_err(|e| {
        let message = format!("An error occurred. Venue {} could not be listed.", form.name.trim());
        ApiError::from_submission(e, &form, message)
    })?;

    Ok(Redirect::to("/"))
}

/// GET /venues/{id}/edit
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<FormPage<VenueForm>>, ApiError> {
    let venue = venues::find(&state.db, id).await?;
    Ok(Json(FormPage::new(VenueForm::from_model(&venue))))
}

/// POST /venues/{id}
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<VenueForm>,
) -> Result<Redirect, ApiError> {
    let input = form
        .validate()
        .map_err(|errors| ApiError::invalid(errors, &form))?;

    venues::update(&state.db, id, input).await.map_err(|e| {
        let message = format!(
            "An error occurred. Venue {} could not be updated.",
            form.name.trim()
        );
        ApiError::from_submission(e, &form, message)
    })?;

    Ok(Redirect::to(&format!("/venues/{id}")))
}

/// POST /venues/{id}/delete
///
/// Always redirects to the index; failures are only logged.
pub async fn delete_venue(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Redirect {
    if let Err(e) = venues::delete(&state.db, id).await {
        tracing::error!(venue_id = id, error = %e, "venue could not be deleted");
    }
    Redirect::to("/")
}
