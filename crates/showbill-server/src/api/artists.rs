use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::Form;
use std::sync::Arc;

use showbill_db::repo::artists::{self, ArtistSummary};
use showbill_db::repo::SearchResults;
use showbill_db::{AppState, RepoError};

use super::{now, FormPage, SearchForm};
use crate::error::ApiError;
use crate::forms::ArtistForm;

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistSummary>>, ApiError> {
    Ok(Json(artists::list(&state.db).await?))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(body): Form<SearchForm>,
) -> Result<Json<SearchResults>, ApiError> {
    let results = artists::search(&state.db, &body.search_term, now()).await?;
    Ok(Json(results))
}

/// GET /artists/{id}
pub async fn get_artist(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Response {
    match artists::detail(&state.db, id, now()).await {
        Ok(detail) => Json(detail).into_response(),
        Err(e @ RepoError::NotFound { .. }) => ApiError::from(e).into_response(),
        Err(e) => {
            tracing::error!(artist_id = id, error = %e, "failed to load artist");
            Redirect::to("/").into_response()
        }
    }
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<FormPage<ArtistForm>> {
    Json(FormPage::new(ArtistForm::default()))
}

/// POST /artists
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ArtistForm>,
) -> Result<Redirect, ApiError> {
    let input = form
        .validate()
        .map_err(|errors| ApiError::invalid(errors, &form))?;

    artists::create(&state.db, input).await.map_err(|e| {
        let message = format!(
            "An error occurred. Artist {} could not be listed.",
            form.name.trim()
        );
        ApiError::from_submission(e, &form, message)
    })?;

    Ok(Redirect::to("/"))
}

/// GET /artists/{id}/edit
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<FormPage<ArtistForm>>, ApiError> {
    let artist = artists::find(&state.db, id).await?;
    Ok(Json(FormPage::new(ArtistForm::from_model(&artist))))
}

/// POST /artists/{id}
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<ArtistForm>,
) -> Result<Redirect, ApiError> {
    let input = form
        .validate()
        .map_err(|errors| ApiError::invalid(errors, &form))?;

    artists::update(&state.db, id, input).await.map_err(|e| {
        let message = format!(
            "An error occurred. Artist {} could not be updated.",
            form.name.trim()
        );
        ApiError::from_submission(e, &form, message)
    })?;

    Ok(Redirect::to(&format!("/artists/{id}")))
}

/// POST /artists/{id}/delete
pub async fn delete_artist(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Redirect {
    if let Err(e) = artists::delete(&state.db, id).await {
        tracing::error!(artist_id = id, error = %e, "artist could not be deleted");
    }
    Redirect::to("/")
}
