//! Handlers for the `/movies` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cinedex_core::error::CoreError;
use cinedex_core::types::DbId;
use cinedex_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /movies
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.store.find_all().await?;
    Ok(Json(movies))
}

/// POST /movies
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    input.validate()?;

    let movie = state.store.create(&input).await?;
    tracing::info!(movie_id = movie.id, title = %movie.title, "Movie created");

    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Response> {
    let movie = state.store.find_by_id(id).await?;
    found_or_empty(&state, id, movie)
}

/// PUT|PATCH /movies/{id}
///
/// Fetches the movie, merges the supplied fields onto it, and saves it back.
/// The fetch and the save are separate store calls, so concurrent updates to
/// the same id are last-write-wins.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateMovie>,
) -> AppResult<Json<Movie>> {
    input.validate()?;

    let mut movie = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::movie_not_found(id))?;

    movie.apply(&input);

    // The row can disappear between the fetch and the save.
    let saved = state
        .store
        .save(&movie)
        .await?
        .ok_or_else(|| CoreError::movie_not_found(id))?;

    tracing::info!(movie_id = id, "Movie updated");
    Ok(Json(saved))
}

/// DELETE /movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Response> {
    let deleted = state.store.find_by_id_and_delete(id).await?;
    if deleted.is_some() {
        tracing::info!(movie_id = id, "Movie deleted");
    }
    found_or_empty(&state, id, deleted)
}

/// Answer with the movie, or apply the configured missing-record policy.
fn found_or_empty(state: &AppState, id: DbId, movie: Option<Movie>) -> AppResult<Response> {
    match movie {
        Some(movie) => Ok(Json(movie).into_response()),
        None if state.config.empty_on_missing => {
            tracing::debug!(movie_id = id, "Movie not found, answering with empty body");
            Ok(StatusCode::OK.into_response())
        }
        None => Err(CoreError::movie_not_found(id).into()),
    }
}
