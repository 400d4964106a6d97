//! `/notes` handlers.

use super::{path_ref, ContentsBody, CreateBody, IdBody};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clerk_core::model::timestamp;
use clerk_core::{Note, NoteHeader, NoteRepository, SqliteNoteRepository};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<NoteHeader>>, ApiError> {
    let notes = state
        .with_connection(|conn| Ok(SqliteNoteRepository::try_new(conn)?.list_notes()?))
        .await?;
    Ok(Json(notes))
}

pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let reference = path_ref(&raw_id)?;
    let note = state
        .with_connection(move |conn| Ok(SqliteNoteRepository::try_new(conn)?.get_note(&reference)?))
        .await?;
    Ok(Json(note))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<(StatusCode, Json<IdBody>), ApiError> {
    let Json(body) = body?;
    let id = state
        .with_connection(move |conn| {
            let mut repo = SqliteNoteRepository::try_new(conn)?;
            Ok(repo.add_note(&body.name, &body.contents, timestamp::now())?)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(IdBody { id })))
}

pub async fn append(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<ContentsBody>, JsonRejection>,
) -> Result<Json<IdBody>, ApiError> {
    let reference = path_ref(&raw_id)?;
    let Json(body) = body?;
    let id = state
        .with_connection(move |conn| {
            let mut repo = SqliteNoteRepository::try_new(conn)?;
            Ok(repo.append_note(&reference, &body.contents)?)
        })
        .await?;
    Ok(Json(IdBody { id }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<IdBody>, ApiError> {
    let reference = path_ref(&raw_id)?;
    let id = state
        .with_connection(move |conn| {
            let mut repo = SqliteNoteRepository::try_new(conn)?;
            Ok(repo.delete_note(&reference)?)
        })
        .await?;
    Ok(Json(IdBody { id }))
}
