//! `/tasks` handlers.

use super::{path_ref, ContentsBody, CreateBody, IdBody};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clerk_core::model::timestamp;
use clerk_core::{SqliteTaskRepository, Task, TaskRepository};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .with_connection(|conn| Ok(SqliteTaskRepository::try_new(conn)?.list_tasks()?))
        .await?;
    Ok(Json(tasks))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<(StatusCode, Json<IdBody>), ApiError> {
    let Json(body) = body?;
    let id = state
        .with_connection(move |conn| {
            let repo = SqliteTaskRepository::try_new(conn)?;
            Ok(repo.add_task(&body.name, &body.contents, timestamp::now())?)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(IdBody { id })))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<ContentsBody>, JsonRejection>,
) -> Result<Json<IdBody>, ApiError> {
    let reference = path_ref(&raw_id)?;
    let Json(body) = body?;
    let id = state
        .with_connection(move |conn| {
            let repo = SqliteTaskRepository::try_new(conn)?;
            Ok(repo.edit_task(&reference, &body.contents)?)
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
            Ok(SqliteTaskRepository::try_new(conn)?.delete_task(&reference)?)
        })
        .await?;
    Ok(Json(IdBody { id }))
}

pub async fn complete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<IdBody>, ApiError> {
    let reference = path_ref(&raw_id)?;
    let id = state
        .with_connection(move |conn| {
            let repo = SqliteTaskRepository::try_new(conn)?;
            Ok(repo.complete_task(&reference, timestamp::now())?)
        })
        .await?;
    Ok(Json(IdBody { id }))
}
