//! Route table and request payloads.

mod health;
mod notes;
mod search;
mod tasks;

use crate::error::ApiError;
use crate::state::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use clerk_core::EntityRef;
use serde::{Deserialize, Serialize};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route("/tasks/{id}", put(tasks::edit).delete(tasks::delete))
        .route("/tasks/{id}/complete", post(tasks::complete))
        .route("/notes", get(notes::list).post(notes::create))
        .route(
            "/notes/{id}",
            get(notes::show).put(notes::append).delete(notes::delete),
        )
        .route("/search", get(search::search))
        .with_state(state)
}

/// Body for `POST /tasks` and `POST /notes`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub name: String,
    #[serde(default)]
    pub contents: String,
}

/// Body for `PUT /tasks/{id}` and `PUT /notes/{id}`.
#[derive(Debug, Deserialize)]
pub struct ContentsBody {
    pub contents: String,
}

/// Answer to every mutation.
#[derive(Debug, Serialize)]
pub struct IdBody {
    pub id: i64,
}

/// Path segments are bare ids; names are not addressable over HTTP.
fn path_ref(raw: &str) -> Result<EntityRef, ApiError> {
    raw.parse::<i64>()
        .map(EntityRef::id)
        .map_err(|_| ApiError::bad_request(format!("invalid id `{raw}`")))
}
