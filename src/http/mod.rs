//! HTTP transport: maps the `/users` routes onto a [`UserRepository`].
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /users`: every user, in stored order.
//! - `POST /users`: create; `201` with the stored record.
//! - `GET /users/:id`: one user.
//! - `PUT /users/:id`: replace name, email and address.
//! - `DELETE /users/:id`: remove; `{ "message": "User deleted successfully" }`.
//! - `GET /health`: `{ "ok": true }`.
//!
//! Failures answer `{ "error": ... }` with 400, 404 or 500.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use user_store::{http, JsonFileStore, UserRepository};
//!
//! let repo = Arc::new(UserRepository::new(JsonFileStore::new("data/users.json")));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(repo.clone());
//!
//! // Or serve directly
//! http::serve(repo, "0.0.0.0:3000").await?;
//! ```

mod response;

pub use response::{ApiError, Operation};

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::repository::{UserError, UserRepository};
use crate::store::RecordStore;
use crate::user::User;

type Repo<S> = Arc<UserRepository<S>>;

/// Build an axum `Router` serving the given repository.
pub fn router<S>(repo: Repo<S>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/users",
            get(list_users::<S>).post(create_user::<S>),
        )
        .route(
            "/users/:id",
            get(get_user::<S>)
                .put(update_user::<S>)
                .delete(delete_user::<S>),
        )
        .fallback(fallback)
        .with_state(repo)
}

/// Serve the repository over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S>(repo: Repo<S>, addr: &str) -> Result<(), std::io::Error>
where
    S: RecordStore + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, "listening");
    axum::serve(listener, router(repo)).await
}

async fn index() -> Html<&'static str> {
    Html("<h1>Hello World</h1>")
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn fallback() -> ApiError {
    ApiError::not_found("Not found")
}

/// `GET /users`
async fn list_users<S>(State(repo): State<Repo<S>>) -> Result<Json<Vec<User>>, ApiError>
where
    S: RecordStore + 'static,
{
    let users = blocking(repo, |repo| repo.list())
        .await
        .map_err(|e| Operation::List.error(e))?;
    Ok(Json(users))
}

/// `POST /users`
async fn create_user<S>(
    State(repo): State<Repo<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError>
where
    S: RecordStore + 'static,
{
    let Json(payload) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let user = blocking(repo, move |repo| repo.create(&payload))
        .await
        .map_err(|e| Operation::Create.error(e))?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/:id`
async fn get_user<S>(
    State(repo): State<Repo<S>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError>
where
    S: RecordStore + 'static,
{
    let id = parse_id(&id);
    let user = blocking(repo, move |repo| repo.get(id))
        .await
        .map_err(|e| Operation::Get.error(e))?;
    Ok(Json(user))
}

/// `PUT /users/:id`
async fn update_user<S>(
    State(repo): State<Repo<S>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, ApiError>
where
    S: RecordStore + 'static,
{
    let Json(payload) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let id = parse_id(&id);
    let user = blocking(repo, move |repo| repo.update(id, &payload))
        .await
        .map_err(|e| Operation::Update.error(e))?;
    Ok(Json(user))
}

/// `DELETE /users/:id`
async fn delete_user<S>(
    State(repo): State<Repo<S>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
    S: RecordStore + 'static,
{
    let id = parse_id(&id);
    blocking(repo, move |repo| repo.delete(id))
        .await
        .map_err(|e| Operation::Delete.error(e))?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

/// Leading decimal digits of the segment (after optional whitespace and
/// `+`), so `12abc` addresses user 12. Anything without a usable positive
/// prefix maps to 0, which matches no user.
fn parse_id(raw: &str) -> u64 {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().unwrap_or(0)
}

/// Repository calls block on file I/O and on the guard, so they run on the
/// blocking pool rather than on a runtime worker.
async fn blocking<S, T, F>(repo: Repo<S>, op: F) -> Result<T, UserError>
where
    S: RecordStore + 'static,
    T: Send + 'static,
    F: FnOnce(&UserRepository<S>) -> Result<T, UserError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&repo))
        .await
        .map_err(|e| UserError::Internal(e.to_string()))?
}
