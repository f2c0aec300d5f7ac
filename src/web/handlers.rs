use axum::Json;
use axum::extract::State;

use super::AppState;
use super::errors::{AppError, TODO_ID_NOT_FOUND, TODO_NOT_FOUND};
use super::extract::{TodoId, ValidJson};
use crate::models::{Deleted, ErrorDetail, Greeting, Todo, TodoInput};

/// Liveness payload.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = Greeting))
)]
pub async fn root() -> Json<Greeting> {
    Json(Greeting::WORLD)
}

/// List every todo.
#[utoipa::path(
    get,
    path = "/todos/",
    responses((status = 200, description = "All todos", body = [Todo]))
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = state.store.run(|session| session.list_todos()).await?;
    Ok(Json(todos))
}

/// Create a todo.
#[utoipa::path(
    post,
    path = "/todos/",
    request_body = TodoInput,
    responses(
        (status = 200, description = "Created todo", body = Todo),
        (status = 422, description = "Invalid body", body = ErrorDetail)
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<TodoInput>,
) -> Result<Json<Todo>, AppError> {
    let todo = state
        .store
        .run(move |session| {
            let todo = session.insert_todo(&input.content)?;
            session.commit()?;
            Ok(todo)
        })
        .await?;
    tracing::info!(todo_id = todo.id, "todo created");
    Ok(Json(todo))
}

/// Fetch one todo.
#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    params(("todo_id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo", body = Todo),
        (status = 404, description = "No such todo", body = ErrorDetail)
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, AppError> {
    state
        .store
        .run(move |session| session.get_todo(id))
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(TODO_NOT_FOUND))
}

/// Overwrite a todo's content.
#[utoipa::path(
    patch,
    path = "/todos/{todo_id}",
    params(("todo_id" = i64, Path, description = "Todo id")),
    request_body = TodoInput,
    responses(
        (status = 200, description = "Updated todo", body = Todo),
        (status = 404, description = "No such todo", body = ErrorDetail),
        (status = 422, description = "Invalid body or id", body = ErrorDetail)
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    ValidJson(input): ValidJson<TodoInput>,
) -> Result<Json<Todo>, AppError> {
    let updated = state
        .store
        .run(move |session| {
            let Some(todo) = session.update_todo(id, &input.content)? else {
                return Ok(None);
            };
            session.commit()?;
            Ok(Some(todo))
        })
        .await?;
    tracing::debug!(todo_id = id, row = ?updated, "patch lookup");

    let todo = updated.ok_or(AppError::NotFound(TODO_NOT_FOUND))?;
    tracing::info!(todo_id = id, "todo updated");
    Ok(Json(todo))
}

/// Delete a todo.
#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    params(("todo_id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo removed", body = Deleted),
        (status = 404, description = "No such todo", body = ErrorDetail)
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<Deleted>, AppError> {
    let removed = state
        .store
        .run(move |session| {
            if !session.delete_todo(id)? {
                return Ok(false);
            }
            session.commit()?;
            Ok(true)
        })
        .await?;

    if !removed {
        return Err(AppError::NotFound(TODO_ID_NOT_FOUND));
    }
    tracing::info!(todo_id = id, "todo deleted");
    Ok(Json(Deleted::OK))
}
