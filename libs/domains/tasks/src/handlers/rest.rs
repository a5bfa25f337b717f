use axum::{
    Json,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use axum_helpers::{IdPath, JsonBody, QueryParams};
use std::sync::Arc;

use crate::error::TaskResult;
use crate::models::{DateQuery, StatusQuery, Task, TaskInput, TitleQuery};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Tarefa",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Invalid task ID"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
) -> TaskResult<Json<Task>> {
    let task = service.get_task(id).await?;
    Ok(Json(task))
}

/// List every task
#[utoipa::path(
    get,
    path = "/ObterTodos",
    tag = "Tarefa",
    responses(
        (status = 200, description = "All tasks, ascending id", body = Vec<Task>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.list_tasks().await?;
    Ok(Json(tasks))
}

/// Tasks whose title contains a substring
#[utoipa::path(
    get,
    path = "/ObterPorTitulo",
    tag = "Tarefa",
    params(TitleQuery),
    responses(
        (status = 200, description = "Matching tasks", body = Vec<Task>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_by_title<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    QueryParams(query): QueryParams<TitleQuery>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.search_by_title(query.titulo).await?;
    Ok(Json(tasks))
}

/// Tasks due on a calendar day
#[utoipa::path(
    get,
    path = "/ObterPorData",
    tag = "Tarefa",
    params(DateQuery),
    responses(
        (status = 200, description = "Tasks due that day", body = Vec<Task>),
        (status = 400, description = "Unparseable date"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_by_date<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    QueryParams(query): QueryParams<DateQuery>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.search_by_date(query.data).await?;
    Ok(Json(tasks))
}

/// Tasks with a given status
#[utoipa::path(
    get,
    path = "/ObterPorStatus",
    tag = "Tarefa",
    params(StatusQuery),
    responses(
        (status = 200, description = "Tasks with that status", body = Vec<Task>),
        (status = 400, description = "Unknown status"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_by_status<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    QueryParams(query): QueryParams<StatusQuery>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.search_by_status(query.status).await?;
    Ok(Json(tasks))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "Tarefa",
    request_body = TaskInput,
    responses(
        (status = 201, description = "Task created successfully", body = Task,
            headers(("Location" = String, description = "URL of the new task"))),
        (status = 400, description = "Missing due date or malformed body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<TaskInput>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), task.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(task),
    ))
}

/// Replace a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Tarefa",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    request_body = TaskInput,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Missing due date or malformed body"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<TaskInput>,
) -> TaskResult<Json<Task>> {
    let task = service.update_task(id, input).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Tarefa",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 400, description = "Invalid task ID"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
) -> TaskResult<StatusCode> {
    service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
