mod rest;

use axum::{Router, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Task, TaskInput};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the task resource.
///
/// Paths are relative; the app nests them under `/Tarefa`.
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::get_task,
        rest::list_tasks,
        rest::search_by_title,
        rest::search_by_date,
        rest::search_by_status,
        rest::create_task,
        rest::update_task,
        rest::delete_task,
    ),
    components(
        schemas(Task, TaskInput)
    ),
    tags(
        (name = "Tarefa", description = "Task CRUD and searches")
    )
)]
pub struct TasksApiDoc;

/// Task routes, to be nested under `/Tarefa`.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", axum::routing::post(rest::create_task))
        .route("/ObterTodos", get(rest::list_tasks))
        .route("/ObterPorTitulo", get(rest::search_by_title))
        .route("/ObterPorData", get(rest::search_by_date))
        .route("/ObterPorStatus", get(rest::search_by_status))
        .route(
            "/{id}",
            get(rest::get_task)
                .put(rest::update_task)
                .delete(rest::delete_task),
        )
        .with_state(shared_service)
}
