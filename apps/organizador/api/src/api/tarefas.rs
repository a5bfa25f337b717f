use axum::Router;
use domain_tasks::{PgTaskRepository, TaskService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository =
        PgTaskRepository::new(state.db.clone()).with_title_match(state.config.title_match);
    let service = TaskService::new(repository);
    handlers::router(service)
}
