use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Organizador API",
        version = "0.1.0",
        description = "Task management: create, read, update, delete and search tasks"
    ),
    nest(
        (path = "/Tarefa", api = domain_tasks::TasksApiDoc)
    )
)]
pub struct ApiDoc;
