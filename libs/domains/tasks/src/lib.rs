//! Tasks Domain
//!
//! Everything the task resource needs, from the table mapping to the HTTP
//! handlers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /Tarefa routes, OpenAPI
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Service   │  ← Due-date validation, existence checks
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL)
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, status enum
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PgTaskRepository, TaskService, TitleMatch};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgTaskRepository::new(db).with_title_match(TitleMatch::CaseInsensitive);
//! let service = TaskService::new(repository);
//! let routes = axum::Router::new().nest("/Tarefa", domain_tasks::handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{TaskError, TaskResult};
pub use handlers::TasksApiDoc;
pub use models::{Task, TaskFilter, TaskInput, TaskStatus, TitleMatch, sentinel_date};
pub use postgres::PgTaskRepository;
pub use repository::TaskRepository;
pub use service::TaskService;
