use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Select,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{Task, TaskFilter, TaskInput, TitleMatch},
    repository::TaskRepository,
};

const LIKE_ESCAPE: char = '\\';

pub struct PgTaskRepository {
    db: DatabaseConnection,
    title_match: TitleMatch,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            title_match: TitleMatch::default(),
        }
    }

    pub fn with_title_match(mut self, title_match: TitleMatch) -> Self {
        self.title_match = title_match;
        self
    }

    fn filtered(&self, filter: TaskFilter) -> Select<entity::Entity> {
        let mut query = entity::Entity::find();

        if let Some(title) = filter.title.filter(|t| !t.is_empty()) {
            query = match self.title_match {
                TitleMatch::CaseSensitive => {
                    query.filter(entity::Column::Titulo.like(contains_pattern(&title)))
                }
                TitleMatch::CaseInsensitive => query.filter(
                    Expr::expr(Func::lower(Expr::col(entity::Column::Titulo)))
                        .like(contains_pattern(&title.to_lowercase())),
                ),
            };
        }

        if let Some(day) = filter.due_on {
            let (start, end) = day_bounds(day);
            query = query.filter(entity::Column::Data.gte(start));
            if let Some(end) = end {
                query = query.filter(entity::Column::Data.lt(end));
            }
        }

        if let Some(status) = filter.status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        query.order_by_asc(entity::Column::Id)
    }
}

/// `%`, `_` and the escape character itself match literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn contains_pattern(raw: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(raw))).escape(LIKE_ESCAPE)
}

/// `[day 00:00, next day 00:00)`; no upper bound on the last representable day.
fn day_bounds(day: NaiveDate) -> (NaiveDateTime, Option<NaiveDateTime>) {
    let start = day.and_time(NaiveTime::MIN);
    let end = day.succ_opt().map(|next| next.and_time(NaiveTime::MIN));
    (start, end)
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: TaskInput) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        let models = self.filtered(filter).all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: TaskInput) -> TaskResult<Task> {
        let model = entity::ActiveModel::replacing(id, input)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => TaskError::NotFound(id),
                other => other.into(),
            })?;

        tracing::info!(task_id = id, "Updated task");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn row(id: i32, titulo: &str, status: TaskStatus) -> entity::Model {
        entity::Model {
            id,
            titulo: titulo.to_string(),
            descricao: None,
            data: at(2024, 1, 1, 9),
            status,
        }
    }

    fn input(titulo: &str) -> TaskInput {
        TaskInput {
            title: titulo.to_string(),
            description: Some("d".to_string()),
            due_date: at(2024, 1, 1, 0),
            status: TaskStatus::Pending,
        }
    }

    fn logged_sql(repo: PgTaskRepository) -> String {
        format!("{:?}", repo.db.into_transaction_log())
    }

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\tmp"), "c:\\\\tmp");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_day_bounds_is_half_open() {
        let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(start, at(2024, 2, 29, 0));
        assert_eq!(end, Some(at(2024, 3, 1, 0)));

        let (_, end) = day_bounds(NaiveDate::MAX);
        assert_eq!(end, None);
    }

    #[tokio::test]
    async fn test_create_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entity::Model {
                descricao: Some("d".to_string()),
                data: at(2024, 1, 1, 0),
                ..row(1, "Test", TaskStatus::Pending)
            }]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let task = repo.create(input("Test")).await.unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Test");
        assert_eq!(task.description.as_deref(), Some("d"));
        assert!(logged_sql(repo).contains("INSERT INTO"));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                row(1, "a", TaskStatus::Pending),
                row(2, "b", TaskStatus::Finished),
            ]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let tasks = repo.list(TaskFilter::default()).await.unwrap();
        assert_eq!(tasks.len(), 2);

        let sql = logged_sql(repo);
        assert!(sql.contains("ORDER BY"));
        assert!(!sql.contains("WHERE"));
    }

    #[tokio::test]
    async fn test_title_filter_case_sensitive_uses_plain_like() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(3, "Relatório 50%", TaskStatus::Pending)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let filter = TaskFilter {
            title: Some("50%".to_string()),
            ..TaskFilter::default()
        };
        let tasks = repo.list(filter).await.unwrap();
        assert_eq!(tasks[0].id, 3);

        let sql = logged_sql(repo);
        assert!(sql.contains("LIKE"));
        assert!(sql.contains("ESCAPE"));
        assert!(!sql.contains("LOWER"));
    }

    #[tokio::test]
    async fn test_title_filter_case_insensitive_lowers_both_sides() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db).with_title_match(TitleMatch::CaseInsensitive);

        let filter = TaskFilter {
            title: Some("RELAT".to_string()),
            ..TaskFilter::default()
        };
        repo.list(filter).await.unwrap();

        let sql = logged_sql(repo);
        assert!(sql.contains("LOWER"));
        assert!(sql.contains("%relat%"));
    }

    #[tokio::test]
    async fn test_empty_title_adds_no_condition() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let filter = TaskFilter {
            title: Some(String::new()),
            ..TaskFilter::default()
        };
        repo.list(filter).await.unwrap();

        assert!(!logged_sql(repo).contains("LIKE"));
    }

    #[tokio::test]
    async fn test_date_and_status_filters_are_combined() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(5, "x", TaskStatus::Finished)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let filter = TaskFilter {
            due_on: NaiveDate::from_ymd_opt(2024, 1, 1),
            status: Some(TaskStatus::Finished),
            ..TaskFilter::default()
        };
        let tasks = repo.list(filter).await.unwrap();
        assert_eq!(tasks[0].status, TaskStatus::Finished);

        let sql = logged_sql(repo);
        assert!(sql.contains(">="));
        assert!(sql.contains(" < "));
        assert!(sql.contains("Int(Some(1))"));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let err = repo.update(9, input("x")).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_update_returns_replaced_row() {
        let updated = entity::Model {
            titulo: "novo".to_string(),
            ..row(4, "velho", TaskStatus::Finished)
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![updated]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let task = repo.update(4, input("novo")).await.unwrap();
        assert_eq!(task.id, 4);
        assert_eq!(task.title, "novo");
        assert!(logged_sql(repo).contains("UPDATE"));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_database_failure_maps_to_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let err = repo.list(TaskFilter::default()).await.unwrap_err();
        assert!(matches!(err, TaskError::Database(_)));
    }
}
