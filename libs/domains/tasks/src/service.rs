use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskFilter, TaskInput, TaskStatus};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task(&self, id: i32) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Every task, ascending id
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list(TaskFilter::default()).await
    }

    /// Tasks whose title contains `title`. Empty matches all.
    #[instrument(skip(self))]
    pub async fn search_by_title(&self, title: String) -> TaskResult<Vec<Task>> {
        self.repository
            .list(TaskFilter {
                title: Some(title),
                ..TaskFilter::default()
            })
            .await
    }

    /// Tasks due on the calendar day of `date`; time of day is ignored.
    #[instrument(skip(self))]
    pub async fn search_by_date(&self, date: NaiveDateTime) -> TaskResult<Vec<Task>> {
        self.repository
            .list(TaskFilter {
                due_on: Some(date.date()),
                ..TaskFilter::default()
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn search_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>> {
        self.repository
            .list(TaskFilter {
                status: Some(status),
                ..TaskFilter::default()
            })
            .await
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: TaskInput) -> TaskResult<Task> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Replace a task. Existence is checked before the date.
    #[instrument(skip(self, input), fields(task_id = id))]
    pub async fn update_task(&self, id: i32, input: TaskInput) -> TaskResult<Task> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(TaskError::NotFound(id));
        }
        input.validate()?;

        self.repository.update(id, input).await
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i32) -> TaskResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sentinel_date;
    use crate::repository::MockTaskRepository;
    use chrono::NaiveDate;
    use mockall::predicate::*;

    fn due(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn task(id: i32, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: Some("d".to_string()),
            due_date: due(2024, 1, 1, 0),
            status: TaskStatus::Pending,
        }
    }

    fn input(title: &str, due_date: NaiveDateTime) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            description: Some("d".to_string()),
            due_date,
            status: TaskStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_get_task_found() {
        let mut mock = MockTaskRepository::new();
        mock.expect_get_by_id()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(Some(task(id, "Test"))));

        let service = TaskService::new(mock);
        let result = service.get_task(1).await.unwrap();
        assert_eq!(result.title, "Test");
    }

    #[tokio::test]
    async fn test_get_task_not_found() {
        let mut mock = MockTaskRepository::new();
        mock.expect_get_by_id().returning(|_| Ok(None));

        let service = TaskService::new(mock);
        let err = service.get_task(99).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_create_task_success() {
        let mut mock = MockTaskRepository::new();
        mock.expect_create()
            .times(1)
            .returning(|input| Ok(task(1, &input.title)));

        let service = TaskService::new(mock);
        let created = service
            .create_task(input("Test", due(2024, 1, 1, 0)))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_create_task_with_sentinel_date_never_writes() {
        let mut mock = MockTaskRepository::new();
        mock.expect_create().times(0);

        let service = TaskService::new(mock);
        let err = service
            .create_task(input("Test", sentinel_date()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_update_checks_existence_before_date() {
        let mut mock = MockTaskRepository::new();
        mock.expect_get_by_id().returning(|_| Ok(None));
        mock.expect_update().times(0);

        let service = TaskService::new(mock);
        let err = service
            .update_task(5, input("x", sentinel_date()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_update_with_sentinel_date_on_existing_task() {
        let mut mock = MockTaskRepository::new();
        mock.expect_get_by_id()
            .returning(|id| Ok(Some(task(id, "old"))));
        mock.expect_update().times(0);

        let service = TaskService::new(mock);
        let err = service
            .update_task(5, input("x", sentinel_date()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_update_task_success() {
        let mut mock = MockTaskRepository::new();
        mock.expect_get_by_id()
            .returning(|id| Ok(Some(task(id, "old"))));
        mock.expect_update()
            .withf(|id, input| *id == 5 && input.title == "new")
            .times(1)
            .returning(|id, input| {
                Ok(Task {
                    id,
                    title: input.title,
                    description: input.description,
                    due_date: input.due_date,
                    status: input.status,
                })
            });

        let service = TaskService::new(mock);
        let updated = service
            .update_task(5, input("new", due(2024, 2, 1, 12)))
            .await
            .unwrap();
        assert_eq!(updated.id, 5);
        assert_eq!(updated.due_date, due(2024, 2, 1, 12));
    }

    #[tokio::test]
    async fn test_delete_task_not_found() {
        let mut mock = MockTaskRepository::new();
        mock.expect_delete().returning(|_| Ok(false));

        let service = TaskService::new(mock);
        let err = service.delete_task(3).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_search_by_date_uses_calendar_day() {
        let mut mock = MockTaskRepository::new();
        mock.expect_list()
            .withf(|f| {
                *f == TaskFilter {
                    due_on: NaiveDate::from_ymd_opt(2024, 1, 1),
                    ..TaskFilter::default()
                }
            })
            .times(1)
            .returning(|_| Ok(vec![task(1, "a")]));

        let service = TaskService::new(mock);
        let tasks = service.search_by_date(due(2024, 1, 1, 23)).await.unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_search_by_title_and_status_build_filters() {
        let mut mock = MockTaskRepository::new();
        mock.expect_list()
            .withf(|f| f.title.as_deref() == Some("rel") && f.status.is_none())
            .times(1)
            .returning(|_| Ok(vec![]));
        mock.expect_list()
            .withf(|f| f.status == Some(TaskStatus::Finished) && f.title.is_none())
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = TaskService::new(mock);
        assert!(service.search_by_title("rel".into()).await.unwrap().is_empty());
        assert!(
            service
                .search_by_status(TaskStatus::Finished)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_list_tasks_has_no_filter() {
        let mut mock = MockTaskRepository::new();
        mock.expect_list()
            .with(eq(TaskFilter::default()))
            .returning(|_| Ok(vec![task(1, "a"), task(2, "b")]));

        let service = TaskService::new(mock);
        assert_eq!(service.list_tasks().await.unwrap().len(), 2);
    }
}
