//! In-memory repository and request helpers shared by the handler tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use domain_tasks::*;
use http_body_util::BodyExt;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Store {
    next_id: i32,
    rows: BTreeMap<i32, Task>,
}

/// `TaskRepository` over a map, with the same filter semantics as the
/// PostgreSQL repository (case-sensitive title match).
#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryTaskRepository {
    pub fn len(&self) -> usize {
        self.store.lock().unwrap().rows.len()
    }

    pub fn insert(&self, input: TaskInput) -> Task {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let task = Task {
            id: store.next_id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: input.status,
        };
        store.rows.insert(task.id, task.clone());
        task
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: TaskInput) -> TaskResult<Task> {
        Ok(self.insert(input))
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        Ok(self.store.lock().unwrap().rows.get(&id).cloned())
    }

    async fn list(&self, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .rows
            .values()
            .filter(|t| filter.title.as_ref().is_none_or(|q| t.title.contains(q.as_str())))
            .filter(|t| filter.due_on.is_none_or(|d| t.due_date.date() == d))
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, input: TaskInput) -> TaskResult<Task> {
        let mut store = self.store.lock().unwrap();
        let row = store.rows.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        row.title = input.title;
        row.description = input.description;
        row.due_date = input.due_date;
        row.status = input.status;
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        Ok(self.store.lock().unwrap().rows.remove(&id).is_some())
    }
}

/// The task routes mounted the way the API binary mounts them.
pub fn app(repo: InMemoryTaskRepository) -> Router {
    Router::new().nest("/Tarefa", handlers::router(TaskService::new(repo)))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn raw_body(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}
