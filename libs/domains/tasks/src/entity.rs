use crate::models::{Task, TaskInput, TaskStatus};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the `tarefas` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tarefas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub titulo: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub descricao: Option<String>,
    pub data: DateTime,
    pub status: TaskStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.titulo,
            description: model.descricao,
            due_date: model.data,
            status: model.status,
        }
    }
}

// Insert: the id comes from the serial column
impl From<TaskInput> for ActiveModel {
    fn from(input: TaskInput) -> Self {
        ActiveModel {
            id: NotSet,
            titulo: Set(input.title),
            descricao: Set(input.description),
            data: Set(input.due_date),
            status: Set(input.status),
        }
    }
}

impl ActiveModel {
    /// Full replacement of the mutable columns of row `id`.
    pub fn replacing(id: i32, input: TaskInput) -> Self {
        ActiveModel {
            id: Set(id),
            ..Self::from(input)
        }
    }
}
