use crudbase::{CrudEntity, DatabaseEntity};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

pub mod todo {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "todos")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub title: String,
        pub completed: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    pub fn new(title: &str, completed: bool) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            completed,
        }
    }
}

// Value equality ignores the key.
impl PartialEq for Todo {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.completed == other.completed
    }
}

crudbase::impl_has_id!(Todo);

impl CrudEntity for Todo {
    const RESOURCE_NAME_SINGULAR: &'static str = "Todo";
    const RESOURCE_NAME_PLURAL: &'static str = "Todos";
    const RESOURCE_DESCRIPTION: &'static str = "Things to do";
}

impl DatabaseEntity for Todo {
    type Entity = todo::Entity;
    type Model = todo::Model;
    type Column = todo::Column;
    type ActiveModel = todo::ActiveModel;

    const ID_COLUMN: todo::Column = todo::Column::Id;

    fn from_model(model: todo::Model) -> Self {
        Self {
            id: Some(model.id),
            title: model.title,
            completed: model.completed,
        }
    }

    fn to_active_model(self) -> todo::ActiveModel {
        todo::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            title: Set(self.title),
            completed: Set(self.completed),
        }
    }
}
