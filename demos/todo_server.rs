//! Todo service on an in-memory SQLite database.
//!
//! ```sh
//! cargo run --example todo_server
//! curl -X POST localhost:3000/api/v1/todos -H 'content-type: application/json' \
//!      -d '{"title": "Write docs"}'
//! ```

use axum::Router;
use crudbase::{
    BaseService, CrudEntity, DatabaseEntity, DatabaseRepository, WebConfig, crud_openapi,
    crud_router, status_router,
};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ConnectionTrait, Database, Schema};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

mod todo {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "todos")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub title: String,
        pub completed: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Todo {
    #[serde(default)]
    id: Option<i64>,
    title: String,
    #[serde(default)]
    completed: bool,
}

impl PartialEq for Todo {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.completed == other.completed
    }
}

crudbase::impl_has_id!(Todo);

impl CrudEntity for Todo {
    const RESOURCE_NAME_SINGULAR: &'static str = "todo";
    const RESOURCE_NAME_PLURAL: &'static str = "todos";
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .compact()
        .init();

    let db = Database::connect("sqlite::memory:").await?;
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(todo::Entity)))
        .await?;

    let todos = Arc::new(BaseService::new(DatabaseRepository::<Todo>::new(db)));
    let openapi = crud_openapi::<Todo>("/api/v1/todos");
    let cors = WebConfig::from_env().cors_layer()?;

    let app = Router::new()
        .nest("/api/v1/todos", crud_router(todos))
        .route(
            "/api/v1/openapi.json",
            axum::routing::get(move || async move { axum::Json(openapi) }),
        )
        .merge(status_router())
        .layer(cors);

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
