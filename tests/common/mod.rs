#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response};
use crudbase::{BaseService, DatabaseRepository, crud_router, status_router};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub mod todo_entity;

use todo_entity::Todo;

pub type TodoService = BaseService<DatabaseRepository<Todo>>;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn todo_service(db: DatabaseConnection) -> TodoService {
    BaseService::new(DatabaseRepository::new(db))
}

pub fn setup_app(service: TodoService) -> Router {
    let api = Router::new().nest("/todos", crud_router(Arc::new(service)));

    Router::new()
        .nest("/api/v1", api)
        .merge(status_router())
}

pub async fn setup_test_app() -> Router {
    let db = setup_test_db()
        .await
        .expect("Failed to setup test database");
    setup_app(todo_service(db))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateTodoTable)]
    }
}

pub struct CreateTodoTable;

impl MigrationName for CreateTodoTable {
    fn name(&self) -> &'static str {
        "m20250101_000001_create_todo_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateTodoTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(TodoTable)
            .if_not_exists()
            .col(
                ColumnDef::new(TodoColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(TodoColumn::Title)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(
                ColumnDef::new(TodoColumn::Completed)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TodoTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum TodoColumn {
    Id,
    Title,
    Completed,
}

impl Iden for TodoColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Title => "title",
                Self::Completed => "completed",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct TodoTable;

impl Iden for TodoTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "todos").unwrap();
    }
}
