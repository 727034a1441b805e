//! Generic CRUD scaffolding for REST services built on Axum and Sea-ORM.
//!
//! An entity implements [`HasId`] and [`CrudEntity`], a [`Repository`] stores
//! it, a [`CrudService`] applies the create/read/update/delete rules, and
//! [`crud_router`] exposes the service over HTTP. Every payload travels in an
//! [`ApiResponse`] envelope and every failure is an [`ApiError`].

pub mod config;
pub mod entity;
pub mod errors;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod status;

pub use config::WebConfig;
pub use entity::{CrudEntity, HasId};
pub use errors::{ApiError, ConfigError};
pub use openapi::crud_openapi;
pub use repository::{DatabaseEntity, DatabaseRepository, InMemoryRepository, Repository};
pub use response::{ApiResponse, ErrorDetail, Status};
pub use routes::crud_router;
pub use service::{BaseService, CrudService, Operation};
pub use status::status_router;
