//! # crudkit-data-sqlx — SQLx backend for the crudkit data layer
//!
//! This crate provides the [SQLx](https://github.com/launchbadge/sqlx)-specific
//! pieces of crudkit. It depends on [`crudkit-data`] for the query model and
//! adds the search executor, the CRUD service façade, and the error bridging
//! needed to talk to a real database.
//!
//! # What's in this crate
//!
//! | Item | Description |
//! |------|-------------|
//! | [`search`] | Paginated search executor: `FindQuery` + `Pool<DB>` → `(entities, total)` |
//! | [`CrudService`] | Façade wiring authorization, DTO validation, translation, search fallback, and next-page computation |
//! | [`SqlxErrorExt`] | Extension trait to convert `sqlx::Error` → `DataError` (`.into_data_error()`, `.into_search_error()`) |
//!
//! # Feature flags
//!
//! Enable exactly one database driver:
//!
//! | Feature    | Driver |
//! |------------|--------|
//! | `sqlite`   | SQLite via `sqlx/sqlite` |
//! | `postgres` | PostgreSQL via `sqlx/postgres` |
//! | `mysql`    | MySQL via `sqlx/mysql` |
//!
//! # Quick start
//!
//! ```toml
//! [dependencies]
//! crudkit-data-sqlx = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! ```ignore
//! use crudkit_data_sqlx::{search, CrudService};
//! use crudkit_data::FindQuery;
//!
//! // Run a one-off search with an explicit pool:
//! let query = FindQuery::from_params([("where", r#"{"name":{"like":"an"}}"#)])?;
//! let (people, total) = search::<Person, Sqlite>(&pool, &query).await?;
//!
//! // Or stand up the full façade:
//! let service: CrudService<Person, Sqlite, PersonRepo, CreatePerson, UpdatePerson> =
//!     CrudService::new(pool.clone(), PersonRepo::new(pool));
//! let page = service.find_all([("take", "5")]).await?;
//! assert_eq!(page.total, 12);
//! ```
//!
//! # Error surface
//!
//! The executor collapses every build or store failure into the single
//! opaque `DataError::QueryGeneration` — callers get "query generation
//! failed", never field-level detail. The façade's `find_all` additionally
//! retries a failed search with the default descriptor, so a bad field path
//! degrades to an unfiltered first page instead of an error response.

pub mod error;
pub mod search;
pub mod service;

pub use error::SqlxErrorExt;
pub use search::{dialect_for, search};
pub use service::CrudService;

/// Re-exports of the most commonly used types from `crudkit-data` and this crate.
pub mod prelude {
    pub use crate::{search, CrudService, SqlxErrorExt};
    pub use crudkit_core::prelude::*;
    pub use crudkit_data::prelude::*;
}
