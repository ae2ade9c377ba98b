//! # crudkit-core — shared primitives for the crudkit data layer
//!
//! This crate holds the pieces every crudkit backend needs but none owns:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CrudError`] | Error taxonomy returned by the CRUD façade |
//! | [`CrudAuthorizer`] | Per-capability authorization checks (`can_create`, `can_list`, ...) |
//! | [`AllowAll`] | Default authorizer that permits every action |
//! | [`Decision`] | Allow/deny outcome with an optional reason |
//! | [`FieldError`] | A single field-level validation failure |
//!
//! The HTTP layer is deliberately absent: `CrudError` variants are named after
//! the status classes a caller would map them to, but this crate never builds
//! a response.

pub mod auth;
pub mod error;
pub mod validation;

pub use auth::{AllowAll, CrudAction, CrudAuthorizer, Decision};
pub use error::CrudError;
pub use validation::FieldError;

pub mod prelude {
    //! Re-exports of the most commonly used core types.
    pub use crate::{AllowAll, CrudAction, CrudAuthorizer, CrudError, Decision, FieldError};
}
