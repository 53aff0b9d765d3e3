//! `shelflife-core` — domain building blocks shared by the shelflife crates.
//!
//! Pure domain primitives only: identifiers, the error model, and the
//! entity/value-object markers. No IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::StockItemId;
pub use value_object::ValueObject;
