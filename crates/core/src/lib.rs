//! `abal-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod date;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use date::CalendarDate;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{EntryId, UserId};
pub use value_object::ValueObject;
