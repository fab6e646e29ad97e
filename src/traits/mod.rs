//! Trait definitions for Outseta operations.
//!
//! Each entity type implements the traits its endpoints support; anything
//! that doesn't fit the uniform CRUD shape is an inherent method on the
//! model instead.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::{List, DEFAULT_PAGE_SIZE};
pub use update::Update;
