//! HTTP handlers for entity CRUD and nested collections.

pub mod entity;
pub mod nested;
pub use entity::{create, delete, list, read, update};
pub use nested::*;
