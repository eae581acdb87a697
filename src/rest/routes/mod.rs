//! Route handlers for the REST API.

pub mod folder;
pub mod health;
pub mod project;
