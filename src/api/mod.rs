//! Reference backend exposing the admin workflow routes

pub mod errors;
pub mod handlers;
pub mod routes;
pub mod server;
mod store;

pub use store::{StoreError, WorkflowStore, WorkflowUpdate};
