//! Workflow definition editor.
//!
//! Edits the triggers and ordered steps of a stored workflow template, keeps a
//! live JSON preview and validation status in sync with every change, and saves
//! the result to the admin backend. A reference backend is included.

pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod errors;
pub mod host;
pub mod render;
pub mod repl;
pub mod utils;
