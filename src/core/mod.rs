//! Core module containing the workflow definition editor
//!
//! This module contains:
//! - The step and definition model with its sparse serialization
//! - Action-specific field lookup and validation
//! - Session storage and the debounced action-field refresh
//! - The editor that ties sessions to a rendering surface and the backend

pub mod action_fields;
mod debounce;
pub mod definition;
mod editor;
pub mod session;
pub mod step;
pub mod template;
pub mod validation;

pub use debounce::Debouncer;
pub use definition::*;
pub use editor::*;
pub use session::*;
pub use step::*;
pub use template::*;
pub use validation::*;
