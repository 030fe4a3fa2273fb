//! Drawing sessions onto a rendering surface.

pub mod surface;
mod text;
mod views;

pub use surface::{action_fields_id, element_id, RenderSurface};
pub use text::{Element, TextSurface};
pub use views::*;
