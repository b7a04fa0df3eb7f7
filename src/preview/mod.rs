//! The two preview surfaces
//!
//! - `input.rs` - Input Surface: the editable markdown pane, emits `EditEvent`s
//! - `render.rs` - Render Surface: derives and draws the structured document
//! - `blocks.rs` - egui drawing of individual markdown nodes
//!
//! Neither surface owns the document text. Per frame the application asks the
//! Input Surface for an edit, applies it to `DocumentState`, forwards the
//! resulting `TextChanged` to the Render Surface and only then draws the
//! preview.

mod blocks;
mod input;
mod render;

pub use input::{EditEvent, InputSurface};
pub use render::RenderSurface;
