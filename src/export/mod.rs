//! HTML Export for Markview
//!
//! - `html.rs` - comrak HTML rendering, bare fragment or themed standalone page
//! - `clipboard.rs` - putting that HTML on the system clipboard

pub mod clipboard;
pub mod html;

pub use clipboard::{copy_html_document_to_clipboard, copy_html_to_clipboard};
