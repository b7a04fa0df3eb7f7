//! Clipboard Operations
//!
//! Copies rendered HTML to the system clipboard using the arboard crate.
//! Applications that understand the HTML flavor (mail clients, word
//! processors) paste formatted content; everything else gets the markdown
//! source as plain text.

use super::html::{generate_html_document, render_to_html};
use crate::error::Result;
use crate::theme::PreviewColors;
use arboard::Clipboard;
use log::info;

/// Copy the rendered HTML fragment of `markdown` to the clipboard.
///
/// The markdown source itself is set as the plain-text alternative.
///
/// ```ignore
/// copy_html_to_clipboard("# Hello\n\n**Bold** text")?;
/// ```
pub fn copy_html_to_clipboard(markdown: &str) -> Result<()> {
    let html = render_to_html(markdown);

    let mut clipboard = Clipboard::new()?;
    clipboard.set_html(html.as_str(), Some(markdown))?;

    info!("Copied {} bytes of HTML to clipboard", html.len());
    Ok(())
}

/// Copy a standalone, styled HTML page as plain text.
pub fn copy_html_document_to_clipboard(
    markdown: &str,
    title: &str,
    colors: &PreviewColors,
) -> Result<()> {
    let page = generate_html_document(markdown, title, colors);
    copy_text_to_clipboard(&page)?;

    info!("Copied {} byte HTML page to clipboard", page.len());
    Ok(())
}

/// Copy plain text to the clipboard.
pub fn copy_text_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
