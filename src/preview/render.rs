//! Render Surface: the live preview pane
//!
//! Holds the structured document derived from `DocumentState`, tagged with
//! the revision it was derived from. A `TextChanged` notification triggers a
//! re-derive; any access with a mismatched revision re-derives first, so the
//! drawn preview always matches the current text.
//!
//! A surface is meant to follow a single `DocumentState` for its lifetime.

use super::blocks::{render_document, RenderContext};
use crate::markdown::{parse_markdown_with_options, MarkdownDocument, MarkdownOptions};
use crate::state::{DocumentState, TextChanged};
use crate::theme::PreviewColors;
use eframe::egui::{RichText, ScrollArea, Ui};
use log::debug;

/// The rendered preview pane.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    options: MarkdownOptions,
    document: MarkdownDocument,
    /// Revision `document` was derived from; `None` before the first derive
    rendered_revision: Option<u64>,
}

impl RenderSurface {
    pub fn new(options: MarkdownOptions) -> Self {
        Self {
            options,
            document: MarkdownDocument::empty(),
            rendered_revision: None,
        }
    }

    /// Handle a "text changed" notification from the owner.
    pub fn on_text_changed(&mut self, state: &DocumentState, change: TextChanged) {
        if change.revision != state.revision() {
            debug!(
                "Notification for revision {} but document is at {}",
                change.revision,
                state.revision()
            );
        }
        self.rederive(state);
    }

    /// The structured document for the current text, re-deriving if stale.
    pub fn document(&mut self, state: &DocumentState) -> &MarkdownDocument {
        if !self.is_current(state) {
            self.rederive(state);
        }
        &self.document
    }

    /// Whether the held document was derived from the current revision.
    pub fn is_current(&self, state: &DocumentState) -> bool {
        self.rendered_revision == Some(state.revision())
    }

    fn rederive(&mut self, state: &DocumentState) {
        self.document = parse_markdown_with_options(state.text(), &self.options);
        self.rendered_revision = Some(state.revision());
        debug!(
            "Preview re-derived at revision {} ({} bytes, {} blocks)",
            state.revision(),
            state.text().len(),
            self.document.blocks().len()
        );
    }

    /// Draw the preview for the current text.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        state: &DocumentState,
        colors: &PreviewColors,
        font_size: f32,
    ) {
        let document = self.document(state);

        ScrollArea::vertical()
            .id_source("markdown_preview_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if document.is_empty() {
                    ui.label(
                        RichText::new("Nothing to preview")
                            .italics()
                            .size(font_size)
                            .color(colors.muted),
                    );
                } else {
                    render_document(ui, document, RenderContext::new(colors, font_size));
                }
            });
    }
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
