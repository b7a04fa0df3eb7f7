//! Input Surface: the raw markdown editor pane
//!
//! The surface holds no copy of the document. Each frame it seeds a scratch
//! buffer from `DocumentState`, lets the `TextEdit` mutate that buffer, and
//! reports the whole new text as an [`EditEvent`] if it changed. The owner
//! then applies the event through [`InputSurface::apply_edit`].

use crate::state::{DocumentState, TextChanged};
use eframe::egui::{self, FontId, ScrollArea, TextEdit, Ui};
use log::debug;

/// A user edit, carrying the full new content of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    pub text: String,
}

/// The editable text pane.
#[derive(Debug, Clone)]
pub struct InputSurface {
    id: egui::Id,
}

impl InputSurface {
    pub fn new() -> Self {
        Self {
            id: egui::Id::new("markdown_input"),
        }
    }

    /// Replace the document with exactly the edited text.
    ///
    /// Any string is accepted, including the empty one. Returns the change
    /// notification for the Render Surface, or `None` if nothing changed.
    pub fn apply_edit(state: &mut DocumentState, event: EditEvent) -> Option<TextChanged> {
        state.set_text(event.text)
    }

    /// Draw the editor and return an event if the user changed the text.
    pub fn show(
        &self,
        ui: &mut Ui,
        state: &DocumentState,
        font_size: f32,
        word_wrap: bool,
    ) -> Option<EditEvent> {
        let mut buffer = state.text().to_owned();

        let mut layouter = move |ui: &Ui, text: &str, wrap_width: f32| {
            let font_id = FontId::monospace(font_size);
            let layout_job = if word_wrap {
                egui::text::LayoutJob::simple(
                    text.to_owned(),
                    font_id,
                    ui.visuals().text_color(),
                    wrap_width,
                )
            } else {
                egui::text::LayoutJob::simple_singleline(
                    text.to_owned(),
                    font_id,
                    ui.visuals().text_color(),
                )
            };
            ui.fonts(|f| f.layout_job(layout_job))
        };

        let output = ScrollArea::vertical()
            .id_source(self.id.with("scroll"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                TextEdit::multiline(&mut buffer)
                    .id(self.id)
                    .code_editor()
                    .frame(false)
                    .font(FontId::monospace(font_size))
                    .desired_width(f32::INFINITY)
                    .desired_rows(20)
                    .layouter(&mut layouter)
                    .show(ui)
            })
            .inner;

        if output.response.changed() && buffer != state.text() {
            debug!("Input surface edited, {} bytes", buffer.len());
            Some(EditEvent { text: buffer })
        } else {
            None
        }
    }
}

impl Default for InputSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{CentralPanel, Context, RawInput};

    #[test]
    fn test_apply_edit_replaces_whole_text() {
        let mut state = DocumentState::new("old");
        let change = InputSurface::apply_edit(
            &mut state,
            EditEvent {
                text: "# New".to_string(),
            },
        );
        assert_eq!(state.text(), "# New");
        assert_eq!(change, Some(TextChanged { revision: 1 }));
    }

    #[test]
    fn test_apply_edit_accepts_empty_text() {
        let mut state = DocumentState::with_sample();
        let change = InputSurface::apply_edit(&mut state, EditEvent { text: String::new() });
        assert_eq!(state.text(), "");
        assert!(change.is_some());
    }

    #[test]
    fn test_apply_identical_edit_is_noop() {
        let mut state = DocumentState::new("same");
        let change = InputSurface::apply_edit(
            &mut state,
            EditEvent {
                text: "same".to_string(),
            },
        );
        assert_eq!(change, None);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_show_without_input_emits_nothing() {
        let state = DocumentState::with_sample();
        let surface = InputSurface::new();
        let ctx = Context::default();
        let mut event = None;
        for word_wrap in [true, false] {
            let _ = ctx.run(RawInput::default(), |ctx| {
                CentralPanel::default().show(ctx, |ui| {
                    event = surface.show(ui, &state, 14.0, word_wrap);
                });
            });
            assert_eq!(event, None);
        }
    }
}
