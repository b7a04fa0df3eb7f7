//! Main application module for Markview
//!
//! Implements the eframe App trait: owns the document text and the user
//! settings, lays the Input and Render surfaces out side by side, and routes
//! edit notifications between them.

use crate::config::{save_config_silent, Settings, WindowSize};
use crate::export::{copy_html_document_to_clipboard, copy_html_to_clipboard};
use crate::markdown::{MarkdownNode, MarkdownNodeType};
use crate::preview::{EditEvent, InputSurface, RenderSurface};
use crate::state::{DocumentState, TextChanged, Toast, SAMPLE_MARKDOWN};
use crate::stats::TextStats;
use crate::theme::{PreviewColors, ThemeManager};
use eframe::egui;
use log::{debug, info, warn};

/// Title used for copied HTML pages when the document has no heading.
const DEFAULT_DOCUMENT_TITLE: &str = "Markview document";

/// How long status bar messages stay visible, in seconds.
const TOAST_DURATION: f64 = 2.0;

/// Keyboard shortcut actions.
///
/// Detected inside the input closure and executed afterwards to avoid
/// borrow conflicts with the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyboardAction {
    /// Cycle theme (Ctrl+Shift+T)
    CycleTheme,
    /// Increase font size (Ctrl+= or Ctrl++)
    ZoomIn,
    /// Decrease font size (Ctrl+-)
    ZoomOut,
    /// Copy rendered HTML (Ctrl+Shift+C)
    CopyHtml,
    /// Copy a standalone HTML page (Ctrl+Shift+H)
    CopyHtmlPage,
    /// Replace the document with the sample (Ctrl+Shift+R)
    ResetDocument,
}

/// Map a key press to its shortcut action, if any.
fn shortcut_action(modifiers: egui::Modifiers, key: egui::Key) -> Option<KeyboardAction> {
    if !modifiers.ctrl || modifiers.alt {
        return None;
    }

    match (modifiers.shift, key) {
        (true, egui::Key::T) => Some(KeyboardAction::CycleTheme),
        (true, egui::Key::C) => Some(KeyboardAction::CopyHtml),
        (true, egui::Key::H) => Some(KeyboardAction::CopyHtmlPage),
        (true, egui::Key::R) => Some(KeyboardAction::ResetDocument),
        (_, egui::Key::Equals) | (_, egui::Key::Plus) => Some(KeyboardAction::ZoomIn),
        (false, egui::Key::Minus) => Some(KeyboardAction::ZoomOut),
        _ => None,
    }
}

/// The main application struct that holds all state and implements eframe::App.
pub struct PreviewApp {
    /// The markdown being previewed; the only copy of the text
    document: DocumentState,
    /// User preferences
    settings: Settings,
    /// Whether settings changed since the last save
    settings_dirty: bool,
    /// Theme manager for handling theme switching
    theme_manager: ThemeManager,
    /// Editable markdown pane
    input: InputSurface,
    /// Rendered preview pane
    render: RenderSurface,
    /// Status bar message
    toast: Toast,
    /// Statistics for the revision they were computed at
    cached_stats: Option<(u64, TextStats)>,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
    /// Application start time for timing toast messages
    start_time: std::time::Instant,
}

impl PreviewApp {
    /// Create the application and apply the saved theme.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing Markview");

        let mut app = Self::with_settings(settings);
        app.theme_manager.apply(&cc.egui_ctx);
        info!("Applied initial theme: {:?}", app.settings.theme);

        app
    }

    /// Create the application state without touching any egui context.
    fn with_settings(settings: Settings) -> Self {
        let theme_manager = ThemeManager::new(settings.theme);
        Self {
            document: DocumentState::with_sample(),
            settings,
            settings_dirty: false,
            theme_manager,
            input: InputSurface::new(),
            render: RenderSurface::default(),
            toast: Toast::default(),
            cached_stats: None,
            last_window_size: None,
            last_window_pos: None,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn show_toast(&mut self, message: impl Into<String>) {
        let time = self.get_app_time();
        self.toast.show(message, time, TOAST_DURATION);
    }

    fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    fn save_settings_if_dirty(&mut self) {
        if self.settings_dirty && save_config_silent(&self.settings) {
            self.settings_dirty = false;
        }
    }

    /// Forward a change notification to the Render Surface.
    fn notify_text_changed(&mut self, change: TextChanged) {
        self.render.on_text_changed(&self.document, change);
    }

    fn text_stats(&mut self) -> TextStats {
        let revision = self.document.revision();
        match self.cached_stats {
            Some((cached, stats)) if cached == revision => stats,
            _ => {
                let stats = TextStats::from_text(self.document.text());
                self.cached_stats = Some((revision, stats));
                stats
            }
        }
    }

    /// Update window size in settings if changed.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;

        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                let current_size = rect.size();
                let current_pos = rect.min;

                let size_changed = self
                    .last_window_size
                    .map(|s| (s - current_size).length() > 1.0)
                    .unwrap_or(true);
                let pos_changed = self
                    .last_window_pos
                    .map(|p| (p - current_pos).length() > 1.0)
                    .unwrap_or(true);

                if size_changed || pos_changed {
                    self.last_window_size = Some(current_size);
                    self.last_window_pos = Some(current_pos);
                    changed = true;
                }
            }
        });

        if changed {
            if let (Some(size), Some(pos)) = (self.last_window_size, self.last_window_pos) {
                let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));
                let window_size = WindowSize {
                    width: size.x,
                    height: size.y,
                    x: Some(pos.x),
                    y: Some(pos.y),
                    maximized,
                };

                if window_size != self.settings.window_size {
                    self.settings.window_size = window_size;
                    self.mark_settings_dirty();
                    debug!(
                        "Window state updated: {}x{} at ({}, {}), maximized: {}",
                        size.x, size.y, pos.x, pos.y, maximized
                    );
                }
            }
        }

        changed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the status bar, input pane and preview pane.
    fn render_ui(&mut self, ctx: &egui::Context) {
        let colors = self.theme_manager.colors(ctx);

        let total_width = ctx.screen_rect().width().max(1.0);
        let input_panel = egui::SidePanel::left("markdown_input_panel")
            .resizable(true)
            .default_width(total_width * self.settings.split_ratio)
            .width_range(
                total_width * Settings::MIN_SPLIT_RATIO..=total_width * Settings::MAX_SPLIT_RATIO,
            )
            .show(ctx, |ui| {
                self.input.show(
                    ui,
                    &self.document,
                    self.settings.font_size,
                    self.settings.word_wrap,
                )
            });

        // The edit is applied before the status bar and preview are drawn
        self.handle_edit(input_panel.inner);
        self.update_split_ratio(input_panel.response.rect.width() / total_width);

        if self.settings.show_status_bar {
            self.render_status_bar(ctx, &colors);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render.show(
                ui,
                &self.document,
                &colors,
                self.settings.preview_font_size,
            );
        });
    }

    fn handle_edit(&mut self, event: Option<EditEvent>) {
        let change = event.and_then(|event| InputSurface::apply_edit(&mut self.document, event));
        if let Some(change) = change {
            self.notify_text_changed(change);
        }
    }

    fn update_split_ratio(&mut self, ratio: f32) {
        let ratio = ratio.clamp(Settings::MIN_SPLIT_RATIO, Settings::MAX_SPLIT_RATIO);
        if (ratio - self.settings.split_ratio).abs() > 0.005 {
            self.settings.split_ratio = ratio;
            self.mark_settings_dirty();
        }
    }

    fn render_status_bar(&mut self, ctx: &egui::Context, colors: &PreviewColors) {
        let stats = self.text_stats();
        let theme_label = self.theme_manager.label();
        let font_size = self.settings.font_size;
        let toast = self.toast.message().map(str::to_owned);
        let is_sample = self.document.is_sample();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut summary = stats.format_compact();
                if stats.reading_minutes() > 0 {
                    summary.push_str(&format!(" | {} min read", stats.reading_minutes()));
                }
                ui.label(egui::RichText::new(summary).small().color(colors.muted));
                if is_sample {
                    ui.label(egui::RichText::new(" (sample)").small().color(colors.muted));
                }

                if let Some(message) = toast {
                    ui.separator();
                    ui.label(egui::RichText::new(message).small().color(colors.text));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} | {:.0}pt", theme_label, font_size))
                            .small()
                            .color(colors.muted),
                    );
                });
            });
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let action = ctx.input(|i| {
            i.events.iter().find_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => shortcut_action(*modifiers, *key),
                _ => None,
            })
        });

        if let Some(action) = action {
            debug!("Keyboard shortcut: {:?}", action);
            self.handle_action(action, ctx);
        }
    }

    fn handle_action(&mut self, action: KeyboardAction, ctx: &egui::Context) {
        match action {
            KeyboardAction::CycleTheme => self.handle_cycle_theme(ctx),
            KeyboardAction::ZoomIn => {
                if self.settings.zoom_in() {
                    self.handle_zoom_changed();
                }
            }
            KeyboardAction::ZoomOut => {
                if self.settings.zoom_out() {
                    self.handle_zoom_changed();
                }
            }
            KeyboardAction::CopyHtml => self.handle_copy_as_html(),
            KeyboardAction::CopyHtmlPage => {
                let colors = self.theme_manager.colors(ctx);
                self.handle_copy_as_html_page(&colors);
            }
            KeyboardAction::ResetDocument => self.handle_reset_document(),
        }
    }

    /// Cycle between the light and dark themes.
    fn handle_cycle_theme(&mut self, ctx: &egui::Context) {
        let new_theme = self.theme_manager.cycle();
        self.theme_manager.apply(ctx);

        self.settings.theme = new_theme;
        self.mark_settings_dirty();
        self.show_toast(format!("Theme: {}", new_theme.label()));

        info!("Theme cycled to: {:?}", new_theme);
    }

    fn handle_zoom_changed(&mut self) {
        self.mark_settings_dirty();
        self.show_toast(format!(
            "Font size: {:.0}pt / {:.0}pt",
            self.settings.font_size, self.settings.preview_font_size
        ));
    }

    fn handle_copy_as_html(&mut self) {
        match copy_html_to_clipboard(self.document.text()) {
            Ok(()) => self.show_toast("HTML copied to clipboard"),
            Err(e) => {
                warn!("Failed to copy HTML to clipboard: {}", e);
                self.show_toast(format!("Copy failed: {}", e));
            }
        }
    }

    fn handle_copy_as_html_page(&mut self, colors: &PreviewColors) {
        let title = self.document_title();
        match copy_html_document_to_clipboard(self.document.text(), &title, colors) {
            Ok(()) => self.show_toast("HTML page copied to clipboard"),
            Err(e) => {
                warn!("Failed to copy HTML page to clipboard: {}", e);
                self.show_toast(format!("Copy failed: {}", e));
            }
        }
    }

    /// Replace the document with the built-in sample.
    fn handle_reset_document(&mut self) {
        match self.document.set_text(SAMPLE_MARKDOWN.to_string()) {
            Some(change) => {
                self.notify_text_changed(change);
                self.show_toast("Document reset to sample");
                info!("Document reset to sample");
            }
            None => debug!("Reset requested but document already holds the sample"),
        }
    }

    /// Text of the first heading, used as the HTML page title.
    fn document_title(&mut self) -> String {
        let document = self.render.document(&self.document);
        document
            .root
            .find(&|node: &MarkdownNode| {
                matches!(node.node_type, MarkdownNodeType::Heading { .. })
            })
            .map(|heading| heading.text_content().trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_TITLE.to_string())
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme if needed (handles System theme changes)
        self.theme_manager.apply_if_needed(ctx);

        let current_time = self.get_app_time();
        self.toast.update(current_time);

        // Track window size/position changes for persistence
        self.update_window_state(ctx);

        self.handle_keyboard_shortcuts(ctx);

        self.render_ui(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.save_settings_if_dirty();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.save_settings_if_dirty();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::markdown::parse_markdown;
    use eframe::egui::{Context, Key, Modifiers, RawInput};

    fn run_frame(app: &mut PreviewApp, ctx: &Context) {
        let _ = ctx.run(RawInput::default(), |ctx| app.render_ui(ctx));
    }

    #[test]
    fn test_shortcut_mapping() {
        let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;
        assert_eq!(
            shortcut_action(ctrl_shift, Key::T),
            Some(KeyboardAction::CycleTheme)
        );
        assert_eq!(
            shortcut_action(ctrl_shift, Key::C),
            Some(KeyboardAction::CopyHtml)
        );
        assert_eq!(
            shortcut_action(ctrl_shift, Key::H),
            Some(KeyboardAction::CopyHtmlPage)
        );
        assert_eq!(
            shortcut_action(ctrl_shift, Key::R),
            Some(KeyboardAction::ResetDocument)
        );
        assert_eq!(
            shortcut_action(Modifiers::CTRL, Key::Equals),
            Some(KeyboardAction::ZoomIn)
        );
        assert_eq!(
            shortcut_action(Modifiers::CTRL, Key::Minus),
            Some(KeyboardAction::ZoomOut)
        );
    }

    #[test]
    fn test_shortcuts_need_ctrl() {
        assert_eq!(shortcut_action(Modifiers::SHIFT, Key::T), None);
        assert_eq!(shortcut_action(Modifiers::NONE, Key::Minus), None);
        // Plain Ctrl+C stays with the text editor
        assert_eq!(shortcut_action(Modifiers::CTRL, Key::C), None);
        assert_eq!(
            shortcut_action(Modifiers::CTRL | Modifiers::ALT, Key::Equals),
            None
        );
    }

    #[test]
    fn test_starts_with_sample() {
        let app = PreviewApp::with_settings(Settings::default());
        assert!(app.document.is_sample());
        assert!(!app.settings_dirty);
    }

    #[test]
    fn test_frame_renders_current_text() {
        let mut app = PreviewApp::with_settings(Settings::default());
        let ctx = Context::default();
        run_frame(&mut app, &ctx);
        assert!(app.render.is_current(&app.document));

        if let Some(change) = app.document.set_text("# Changed".to_string()) {
            app.notify_text_changed(change);
        }
        run_frame(&mut app, &ctx);
        assert_eq!(
            app.render.document(&app.document),
            &parse_markdown("# Changed")
        );
    }

    #[test]
    fn test_reset_document() {
        let mut app = PreviewApp::with_settings(Settings::default());
        let ctx = Context::default();
        let _ = app.document.set_text(String::new());

        app.handle_action(KeyboardAction::ResetDocument, &ctx);

        assert!(app.document.is_sample());
        assert!(app.render.is_current(&app.document));
        assert_eq!(app.toast.message(), Some("Document reset to sample"));
    }

    #[test]
    fn test_cycle_theme_marks_settings_dirty() {
        let mut app = PreviewApp::with_settings(Settings::default());
        let ctx = Context::default();

        app.handle_action(KeyboardAction::CycleTheme, &ctx);

        assert_eq!(app.settings.theme, Theme::Dark);
        assert!(app.settings_dirty);
        assert!(ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_zoom_clamps_and_only_dirties_on_change() {
        let mut app = PreviewApp::with_settings(Settings {
            font_size: Settings::MAX_FONT_SIZE,
            preview_font_size: Settings::MAX_FONT_SIZE,
            ..Settings::default()
        });
        let ctx = Context::default();

        app.handle_action(KeyboardAction::ZoomIn, &ctx);
        assert!(!app.settings_dirty);

        app.handle_action(KeyboardAction::ZoomOut, &ctx);
        assert!(app.settings_dirty);
        assert_eq!(app.settings.font_size, Settings::MAX_FONT_SIZE - 1.0);
    }

    #[test]
    fn test_document_title_from_first_heading() {
        let mut app = PreviewApp::with_settings(Settings::default());
        assert_eq!(app.document_title(), "Welcome to Markview!");

        let _ = app.document.set_text("no heading here".to_string());
        assert_eq!(app.document_title(), DEFAULT_DOCUMENT_TITLE);
    }

    #[test]
    fn test_text_stats_cached_per_revision() {
        let mut app = PreviewApp::with_settings(Settings::default());
        let _ = app.document.set_text("one two".to_string());
        assert_eq!(app.text_stats().words, 2);

        let _ = app.document.set_text("one two three".to_string());
        assert_eq!(app.text_stats().words, 3);
    }

    #[test]
    fn test_edit_reaches_stats_and_preview_in_same_frame() {
        let mut app = PreviewApp::with_settings(Settings::default());
        let ctx = Context::default();
        run_frame(&mut app, &ctx);
        let sample_words = app.text_stats().words;

        app.handle_edit(Some(EditEvent {
            text: "one two three".to_string(),
        }));

        assert!(app.render.is_current(&app.document));
        assert_eq!(app.text_stats().words, 3);
        assert_ne!(sample_words, 3);

        app.handle_edit(None);
        assert_eq!(app.document.text(), "one two three");
    }

    #[test]
    fn test_split_ratio_updates_are_clamped() {
        let mut app = PreviewApp::with_settings(Settings::default());
        app.update_split_ratio(0.5001);
        assert!(!app.settings_dirty);

        app.update_split_ratio(0.99);
        assert_eq!(app.settings.split_ratio, Settings::MAX_SPLIT_RATIO);
        assert!(app.settings_dirty);
    }
}
