//! Theme System for Markview
//!
//! `PreviewColors` is the palette the rendered preview draws with, and the
//! source of the egui `Visuals` applied to the whole window. The `Theme`
//! enum from `config` (Light/Dark/System) selects the palette at runtime;
//! `ThemeManager` tracks the choice and applies it to the egui context.

mod manager;

pub use manager::ThemeManager;

use crate::config::Theme;
use eframe::egui::{self, Color32, Stroke, Visuals};

/// Theme-aware colors for the preview pane.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewColors {
    /// Whether this palette is a dark one
    pub dark: bool,
    /// Panel background
    pub background: Color32,
    /// Body text
    pub text: Color32,
    /// Bold text; the default fonts have no bold face
    pub strong: Color32,
    /// De-emphasized text (status bar, footnote labels)
    pub muted: Color32,
    /// Heading text
    pub heading: Color32,
    /// Inline code and code block background
    pub code_bg: Color32,
    /// Inline code and code block text
    pub code_text: Color32,
    /// Block quote side bar
    pub quote_border: Color32,
    /// Block quote text
    pub quote_text: Color32,
    /// Links
    pub link: Color32,
    /// Horizontal rules and table borders
    pub hr: Color32,
    /// List bullets and numbers
    pub list_marker: Color32,
    /// Table header row background
    pub table_header_bg: Color32,
    /// Text selection highlight
    pub selection: Color32,
}

impl PreviewColors {
    /// Resolve the palette for `theme`, consulting `visuals` for `Theme::System`.
    pub fn from_theme(theme: Theme, visuals: &Visuals) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
            Theme::System => {
                if visuals.dark_mode {
                    Self::dark()
                } else {
                    Self::light()
                }
            }
        }
    }

    /// Dark theme colors.
    pub fn dark() -> Self {
        Self {
            dark: true,
            background: Color32::from_rgb(30, 30, 30),
            text: Color32::from_rgb(220, 220, 220),
            strong: Color32::WHITE,
            muted: Color32::from_rgb(140, 140, 140),
            heading: Color32::from_rgb(100, 180, 255),
            code_bg: Color32::from_rgb(45, 45, 45),
            code_text: Color32::from_rgb(200, 200, 150),
            quote_border: Color32::from_rgb(90, 90, 90),
            quote_text: Color32::from_rgb(180, 180, 180),
            link: Color32::from_rgb(100, 180, 255),
            hr: Color32::from_rgb(80, 80, 80),
            list_marker: Color32::from_rgb(150, 150, 150),
            table_header_bg: Color32::from_rgb(40, 40, 40),
            selection: Color32::from_rgb(38, 79, 120),
        }
    }

    /// Light theme colors.
    pub fn light() -> Self {
        Self {
            dark: false,
            background: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(30, 30, 30),
            strong: Color32::BLACK,
            muted: Color32::from_rgb(120, 120, 120),
            heading: Color32::from_rgb(0, 100, 180),
            code_bg: Color32::from_rgb(245, 245, 245),
            code_text: Color32::from_rgb(80, 80, 80),
            quote_border: Color32::from_rgb(200, 200, 200),
            quote_text: Color32::from_rgb(100, 100, 100),
            link: Color32::from_rgb(0, 100, 180),
            hr: Color32::from_rgb(210, 210, 210),
            list_marker: Color32::from_rgb(100, 100, 100),
            table_header_bg: Color32::from_rgb(243, 244, 246),
            selection: Color32::from_rgb(173, 214, 255),
        }
    }

    /// Build egui `Visuals` for this palette.
    pub fn to_visuals(&self) -> Visuals {
        let mut visuals = if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.background;
        visuals.extreme_bg_color = self.background;
        visuals.code_bg_color = self.code_bg;
        visuals.hyperlink_color = self.link;
        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.text);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.hr);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text);

        visuals
    }
}

impl Default for PreviewColors {
    fn default() -> Self {
        Self::light()
    }
}

/// Whether egui currently considers the context dark.
pub fn context_is_dark(ctx: &egui::Context) -> bool {
    ctx.style().visuals.dark_mode
}
