//! Theme Manager for Markview
//!
//! Tracks the selected theme, caches the matching egui `Visuals` and applies
//! them to the context when the selection (or, for `Theme::System`, egui's
//! dark-mode flag) changes.
//!
//! ```ignore
//! let mut manager = ThemeManager::new(Theme::Dark);
//! manager.apply_if_needed(&ctx);
//! manager.cycle();
//! manager.apply_if_needed(&ctx);
//! ```

use eframe::egui::{Context, Visuals};
use log::{debug, info};

use super::{context_is_dark, PreviewColors};
use crate::config::Theme;

/// Manages theme state and applies themes to the egui context.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    /// Current theme setting (Light, Dark, or System)
    current_theme: Theme,
    /// Cached visuals for the current theme
    cached_visuals: Option<Visuals>,
    /// Whether the theme needs to be reapplied
    needs_apply: bool,
    /// Last detected system dark mode state (for System theme)
    last_system_dark_mode: Option<bool>,
}

impl ThemeManager {
    /// Create a new ThemeManager with the given initial theme.
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            cached_visuals: None,
            needs_apply: true,
            last_system_dark_mode: None,
        }
    }

    /// Get the current theme setting.
    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Set the theme and mark it for reapplication.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.cached_visuals = None;
            self.needs_apply = true;
        }
    }

    /// Cycle between Light and Dark (System goes to Light).
    ///
    /// Returns the new theme.
    pub fn cycle(&mut self) -> Theme {
        let new_theme = match self.current_theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
            Theme::System => Theme::Light,
        };
        self.set_theme(new_theme);
        new_theme
    }

    /// Check if the theme needs to be reapplied.
    pub fn needs_apply(&self) -> bool {
        self.needs_apply
    }

    /// Apply the current theme to the egui context unconditionally.
    pub fn apply(&mut self, ctx: &Context) {
        let visuals = self.get_or_create_visuals(ctx);
        ctx.set_visuals(visuals);
        self.needs_apply = false;
        debug!("Applied theme: {:?}", self.current_theme);
    }

    /// Apply the theme only if the selection or the dark-mode flag changed.
    ///
    /// Returns `true` if the theme was applied.
    pub fn apply_if_needed(&mut self, ctx: &Context) -> bool {
        if self.current_theme == Theme::System {
            let current_system_dark = context_is_dark(ctx);
            if self.last_system_dark_mode != Some(current_system_dark) {
                self.last_system_dark_mode = Some(current_system_dark);
                self.cached_visuals = None;
                self.needs_apply = true;
                debug!("System dark mode changed to: {}", current_system_dark);
            }
        }

        if self.needs_apply() {
            self.apply(ctx);
            true
        } else {
            false
        }
    }

    fn get_or_create_visuals(&mut self, ctx: &Context) -> Visuals {
        if let Some(ref visuals) = self.cached_visuals {
            return visuals.clone();
        }

        let visuals = self.colors(ctx).to_visuals();
        self.cached_visuals = Some(visuals.clone());
        visuals
    }

    /// Get the preview palette for the effective theme.
    pub fn colors(&self, ctx: &Context) -> PreviewColors {
        PreviewColors::from_theme(self.current_theme, &ctx.style().visuals)
    }

    /// Get a display label for the current theme.
    pub fn label(&self) -> &'static str {
        self.current_theme.label()
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
