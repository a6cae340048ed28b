//! Light and dark color palettes.
//!
//! Widgets receive a `&Palette` from the app instead of reading global state,
//! so a theme toggle takes effect on the next frame.

use ratatui::style::Color;

use crate::core::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub mode: ThemeMode,

    /// Main app background
    pub bg_base: Color,
    /// Panels, table body
    pub bg_surface: Color,
    /// Table header, focused input
    pub bg_elevated: Color,
    /// Selected row
    pub bg_highlight: Color,
    /// Loading skeleton bars
    pub bg_skeleton: Color,

    pub text_bright: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    /// Focus, primary actions, progress
    pub accent_primary: Color,
    pub accent_success: Color,
    pub accent_error: Color,
    pub accent_warning: Color,

    pub border: Color,
    pub border_focused: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            bg_base: Color::Rgb(249, 250, 251),
            bg_surface: Color::Rgb(255, 255, 255),
            bg_elevated: Color::Rgb(243, 244, 246),
            bg_highlight: Color::Rgb(219, 234, 254),
            bg_skeleton: Color::Rgb(229, 231, 235),
            text_bright: Color::Rgb(17, 24, 39),
            text_primary: Color::Rgb(31, 41, 55),
            text_secondary: Color::Rgb(75, 85, 99),
            text_muted: Color::Rgb(156, 163, 175),
            accent_primary: Color::Rgb(59, 130, 246),
            accent_success: Color::Rgb(34, 197, 94),
            accent_error: Color::Rgb(239, 68, 68),
            accent_warning: Color::Rgb(234, 179, 8),
            border: Color::Rgb(209, 213, 219),
            border_focused: Color::Rgb(59, 130, 246),
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            bg_base: Color::Rgb(17, 24, 39),
            bg_surface: Color::Rgb(31, 41, 55),
            bg_elevated: Color::Rgb(55, 65, 81),
            bg_highlight: Color::Rgb(30, 58, 138),
            bg_skeleton: Color::Rgb(55, 65, 81),
            text_bright: Color::Rgb(255, 255, 255),
            text_primary: Color::Rgb(229, 231, 235),
            text_secondary: Color::Rgb(209, 213, 219),
            text_muted: Color::Rgb(156, 163, 175),
            accent_primary: Color::Rgb(96, 165, 250),
            accent_success: Color::Rgb(22, 163, 74),
            accent_error: Color::Rgb(220, 38, 38),
            accent_warning: Color::Rgb(250, 204, 21),
            border: Color::Rgb(75, 85, 99),
            border_focused: Color::Rgb(96, 165, 250),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}
