//! Colour settings for the operator board
//!
//! Decides whether colour is used at all (configuration, `--color`/`--no-color`,
//! `NO_COLOR`, TTY detection) and which colour each part of the board gets.

use std::io::IsTerminal;
use std::str::FromStr;

use colored::Color;

/// Parts of the board that are drawn in their own colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardRole {
    Heading,
    Active,
    Staged,
    Skipped,
    Completed,
    /// Placeholders and counts
    Muted,
    Notice,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourTheme {
    /// No background detection; drawn like `Dark`
    #[default]
    Auto,
    Light,
    Dark,
}

impl FromStr for ColourTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColourTheme::Auto),
            "light" => Ok(ColourTheme::Light),
            "dark" => Ok(ColourTheme::Dark),
            _ => Err(format!("Invalid theme: {}. Valid options: auto, light, dark", s)),
        }
    }
}

impl ColourTheme {
    pub fn palette(self) -> ColourPalette {
        match self {
            ColourTheme::Auto | ColourTheme::Dark => ColourPalette::dark(),
            ColourTheme::Light => ColourPalette::light(),
        }
    }
}

/// Colour per board role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourPalette {
    pub heading: Color,
    pub active: Color,
    pub staged: Color,
    pub skipped: Color,
    pub completed: Color,
    pub muted: Color,
    pub notice: Color,
    pub warning: Color,
    pub error: Color,
}

impl ColourPalette {
    pub fn light() -> Self {
        Self {
            heading: Color::Blue,
            active: Color::Red,
            staged: Color::Black,
            skipped: Color::Magenta,
            completed: Color::Green,
            muted: Color::BrightBlack,
            notice: Color::Cyan,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    pub fn dark() -> Self {
        Self {
            heading: Color::BrightBlue,
            active: Color::BrightRed,
            staged: Color::BrightWhite,
            skipped: Color::BrightMagenta,
            completed: Color::BrightGreen,
            muted: Color::BrightBlack,
            notice: Color::BrightCyan,
            warning: Color::BrightYellow,
            error: Color::BrightRed,
        }
    }

    pub fn colour(&self, role: BoardRole) -> Color {
        match role {
            BoardRole::Heading => self.heading,
            BoardRole::Active => self.active,
            BoardRole::Staged => self.staged,
            BoardRole::Skipped => self.skipped,
            BoardRole::Completed => self.completed,
            BoardRole::Muted => self.muted,
            BoardRole::Notice => self.notice,
            BoardRole::Warning => self.warning,
            BoardRole::Error => self.error,
        }
    }
}

/// Colour configuration resolved from the config file and command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourConfig {
    pub enabled: bool,
    pub theme: ColourTheme,
    /// Honour the `NO_COLOR` environment variable
    pub respect_no_color: bool,
    /// Colour even when stdout is not a terminal (`--color`)
    pub color_forced: bool,
}

impl Default for ColourConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: ColourTheme::default(),
            respect_no_color: true,
            color_forced: false,
        }
    }
}

impl ColourConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_theme(&mut self, theme: ColourTheme) {
        self.theme = theme;
    }

    pub fn set_color_forced(&mut self, forced: bool) {
        self.color_forced = forced;
    }

    /// An explicit disable beats `--color`, which beats `NO_COLOR` and TTY detection
    pub fn should_use_colours(&self) -> bool {
        match (self.enabled, self.color_forced) {
            (false, _) => false,
            (true, true) => true,
            (true, false) => {
                let no_color = self.respect_no_color && std::env::var_os("NO_COLOR").is_some();
                !no_color && std::io::stdout().is_terminal()
            }
        }
    }

    pub fn palette(&self) -> ColourPalette {
        self.theme.palette()
    }
}
