//! Board colouring
//!
//! Every coloured string on the board goes through [`ColourManager::paint`],
//! which falls back to plain text when colour is off.

use colored::{ColoredString, Colorize};

use super::config::{BoardRole, ColourConfig, ColourPalette};

#[derive(Debug, Clone)]
pub struct ColourManager {
    config: ColourConfig,
    palette: ColourPalette,
}

impl ColourManager {
    /// Colour on (forced, regardless of terminal) or off
    pub fn with_colours(enabled: bool) -> Self {
        let mut config = ColourConfig::default();
        config.set_enabled(enabled);
        config.set_color_forced(enabled);
        Self::with_config(config)
    }

    pub fn with_config(config: ColourConfig) -> Self {
        let palette = config.palette();
        Self { config, palette }
    }

    /// Apply `--no-color` / `--color` on top of the configured settings
    pub fn from_color_args(no_color: bool, color: bool, config: Option<ColourConfig>) -> Self {
        let mut config = config.unwrap_or_default();
        if no_color {
            config.set_enabled(false);
        } else if color {
            config.set_enabled(true);
            config.set_color_forced(true);
        }
        Self::with_config(config)
    }

    pub fn colours_enabled(&self) -> bool {
        self.config.should_use_colours()
    }

    /// Make the `colored` crate follow this manager's decision, also when stdout is redirected
    pub fn apply_global_override(&self) {
        colored::control::set_override(self.colours_enabled());
    }

    pub fn palette(&self) -> &ColourPalette {
        &self.palette
    }

    /// Colour `text` for `role`; headings and the active call are also bold
    pub fn paint(&self, role: BoardRole, text: &str) -> ColoredString {
        if !self.colours_enabled() {
            return text.normal();
        }
        let painted = text.color(self.palette.colour(role));
        match role {
            BoardRole::Heading | BoardRole::Active => painted.bold(),
            _ => painted,
        }
    }
}

impl Default for ColourManager {
    fn default() -> Self {
        Self::with_config(ColourConfig::default())
    }
}
