//! Colour mode and the palette derived from it

use crate::state::storage::KeyValueStorage;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::{debug, warn};

/// Storage key holding the literal "light" or "dark"
pub const THEME_KEY: &str = "themeMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(format!("unknown colour mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub mode: ColorMode,
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub paper: Color,
    pub text: Color,
    pub muted: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub selection: Color,
}

/// Palette for a mode. Pure: the same mode always yields the same palette.
pub fn design_tokens(mode: ColorMode) -> Palette {
    match mode {
        ColorMode::Light => Palette {
            mode,
            primary: Color::Rgb(0x19, 0x76, 0xd2),
            secondary: Color::Rgb(0x9c, 0x27, 0xb0),
            background: Color::Rgb(0xfa, 0xfa, 0xfa),
            paper: Color::Rgb(0xff, 0xff, 0xff),
            text: Color::Rgb(0x21, 0x21, 0x21),
            muted: Color::Rgb(0x75, 0x75, 0x75),
            error: Color::Rgb(0xd3, 0x2f, 0x2f),
            success: Color::Rgb(0x2e, 0x7d, 0x32),
            warning: Color::Rgb(0xed, 0x6c, 0x02),
            selection: Color::Rgb(0xe3, 0xf2, 0xfd),
        },
        ColorMode::Dark => Palette {
            mode,
            primary: Color::Rgb(0x90, 0xca, 0xf9),
            secondary: Color::Rgb(0xce, 0x93, 0xd8),
            background: Color::Rgb(0x12, 0x12, 0x12),
            paper: Color::Rgb(0x1e, 0x1e, 0x1e),
            text: Color::Rgb(0xff, 0xff, 0xff),
            muted: Color::Rgb(0x9e, 0x9e, 0x9e),
            error: Color::Rgb(0xf4, 0x43, 0x36),
            success: Color::Rgb(0x66, 0xbb, 0x6a),
            warning: Color::Rgb(0xff, 0xa7, 0x26),
            selection: Color::Rgb(0x1a, 0x33, 0x4d),
        },
    }
}

/// The current colour mode plus where to remember it
pub struct ThemePreference {
    mode: ColorMode,
    palette: Palette,
    storage: Option<Rc<dyn KeyValueStorage>>,
}

impl ThemePreference {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            palette: design_tokens(mode),
            storage: None,
        }
    }

    /// Start from `default_mode` unless a previously saved mode exists
    pub fn load(storage: Rc<dyn KeyValueStorage>, default_mode: ColorMode) -> Self {
        let mode = match storage.get(THEME_KEY) {
            Ok(Some(saved)) => saved.parse().unwrap_or_else(|e| {
                warn!(target: "theme", "Ignoring saved theme: {}", e);
                default_mode
            }),
            Ok(None) => default_mode,
            Err(e) => {
                warn!(target: "theme", "Could not read saved theme: {}", e);
                default_mode
            }
        };

        let pref = Self {
            storage: Some(storage),
            ..Self::new(mode)
        };
        pref.save();
        pref
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Flip the mode, re-derive the palette and remember the choice
    pub fn toggle(&mut self) -> ColorMode {
        self.mode = self.mode.toggled();
        self.palette = design_tokens(self.mode);
        self.save();
        debug!(target: "theme", "Switched to {} mode", self.mode);
        self.mode
    }

    fn save(&self) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set(THEME_KEY, self.mode.as_str()) {
                warn!(target: "theme", "Failed to save theme: {}", e);
            }
        }
    }
}
