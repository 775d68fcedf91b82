use crate::ui::grid_view::PageSize;
use crate::ui::theme::ColorMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for sort arrows and markers
    pub use_glyphs: bool,

    /// Show row numbers in the grid
    pub show_row_numbers: bool,

    /// Rows per page at startup: 5, 10 or 20
    pub default_page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Ask before deleting a row
    pub confirm_delete: bool,

    /// Validate imported rows against `required_columns` and a numeric age
    pub strict_import: bool,

    /// Columns every imported row must fill when `strict_import` is on
    pub required_columns: Vec<String>,

    /// How long a notification stays on screen
    pub notification_timeout_ms: u64,

    /// Maximum notifications shown at once
    pub max_notifications: usize,

    /// Where persisted state lives (defaults to the data directory)
    pub storage_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Colour mode used until one is toggled and saved: "light" or "dark"
    pub default_mode: ColorMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            show_row_numbers: false,
            default_page_size: 10,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            confirm_delete: true,
            strict_import: false,
            required_columns: ["name", "email", "age", "role"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            notification_timeout_ms: 3000,
            max_notifications: 3,
            storage_dir: None,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_mode: ColorMode::Light,
        }
    }
}

impl DisplayConfig {
    /// The configured page size, or the default when it is not one of the
    /// offered choices
    pub fn page_size(&self) -> PageSize {
        PageSize::from_rows(self.default_page_size).unwrap_or_else(|| {
            warn!(
                target: "config",
                "default_page_size {} is not one of 5/10/20, using 10",
                self.default_page_size
            );
            PageSize::default()
        })
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(target: "config", "Using default configuration: {}", e);
            Self::default()
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("table-cli").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# table-cli Configuration File
# Location: ~/.config/table-cli/config.toml (Linux)
#           ~/Library/Application Support/table-cli/config.toml (macOS)
#           %APPDATA%\table-cli\config.toml (Windows)

[display]
# Use Unicode glyphs for sort arrows and markers
# Set to false for ASCII-only mode (better compatibility)
use_glyphs = true

# Show row numbers in the grid
show_row_numbers = false

# Rows per page at startup (5, 10 or 20)
default_page_size = 10

[behavior]
# Ask for confirmation before deleting a row
confirm_delete = true

# Reject CSV imports with rows missing required columns or a non-numeric age
strict_import = false
required_columns = ["name", "email", "age", "role"]

# Notifications disappear after this many milliseconds
notification_timeout_ms = 3000

# At most this many notifications are stacked on screen
max_notifications = 3

# Directory for persisted table state (leave commented to use the default)
# storage_dir = "/path/to/storage"

[theme]
# "light" or "dark"; a mode toggled in the app takes precedence
default_mode = "light"
"#
        .to_string()
    }
}
