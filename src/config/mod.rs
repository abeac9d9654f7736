//! Configuration management for gleaner.
//!
//! Configuration is read from `~/.config/gleaner/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app::GleanerError;
use crate::batch::BatchConfig;
use crate::driver::BrowserSettings;
use crate::extract::ExtractConfig;
use crate::scroll::ScrollConfig;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserSettings,
    pub scroll: ScrollConfig,
    pub extract: ExtractConfig,
    pub batch: BatchConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::write_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/gleaner/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gleaner").join("config.toml"))
    }

    /// Write the commented default config file, creating parent directories.
    pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# gleaner configuration
#
# Locators are CSS selectors matched against the review listing.

[browser]
# Run browser in headless mode (no visible window)
headless = true

# Extra command line flags passed to Chrome
extra_args = ["--no-sandbox", "--disable-gpu", "--disable-dev-shm-usage"]

[scroll]
# Pixels to scroll forward when no "load more" control is available
offset_delta = 10000

# Number of consecutive offsets that must be equal to count as stalled
stall_window = 5

# Abort the scroll loop once the offset stops moving
detect_stall = true

# "Load more" control clicked in preference to scrolling
load_more_locator = 'div[jsname="i3y3Ic"]'

[extract]
# "Show full review" buttons clicked before capture
expand_locator = 'button[jsname="gxjVle"]'

# Truncated review text (empty once expanded)
short_review_locator = 'span[jsname="bN97Pc"]'

# Expanded review text (empty when nothing was expanded)
long_review_locator = 'span[jsname="fbQN7e"]'

# Helpfulness count
support_locator = 'div[class="jUL89d y92BAb"]'

# Attribute holding the rating label
rating_attribute = "aria-label"

[extract.rating_locator]
en = 'span.nt2C1d > div.pf5lIe > div[aria-label*="Rated"]'
cs = 'span.nt2C1d > div.pf5lIe > div[aria-label*="Hodnocení"]'

[batch]
# Concurrent browser sessions
workers = 3

# Session locale: "en" or "cs"
locale = "en"

# Scroll steps per target
max_steps = 1000

# Pause between scroll steps (milliseconds)
delay_ms = 1000
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl From<ConfigError> for GleanerError {
    fn from(e: ConfigError) -> Self {
        GleanerError::Config(e.to_string())
    }
}
