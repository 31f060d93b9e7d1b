//! Window configuration
//!
//! Configuration values can be built in code or loaded from TOML/RON files through the
//! [`Config`] trait. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

/// File-backed configuration
///
/// The path's extension picks the format: `.toml` or `.ron`. Anything else is rejected
/// with [`ConfigError::UnsupportedFormat`] before the file is touched on save.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// OpenGL context creation hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Requested major version
    pub major: u32,
    /// Requested minor version
    pub minor: u32,
    /// Request a core profile context
    pub core_profile: bool,
    /// Request a forward compatible context (required on macOS for 3.2+)
    pub forward_compat: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            major: 4,
            minor: 1,
            core_profile: true,
            forward_compat: true,
        }
    }
}

/// Parameters used to create a [`crate::Window`]
///
/// `xpos` / `ypos` set to `None` leave that axis where the window system placed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Logical width in screen coordinates
    pub width: u32,
    /// Logical height in screen coordinates
    pub height: u32,
    /// Initial x position, `None` lets the OS choose
    pub xpos: Option<i32>,
    /// Initial y position, `None` lets the OS choose
    pub ypos: Option<i32>,
    /// OpenGL context hints
    pub context: ContextConfig,
    /// Wait for vertical sync on swap
    pub vsync: bool,
    /// Allow the user to resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "no title".to_string(),
            width: 738,
            height: 480,
            xpos: None,
            ypos: None,
            context: ContextConfig::default(),
            vsync: true,
            resizable: true,
        }
    }
}

impl WindowConfig {
    /// Create a config with the given title and size, everything else default
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the initial window position
    #[must_use]
    pub const fn with_position(mut self, x: i32, y: i32) -> Self {
        self.xpos = Some(x);
        self.ypos = Some(y);
        self
    }

    /// Enable or disable vertical sync
    #[must_use]
    pub const fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}

impl Config for WindowConfig {}
