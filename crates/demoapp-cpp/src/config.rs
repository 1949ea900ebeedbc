//! Formatter configuration loaded from TOML.
//!
//! ```toml
//! tag = "CppObject method call"
//!
//! [window]
//! offset = 5
//! max_count = 6
//! capacity = 20
//! ```
//!
//! Every field is optional; missing fields take the defaults shown above.

use crate::error::{CppObjectError, CppObjectResult};
use crate::formatter::{BoundedCopyFormatter, DEFAULT_TAG};
use demoapp_types::CopyWindow;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Copy window parameters as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Leading characters skipped before copying
    #[serde(default = "default_offset")]
    pub offset: usize,

    /// Maximum characters copied
    #[serde(default = "default_max_count")]
    pub max_count: usize,

    /// Buffer capacity, terminator included
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

/// Complete formatter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Report tag
    #[serde(default = "default_tag")]
    pub tag: String,

    #[serde(default)]
    pub window: WindowConfig,
}

fn default_offset() -> usize {
    CopyWindow::DEFAULT.offset()
}

fn default_max_count() -> usize {
    CopyWindow::DEFAULT.max_count()
}

fn default_capacity() -> usize {
    CopyWindow::DEFAULT.capacity()
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            max_count: default_max_count(),
            capacity: default_capacity(),
        }
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            window: WindowConfig::default(),
        }
    }
}

impl FormatterConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> CppObjectResult<Self> {
        let config: FormatterConfig = toml::from_str(content)
            .map_err(|e| CppObjectError::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> CppObjectResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loading formatter config from {}", path.display());
                Self::from_toml_str(&content).map_err(|e| match e {
                    CppObjectError::Config { message } => CppObjectError::config(format!(
                        "{}: {}",
                        path.display(),
                        message
                    )),
                    other => other,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Formatter config {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(CppObjectError::Io(e)),
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> CppObjectResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CppObjectError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path.as_ref(), content)?;

        Ok(())
    }

    /// Checks the window fits its capacity.
    pub fn validate(&self) -> CppObjectResult<()> {
        self.window().map(|_| ())
    }

    /// Returns the validated copy window.
    pub fn window(&self) -> CppObjectResult<CopyWindow> {
        CopyWindow::new(
            self.window.offset,
            self.window.max_count,
            self.window.capacity,
        )
        .map_err(|e| {
            warn!("Rejected copy window: {}", e);
            CppObjectError::Window(e)
        })
    }

    /// Builds a formatter with this configuration's window and tag.
    pub fn build_formatter(&self) -> CppObjectResult<BoundedCopyFormatter> {
        Ok(BoundedCopyFormatter::new(self.window()?).with_tag(self.tag.clone()))
    }
}
