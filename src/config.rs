//! Configuration file handling for glyphcast.
//!
//! Loads render defaults from `<config dir>/glyphcast/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ascii::{GlyphSet, RenderOptions, Segmentation};

/// Template written by `glyphcast config init`.
pub const DEFAULT_CONFIG: &str = r##"# glyphcast configuration

[render]
# standard, detailed, simple, binary, braille
glyph_set = "standard"
# Custom ramp, darkest first (overrides the glyph set's ramp)
# glyphs = "#. "
gamma = 1.0
dithering = false
compact = false
invert = false
preprocess = false
preprocess_strength = 5
# heuristic, adaptive, soft
segmentation = "heuristic"
refine_passes = 1
"##;

/// Configuration file structure for glyphcast.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
}

/// `[render]` table. Unset keys fall back to built-in defaults.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct RenderConfig {
    #[serde(default)]
    pub glyph_set: Option<GlyphSet>,
    #[serde(default)]
    pub glyphs: Option<String>,
    #[serde(default)]
    pub gamma: Option<f32>,
    #[serde(default)]
    pub dithering: Option<bool>,
    #[serde(default)]
    pub compact: Option<bool>,
    #[serde(default)]
    pub invert: Option<bool>,
    #[serde(default)]
    pub preprocess: Option<bool>,
    #[serde(default)]
    pub preprocess_strength: Option<u8>,
    #[serde(default)]
    pub segmentation: Option<Segmentation>,
    #[serde(default)]
    pub refine_passes: Option<usize>,
}

impl RenderConfig {
    /// Render options with every configured key applied over the defaults.
    pub fn to_options(&self) -> RenderOptions {
        let glyph_set = self.glyph_set.unwrap_or_default();
        let mut options = RenderOptions::for_glyph_set(glyph_set);

        if let Some(ref glyphs) = self.glyphs {
            options.glyphs = glyphs.chars().collect();
        }
        if let Some(gamma) = self.gamma {
            options.gamma = gamma;
        }
        if let Some(dithering) = self.dithering {
            options.dithering = dithering;
        }
        if let Some(compact) = self.compact {
            options.compact = compact;
        }
        if let Some(invert) = self.invert {
            options.invert = invert;
        }
        if let Some(preprocess) = self.preprocess {
            options.preprocess = preprocess;
        }
        if let Some(strength) = self.preprocess_strength {
            options.preprocess_strength = strength;
        }
        if let Some(segmentation) = self.segmentation {
            options.segmentation = segmentation;
        }
        if let Some(passes) = self.refine_passes {
            options.refine_passes = passes;
        }

        options
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            Self::read(&path)
        } else {
            log::debug!("no config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Load configuration from a path the user named explicitly.
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from_explicit(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    NotFound {
        path: PathBuf,
    },
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound { path } => {
                write!(f, "Config file '{}' not found", path.display())
            }
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NotFound { .. } => None,
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyphcast").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyphcast/config.toml")
        })
}
