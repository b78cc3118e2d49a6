//! Presentation settings.
//!
//! Nothing here changes the statistics: the significance level and the
//! sample-size bounds are fixed. These settings only control how numbers
//! and labels are printed.
//!
//! # Example
//!
//! ```
//! use u_normality::config::{DecimalMark, Language, RenderConfig};
//!
//! let config = RenderConfig::from_toml_str(r#"
//!     language = "en"
//!     decimal_mark = "point"
//!
//!     [precision]
//!     w = 4
//! "#).unwrap();
//! assert_eq!(config.language, Language::English);
//! assert_eq!(config.decimal_mark, DecimalMark::Point);
//! assert_eq!(config.precision.w, 4);
//! assert_eq!(config.precision.mean, 7); // untouched fields keep defaults
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most decimal places any field may request.
pub const MAX_PRECISION: usize = 15;

/// Label language of the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Language {
    /// Portuguese labels ("Média", "Valor-P", …).
    #[default]
    #[serde(rename = "pt")]
    #[value(name = "pt")]
    Portuguese,
    /// English labels.
    #[serde(rename = "en")]
    #[value(name = "en")]
    English,
}

/// Decimal separator used when printing numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DecimalMark {
    /// `16,2866667`
    #[default]
    Comma,
    /// `16.2866667`
    Point,
}

impl DecimalMark {
    /// The separator character.
    pub fn as_char(self) -> char {
        match self {
            DecimalMark::Comma => ',',
            DecimalMark::Point => '.',
        }
    }
}

/// Decimal places per printed statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Precision {
    /// Mean (default 7).
    pub mean: usize,
    /// Standard deviation (default 7).
    pub std_dev: usize,
    /// W statistic (default 6).
    pub w: usize,
    /// p-value (default 7).
    pub p_value: usize,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            mean: 7,
            std_dev: 7,
            w: 6,
            p_value: 7,
        }
    }
}

/// Settings for the rendering adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Label language.
    pub language: Language,
    /// Decimal separator.
    pub decimal_mark: DecimalMark,
    /// Decimal places.
    pub precision: Precision,
    /// Append histogram bins and Q-Q points to the text report.
    pub show_chart_data: bool,
}

/// Failure to load a [`RenderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    /// A value is syntactically valid but out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl RenderConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges that the TOML schema cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.precision;
        for (name, places) in [
            ("mean", p.mean),
            ("std_dev", p.std_dev),
            ("w", p.w),
            ("p_value", p.p_value),
        ] {
            if places > MAX_PRECISION {
                return Err(ConfigError::Invalid(format!(
                    "precision.{name} = {places} exceeds the maximum of {MAX_PRECISION}"
                )));
            }
        }
        Ok(())
    }
}
