//! Configuration types for the title explorer.
//!
//! Aggregate sizing and output locations are configured with the builder
//! pattern; the filter selection itself lives in [`crate::filter`].

use crate::error::{ExplorerError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of entries kept in the top genre and top country lists.
pub const DEFAULT_TOP_N: usize = 10;

/// Number of equal-width bins for the release-year and duration histograms.
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Configuration for aggregate computation and report output.
///
/// Use [`ExplorerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use title_explorer::config::ExplorerConfig;
///
/// let config = ExplorerConfig::builder()
///     .top_n(5)
///     .histogram_bins(20)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Maximum number of entries in the top genre and top country lists.
    /// Default: 10
    pub top_n: usize,

    /// Number of equal-width bins used by every histogram.
    /// Default: 30
    pub histogram_bins: usize,

    /// Output directory for reports and exported subsets.
    /// Default: "outputs"
    pub output_dir: PathBuf,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            output_dir: PathBuf::from("outputs"),
        }
    }
}

impl ExplorerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_n));
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidBinCount(self.histogram_bins));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults; the result is validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Reading config file {}", path.display()))?;
        let config: ExplorerConfig = serde_json::from_str(&text)
            .map_err(|e| ExplorerError::Json(e).with_context(format!("Parsing {}", path.display())))?;
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top-N size: {0} (must be at least 1)")]
    InvalidTopN(usize),

    #[error("Invalid histogram bin count: {0} (must be at least 1)")]
    InvalidBinCount(usize),
}

/// Builder for [`ExplorerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ExplorerConfigBuilder {
    top_n: Option<usize>,
    histogram_bins: Option<usize>,
    output_dir: Option<PathBuf>,
}

impl ExplorerConfigBuilder {
    /// Start from an existing configuration instead of the defaults.
    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self {
            top_n: Some(config.top_n),
            histogram_bins: Some(config.histogram_bins),
            output_dir: Some(config.output_dir.clone()),
        }
    }

    /// Set the size of the top genre and top country lists.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the output directory for reports and exports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ExplorerConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<ExplorerConfig, ConfigValidationError> {
        let config = ExplorerConfig {
            top_n: self.top_n.unwrap_or(DEFAULT_TOP_N),
            histogram_bins: self.histogram_bins.unwrap_or(DEFAULT_HISTOGRAM_BINS),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from("outputs")),
        };

        config.validate()?;
        Ok(config)
    }
}
