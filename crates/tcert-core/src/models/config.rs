//! Configuration structures for the certificate pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::TcertError;

/// Main configuration for tcert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TcertConfig {
    /// Report output configuration.
    pub report: ReportConfig,

    /// Quality-control sampling ranges.
    pub qc: QcConfig,
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Logo image drawn at the top of the certificate.
    pub logo_path: Option<PathBuf>,

    /// Directory generated reports are written to.
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            logo_path: None,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Uniform sampling ranges for synthesized QC values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QcConfig {
    /// Lower bound of copper content (percent).
    pub copper_min: f64,

    /// Upper bound of copper content (percent).
    pub copper_max: f64,

    /// Lower bound of pH.
    pub ph_min: f64,

    /// Upper bound of pH.
    pub ph_max: f64,
}

impl Default for QcConfig {
    fn default() -> Self {
        Self {
            copper_min: 24.70,
            copper_max: 24.75,
            ph_min: 3.0,
            ph_max: 3.4,
        }
    }
}

impl QcConfig {
    /// Check that both ranges are finite and ordered.
    pub fn validate(&self) -> Result<(), TcertError> {
        let ranges = [
            ("copper", self.copper_min, self.copper_max),
            ("ph", self.ph_min, self.ph_max),
        ];
        for (name, min, max) in ranges {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(TcertError::Config(format!(
                    "invalid {} range: [{}, {}]",
                    name, min, max
                )));
            }
        }
        Ok(())
    }
}

impl TcertConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, TcertError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| TcertError::Config(format!("{}: {}", path.display(), e)))?;
        config.qc.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), TcertError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TcertError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
