use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid sketch configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid sketch configuration: {0}")]
    Invalid(String),
}

/// Tunables for constraint creation and undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// On-screen distance, in pixels, between a new point-point distance
    /// dimension and the line it measures.
    pub dimension_offset_px: f64,
    /// Text placed in a freshly created comment.
    pub default_comment: String,
    /// Number of undo snapshots kept.
    pub max_undo: usize,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            dimension_offset_px: 50.0,
            default_comment: "NEW COMMENT -- DOUBLE-CLICK TO EDIT".to_string(),
            max_undo: 16,
        }
    }
}

impl SketchConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SketchConfig = serde_json::from_str(json)?;
        if !(config.dimension_offset_px.is_finite() && config.dimension_offset_px > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "dimension_offset_px must be positive, got {}",
                config.dimension_offset_px
            )));
        }
        Ok(config)
    }
}
