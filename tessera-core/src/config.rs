//! View configuration loaded by the host before the first paint.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::style::VisualStyle;

/// Size of the drawing area plus the initial visual style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    pub style: VisualStyle,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            style: VisualStyle::default(),
        }
    }
}

impl ViewConfig {
    /// Parse a configuration from JSON. Absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
