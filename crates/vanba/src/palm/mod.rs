//! Palm image capture and (template) palm-line analysis.

pub mod analyzer;
pub mod capture;
pub mod templates;

pub use analyzer::{PalmAnalyzer, TemplatePalmAnalyzer};
pub use capture::{capture_from_bytes, capture_from_path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One named hand-line observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalmLine {
    pub name: String,
    pub description: String,
    pub length: String,
    pub quality: String,
}

impl PalmLine {
    pub fn new(name: &str, description: impl Into<String>, length: &str, quality: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.into(),
            length: length.to_string(),
            quality: quality.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalmAnalysis {
    pub lines: Vec<PalmLine>,
    #[serde(rename = "analysisTime")]
    pub analysis_time: DateTime<Utc>,
    /// True when the lines were derived from loaded astrology data.
    #[serde(rename = "astrologyIntegration")]
    pub astrology_integration: bool,
}

/// A decoded palm photo, re-encoded as a JPEG data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalmImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}
