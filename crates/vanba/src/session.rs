use serde::Serialize;

use crate::model::{AstrologyResult, SubmittedBirth};
use crate::palm::{PalmAnalysis, PalmImage};

/// Reading state for one user session. Lives as long as the controller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    #[serde(rename = "userData")]
    pub user_data: Option<SubmittedBirth>,
    #[serde(rename = "astrologyData")]
    pub astrology: Option<AstrologyResult>,
    #[serde(rename = "palmImage")]
    pub palm_image: Option<PalmImage>,
    #[serde(rename = "palmAnalysis")]
    pub palm_analysis: Option<PalmAnalysis>,
    pub loading: bool,
    /// Message of the last failed action.
    pub error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_astrology(&self) -> bool {
        self.astrology.is_some()
    }
}
