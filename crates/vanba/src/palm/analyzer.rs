use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

use super::templates::{astrology_lines, generic_lines};
use super::{PalmAnalysis, PalmImage};
use crate::error::Result;
use crate::model::AstrologyResult;

/// Turns a captured palm image into hand-line observations.
#[async_trait]
pub trait PalmAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    async fn analyze(
        &self,
        image: &PalmImage,
        astrology: Option<&AstrologyResult>,
    ) -> Result<PalmAnalysis>;
}

/// Placeholder analyzer: ignores the pixels and returns a fixed line set.
#[derive(Debug, Clone)]
pub struct TemplatePalmAnalyzer {
    delay: Duration,
}

impl TemplatePalmAnalyzer {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(vanba_config::DEFAULT_ANALYSIS_DELAY_MS);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No simulated processing time.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for TemplatePalmAnalyzer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl PalmAnalyzer for TemplatePalmAnalyzer {
    fn name(&self) -> &str {
        "template"
    }

    async fn analyze(
        &self,
        image: &PalmImage,
        astrology: Option<&AstrologyResult>,
    ) -> Result<PalmAnalysis> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let (lines, astrology_integration) = match astrology {
            Some(result) => (astrology_lines(result), true),
            None => (generic_lines(), false),
        };
        log::debug!(
            "analyzed {} ({} lines, astrology: {})",
            image.file_name,
            lines.len(),
            astrology_integration
        );
        Ok(PalmAnalysis {
            lines,
            analysis_time: Utc::now(),
            astrology_integration,
        })
    }
}
