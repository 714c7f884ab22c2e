use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::model::Planets;
use crate::render::capitalize;
use crate::theme::{Color, SECONDARY_500};
use crate::zodiac::{degrees_in_sign, SIGN_SPAN};

pub use vanba_config::ChartKind;

pub const BAR_DATASET_LABEL: &str = "Position in Zodiac (0-30°)";
pub const BAR_AXIS_TITLE: &str = "Degrees in Sign";
pub const RADAR_DATASET_LABEL: &str = "Planetary Strength";
pub const RADAR_SUGGESTED_MAX: f64 = 20.0;

/// Identifies one chart instance on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartHandle(pub u64);

/// Chart specification - declarative description of the planet chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub dataset_label: String,
    /// Capitalised planet names
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub fill: Color,
    pub stroke: Color,
    /// Value axis range (hard max for bar, suggested max for radar)
    pub min: f64,
    pub max: f64,
}

impl ChartSpec {
    pub fn for_planets(kind: ChartKind, planets: &Planets) -> Self {
        let labels = planets.iter().map(|(name, _)| capitalize(name)).collect();
        match kind {
            ChartKind::Bar => Self {
                kind,
                dataset_label: BAR_DATASET_LABEL.to_string(),
                labels,
                values: planets
                    .iter()
                    .map(|(_, p)| degrees_in_sign(p.longitude))
                    .collect(),
                fill: SECONDARY_500.with_alpha(0.7),
                stroke: SECONDARY_500,
                min: 0.0,
                max: SIGN_SPAN,
            },
            ChartKind::Radar => Self {
                kind,
                dataset_label: RADAR_DATASET_LABEL.to_string(),
                labels,
                values: planets.iter().map(|(_, p)| strength_from_speed(p.speed)).collect(),
                fill: SECONDARY_500.with_alpha(0.2),
                stroke: SECONDARY_500,
                min: 0.0,
                max: RADAR_SUGGESTED_MAX,
            },
        }
    }

    /// Chart.js configuration object for page hosts.
    pub fn to_chartjs_config(&self) -> Value {
        let fill = self.fill.to_css_string();
        let stroke = self.stroke.to_css_string();
        match self.kind {
            ChartKind::Bar => json!({
                "type": "bar",
                "data": {
                    "labels": self.labels,
                    "datasets": [{
                        "label": self.dataset_label,
                        "data": self.values,
                        "backgroundColor": fill,
                        "borderColor": stroke,
                        "borderWidth": 1
                    }]
                },
                "options": {
                    "scales": {
                        "y": {
                            "beginAtZero": true,
                            "max": self.max,
                            "title": { "display": true, "text": BAR_AXIS_TITLE }
                        }
                    },
                    "plugins": { "legend": { "display": false } }
                }
            }),
            ChartKind::Radar => json!({
                "type": "radar",
                "data": {
                    "labels": self.labels,
                    "datasets": [{
                        "label": self.dataset_label,
                        "data": self.values,
                        "backgroundColor": fill,
                        "borderColor": stroke,
                        "pointBackgroundColor": stroke,
                        "pointBorderColor": "#fff",
                        "pointHoverRadius": 5
                    }]
                },
                "options": {
                    "scales": {
                        "r": {
                            "angleLines": { "display": true },
                            "suggestedMin": self.min,
                            "suggestedMax": self.max
                        }
                    },
                    "plugins": { "legend": { "display": false } }
                }
            }),
        }
    }
}

/// Radar metric: `(speed + 1) * 10`.
pub fn strength_from_speed(speed: f64) -> f64 {
    (speed + 1.0) * 10.0
}

/// Something that can host chart instances (a canvas, a terminal, ...).
pub trait ChartSurface {
    fn create(&mut self, spec: &ChartSpec) -> ChartHandle;
    fn destroy(&mut self, handle: ChartHandle);
    fn live_charts(&self) -> usize;
}

/// In-memory surface that keeps the spec of every live chart.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    next_id: u64,
    live: BTreeMap<ChartHandle, ChartSpec>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: ChartHandle) -> Option<&ChartSpec> {
        self.live.get(&handle)
    }

    /// Most recently created live chart.
    pub fn latest(&self) -> Option<(ChartHandle, &ChartSpec)> {
        self.live.iter().next_back().map(|(h, s)| (*h, s))
    }
}

impl ChartSurface for ChartRegistry {
    fn create(&mut self, spec: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle(self.next_id);
        self.next_id += 1;
        self.live.insert(handle, spec.clone());
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.live.remove(&handle).is_none() {
            log::warn!("destroy requested for unknown chart {:?}", handle);
        }
    }

    fn live_charts(&self) -> usize {
        self.live.len()
    }
}
