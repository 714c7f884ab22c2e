use serde::Serialize;

use crate::model::{AstrologyResult, SignLabel};
use crate::zodiac::get_sign;

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetRow {
    /// Name as sent by the server (lowercase).
    pub name: String,
    pub longitude: f64,
    pub sign: &'static str,
}

impl PlanetRow {
    pub fn degrees_label(&self) -> String {
        format!("{:.2}°", self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseCell {
    /// 1-based house number
    pub number: usize,
    pub longitude: f64,
    pub sign: &'static str,
}

impl HouseCell {
    pub fn degrees_label(&self) -> String {
        format!("{:.2}°", self.longitude)
    }
}

/// Everything the results section displays, already formatted for text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsViewModel {
    pub rashi: String,
    pub ascendant: String,
    pub nakshatra: String,
    pub planets: Vec<PlanetRow>,
    pub houses: Vec<HouseCell>,
}

pub fn project(result: &AstrologyResult) -> ResultsViewModel {
    ResultsViewModel {
        rashi: label_or_na(result.rashi.as_ref()),
        ascendant: label_or_na(result.ascendant.as_ref()),
        nakshatra: label_or_na(result.nakshatra.as_ref()),
        planets: result
            .planets
            .iter()
            .map(|(name, info)| PlanetRow {
                name: name.to_string(),
                longitude: info.longitude,
                sign: get_sign(info.longitude),
            })
            .collect(),
        houses: result
            .houses
            .iter()
            .enumerate()
            .map(|(i, &longitude)| HouseCell {
                number: i + 1,
                longitude,
                sign: get_sign(longitude),
            })
            .collect(),
    }
}

fn label_or_na(label: Option<&SignLabel>) -> String {
    label
        .map(SignLabel::name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// "mercury" -> "Mercury"
pub fn capitalize(name: &str) -> String {
    let mut c = name.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}
