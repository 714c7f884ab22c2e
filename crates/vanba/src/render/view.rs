use serde::{Deserialize, Serialize};

use crate::palm::{PalmAnalysis, PalmImage};
use crate::render::projection::ResultsViewModel;

/// Page elements the reading flows bind to. Serializes to the element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementId {
    CalculateBtn,
    AnalyzePalmBtn,
    PalmImage,
    Dob,
    Tob,
    Lat,
    Lng,
    ResultsSection,
    Rashi,
    Ascendant,
    Nakshatra,
    PlanetDetails,
    HouseDetails,
    PlanetChart,
    PalmCanvas,
    PalmResults,
    Loader,
}

impl ElementId {
    pub const ALL: [ElementId; 17] = [
        ElementId::CalculateBtn,
        ElementId::AnalyzePalmBtn,
        ElementId::PalmImage,
        ElementId::Dob,
        ElementId::Tob,
        ElementId::Lat,
        ElementId::Lng,
        ElementId::ResultsSection,
        ElementId::Rashi,
        ElementId::Ascendant,
        ElementId::Nakshatra,
        ElementId::PlanetDetails,
        ElementId::HouseDetails,
        ElementId::PlanetChart,
        ElementId::PalmCanvas,
        ElementId::PalmResults,
        ElementId::Loader,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::CalculateBtn => "calculateBtn",
            ElementId::AnalyzePalmBtn => "analyzePalmBtn",
            ElementId::PalmImage => "palmImage",
            ElementId::Dob => "dob",
            ElementId::Tob => "tob",
            ElementId::Lat => "lat",
            ElementId::Lng => "lng",
            ElementId::ResultsSection => "resultsSection",
            ElementId::Rashi => "rashi",
            ElementId::Ascendant => "ascendant",
            ElementId::Nakshatra => "nakshatra",
            ElementId::PlanetDetails => "planetDetails",
            ElementId::HouseDetails => "houseDetails",
            ElementId::PlanetChart => "planetChart",
            ElementId::PalmCanvas => "palmCanvas",
            ElementId::PalmResults => "palmResults",
            ElementId::Loader => "loader",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.as_str() == id)
    }
}

/// Presentation surface driven by the reading controller.
pub trait View {
    fn show_results(&mut self, results: &ResultsViewModel);
    fn show_palm_image(&mut self, image: &PalmImage);
    fn show_palm_analysis(&mut self, analysis: &PalmAnalysis);
    fn set_loading(&mut self, loading: bool, message: Option<&str>);
    /// Blocking, user-facing notice.
    fn alert(&mut self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for id in ElementId::ALL {
            assert_eq!(ElementId::from_id(id.as_str()), Some(id));
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
        assert_eq!(ElementId::from_id("birthForm"), None);
    }
}
