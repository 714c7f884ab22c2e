use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Normalized birth details for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthInput {
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub ayanamsa: String,
}

impl BirthInput {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn to_request(&self) -> CalculationRequest {
        CalculationRequest {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour,
            minute: self.minute,
            lat: self.latitude,
            lng: self.longitude,
            ayanamsa: self.ayanamsa.clone(),
        }
    }
}

/// Body of `POST /api/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub lat: f64,
    pub lng: f64,
    pub ayanamsa: String,
}

/// Birth details kept in the session after a successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmittedBirth {
    #[serde(flatten)]
    pub input: BirthInput,
    #[serde(rename = "calculatedAt")]
    pub calculated_at: DateTime<Utc>,
}

impl SubmittedBirth {
    pub fn new(input: BirthInput) -> Self {
        Self {
            input,
            calculated_at: Utc::now(),
        }
    }
}

/// A sign or nakshatra label. The API sends either `"Leo"` or `{"name": "Leo"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignLabel {
    Plain(String),
    Named { name: String },
}

impl SignLabel {
    pub fn name(&self) -> &str {
        match self {
            SignLabel::Plain(name) => name,
            SignLabel::Named { name } => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetInfo {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Speed in longitude (degrees per day)
    #[serde(default)]
    pub speed: f64,
}

/// Planet name -> position, in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Planets(Vec<(String, PlanetInfo)>);

impl Planets {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace, keeping the first-seen position of the name.
    pub fn insert(&mut self, name: impl Into<String>, info: PlanetInfo) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = info,
            None => self.0.push((name, info)),
        }
    }

    /// Case-insensitive lookup by planet name.
    pub fn get(&self, name: &str) -> Option<&PlanetInfo> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, info)| info)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlanetInfo)> {
        self.0.iter().map(|(n, info)| (n.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, PlanetInfo)> for Planets {
    fn from_iter<I: IntoIterator<Item = (S, PlanetInfo)>>(iter: I) -> Self {
        let mut planets = Planets::new();
        for (name, info) in iter {
            planets.insert(name, info);
        }
        planets
    }
}

impl Serialize for Planets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, info) in &self.0 {
            map.serialize_entry(name, info)?;
        }
        map.end()
    }
}

struct PlanetsVisitor;

impl<'de> Visitor<'de> for PlanetsVisitor {
    type Value = Planets;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of planet name to {longitude, speed}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Planets, A::Error> {
        let mut planets = Planets::new();
        while let Some((name, info)) = access.next_entry::<String, PlanetInfo>()? {
            planets.insert(name, info);
        }
        Ok(planets)
    }
}

impl<'de> Deserialize<'de> for Planets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PlanetsVisitor)
    }
}

/// Calculation result returned by `/api/calculate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AstrologyResult {
    #[serde(default)]
    pub rashi: Option<SignLabel>,
    #[serde(default)]
    pub ascendant: Option<SignLabel>,
    #[serde(default)]
    pub nakshatra: Option<SignLabel>,
    #[serde(default)]
    pub planets: Planets,
    /// House cusps 1..12, in order.
    #[serde(default)]
    pub houses: Vec<f64>,
}

impl AstrologyResult {
    /// Cusp longitude of house `number` (1-based).
    pub fn house(&self, number: usize) -> Option<f64> {
        number.checked_sub(1).and_then(|i| self.houses.get(i)).copied()
    }
}
