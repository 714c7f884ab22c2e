//! Zodiac sign lookup.
//!
//! Each sign spans 30° of ecliptic longitude starting from 0° Aries.

pub const SIGN_SPAN: f64 = 30.0;

pub const ZODIAC_SIGNS: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Get sign index (0-11) from longitude
pub fn get_sign_index(longitude: f64) -> usize {
    (normalize_degrees(longitude) / SIGN_SPAN).floor() as usize % 12
}

/// Get sign name from longitude
pub fn get_sign(longitude: f64) -> &'static str {
    ZODIAC_SIGNS[get_sign_index(longitude)]
}

/// Degrees elapsed within the sign containing `longitude`.
pub fn degrees_in_sign(longitude: f64) -> f64 {
    normalize_degrees(longitude) % SIGN_SPAN
}
