//! Fixed palm-line description sets.

use super::PalmLine;
use crate::model::{AstrologyResult, PlanetInfo};
use crate::render::capitalize;
use crate::zodiac::get_sign;

pub const HEART_LINE: &str = "Heart Line";
pub const HEAD_LINE: &str = "Head Line";
pub const LIFE_LINE: &str = "Life Line";
pub const FATE_LINE: &str = "Fate Line";

const UNKNOWN_POSITION: &str = "(position unknown)";

/// Lines reported when no astrology data is loaded.
pub fn generic_lines() -> Vec<PalmLine> {
    vec![
        PalmLine::new(
            HEART_LINE,
            "Your heart line shows emotional depth and strong relationship potential, matching your Venus position.",
            "Long",
            "Clear",
        ),
        PalmLine::new(
            HEAD_LINE,
            "Your head line indicates analytical thinking, aligned with Mercury in your chart.",
            "Medium",
            "Straight",
        ),
        PalmLine::new(
            LIFE_LINE,
            "A strong life line suggests vitality, corresponding with Mars in your first house.",
            "Long",
            "Unbroken",
        ),
        PalmLine::new(
            FATE_LINE,
            "Your fate line shows career development that will strengthen after Saturn matures.",
            "Developing",
            "Faint",
        ),
    ]
}

/// Lines interpolated from a chart: planet signs and selected house cusps.
pub fn astrology_lines(result: &AstrologyResult) -> Vec<PalmLine> {
    let planet = |name: &str| planet_phrase(name, result.planets.get(name));
    // houses[3] and houses[10] are the 4th and 11th cusps
    let cusp = |index: usize| cusp_phrase(index + 1, result.houses.get(index).copied());

    vec![
        PalmLine::new(
            HEART_LINE,
            format!(
                "Emotional expression follows {} and {}. Affection runs deep and steady.",
                planet("venus"),
                planet("moon")
            ),
            "Medium",
            "Clear",
        ),
        PalmLine::new(
            HEAD_LINE,
            format!(
                "Thinking is shaped by {}, grounded by the {}. The mind favours clear, methodical reasoning.",
                planet("mercury"),
                cusp(3)
            ),
            "Long",
            "Straight",
        ),
        PalmLine::new(
            LIFE_LINE,
            format!(
                "Vitality draws on {} and {}. Energy is strong and sustained.",
                planet("mars"),
                planet("sun")
            ),
            "Long",
            "Strong",
        ),
        PalmLine::new(
            FATE_LINE,
            format!(
                "Career direction is guided by {} and the {}. Purpose strengthens with time.",
                planet("saturn"),
                cusp(10)
            ),
            "Developing",
            "Visible",
        ),
    ]
}

/// "Venus in Taurus (45.20°)"
fn planet_phrase(name: &str, info: Option<&PlanetInfo>) -> String {
    let display = capitalize(name);
    match info {
        Some(p) => format!("{} in {} ({:.2}°)", display, get_sign(p.longitude), p.longitude),
        None => format!("{} {}", display, UNKNOWN_POSITION),
    }
}

/// "4th house cusp in Cancer (95.00°)"
fn cusp_phrase(number: usize, longitude: Option<f64>) -> String {
    let ordinal = ordinal(number);
    match longitude {
        Some(l) => format!("{} house cusp in {} ({:.2}°)", ordinal, get_sign(l), l),
        None => format!("{} house cusp {}", ordinal, UNKNOWN_POSITION),
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(22), "22nd");
    }

    #[test]
    fn test_generic_line_grades() {
        let lines = generic_lines();
        let grades: Vec<(&str, &str)> = lines
            .iter()
            .map(|l| (l.length.as_str(), l.quality.as_str()))
            .collect();
        assert_eq!(
            grades,
            vec![
                ("Long", "Clear"),
                ("Medium", "Straight"),
                ("Long", "Unbroken"),
                ("Developing", "Faint")
            ]
        );
    }

    #[test]
    fn test_astrology_lines_name_positions() {
        let result = AstrologyResult {
            planets: [("venus", PlanetInfo { longitude: 45.2, speed: 1.1 })]
                .into_iter()
                .collect(),
            houses: (0..12).map(|i| i as f64 * 30.0 + 5.0).collect(),
            ..Default::default()
        };
        let lines = astrology_lines(&result);
        assert!(lines[0].description.contains("Venus in Taurus (45.20°)"));
        assert!(lines[0].description.contains("Moon (position unknown)"));
        assert!(lines[1].description.contains("4th house cusp in Cancer (95.00°)"));
        assert!(lines[3].description.contains("11th house cusp in Aquarius (305.00°)"));
    }

    #[test]
    fn test_planet_phrase_capitalizes_name() {
        let info = PlanetInfo { longitude: 359.99, speed: 0.0 };
        assert_eq!(planet_phrase("jupiter", Some(&info)), "Jupiter in Pisces (359.99°)");
        assert_eq!(planet_phrase("rahu", None), "Rahu (position unknown)");
    }

    #[test]
    fn test_astrology_lines_without_houses() {
        let lines = astrology_lines(&AstrologyResult::default());
        assert!(lines[3].description.contains("11th house cusp (position unknown)"));
        assert_eq!(lines[3].quality, "Visible");
    }
}
