use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const LOCAL_API_BASE_URL: &str = "http://localhost:3000";
pub const HOSTED_API_BASE_URL: &str = "https://astrovanba.vercel.app";

/// Environment variable that overrides `[api].base_url`.
pub const API_BASE_URL_ENV: &str = "VANBA_API_BASE_URL";

// New Delhi
pub const DEFAULT_LATITUDE: f64 = 28.6139;
pub const DEFAULT_LONGITUDE: f64 = 77.2090;

pub const DEFAULT_AYANAMSA: &str = "LAHIRI";
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 1500;

const CONFIG_PATHS: [&str; 2] = ["configs/vanba.toml", "../../configs/vanba.toml"];

/// Chart widget used for the planet visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Degrees within the sign, one bar per planet.
    Bar,
    /// Speed-derived strength, one spoke per planet.
    #[default]
    Radar,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Radar => "radar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "radar" => Ok(ChartKind::Radar),
            other => anyhow::bail!("Unknown chart kind '{other}' (expected 'bar' or 'radar')"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    /// `None` leaves the HTTP client without a request timeout.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BirthDefaults {
    pub latitude: f64,
    pub longitude: f64,
    pub ayanamsa: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PalmSettings {
    pub analysis_delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VanbaSettings {
    pub api: ApiSettings,
    pub birth: BirthDefaults,
    pub chart: ChartSettings,
    pub palm: PalmSettings,
}

impl Default for VanbaSettings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: HOSTED_API_BASE_URL.to_string(),
                timeout: None,
            },
            birth: BirthDefaults {
                latitude: DEFAULT_LATITUDE,
                longitude: DEFAULT_LONGITUDE,
                ayanamsa: DEFAULT_AYANAMSA.to_string(),
            },
            chart: ChartSettings {
                kind: ChartKind::default(),
            },
            palm: PalmSettings {
                analysis_delay: Duration::from_millis(DEFAULT_ANALYSIS_DELAY_MS),
            },
        }
    }
}

impl VanbaSettings {
    /// Replace the API base URL when `base_url` is set and non-blank.
    pub fn with_base_url_override(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiToml {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BirthToml {
    #[serde(default)]
    default_latitude: Option<f64>,
    #[serde(default)]
    default_longitude: Option<f64>,
    #[serde(default)]
    ayanamsa: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    kind: Option<ChartKind>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PalmToml {
    #[serde(default)]
    analysis_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    api: ApiToml,
    #[serde(default)]
    birth: BirthToml,
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    palm: PalmToml,
}

/// Local development hosts talk to the dev server, everything else to the hosted API.
pub fn api_base_url_for_host(host: &str) -> &'static str {
    if host.trim().eq_ignore_ascii_case("localhost") {
        LOCAL_API_BASE_URL
    } else {
        HOSTED_API_BASE_URL
    }
}

/// Try the common relative locations of `configs/vanba.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load vanba.toml from {:?}", CONFIG_PATHS);
}

pub fn parse_settings(text: &str) -> anyhow::Result<VanbaSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse vanba.toml: {e}"))?;
    let RootConfigToml {
        api,
        birth,
        chart,
        palm,
    } = root;

    let base_url = match (api.base_url, api.host) {
        (Some(url), _) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        (_, Some(host)) => api_base_url_for_host(&host).to_string(),
        _ => HOSTED_API_BASE_URL.to_string(),
    };
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        anyhow::bail!("api.base_url must be an http(s) URL, got '{base_url}'");
    }
    if api.timeout_secs == Some(0) {
        anyhow::bail!("api.timeout_secs must be greater than zero when set");
    }

    let latitude = birth.default_latitude.unwrap_or(DEFAULT_LATITUDE);
    let longitude = birth.default_longitude.unwrap_or(DEFAULT_LONGITUDE);
    if !(-90.0..=90.0).contains(&latitude) {
        anyhow::bail!("birth.default_latitude out of range: {latitude}");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        anyhow::bail!("birth.default_longitude out of range: {longitude}");
    }
    let ayanamsa = birth
        .ayanamsa
        .map(|a| a.trim().to_ascii_uppercase())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| DEFAULT_AYANAMSA.to_string());

    Ok(VanbaSettings {
        api: ApiSettings {
            base_url,
            timeout: api.timeout_secs.map(Duration::from_secs),
        },
        birth: BirthDefaults {
            latitude,
            longitude,
            ayanamsa,
        },
        chart: ChartSettings {
            kind: chart.kind.unwrap_or_default(),
        },
        palm: PalmSettings {
            analysis_delay: Duration::from_millis(
                palm.analysis_delay_ms.unwrap_or(DEFAULT_ANALYSIS_DELAY_MS),
            ),
        },
    })
}

/// Load settings from `path`, or from the default locations when `path` is `None`.
///
/// A missing file at the default locations yields the built-in defaults; an
/// explicit path that cannot be read is an error. `VANBA_API_BASE_URL` is
/// applied last.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<VanbaSettings> {
    let settings = match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", p.display()))?;
            parse_settings(&text)?
        }
        None => match read_config_toml_text() {
            Ok(text) => parse_settings(&text)?,
            Err(_) => VanbaSettings::default(),
        },
    };
    let env_url = env::var(API_BASE_URL_ENV).ok();
    Ok(settings.with_base_url_override(env_url.as_deref()))
}

/// First existing default config location, if any.
pub fn resolve_config_path() -> Option<PathBuf> {
    CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url_for_host() {
        assert_eq!(api_base_url_for_host("localhost"), LOCAL_API_BASE_URL);
        assert_eq!(api_base_url_for_host("LocalHost "), LOCAL_API_BASE_URL);
        assert_eq!(api_base_url_for_host("astrovanba.vercel.app"), HOSTED_API_BASE_URL);
        assert_eq!(api_base_url_for_host("127.0.0.1"), HOSTED_API_BASE_URL);
    }

    #[test]
    fn test_chart_kind_from_str() {
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!(" Radar".parse::<ChartKind>().unwrap(), ChartKind::Radar);
        assert!("pie".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_base_url_override_ignores_blank() {
        let settings = VanbaSettings::default().with_base_url_override(Some("  "));
        assert_eq!(settings.api.base_url, HOSTED_API_BASE_URL);

        let settings = VanbaSettings::default().with_base_url_override(Some("http://10.0.0.2:3000/"));
        assert_eq!(settings.api.base_url, "http://10.0.0.2:3000");
    }
}
