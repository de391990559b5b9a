use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Measurement system sent to the API and used for display suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    pub fn toggled(&self) -> Unit {
        match self {
            Unit::Metric => Unit::Imperial,
            Unit::Imperial => Unit::Metric,
        }
    }

    /// Label shown on the unit toggle.
    pub fn degrees(&self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }

    pub fn wind_speed_suffix(&self) -> &'static str {
        match self {
            Unit::Metric => "m/s",
            Unit::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Unit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" | "celsius" | "c" => Ok(Unit::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(Unit::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

/// Geographic position, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// What the user asked to look up. Built per request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

/// Condition family parsed from the two-digit prefix of an OpenWeather
/// icon code such as "10d".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCode {
    #[default]
    ClearSky,
    FewClouds,
    ScatteredClouds,
    BrokenClouds,
    ShowerRain,
    Rain,
    Snow,
    Mist,
    Unknown,
}

impl ConditionCode {
    pub fn from_icon_code(code: &str) -> Self {
        match code.get(..2) {
            Some("01") => ConditionCode::ClearSky,
            Some("02") => ConditionCode::FewClouds,
            Some("03") => ConditionCode::ScatteredClouds,
            Some("04") => ConditionCode::BrokenClouds,
            Some("09") => ConditionCode::ShowerRain,
            Some("10") => ConditionCode::Rain,
            Some("13") => ConditionCode::Snow,
            Some("50") => ConditionCode::Mist,
            _ => ConditionCode::Unknown,
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            ConditionCode::ClearSky | ConditionCode::Unknown => Icon::Clear,
            ConditionCode::FewClouds | ConditionCode::ScatteredClouds => Icon::Cloud,
            ConditionCode::BrokenClouds => Icon::Drizzle,
            ConditionCode::ShowerRain | ConditionCode::Rain => Icon::Rain,
            ConditionCode::Snow => Icon::Snow,
            ConditionCode::Mist => Icon::Mist,
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ConditionCode::ClearSky => Theme::Clear,
            ConditionCode::FewClouds | ConditionCode::ScatteredClouds => Theme::Cloud,
            ConditionCode::BrokenClouds => Theme::Drizzle,
            ConditionCode::ShowerRain | ConditionCode::Rain => Theme::Rain,
            ConditionCode::Snow => Theme::Snow,
            ConditionCode::Mist => Theme::Mist,
            ConditionCode::Unknown => Theme::Default,
        }
    }
}

/// Display icon bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
    Mist,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Clear => "☀️",
            Icon::Cloud => "☁️",
            Icon::Drizzle => "🌦️",
            Icon::Rain => "🌧️",
            Icon::Snow => "❄️",
            Icon::Mist => "🌫️",
        }
    }
}

/// Background theme derived from the same classification as the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
    Mist,
    #[default]
    Default,
}

/// Air-quality index bucket, 1 (best) to 5 (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AqiLevel {
    /// Indices outside 1..=5 are not valid readings.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(AqiLevel::Good),
            2 => Some(AqiLevel::Fair),
            3 => Some(AqiLevel::Moderate),
            4 => Some(AqiLevel::Poor),
            5 => Some(AqiLevel::VeryPoor),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            AqiLevel::Good => 1,
            AqiLevel::Fair => 2,
            AqiLevel::Moderate => 3,
            AqiLevel::Poor => 4,
            AqiLevel::VeryPoor => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Fair => "Fair",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::Poor => "Poor",
            AqiLevel::VeryPoor => "Very Poor",
        }
    }

    /// Fixed badge color, CSS hex.
    pub fn color(&self) -> &'static str {
        match self {
            AqiLevel::Good => "#4caf50",
            AqiLevel::Fair => "#8bc34a",
            AqiLevel::Moderate => "#ffc107",
            AqiLevel::Poor => "#ff9800",
            AqiLevel::VeryPoor => "#f44336",
        }
    }
}

/// Current conditions for one location at one fetch instant, already
/// shaped for display. Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: i32,
    pub temp_min: i32,
    pub temp_max: i32,
    pub feels_like: i32,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: u32,
    pub visibility_km: f64,
    pub location: String,
    pub country: String,
    pub description: String,
    pub icon: Icon,
    pub theme: Theme,
    pub sunrise: String,
    pub sunset: String,
    pub local_time: String,
    pub coordinates: Coordinates,
}

/// One future day's midday-reading summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub icon: Icon,
    pub temperature: i32,
}

/// Everything one lookup produced. The three pieces always come from the
/// same query; air quality and forecast may be absent when their calls
/// failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub aqi: Option<AqiLevel>,
    pub forecast: Vec<ForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_as_str_roundtrip() {
        for unit in [Unit::Metric, Unit::Imperial] {
            let parsed = Unit::try_from(unit.as_str()).expect("roundtrip should succeed");
            assert_eq!(unit, parsed);
        }
    }

    #[test]
    fn unit_aliases_parse() {
        assert_eq!(Unit::try_from("Celsius").unwrap(), Unit::Metric);
        assert_eq!(Unit::try_from("F").unwrap(), Unit::Imperial);
    }

    #[test]
    fn unknown_unit_error() {
        let err = Unit::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown units"));
    }

    #[test]
    fn unit_toggle_flips_both_ways() {
        assert_eq!(Unit::Metric.toggled(), Unit::Imperial);
        assert_eq!(Unit::Imperial.toggled(), Unit::Metric);
    }

    #[test]
    fn icon_codes_classify_by_prefix() {
        let cases = [
            ("01d", Icon::Clear, Theme::Clear),
            ("01n", Icon::Clear, Theme::Clear),
            ("02d", Icon::Cloud, Theme::Cloud),
            ("03n", Icon::Cloud, Theme::Cloud),
            ("04d", Icon::Drizzle, Theme::Drizzle),
            ("09n", Icon::Rain, Theme::Rain),
            ("10d", Icon::Rain, Theme::Rain),
            ("13n", Icon::Snow, Theme::Snow),
            ("50d", Icon::Mist, Theme::Mist),
        ];
        for (code, icon, theme) in cases {
            let condition = ConditionCode::from_icon_code(code);
            assert_eq!(condition.icon(), icon, "icon for {code}");
            assert_eq!(condition.theme(), theme, "theme for {code}");
        }
    }

    #[test]
    fn unknown_icon_code_defaults_to_clear() {
        let condition = ConditionCode::from_icon_code("99x");
        assert_eq!(condition, ConditionCode::Unknown);
        assert_eq!(condition.icon(), Icon::Clear);
        assert_eq!(condition.theme(), Theme::Default);

        assert_eq!(ConditionCode::from_icon_code(""), ConditionCode::Unknown);
    }

    #[test]
    fn aqi_index_mapping() {
        assert_eq!(AqiLevel::from_index(1), Some(AqiLevel::Good));
        assert_eq!(AqiLevel::from_index(5), Some(AqiLevel::VeryPoor));
        assert_eq!(AqiLevel::from_index(0), None);
        assert_eq!(AqiLevel::from_index(6), None);
    }

    #[test]
    fn aqi_labels_and_colors_are_fixed() {
        assert_eq!(AqiLevel::Good.label(), "Good");
        assert_eq!(AqiLevel::Good.color(), "#4caf50");
        assert_eq!(AqiLevel::VeryPoor.label(), "Very Poor");
        assert_eq!(AqiLevel::VeryPoor.color(), "#f44336");
        for index in 1..=5 {
            let level = AqiLevel::from_index(index).unwrap();
            assert_eq!(level.index(), index);
        }
    }
}
