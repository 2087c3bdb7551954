use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

use crate::error::Error;

/// Measurement convention requested from the API.
///
/// `Standard` is what the API returns when no `units` parameter is sent:
/// Kelvin and meters per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Standard,
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Standard => "standard",
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Value of the `units` query parameter, `None` for the API default.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            UnitSystem::Standard => None,
            other => Some(other.as_str()),
        }
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        match self {
            UnitSystem::Standard => TemperatureUnit::Kelvin,
            UnitSystem::Metric => TemperatureUnit::Celsius,
            UnitSystem::Imperial => TemperatureUnit::Fahrenheit,
        }
    }

    pub fn wind_speed_unit(&self) -> WindSpeedUnit {
        match self {
            UnitSystem::Standard | UnitSystem::Metric => WindSpeedUnit::MetersPerSecond,
            UnitSystem::Imperial => WindSpeedUnit::MilesPerHour,
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Standard, UnitSystem::Metric, UnitSystem::Imperial]
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "standard" => Ok(UnitSystem::Standard),
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(Error::invalid_value(format!(
                "Unknown unit system '{value}'. Supported: standard, metric, imperial."
            ))),
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitSystem::try_from(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Convert `value` expressed in `self` into `to`.
    pub fn convert(&self, value: f64, to: TemperatureUnit) -> f64 {
        let kelvin = match self {
            TemperatureUnit::Kelvin => value,
            TemperatureUnit::Celsius => value + 273.15,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + 273.15,
        };

        match to {
            TemperatureUnit::Kelvin => kelvin,
            TemperatureUnit::Celsius => kelvin - 273.15,
            TemperatureUnit::Fahrenheit => (kelvin - 273.15) * 9.0 / 5.0 + 32.0,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindSpeedUnit {
    MetersPerSecond,
    MilesPerHour,
}

const METERS_PER_MILE: f64 = 1609.344;

impl WindSpeedUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            WindSpeedUnit::MetersPerSecond => "m/s",
            WindSpeedUnit::MilesPerHour => "mph",
        }
    }

    pub fn convert(&self, value: f64, to: WindSpeedUnit) -> f64 {
        match (self, to) {
            (WindSpeedUnit::MetersPerSecond, WindSpeedUnit::MilesPerHour) => {
                value * 3600.0 / METERS_PER_MILE
            }
            (WindSpeedUnit::MilesPerHour, WindSpeedUnit::MetersPerSecond) => {
                value * METERS_PER_MILE / 3600.0
            }
            _ => value,
        }
    }
}

impl fmt::Display for WindSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Value of the `mode` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
    Html,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
            ResponseFormat::Html => "html",
        }
    }
}

macro_rules! languages {
    ($($variant:ident => $code:literal),+ $(,)?) => {
        /// Language of the `description` and city name fields.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Language {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl Language {
            pub fn code(&self) -> &'static str {
                match self {
                    $(Language::$variant => $code,)+
                }
            }

            pub const fn all() -> &'static [Language] {
                &[$(Language::$variant,)+]
            }
        }

        impl TryFrom<&str> for Language {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value.to_lowercase().as_str() {
                    $($code => Ok(Language::$variant),)+
                    _ => Err(Error::invalid_value(format!("Unknown language code '{value}'"))),
                }
            }
        }
    };
}

languages! {
    Afrikaans => "af",
    Albanian => "al",
    Arabic => "ar",
    Azerbaijani => "az",
    Bulgarian => "bg",
    Catalan => "ca",
    Czech => "cz",
    Danish => "da",
    German => "de",
    Greek => "el",
    English => "en",
    Basque => "eu",
    Persian => "fa",
    Finnish => "fi",
    French => "fr",
    Galician => "gl",
    Hebrew => "he",
    Hindi => "hi",
    Croatian => "hr",
    Hungarian => "hu",
    Indonesian => "id",
    Italian => "it",
    Japanese => "ja",
    Korean => "kr",
    Latvian => "la",
    Lithuanian => "lt",
    Macedonian => "mk",
    Norwegian => "no",
    Dutch => "nl",
    Polish => "pl",
    Portuguese => "pt",
    PortugueseBrazil => "pt_br",
    Romanian => "ro",
    Russian => "ru",
    Swedish => "sv",
    Slovak => "sk",
    Slovenian => "sl",
    Spanish => "es",
    Serbian => "sr",
    Thai => "th",
    Turkish => "tr",
    Ukrainian => "uk",
    Vietnamese => "vi",
    ChineseSimplified => "zh_cn",
    ChineseTraditional => "zh_tw",
    Zulu => "zu",
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_as_str_roundtrip() {
        for units in UnitSystem::all() {
            let parsed = UnitSystem::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn standard_units_are_not_sent() {
        assert_eq!(UnitSystem::Standard.query_value(), None);
        assert_eq!(UnitSystem::Metric.query_value(), Some("metric"));
        assert_eq!(UnitSystem::Imperial.query_value(), Some("imperial"));
    }

    #[test]
    fn unknown_unit_system_error() {
        let err = UnitSystem::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn temperature_conversions() {
        let k = TemperatureUnit::Kelvin;
        assert!((k.convert(273.15, TemperatureUnit::Celsius)).abs() < 1e-9);
        assert!((k.convert(373.15, TemperatureUnit::Fahrenheit) - 212.0).abs() < 1e-9);
        assert!((TemperatureUnit::Fahrenheit.convert(32.0, TemperatureUnit::Celsius)).abs() < 1e-9);
        let c = TemperatureUnit::Celsius;
        assert!((c.convert(-40.0, TemperatureUnit::Fahrenheit) + 40.0).abs() < 1e-9);
    }

    #[test]
    fn wind_speed_conversions() {
        let mph = WindSpeedUnit::MetersPerSecond.convert(10.0, WindSpeedUnit::MilesPerHour);
        assert!((mph - 22.369_362_9).abs() < 1e-6);

        let back = WindSpeedUnit::MilesPerHour.convert(mph, WindSpeedUnit::MetersPerSecond);
        assert!((back - 10.0).abs() < 1e-9);
    }

    #[test]
    fn language_codes_parse() {
        assert_eq!(Language::try_from("pt_BR").unwrap(), Language::PortugueseBrazil);
        assert_eq!(Language::English.code(), "en");
        for lang in Language::all() {
            assert_eq!(Language::try_from(lang.code()).unwrap(), *lang);
        }
        assert!(Language::try_from("xx").is_err());
    }
}
