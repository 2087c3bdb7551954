use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::fmt;

use crate::model::common::{
    AtmosphericPressure, Clouds, Coordinate, Humidity, Rain, Snow, Temperature, Wind, WeatherState,
};
use crate::model::daily::DailyTemperature;
use crate::model::units::UnitSystem;

/// Parts of the one call response that can be left out with `exclude`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OneCallPart {
    Current,
    Minutely,
    Hourly,
    Daily,
    Alerts,
}

impl OneCallPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            OneCallPart::Current => "current",
            OneCallPart::Minutely => "minutely",
            OneCallPart::Hourly => "hourly",
            OneCallPart::Daily => "daily",
            OneCallPart::Alerts => "alerts",
        }
    }
}

impl std::str::FromStr for OneCallPart {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" => Ok(OneCallPart::Current),
            "minutely" => Ok(OneCallPart::Minutely),
            "hourly" => Ok(OneCallPart::Hourly),
            "daily" => Ok(OneCallPart::Daily),
            "alerts" => Ok(OneCallPart::Alerts),
            _ => Err(crate::error::Error::invalid_value(format!("Unknown one call part '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OneCallCurrent {
    pub forecast_time: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub state: Option<WeatherState>,
    pub temperature: Temperature,
    pub pressure: AtmosphericPressure,
    pub humidity: Humidity,
    pub dew_point: Option<f64>,
    pub uv_index: Option<f64>,
    pub clouds: Option<Clouds>,
    pub visibility: Option<u32>,
    pub wind: Option<Wind>,
    pub rain: Option<Rain>,
    pub snow: Option<Snow>,
}

impl fmt::Display for OneCallCurrent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.forecast_time.format("%Y-%m-%d %H:%M"))?;
        if let Some(state) = &self.state {
            write!(f, "{state}, ")?;
        }
        write!(f, "{}, {}", self.temperature, self.humidity)?;
        if let Some(wind) = &self.wind {
            write!(f, ", {wind}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinutelyForecast {
    pub forecast_time: DateTime<Utc>,
    /// mm/h
    pub precipitation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecast {
    pub forecast_time: DateTime<Utc>,
    pub state: Option<WeatherState>,
    pub temperature: Temperature,
    pub pressure: AtmosphericPressure,
    pub humidity: Humidity,
    pub dew_point: Option<f64>,
    pub uv_index: Option<f64>,
    pub clouds: Option<Clouds>,
    pub visibility: Option<u32>,
    pub wind: Option<Wind>,
    pub precipitation_probability: Option<f64>,
    pub rain: Option<Rain>,
    pub snow: Option<Snow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OneCallDaily {
    pub forecast_time: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub moonrise: Option<DateTime<Utc>>,
    pub moonset: Option<DateTime<Utc>>,
    /// 0 and 1 are new moon, 0.5 is full moon.
    pub moon_phase: Option<f64>,
    pub summary: Option<String>,
    pub state: Option<WeatherState>,
    pub temperature: DailyTemperature,
    pub pressure: AtmosphericPressure,
    pub humidity: Humidity,
    pub dew_point: Option<f64>,
    pub wind: Option<Wind>,
    pub clouds: Option<Clouds>,
    pub uv_index: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub rain: Option<f64>,
    pub snow: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub sender_name: String,
    pub event: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub tags: Vec<String>,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} ({} .. {})", self.event, self.sender_name, self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OneCallWeather {
    pub coordinate: Coordinate,
    pub timezone: String,
    pub timezone_offset: FixedOffset,
    pub current: Option<OneCallCurrent>,
    pub minutely: Vec<MinutelyForecast>,
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<OneCallDaily>,
    pub alerts: Vec<Alert>,
}

/// Response of the `timemachine` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OneCallHistorical {
    pub coordinate: Coordinate,
    pub timezone: String,
    pub timezone_offset: FixedOffset,
    pub data: Vec<OneCallCurrent>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummaryTemperature {
    pub min: f64,
    pub max: f64,
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
    pub night: f64,
}

/// Aggregated values for one calendar day (`day_summary`).
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub coordinate: Coordinate,
    pub timezone_offset: String,
    pub date: NaiveDate,
    pub units: UnitSystem,
    pub cloud_cover_afternoon: Option<f64>,
    pub humidity_afternoon: Option<f64>,
    pub precipitation_total: Option<f64>,
    pub pressure_afternoon: Option<f64>,
    pub temperature: DaySummaryTemperature,
    pub max_wind_speed: Option<f64>,
    pub max_wind_direction: Option<f64>,
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.units.temperature_unit();
        write!(
            f,
            "{} (UTC{}): min {:.1} {unit}, max {:.1} {unit}",
            self.date, self.timezone_offset, self.temperature.min, self.temperature.max
        )?;
        if let Some(total) = self.precipitation_total {
            write!(f, ", precipitation {total} mm")?;
        }
        Ok(())
    }
}

/// Human readable summary produced by the `overview` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherOverview {
    pub coordinate: Coordinate,
    pub timezone_offset: String,
    pub date: NaiveDate,
    pub units: UnitSystem,
    pub overview: String,
}

impl fmt::Display for WeatherOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date, self.overview)
    }
}
