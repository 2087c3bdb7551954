use chrono::{DateTime, Utc};
use std::fmt;

use crate::model::common::{AtmosphericPressure, Clouds, Humidity, Location, Wind, WeatherState};
use crate::model::units::TemperatureUnit;

/// Temperatures across the parts of one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTemperature {
    pub morning: f64,
    pub day: f64,
    pub evening: f64,
    pub night: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub morning_feels_like: Option<f64>,
    pub day_feels_like: Option<f64>,
    pub evening_feels_like: Option<f64>,
    pub night_feels_like: Option<f64>,
    pub unit: TemperatureUnit,
}

impl DailyTemperature {
    pub fn to_unit(&self, unit: TemperatureUnit) -> DailyTemperature {
        let convert = |v: f64| self.unit.convert(v, unit);
        DailyTemperature {
            morning: convert(self.morning),
            day: convert(self.day),
            evening: convert(self.evening),
            night: convert(self.night),
            min: self.min.map(convert),
            max: self.max.map(convert),
            morning_feels_like: self.morning_feels_like.map(convert),
            day_feels_like: self.day_feels_like.map(convert),
            evening_feels_like: self.evening_feels_like.map(convert),
            night_feels_like: self.night_feels_like.map(convert),
            unit,
        }
    }
}

impl fmt::Display for DailyTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit;
        write!(
            f,
            "Morning: {:.1} {unit}, Day: {:.1} {unit}, Evening: {:.1} {unit}, Night: {:.1} {unit}",
            self.morning, self.day, self.evening, self.night
        )?;
        if let (Some(min), Some(max)) = (self.min, self.max) {
            write!(f, " (min {min:.1}, max {max:.1})")?;
        }
        Ok(())
    }
}

/// One day of the 16 day daily or the 30 day climatic forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeather {
    pub forecast_time: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub state: Option<WeatherState>,
    pub temperature: DailyTemperature,
    pub pressure: AtmosphericPressure,
    pub humidity: Humidity,
    pub wind: Option<Wind>,
    pub clouds: Option<Clouds>,
    /// Precipitation volume for the whole day, mm.
    pub rain: Option<f64>,
    pub snow: Option<f64>,
    pub precipitation_probability: Option<f64>,
}

impl fmt::Display for DailyWeather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.forecast_time.format("%Y-%m-%d"))?;
        if let Some(state) = &self.state {
            write!(f, "{state}, ")?;
        }
        write!(f, "{}", self.temperature)?;
        if let Some(rain) = self.rain {
            write!(f, ", Rain: {rain} mm")?;
        }
        if let Some(snow) = self.snow {
            write!(f, ", Snow: {snow} mm")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub location: Location,
    pub items: Vec<DailyWeather>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClimaticForecast {
    pub location: Location,
    pub items: Vec<DailyWeather>,
}
