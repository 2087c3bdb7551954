use chrono::{DateTime, Utc};
use std::fmt;

use crate::model::common::{
    AtmosphericPressure, Clouds, DayTime, Humidity, Location, Rain, Snow, Temperature, Wind,
    WeatherState,
};

/// Current conditions at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub calculated_on: DateTime<Utc>,
    pub state: Option<WeatherState>,
    pub temperature: Temperature,
    pub pressure: AtmosphericPressure,
    pub humidity: Humidity,
    pub wind: Option<Wind>,
    pub rain: Option<Rain>,
    pub snow: Option<Snow>,
    pub clouds: Option<Clouds>,
    /// Meters; the API caps this at 10 km.
    pub visibility: Option<u32>,
    pub location: Location,
    pub base: Option<String>,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Location: {}", self.location)?;
        if let Some(state) = &self.state {
            writeln!(f, "Weather: {state}")?;
        }
        writeln!(f, "{}", self.temperature)?;
        writeln!(f, "{}", self.pressure)?;
        writeln!(f, "{}", self.humidity)?;
        if let Some(wind) = &self.wind {
            writeln!(f, "{wind}")?;
        }
        if let Some(rain) = &self.rain {
            writeln!(f, "Rain: {rain}")?;
        }
        if let Some(snow) = &self.snow {
            writeln!(f, "Snow: {snow}")?;
        }
        if let Some(clouds) = &self.clouds {
            writeln!(f, "{clouds}")?;
        }
        write!(f, "Calculated on: {}", self.calculated_on)
    }
}

/// Forecast produced by the 5 day / 3 hour and the 4 day hourly endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub location: Location,
    pub items: Vec<WeatherForecast>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherForecast {
    pub forecast_time: DateTime<Utc>,
    pub state: Option<WeatherState>,
    pub temperature: Temperature,
    pub pressure: AtmosphericPressure,
    pub humidity: Humidity,
    pub wind: Option<Wind>,
    pub rain: Option<Rain>,
    pub snow: Option<Snow>,
    pub clouds: Option<Clouds>,
    pub visibility: Option<u32>,
    /// 0.0 ..= 1.0
    pub precipitation_probability: Option<f64>,
    pub day_time: Option<DayTime>,
    pub forecast_time_text: Option<String>,
}

impl fmt::Display for WeatherForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.forecast_time.format("%Y-%m-%d %H:%M"))?;
        if let Some(state) = &self.state {
            write!(f, "{state}, ")?;
        }
        write!(f, "{}", self.temperature)?;
        if let Some(pop) = self.precipitation_probability {
            write!(f, ", Precipitation probability: {:.0}%", pop * 100.0)?;
        }
        Ok(())
    }
}
