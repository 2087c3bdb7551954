use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

use crate::error::{Error, Result};
use crate::model::units::{TemperatureUnit, WindSpeedUnit};

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    if value.is_nan() || value < min || value > max {
        return Err(Error::invalid_value(format!(
            "{name} must be in range [{min}, {max}], got {value}"
        )));
    }
    Ok(value)
}

fn check_non_negative(name: &str, value: f64) -> Result<f64> {
    if value.is_nan() || value < 0.0 {
        return Err(Error::invalid_value(format!("{name} must not be negative, got {value}")));
    }
    Ok(value)
}

fn check_optional_non_negative(name: &str, value: Option<f64>) -> Result<Option<f64>> {
    value.map(|v| check_non_negative(name, v)).transpose()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self {
            latitude: check_range("Latitude", latitude, -90.0, 90.0)?,
            longitude: check_range("Longitude", longitude, -180.0, 180.0)?,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn set_latitude(&mut self, latitude: f64) -> Result<()> {
        self.latitude = check_range("Latitude", latitude, -90.0, 90.0)?;
        Ok(())
    }

    pub fn set_longitude(&mut self, longitude: f64) -> Result<()> {
        self.longitude = check_range("Longitude", longitude, -180.0, 180.0)?;
        Ok(())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Latitude: {}, Longitude: {}", self.latitude, self.longitude)
    }
}

/// Bounding box for the "cities within a rectangle" lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateRectangle {
    longitude_left: f64,
    latitude_bottom: f64,
    longitude_right: f64,
    latitude_top: f64,
}

impl CoordinateRectangle {
    pub fn new(
        longitude_left: f64,
        latitude_bottom: f64,
        longitude_right: f64,
        latitude_top: f64,
    ) -> Result<Self> {
        check_range("Left longitude", longitude_left, -180.0, 180.0)?;
        check_range("Right longitude", longitude_right, -180.0, 180.0)?;
        check_range("Bottom latitude", latitude_bottom, -90.0, 90.0)?;
        check_range("Top latitude", latitude_top, -90.0, 90.0)?;

        if longitude_left > longitude_right {
            return Err(Error::invalid_value("Left longitude must not exceed right longitude"));
        }
        if latitude_bottom > latitude_top {
            return Err(Error::invalid_value("Bottom latitude must not exceed top latitude"));
        }

        Ok(Self { longitude_left, latitude_bottom, longitude_right, latitude_top })
    }

    pub fn longitude_left(&self) -> f64 {
        self.longitude_left
    }

    pub fn latitude_bottom(&self) -> f64 {
        self.latitude_bottom
    }

    pub fn longitude_right(&self) -> f64 {
        self.longitude_right
    }

    pub fn latitude_top(&self) -> f64 {
        self.latitude_top
    }

    pub fn set_longitude_left(&mut self, longitude_left: f64) -> Result<()> {
        *self = Self::new(
            longitude_left,
            self.latitude_bottom,
            self.longitude_right,
            self.latitude_top,
        )?;
        Ok(())
    }

    pub fn set_latitude_bottom(&mut self, latitude_bottom: f64) -> Result<()> {
        *self = Self::new(
            self.longitude_left,
            latitude_bottom,
            self.longitude_right,
            self.latitude_top,
        )?;
        Ok(())
    }

    pub fn set_longitude_right(&mut self, longitude_right: f64) -> Result<()> {
        *self = Self::new(
            self.longitude_left,
            self.latitude_bottom,
            longitude_right,
            self.latitude_top,
        )?;
        Ok(())
    }

    pub fn set_latitude_top(&mut self, latitude_top: f64) -> Result<()> {
        *self = Self::new(
            self.longitude_left,
            self.latitude_bottom,
            self.longitude_right,
            latitude_top,
        )?;
        Ok(())
    }

    /// `lon-left,lat-bottom,lon-right,lat-top` as used in `bbox`.
    pub fn format_as_bbox(&self) -> String {
        format!(
            "{},{},{},{}",
            self.longitude_left, self.latitude_bottom, self.longitude_right, self.latitude_top
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    value: f64,
    feels_like: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    unit: TemperatureUnit,
}

fn check_temperature(name: &str, value: f64, unit: TemperatureUnit) -> Result<f64> {
    if value.is_nan() || unit.convert(value, TemperatureUnit::Kelvin) < 0.0 {
        return Err(Error::invalid_value(format!(
            "{name} must not be below absolute zero, got {value} {unit}"
        )));
    }
    Ok(value)
}

impl Temperature {
    pub fn new(value: f64, unit: TemperatureUnit) -> Result<Self> {
        Ok(Self {
            value: check_temperature("Temperature", value, unit)?,
            feels_like: None,
            min: None,
            max: None,
            unit,
        })
    }

    pub fn with_feels_like(mut self, feels_like: Option<f64>) -> Result<Self> {
        self.set_feels_like(feels_like)?;
        Ok(self)
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Result<Self> {
        self.set_min(min)?;
        self.set_max(max)?;
        Ok(self)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn feels_like(&self) -> Option<f64> {
        self.feels_like
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn set_value(&mut self, value: f64) -> Result<()> {
        self.value = check_temperature("Temperature", value, self.unit)?;
        Ok(())
    }

    pub fn set_feels_like(&mut self, feels_like: Option<f64>) -> Result<()> {
        self.feels_like =
            feels_like.map(|v| check_temperature("Feels like", v, self.unit)).transpose()?;
        Ok(())
    }

    pub fn set_min(&mut self, min: Option<f64>) -> Result<()> {
        self.min = min.map(|v| check_temperature("Minimum", v, self.unit)).transpose()?;
        Ok(())
    }

    pub fn set_max(&mut self, max: Option<f64>) -> Result<()> {
        self.max = max.map(|v| check_temperature("Maximum", v, self.unit)).transpose()?;
        Ok(())
    }

    /// Same temperature expressed in another unit; every field is converted.
    pub fn to_unit(&self, unit: TemperatureUnit) -> Temperature {
        let convert = |v: f64| self.unit.convert(v, unit);
        Temperature {
            value: convert(self.value),
            feels_like: self.feels_like.map(convert),
            min: self.min.map(convert),
            max: self.max.map(convert),
            unit,
        }
    }

    pub fn kelvin(&self) -> f64 {
        self.unit.convert(self.value, TemperatureUnit::Kelvin)
    }

    pub fn celsius(&self) -> f64 {
        self.unit.convert(self.value, TemperatureUnit::Celsius)
    }

    pub fn fahrenheit(&self) -> f64 {
        self.unit.convert(self.value, TemperatureUnit::Fahrenheit)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Temperature: {:.1} {}", self.value, self.unit)?;
        if let Some(feels_like) = self.feels_like {
            write!(f, ", Feels like: {:.1} {}", feels_like, self.unit)?;
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            write!(f, " (min {:.1}, max {:.1})", min, max)?;
        }
        Ok(())
    }
}

const HPA_TO_MM_HG: f64 = 0.750_061_683;
const HPA_TO_IN_HG: f64 = 0.029_529_983;

/// Atmospheric pressure in hPa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericPressure {
    value: f64,
    sea_level: Option<f64>,
    ground_level: Option<f64>,
}

impl AtmosphericPressure {
    pub fn new(value: f64) -> Result<Self> {
        Ok(Self {
            value: check_non_negative("Pressure", value)?,
            sea_level: None,
            ground_level: None,
        })
    }

    pub fn with_levels(
        mut self,
        sea_level: Option<f64>,
        ground_level: Option<f64>,
    ) -> Result<Self> {
        self.set_sea_level(sea_level)?;
        self.set_ground_level(ground_level)?;
        Ok(self)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn sea_level(&self) -> Option<f64> {
        self.sea_level
    }

    pub fn ground_level(&self) -> Option<f64> {
        self.ground_level
    }

    pub fn set_value(&mut self, value: f64) -> Result<()> {
        self.value = check_non_negative("Pressure", value)?;
        Ok(())
    }

    pub fn set_sea_level(&mut self, sea_level: Option<f64>) -> Result<()> {
        self.sea_level = check_optional_non_negative("Sea level pressure", sea_level)?;
        Ok(())
    }

    pub fn set_ground_level(&mut self, ground_level: Option<f64>) -> Result<()> {
        self.ground_level = check_optional_non_negative("Ground level pressure", ground_level)?;
        Ok(())
    }

    pub fn unit(&self) -> &'static str {
        "hPa"
    }

    pub fn in_mm_hg(&self) -> f64 {
        self.value * HPA_TO_MM_HG
    }

    pub fn in_in_hg(&self) -> f64 {
        self.value * HPA_TO_IN_HG
    }
}

impl fmt::Display for AtmosphericPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pressure: {} hPa", self.value)?;
        if let Some(sea_level) = self.sea_level {
            write!(f, ", Sea level: {} hPa", sea_level)?;
        }
        if let Some(ground_level) = self.ground_level {
            write!(f, ", Ground level: {} hPa", ground_level)?;
        }
        Ok(())
    }
}

/// Relative humidity, percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Humidity {
    value: u8,
}

impl Humidity {
    pub fn new(value: u8) -> Result<Self> {
        if value > 100 {
            return Err(Error::invalid_value(format!(
                "Humidity must be in range [0, 100], got {value}"
            )));
        }
        Ok(Self { value })
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn set_value(&mut self, value: u8) -> Result<()> {
        *self = Humidity::new(value)?;
        Ok(())
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Humidity: {}%", self.value)
    }
}

/// Cloudiness, percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clouds {
    value: u8,
}

impl Clouds {
    pub fn new(value: u8) -> Result<Self> {
        if value > 100 {
            return Err(Error::invalid_value(format!(
                "Cloudiness must be in range [0, 100], got {value}"
            )));
        }
        Ok(Self { value })
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn set_value(&mut self, value: u8) -> Result<()> {
        *self = Clouds::new(value)?;
        Ok(())
    }
}

impl fmt::Display for Clouds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clouds: {}%", self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    speed: f64,
    degrees: Option<f64>,
    gust: Option<f64>,
    unit: WindSpeedUnit,
}

impl Wind {
    pub fn new(speed: f64, unit: WindSpeedUnit) -> Result<Self> {
        Ok(Self {
            speed: check_non_negative("Wind speed", speed)?,
            degrees: None,
            gust: None,
            unit,
        })
    }

    pub fn with_degrees(mut self, degrees: Option<f64>) -> Result<Self> {
        self.set_degrees(degrees)?;
        Ok(self)
    }

    pub fn with_gust(mut self, gust: Option<f64>) -> Result<Self> {
        self.set_gust(gust)?;
        Ok(self)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn degrees(&self) -> Option<f64> {
        self.degrees
    }

    pub fn gust(&self) -> Option<f64> {
        self.gust
    }

    pub fn unit(&self) -> WindSpeedUnit {
        self.unit
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        self.speed = check_non_negative("Wind speed", speed)?;
        Ok(())
    }

    pub fn set_degrees(&mut self, degrees: Option<f64>) -> Result<()> {
        self.degrees = degrees.map(|d| check_range("Wind direction", d, 0.0, 360.0)).transpose()?;
        Ok(())
    }

    pub fn set_gust(&mut self, gust: Option<f64>) -> Result<()> {
        self.gust = check_optional_non_negative("Wind gust", gust)?;
        Ok(())
    }

    pub fn to_unit(&self, unit: WindSpeedUnit) -> Wind {
        Wind {
            speed: self.unit.convert(self.speed, unit),
            degrees: self.degrees,
            gust: self.gust.map(|g| self.unit.convert(g, unit)),
            unit,
        }
    }

    /// 16-point compass name of the direction the wind blows from.
    pub fn direction(&self) -> Option<&'static str> {
        const POINTS: [&str; 16] = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
            "NW", "NNW",
        ];
        self.degrees.map(|d| {
            let index = ((d / 22.5).round() as usize) % POINTS.len();
            POINTS[index]
        })
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wind speed: {} {}", self.speed, self.unit)?;
        if let Some(degrees) = self.degrees {
            write!(f, ", Direction: {} degrees", degrees)?;
        }
        if let Some(gust) = self.gust {
            write!(f, ", Gust: {} {}", gust, self.unit)?;
        }
        Ok(())
    }
}

/// Precipitation volume in mm over the last hour and/or the last three hours.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Precipitation {
    one_hour_level: Option<f64>,
    three_hour_level: Option<f64>,
}

impl Precipitation {
    pub fn new(one_hour_level: Option<f64>, three_hour_level: Option<f64>) -> Result<Self> {
        Ok(Self {
            one_hour_level: check_optional_non_negative("One hour level", one_hour_level)?,
            three_hour_level: check_optional_non_negative("Three hour level", three_hour_level)?,
        })
    }

    pub fn one_hour_level(&self) -> Option<f64> {
        self.one_hour_level
    }

    pub fn three_hour_level(&self) -> Option<f64> {
        self.three_hour_level
    }

    pub fn set_one_hour_level(&mut self, level: Option<f64>) -> Result<()> {
        self.one_hour_level = check_optional_non_negative("One hour level", level)?;
        Ok(())
    }

    pub fn set_three_hour_level(&mut self, level: Option<f64>) -> Result<()> {
        self.three_hour_level = check_optional_non_negative("Three hour level", level)?;
        Ok(())
    }

    /// Average intensity in mm/h, preferring the one hour window.
    pub fn intensity_mm_per_hour(&self) -> Option<f64> {
        self.one_hour_level.or(self.three_hour_level.map(|level| level / 3.0))
    }

    pub fn unit(&self) -> &'static str {
        "mm"
    }
}

impl fmt::Display for Precipitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(level) = self.one_hour_level {
            parts.push(format!("1h: {level} mm"));
        }
        if let Some(level) = self.three_hour_level {
            parts.push(format!("3h: {level} mm"));
        }
        if parts.is_empty() {
            f.write_str("no data")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

pub type Rain = Precipitation;
pub type Snow = Precipitation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherGroup {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

/// One entry of the `weather` array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeatherState {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub icon_id: Option<String>,
}

impl WeatherState {
    pub fn icon_url(&self) -> Option<String> {
        self.icon_id
            .as_ref()
            .map(|icon| format!("https://openweathermap.org/img/wn/{icon}@2x.png"))
    }

    pub fn group(&self) -> WeatherGroup {
        match self.id {
            200..=299 => WeatherGroup::Thunderstorm,
            300..=399 => WeatherGroup::Drizzle,
            500..=599 => WeatherGroup::Rain,
            600..=699 => WeatherGroup::Snow,
            700..=799 => WeatherGroup::Atmosphere,
            800 => WeatherGroup::Clear,
            801..=899 => WeatherGroup::Clouds,
            _ => WeatherGroup::Unknown,
        }
    }
}

impl fmt::Display for WeatherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.description)
    }
}

/// Part of the day a forecast entry belongs to (`sys.pod`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayTime {
    Day,
    Night,
}

impl DayTime {
    pub fn from_pod(value: &str) -> Option<Self> {
        match value {
            "d" => Some(DayTime::Day),
            "n" => Some(DayTime::Night),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub id: Option<u64>,
    pub name: String,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub zone_offset: Option<FixedOffset>,
    pub coordinate: Option<Coordinate>,
    pub population: Option<u64>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(country) = &self.country_code {
            write!(f, ", {country}")?;
        }
        if let Some(coordinate) = &self.coordinate {
            write!(f, " ({:.2}, {:.2})", coordinate.latitude(), coordinate.longitude())?;
        }
        Ok(())
    }
}
