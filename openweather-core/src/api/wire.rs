use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{
    AtmosphericPressure, Clouds, Coordinate, DailyTemperature, Humidity, Location, Precipitation,
    Temperature, UnitSystem, WeatherState, Wind,
};

pub(crate) fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| Error::invalid_value(format!("Timestamp out of range: {ts}")))
}

pub(crate) fn optional_unix_to_utc(ts: Option<i64>) -> Result<Option<DateTime<Utc>>> {
    ts.map(unix_to_utc).transpose()
}

pub(crate) fn zone_offset(seconds: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(seconds)
        .ok_or_else(|| Error::invalid_value(format!("Timezone offset out of range: {seconds}")))
}

fn percent(name: &str, value: f64) -> Result<u8> {
    if !(0.0..=100.0).contains(&value) {
        return Err(Error::invalid_value(format!(
            "{name} must be in range [0, 100], got {value}"
        )));
    }
    Ok(value.round() as u8)
}

pub(crate) fn humidity(value: f64) -> Result<Humidity> {
    Humidity::new(percent("Humidity", value)?)
}

pub(crate) fn clouds(value: f64) -> Result<Clouds> {
    Clouds::new(percent("Cloudiness", value)?)
}

/// `coord` object. The bounding box endpoint capitalises the keys.
#[derive(Debug, Deserialize)]
pub(crate) struct WireCoord {
    #[serde(alias = "Lat")]
    pub lat: f64,
    #[serde(alias = "Lon")]
    pub lon: f64,
}

impl WireCoord {
    pub fn to_model(&self) -> Result<Coordinate> {
        Coordinate::new(self.lat, self.lon)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireWeatherState {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: Option<String>,
}

/// Only the first entry of the `weather` array is the primary condition.
pub(crate) fn first_state(states: Vec<WireWeatherState>) -> Option<WeatherState> {
    states.into_iter().next().map(|s| WeatherState {
        id: s.id,
        name: s.main,
        description: s.description,
        icon_id: s.icon,
    })
}

/// `main` object of the current weather and 3 hour / hourly forecast items.
#[derive(Debug, Deserialize)]
pub(crate) struct WireMain {
    pub temp: f64,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: f64,
    pub sea_level: Option<f64>,
    pub grnd_level: Option<f64>,
    pub humidity: f64,
}

impl WireMain {
    pub fn temperature(&self, units: UnitSystem) -> Result<Temperature> {
        Temperature::new(self.temp, units.temperature_unit())?
            .with_feels_like(self.feels_like)?
            .with_range(self.temp_min, self.temp_max)
    }

    pub fn pressure(&self) -> Result<AtmosphericPressure> {
        AtmosphericPressure::new(self.pressure)?.with_levels(self.sea_level, self.grnd_level)
    }

    pub fn humidity(&self) -> Result<Humidity> {
        humidity(self.humidity)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireWind {
    pub speed: f64,
    pub deg: Option<f64>,
    pub gust: Option<f64>,
}

impl WireWind {
    pub fn to_model(&self, units: UnitSystem) -> Result<Wind> {
        Wind::new(self.speed, units.wind_speed_unit())?.with_degrees(self.deg)?.with_gust(self.gust)
    }
}

/// Wind spread over top level fields (`speed`/`deg` or `wind_speed`/`wind_deg`).
pub(crate) fn flat_wind(
    speed: Option<f64>,
    degrees: Option<f64>,
    gust: Option<f64>,
    units: UnitSystem,
) -> Result<Option<Wind>> {
    let Some(speed) = speed else {
        return Ok(None);
    };
    Wind::new(speed, units.wind_speed_unit())?.with_degrees(degrees)?.with_gust(gust).map(Some)
}

/// `rain` / `snow` objects keyed by accumulation window.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WirePrecipitation {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h")]
    pub three_hour: Option<f64>,
}

impl WirePrecipitation {
    pub fn to_model(&self) -> Result<Option<Precipitation>> {
        if self.one_hour.is_none() && self.three_hour.is_none() {
            return Ok(None);
        }
        Precipitation::new(self.one_hour, self.three_hour).map(Some)
    }
}

pub(crate) fn precipitation(wire: Option<WirePrecipitation>) -> Result<Option<Precipitation>> {
    match wire {
        Some(p) => p.to_model(),
        None => Ok(None),
    }
}

/// Bare daily totals (`"rain": 0.5`).
pub(crate) fn day_total(name: &str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => {
            Err(Error::invalid_value(format!("{name} must not be negative, got {v}")))
        }
        other => Ok(other),
    }
}

pub(crate) fn probability(value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !(0.0..=1.0).contains(&v) => Err(Error::invalid_value(format!(
            "Precipitation probability must be in range [0, 1], got {v}"
        ))),
        other => Ok(other),
    }
}

/// `clouds` object; `today` in the bounding box endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct WireClouds {
    #[serde(alias = "today")]
    pub all: f64,
}

impl WireClouds {
    pub fn to_model(&self) -> Result<Clouds> {
        clouds(self.all)
    }
}

/// `city` object of the forecast responses.
#[derive(Debug, Deserialize)]
pub(crate) struct WireCity {
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    pub coord: Option<WireCoord>,
    pub country: Option<String>,
    pub population: Option<u64>,
    pub timezone: Option<i32>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

impl WireCity {
    pub fn to_model(&self) -> Result<Location> {
        Ok(Location {
            id: self.id,
            name: self.name.clone(),
            country_code: self.country.clone().filter(|c| !c.is_empty()),
            state: None,
            sunrise: optional_unix_to_utc(self.sunrise)?,
            sunset: optional_unix_to_utc(self.sunset)?,
            zone_offset: self.timezone.map(zone_offset).transpose()?,
            coordinate: self.coord.as_ref().map(WireCoord::to_model).transpose()?,
            population: self.population,
        })
    }
}

/// `temp` object of daily entries.
#[derive(Debug, Deserialize)]
pub(crate) struct WireDailyTemp {
    pub morn: f64,
    pub day: f64,
    pub eve: f64,
    pub night: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// `feels_like` object of daily entries.
#[derive(Debug, Deserialize)]
pub(crate) struct WireDailyFeelsLike {
    pub morn: Option<f64>,
    pub day: Option<f64>,
    pub eve: Option<f64>,
    pub night: Option<f64>,
}

pub(crate) fn daily_temperature(
    temp: &WireDailyTemp,
    feels_like: Option<&WireDailyFeelsLike>,
    units: UnitSystem,
) -> Result<DailyTemperature> {
    let unit = units.temperature_unit();
    let check = |v: f64| Temperature::new(v, unit).map(|t| t.value());
    let check_opt = |v: Option<f64>| v.map(check).transpose();

    Ok(DailyTemperature {
        morning: check(temp.morn)?,
        day: check(temp.day)?,
        evening: check(temp.eve)?,
        night: check(temp.night)?,
        min: check_opt(temp.min)?,
        max: check_opt(temp.max)?,
        morning_feels_like: check_opt(feels_like.and_then(|f| f.morn))?,
        day_feels_like: check_opt(feels_like.and_then(|f| f.day))?,
        evening_feels_like: check_opt(feels_like.and_then(|f| f.eve))?,
        night_feels_like: check_opt(feels_like.and_then(|f| f.night))?,
        unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TemperatureUnit, WindSpeedUnit};

    #[test]
    fn capitalised_coordinates_are_accepted() {
        let coord: WireCoord = serde_json::from_str(r#"{"Lon": 12.5, "Lat": 41.9}"#).unwrap();
        let coordinate = coord.to_model().unwrap();

        assert_eq!(coordinate.latitude(), 41.9);
        assert_eq!(coordinate.longitude(), 12.5);
    }

    #[test]
    fn precipitation_windows() {
        let rain: WirePrecipitation = serde_json::from_str(r#"{"3h": 1.5}"#).unwrap();
        let rain = rain.to_model().unwrap().unwrap();
        assert_eq!(rain.three_hour_level(), Some(1.5));
        assert_eq!(rain.one_hour_level(), None);

        let empty: WirePrecipitation = serde_json::from_str("{}").unwrap();
        assert!(empty.to_model().unwrap().is_none());
    }

    #[test]
    fn main_block_maps_units() {
        let main: WireMain = serde_json::from_str(
            r#"{"temp": 75.2, "feels_like": 74.0, "temp_min": 70.0, "temp_max": 80.1,
                "pressure": 1015, "humidity": 55}"#,
        )
        .unwrap();

        let temperature = main.temperature(UnitSystem::Imperial).unwrap();
        assert_eq!(temperature.unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(temperature.max(), Some(80.1));
        assert_eq!(main.humidity().unwrap().value(), 55);
        assert_eq!(main.pressure().unwrap().sea_level(), None);
    }

    #[test]
    fn flat_wind_requires_speed() {
        assert!(flat_wind(None, Some(10.0), None, UnitSystem::Metric).unwrap().is_none());

        let wind = flat_wind(Some(5.0), Some(10.0), None, UnitSystem::Imperial).unwrap().unwrap();
        assert_eq!(wind.unit(), WindSpeedUnit::MilesPerHour);
    }

    #[test]
    fn out_of_range_values_fail_mapping() {
        assert!(humidity(101.0).is_err());
        assert!(clouds(-1.0).is_err());
        assert!(probability(Some(1.2)).is_err());
        assert!(day_total("Rain", Some(-0.5)).is_err());
        assert!(unix_to_utc(i64::MAX).is_err());
    }
}
