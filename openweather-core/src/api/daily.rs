use serde::Deserialize;

use crate::api::forecast::{count_params, validate_count};
use crate::api::wire::{
    WireCity, WireDailyFeelsLike, WireDailyTemp, WireWeatherState, clouds, daily_temperature,
    day_total, first_state, flat_wind, humidity, optional_unix_to_utc, probability, unix_to_utc,
};
use crate::api::{FromLocation, LocationQuery};
use crate::error::Result;
use crate::model::{
    AtmosphericPressure, ClimaticForecast, DailyForecast, DailyWeather, Location, UnitSystem,
};
use crate::request::{ApiRequest, Endpoint, Host, Localized, XmlMode};

pub const MAX_DAILY_ENTRIES: u8 = 16;
pub const MAX_CLIMATIC_ENTRIES: u8 = 30;

/// `data/2.5/forecast/daily`: up to 16 days.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastEndpoint {
    location: LocationQuery,
    count: Option<u8>,
}

/// `data/2.5/forecast/climate` on the pro host: up to 30 days.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimaticForecastEndpoint {
    location: LocationQuery,
    count: Option<u8>,
}

impl FromLocation for DailyForecastEndpoint {
    fn from_location(location: LocationQuery) -> Self {
        Self { location, count: None }
    }
}

impl Endpoint for DailyForecastEndpoint {
    type Output = DailyForecast;

    fn path(&self) -> &'static str {
        "data/2.5/forecast/daily"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        count_params(&self.location, self.count)
    }

    fn validate(&self) -> Result<()> {
        self.location.validate()?;
        validate_count(self.count, MAX_DAILY_ENTRIES)
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<DailyForecast> {
        let (location, items) = parse_days(body, units)?;
        Ok(DailyForecast { location, items })
    }
}

impl Localized for DailyForecastEndpoint {}
impl XmlMode for DailyForecastEndpoint {}

impl FromLocation for ClimaticForecastEndpoint {
    fn from_location(location: LocationQuery) -> Self {
        Self { location, count: None }
    }
}

impl Endpoint for ClimaticForecastEndpoint {
    type Output = ClimaticForecast;

    fn host(&self) -> Host {
        Host::Pro
    }

    fn path(&self) -> &'static str {
        "data/2.5/forecast/climate"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        count_params(&self.location, self.count)
    }

    fn validate(&self) -> Result<()> {
        self.location.validate()?;
        validate_count(self.count, MAX_CLIMATIC_ENTRIES)
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<ClimaticForecast> {
        let (location, items) = parse_days(body, units)?;
        Ok(ClimaticForecast { location, items })
    }
}

impl Localized for ClimaticForecastEndpoint {}
impl XmlMode for ClimaticForecastEndpoint {}

impl ApiRequest<'_, DailyForecastEndpoint> {
    /// Number of days, 1 to 16.
    pub fn days(mut self, count: u8) -> Self {
        self.endpoint.count = Some(count);
        self
    }
}

impl ApiRequest<'_, ClimaticForecastEndpoint> {
    /// Number of days, 1 to 30.
    pub fn days(mut self, count: u8) -> Self {
        self.endpoint.count = Some(count);
        self
    }
}

/// A day entry: wind is flattened into `speed`/`deg`/`gust` and rain/snow are bare totals.
#[derive(Debug, Deserialize)]
struct WireDay {
    dt: i64,
    sunrise: Option<i64>,
    sunset: Option<i64>,
    temp: WireDailyTemp,
    feels_like: Option<WireDailyFeelsLike>,
    pressure: f64,
    humidity: f64,
    #[serde(default)]
    weather: Vec<WireWeatherState>,
    speed: Option<f64>,
    deg: Option<f64>,
    gust: Option<f64>,
    clouds: Option<f64>,
    pop: Option<f64>,
    rain: Option<f64>,
    snow: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireDays {
    city: WireCity,
    #[serde(default)]
    list: Vec<WireDay>,
}

fn parse_days(body: &str, units: UnitSystem) -> Result<(Location, Vec<DailyWeather>)> {
    let wire: WireDays = serde_json::from_str(body)?;

    let items = wire
        .list
        .into_iter()
        .map(|day| day.into_model(units))
        .collect::<Result<Vec<_>>>()?;

    Ok((wire.city.to_model()?, items))
}

impl WireDay {
    fn into_model(self, units: UnitSystem) -> Result<DailyWeather> {
        Ok(DailyWeather {
            forecast_time: unix_to_utc(self.dt)?,
            sunrise: optional_unix_to_utc(self.sunrise)?,
            sunset: optional_unix_to_utc(self.sunset)?,
            temperature: daily_temperature(&self.temp, self.feels_like.as_ref(), units)?,
            pressure: AtmosphericPressure::new(self.pressure)?,
            humidity: humidity(self.humidity)?,
            wind: flat_wind(self.speed, self.deg, self.gust, units)?,
            clouds: self.clouds.map(clouds).transpose()?,
            rain: day_total("Rain", self.rain)?,
            snow: day_total("Snow", self.snow)?,
            precipitation_probability: probability(self.pop)?,
            state: first_state(self.weather),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::canned_client;
    use crate::model::{TemperatureUnit, WindSpeedUnit};

    const DAILY: &str = r#"{
        "city": {"id": 3163858, "name": "Zocca", "coord": {"lon": 10.99, "lat": 44.34},
                 "country": "IT", "population": 4593, "timezone": 7200},
        "cod": "200", "message": 0.0593, "cnt": 2,
        "list": [
            {"dt": 1661857200, "sunrise": 1661834187, "sunset": 1661882248,
             "temp": {"day": 299.66, "min": 288.93, "max": 299.66, "night": 290.31, "eve": 297.16, "morn": 288.93},
             "feels_like": {"day": 299.66, "night": 290.3, "eve": 297.1, "morn": 288.73},
             "pressure": 1017, "humidity": 44,
             "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
             "speed": 2.7, "deg": 209, "gust": 3.58, "clouds": 53, "pop": 0.7, "rain": 2.51},
            {"dt": 1661943600, "sunrise": 1661920656, "sunset": 1661968542,
             "temp": {"day": 295.76, "min": 287.73, "max": 295.76, "night": 289.37, "eve": 292.76, "morn": 287.73},
             "pressure": 1014, "humidity": 60,
             "weather": [],
             "speed": 2.29, "deg": 215, "clouds": 100, "pop": 0.2}
        ]
    }"#;

    const CLIMATIC: &str = r#"{
        "cod": "200",
        "city": {"id": 2643743, "name": "London", "coord": {"lon": -0.1258, "lat": 51.5085}, "country": "GB"},
        "message": 0.353, "list": [
            {"dt": 1594382400, "sunrise": 1594353335, "sunset": 1594412149,
             "temp": {"day": 19.41, "min": 11.41, "max": 20.55, "night": 11.41, "eve": 17.9, "morn": 13.24},
             "feels_like": {"day": 16.7, "night": 9.5, "eve": 15.8, "morn": 12.0},
             "pressure": 1025, "humidity": 52,
             "weather": [{"id": 600, "main": "Snow", "description": "light snow", "icon": "13d"}],
             "speed": 5.91, "deg": 254, "clouds": 98, "snow": 0.4}
        ]
    }"#;

    #[test]
    fn daily_url_with_days() {
        let (client, _) = canned_client(DAILY);

        let url = client.daily_forecast().by_city_name("Zocca").days(7).url().unwrap();
        assert_eq!(url.path(), "/data/2.5/forecast/daily");
        assert_eq!(url.query(), Some("q=Zocca&cnt=7&appid=KEY"));
        assert!(client.daily_forecast().by_city_name("Zocca").days(17).url().is_err());
    }

    #[test]
    fn climatic_url_uses_pro_host() {
        let (client, _) = canned_client(CLIMATIC);

        let url = client.climatic_forecast().by_zip_code("E14", "GB").days(30).url().unwrap();
        assert_eq!(url.host_str(), Some("pro.openweathermap.org"));
        assert_eq!(url.query(), Some("zip=E14%2CGB&cnt=30&appid=KEY"));
        assert!(client.climatic_forecast().by_city_id(1).days(0).url().is_err());
    }

    #[test]
    fn maps_daily_forecast() {
        let forecast = DailyForecastEndpoint::from_location(LocationQuery::CityId(1))
            .parse(DAILY, UnitSystem::Standard)
            .unwrap();

        assert_eq!(forecast.location.name, "Zocca");
        assert_eq!(forecast.location.zone_offset.map(|o| o.local_minus_utc()), Some(7200));
        assert_eq!(forecast.items.len(), 2);

        let first = &forecast.items[0];
        assert_eq!(first.temperature.unit, TemperatureUnit::Kelvin);
        assert_eq!(first.temperature.morning, 288.93);
        assert_eq!(first.temperature.max, Some(299.66));
        assert_eq!(first.temperature.night_feels_like, Some(290.3));
        assert_eq!(first.rain, Some(2.51));
        assert_eq!(first.snow, None);
        assert_eq!(first.clouds.unwrap().value(), 53);
        assert_eq!(first.precipitation_probability, Some(0.7));

        let wind = first.wind.unwrap();
        assert_eq!(wind.speed(), 2.7);
        assert_eq!(wind.degrees(), Some(209.0));
        assert_eq!(wind.gust(), Some(3.58));
        assert_eq!(wind.unit(), WindSpeedUnit::MetersPerSecond);

        let second = &forecast.items[1];
        assert!(second.state.is_none());
        assert_eq!(second.temperature.day_feels_like, None);
        assert_eq!(second.wind.unwrap().gust(), None);
    }

    #[test]
    fn maps_climatic_forecast() {
        let forecast = ClimaticForecastEndpoint::from_location(LocationQuery::CityId(1))
            .parse(CLIMATIC, UnitSystem::Metric)
            .unwrap();

        let day = &forecast.items[0];
        assert_eq!(day.temperature.unit, TemperatureUnit::Celsius);
        assert_eq!(day.snow, Some(0.4));
        assert_eq!(day.precipitation_probability, None);
        assert_eq!(day.state.as_ref().unwrap().name, "Snow");

        let fahrenheit = day.temperature.to_unit(TemperatureUnit::Fahrenheit);
        assert!((fahrenheit.day - 66.938).abs() < 1e-9);
    }
}
