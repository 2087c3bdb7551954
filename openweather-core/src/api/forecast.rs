use serde::Deserialize;

use crate::api::wire::{
    WireCity, WireClouds, WireMain, WirePrecipitation, WireWeatherState, WireWind, first_state,
    precipitation, probability, unix_to_utc,
};
use crate::api::{FromLocation, LocationQuery};
use crate::error::{Error, Result};
use crate::model::{DayTime, Forecast, UnitSystem, WeatherForecast};
use crate::request::{ApiRequest, Endpoint, Host, Localized, XmlMode};

/// `data/2.5/forecast`: 5 days in 3 hour steps, 40 entries at most.
#[derive(Debug, Clone, PartialEq)]
pub struct FiveDayForecast {
    location: LocationQuery,
    count: Option<u8>,
}

pub const MAX_FIVE_DAY_ENTRIES: u8 = 40;

/// `data/2.5/forecast/hourly` on the pro host: 4 days in 1 hour steps, 96 entries at most.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecastEndpoint {
    location: LocationQuery,
    count: Option<u8>,
}

pub const MAX_HOURLY_ENTRIES: u8 = 96;

pub(crate) fn count_params(
    location: &LocationQuery,
    count: Option<u8>,
) -> Vec<(&'static str, String)> {
    let mut params = location.params();
    if let Some(count) = count {
        params.push(("cnt", count.to_string()));
    }
    params
}

pub(crate) fn validate_count(count: Option<u8>, max: u8) -> Result<()> {
    match count {
        Some(count) if count == 0 || count > max => Err(Error::invalid_request(format!(
            "Entry count must be in range [1, {max}], got {count}"
        ))),
        _ => Ok(()),
    }
}

impl FromLocation for FiveDayForecast {
    fn from_location(location: LocationQuery) -> Self {
        Self { location, count: None }
    }
}

impl Endpoint for FiveDayForecast {
    type Output = Forecast;

    fn path(&self) -> &'static str {
        "data/2.5/forecast"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        count_params(&self.location, self.count)
    }

    fn validate(&self) -> Result<()> {
        self.location.validate()?;
        validate_count(self.count, MAX_FIVE_DAY_ENTRIES)
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<Forecast> {
        parse_forecast(body, units)
    }
}

impl Localized for FiveDayForecast {}
impl XmlMode for FiveDayForecast {}

impl FromLocation for HourlyForecastEndpoint {
    fn from_location(location: LocationQuery) -> Self {
        Self { location, count: None }
    }
}

impl Endpoint for HourlyForecastEndpoint {
    type Output = Forecast;

    fn host(&self) -> Host {
        Host::Pro
    }

    fn path(&self) -> &'static str {
        "data/2.5/forecast/hourly"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        count_params(&self.location, self.count)
    }

    fn validate(&self) -> Result<()> {
        self.location.validate()?;
        validate_count(self.count, MAX_HOURLY_ENTRIES)
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<Forecast> {
        parse_forecast(body, units)
    }
}

impl Localized for HourlyForecastEndpoint {}
impl XmlMode for HourlyForecastEndpoint {}

impl ApiRequest<'_, FiveDayForecast> {
    /// Limit the number of 3 hour entries returned.
    pub fn count(mut self, count: u8) -> Self {
        self.endpoint.count = Some(count);
        self
    }
}

impl ApiRequest<'_, HourlyForecastEndpoint> {
    /// Limit the number of hourly entries returned.
    pub fn count(mut self, count: u8) -> Self {
        self.endpoint.count = Some(count);
        self
    }
}

#[derive(Debug, Deserialize)]
struct WirePod {
    pod: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireForecastItem {
    dt: i64,
    main: WireMain,
    #[serde(default)]
    weather: Vec<WireWeatherState>,
    clouds: Option<WireClouds>,
    wind: Option<WireWind>,
    visibility: Option<u32>,
    pop: Option<f64>,
    rain: Option<WirePrecipitation>,
    snow: Option<WirePrecipitation>,
    sys: Option<WirePod>,
    dt_txt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireForecast {
    city: WireCity,
    #[serde(default)]
    list: Vec<WireForecastItem>,
}

fn parse_forecast(body: &str, units: UnitSystem) -> Result<Forecast> {
    let wire: WireForecast = serde_json::from_str(body)?;

    let items = wire
        .list
        .into_iter()
        .map(|item| item.into_model(units))
        .collect::<Result<Vec<_>>>()?;

    Ok(Forecast { location: wire.city.to_model()?, items })
}

impl WireForecastItem {
    fn into_model(self, units: UnitSystem) -> Result<WeatherForecast> {
        Ok(WeatherForecast {
            forecast_time: unix_to_utc(self.dt)?,
            state: first_state(self.weather),
            temperature: self.main.temperature(units)?,
            pressure: self.main.pressure()?,
            humidity: self.main.humidity()?,
            wind: self.wind.as_ref().map(|w| w.to_model(units)).transpose()?,
            rain: precipitation(self.rain)?,
            snow: precipitation(self.snow)?,
            clouds: self.clouds.as_ref().map(WireClouds::to_model).transpose()?,
            visibility: self.visibility,
            precipitation_probability: probability(self.pop)?,
            day_time: self.sys.and_then(|s| s.pod).as_deref().and_then(DayTime::from_pod),
            forecast_time_text: self.dt_txt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::canned_client;
    use crate::model::{Coordinate, TemperatureUnit};

    const FIVE_DAY: &str = r#"{
        "cod": "200", "message": 0, "cnt": 2,
        "list": [
            {"dt": 1700006400,
             "main": {"temp": 283.4, "feels_like": 282.6, "temp_min": 282.9, "temp_max": 283.4,
                      "pressure": 1012, "sea_level": 1012, "grnd_level": 1009, "humidity": 88, "temp_kf": 0.5},
             "weather": [{"id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04n"}],
             "clouds": {"all": 100},
             "wind": {"speed": 4.1, "deg": 220, "gust": 10.2},
             "visibility": 10000,
             "pop": 0.32,
             "rain": {"3h": 0.27},
             "sys": {"pod": "n"},
             "dt_txt": "2023-11-15 00:00:00"},
            {"dt": 1700017200,
             "main": {"temp": 284.0, "pressure": 1013, "humidity": 80},
             "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
             "clouds": {"all": 0},
             "wind": {"speed": 3.0, "deg": 200},
             "pop": 0,
             "sys": {"pod": "d"},
             "dt_txt": "2023-11-15 03:00:00"}
        ],
        "city": {"id": 2643743, "name": "London", "coord": {"lat": 51.5085, "lon": -0.1257},
                 "country": "GB", "population": 1000000, "timezone": 0,
                 "sunrise": 1699946400, "sunset": 1699979400}
    }"#;

    const HOURLY: &str = r#"{
        "cod": "200", "message": 0, "cnt": 1,
        "list": [
            {"dt": 1700006400,
             "main": {"temp": 10.4, "feels_like": 9.6, "pressure": 1012, "humidity": 88},
             "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10n"}],
             "clouds": {"all": 90},
             "wind": {"speed": 4.1, "deg": 220},
             "pop": 0.8,
             "rain": {"1h": 0.3},
             "snow": {"1h": 0.1},
             "sys": {"pod": "n"}}
        ],
        "city": {"id": 2643743, "name": "London", "coord": {"lat": 51.5085, "lon": -0.1257},
                 "country": "GB", "timezone": 0}
    }"#;

    #[test]
    fn five_day_url_with_count() {
        let (client, _) = canned_client(FIVE_DAY);
        let coordinate = Coordinate::new(51.5, -0.12).unwrap();

        let url = client.five_day_forecast().by_coordinate(coordinate).count(8).url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/forecast?lat=51.5&lon=-0.12&cnt=8&appid=KEY"
        );

        let err = client.five_day_forecast().by_city_id(1).count(41).url().unwrap_err();
        assert!(err.to_string().contains("Entry count must be in range [1, 40]"));
    }

    #[test]
    fn hourly_forecast_uses_pro_host() {
        let (client, _) = canned_client(HOURLY);

        let url = client.hourly_forecast().by_city_name("London").count(96).url().unwrap();
        assert_eq!(url.host_str(), Some("pro.openweathermap.org"));
        assert_eq!(url.path(), "/data/2.5/forecast/hourly");
        assert!(client.hourly_forecast().by_city_name("London").count(97).url().is_err());
    }

    #[test]
    fn maps_five_day_forecast() {
        let forecast = FiveDayForecast::from_location(LocationQuery::CityId(1))
            .parse(FIVE_DAY, UnitSystem::Standard)
            .unwrap();

        assert_eq!(forecast.location.name, "London");
        assert_eq!(forecast.location.population, Some(1000000));
        assert!(forecast.location.sunrise.is_some());
        assert_eq!(forecast.items.len(), 2);

        let first = &forecast.items[0];
        assert_eq!(first.temperature.unit(), TemperatureUnit::Kelvin);
        assert_eq!(first.rain.unwrap().three_hour_level(), Some(0.27));
        assert_eq!(first.rain.unwrap().one_hour_level(), None);
        assert_eq!(first.day_time, Some(DayTime::Night));
        assert_eq!(first.precipitation_probability, Some(0.32));
        assert_eq!(first.forecast_time_text.as_deref(), Some("2023-11-15 00:00:00"));
        assert_eq!(first.pressure.sea_level(), Some(1012.0));

        let second = &forecast.items[1];
        assert!(second.rain.is_none());
        assert_eq!(second.day_time, Some(DayTime::Day));
        assert_eq!(second.visibility, None);
    }

    #[test]
    fn maps_hourly_forecast_one_hour_windows() {
        let forecast = HourlyForecastEndpoint::from_location(LocationQuery::CityId(1))
            .parse(HOURLY, UnitSystem::Metric)
            .unwrap();

        let item = &forecast.items[0];
        assert_eq!(item.temperature.unit(), TemperatureUnit::Celsius);
        assert_eq!(item.rain.unwrap().one_hour_level(), Some(0.3));
        assert_eq!(item.snow.unwrap().one_hour_level(), Some(0.1));
        assert!(item.forecast_time_text.is_none());
    }

    #[tokio::test]
    async fn retrieve_xml_sends_mode() {
        let (client, transport) = canned_client("<weatherdata/>");

        let xml = client.five_day_forecast().by_city_name("Oslo").retrieve_xml().await.unwrap();
        assert_eq!(xml, "<weatherdata/>");
        assert!(transport.last_call().0.contains("mode=xml"));
    }
}
