use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::api::coordinate_params;
use crate::api::wire::{
    WireDailyFeelsLike, WireDailyTemp, WirePrecipitation, WireWeatherState, clouds,
    daily_temperature, day_total, first_state, flat_wind, humidity, optional_unix_to_utc,
    precipitation, probability, unix_to_utc, zone_offset,
};
use crate::client::OpenWeatherClient;
use crate::error::{Error, Result};
use crate::model::{
    Alert, AtmosphericPressure, Coordinate, DaySummary, DaySummaryTemperature, HourlyForecast,
    MinutelyForecast, OneCallCurrent, OneCallDaily, OneCallHistorical, OneCallPart,
    OneCallWeather, Temperature, UnitSystem, WeatherOverview,
};
use crate::request::{ApiRequest, Endpoint, Localized};

/// `data/3.0/onecall`: current conditions, minute/hour/day forecasts and alerts.
#[derive(Debug, Clone, PartialEq)]
pub struct OneCall {
    coordinate: Coordinate,
    exclude: BTreeSet<OneCallPart>,
}

impl Endpoint for OneCall {
    type Output = OneCallWeather;

    fn path(&self) -> &'static str {
        "data/3.0/onecall"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = coordinate_params(&self.coordinate);
        if !self.exclude.is_empty() {
            let parts: Vec<&str> = self.exclude.iter().map(OneCallPart::as_str).collect();
            params.push(("exclude", parts.join(",")));
        }
        params
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<OneCallWeather> {
        let wire: WireOneCall = serde_json::from_str(body)?;
        wire.into_model(units)
    }
}

impl Localized for OneCall {}

impl ApiRequest<'_, OneCall> {
    pub fn exclude(mut self, parts: &[OneCallPart]) -> Self {
        self.endpoint.exclude.extend(parts.iter().copied());
        self
    }
}

/// `data/3.0/onecall/timemachine`: conditions at a given moment, from 1 January 1979.
#[derive(Debug, Clone, PartialEq)]
pub struct OneCallTimeMachine {
    coordinate: Coordinate,
    time: DateTime<Utc>,
}

impl Endpoint for OneCallTimeMachine {
    type Output = OneCallHistorical;

    fn path(&self) -> &'static str {
        "data/3.0/onecall/timemachine"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = coordinate_params(&self.coordinate);
        params.push(("dt", self.time.timestamp().to_string()));
        params
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<OneCallHistorical> {
        let wire: WireTimeMachine = serde_json::from_str(body)?;
        Ok(OneCallHistorical {
            coordinate: Coordinate::new(wire.lat, wire.lon)?,
            timezone: wire.timezone,
            timezone_offset: zone_offset(wire.timezone_offset)?,
            data: wire
                .data
                .into_iter()
                .map(|d| d.into_model(units))
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

impl Localized for OneCallTimeMachine {}

/// `data/3.0/onecall/day_summary`: aggregates for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct OneCallDaySummary {
    coordinate: Coordinate,
    date: NaiveDate,
    timezone: Option<String>,
}

impl Endpoint for OneCallDaySummary {
    type Output = DaySummary;

    fn path(&self) -> &'static str {
        "data/3.0/onecall/day_summary"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = coordinate_params(&self.coordinate);
        params.push(("date", self.date.format("%Y-%m-%d").to_string()));
        if let Some(tz) = &self.timezone {
            params.push(("tz", tz.clone()));
        }
        params
    }

    fn validate(&self) -> Result<()> {
        match &self.timezone {
            Some(tz) => tz.parse::<FixedOffset>().map(|_| ()).map_err(|e| {
                Error::invalid_request(format!(
                    "Timezone must be an offset like +03:00, got '{tz}': {e}"
                ))
            }),
            None => Ok(()),
        }
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<DaySummary> {
        let wire: WireDaySummary = serde_json::from_str(body)?;
        wire.into_model(units)
    }
}

impl Localized for OneCallDaySummary {}

impl ApiRequest<'_, OneCallDaySummary> {
    /// UTC offset (`±HH:MM`) the day boundaries are computed in.
    pub fn timezone(mut self, offset: &str) -> Self {
        self.endpoint.timezone = Some(offset.to_string());
        self
    }
}

/// `data/3.0/onecall/overview`: human readable summary for today or tomorrow.
#[derive(Debug, Clone, PartialEq)]
pub struct OneCallOverview {
    coordinate: Coordinate,
    date: Option<NaiveDate>,
}

impl Endpoint for OneCallOverview {
    type Output = WeatherOverview;

    fn path(&self) -> &'static str {
        "data/3.0/onecall/overview"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = coordinate_params(&self.coordinate);
        if let Some(date) = self.date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        params
    }

    fn parse(&self, body: &str, _units: UnitSystem) -> Result<WeatherOverview> {
        let wire: WireOverview = serde_json::from_str(body)?;
        Ok(WeatherOverview {
            coordinate: Coordinate::new(wire.lat, wire.lon)?,
            timezone_offset: wire.tz,
            date: parse_date(&wire.date)?,
            units: UnitSystem::try_from(wire.units.as_str())?,
            overview: wire.weather_overview,
        })
    }
}

impl Localized for OneCallOverview {}

#[derive(Debug, Clone, Copy)]
pub struct OneCallRequester<'a> {
    client: &'a OpenWeatherClient,
}

impl<'a> OneCallRequester<'a> {
    pub(crate) fn new(client: &'a OpenWeatherClient) -> Self {
        Self { client }
    }

    pub fn current_and_forecast(self, coordinate: Coordinate) -> ApiRequest<'a, OneCall> {
        ApiRequest::localized(self.client, OneCall { coordinate, exclude: BTreeSet::new() })
    }

    pub fn historical(
        self,
        coordinate: Coordinate,
        time: DateTime<Utc>,
    ) -> ApiRequest<'a, OneCallTimeMachine> {
        ApiRequest::localized(self.client, OneCallTimeMachine { coordinate, time })
    }

    pub fn day_summary(
        self,
        coordinate: Coordinate,
        date: NaiveDate,
    ) -> ApiRequest<'a, OneCallDaySummary> {
        ApiRequest::localized(
            self.client,
            OneCallDaySummary { coordinate, date, timezone: None },
        )
    }

    /// `date` defaults to today on the API side.
    pub fn overview(
        self,
        coordinate: Coordinate,
        date: Option<NaiveDate>,
    ) -> ApiRequest<'a, OneCallOverview> {
        ApiRequest::localized(self.client, OneCallOverview { coordinate, date })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| Error::invalid_value(format!("Invalid date '{value}': {e}")))
}

/// `current` entries and `timemachine` data points; wind is flattened into `wind_*`.
#[derive(Debug, Deserialize)]
struct WireCurrent {
    dt: i64,
    sunrise: Option<i64>,
    sunset: Option<i64>,
    temp: f64,
    feels_like: Option<f64>,
    pressure: f64,
    humidity: f64,
    dew_point: Option<f64>,
    uvi: Option<f64>,
    clouds: Option<f64>,
    visibility: Option<u32>,
    wind_speed: Option<f64>,
    wind_deg: Option<f64>,
    wind_gust: Option<f64>,
    #[serde(default)]
    weather: Vec<WireWeatherState>,
    rain: Option<WirePrecipitation>,
    snow: Option<WirePrecipitation>,
}

impl WireCurrent {
    fn into_model(self, units: UnitSystem) -> Result<OneCallCurrent> {
        Ok(OneCallCurrent {
            forecast_time: unix_to_utc(self.dt)?,
            sunrise: optional_unix_to_utc(self.sunrise)?,
            sunset: optional_unix_to_utc(self.sunset)?,
            state: first_state(self.weather),
            temperature: Temperature::new(self.temp, units.temperature_unit())?
                .with_feels_like(self.feels_like)?,
            pressure: AtmosphericPressure::new(self.pressure)?,
            humidity: humidity(self.humidity)?,
            dew_point: self.dew_point,
            uv_index: self.uvi,
            clouds: self.clouds.map(clouds).transpose()?,
            visibility: self.visibility,
            wind: flat_wind(self.wind_speed, self.wind_deg, self.wind_gust, units)?,
            rain: precipitation(self.rain)?,
            snow: precipitation(self.snow)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireMinutely {
    dt: i64,
    precipitation: f64,
}

#[derive(Debug, Deserialize)]
struct WireHourly {
    dt: i64,
    temp: f64,
    feels_like: Option<f64>,
    pressure: f64,
    humidity: f64,
    dew_point: Option<f64>,
    uvi: Option<f64>,
    clouds: Option<f64>,
    visibility: Option<u32>,
    wind_speed: Option<f64>,
    wind_deg: Option<f64>,
    wind_gust: Option<f64>,
    #[serde(default)]
    weather: Vec<WireWeatherState>,
    pop: Option<f64>,
    rain: Option<WirePrecipitation>,
    snow: Option<WirePrecipitation>,
}

impl WireHourly {
    fn into_model(self, units: UnitSystem) -> Result<HourlyForecast> {
        Ok(HourlyForecast {
            forecast_time: unix_to_utc(self.dt)?,
            state: first_state(self.weather),
            temperature: Temperature::new(self.temp, units.temperature_unit())?
                .with_feels_like(self.feels_like)?,
            pressure: AtmosphericPressure::new(self.pressure)?,
            humidity: humidity(self.humidity)?,
            dew_point: self.dew_point,
            uv_index: self.uvi,
            clouds: self.clouds.map(clouds).transpose()?,
            visibility: self.visibility,
            wind: flat_wind(self.wind_speed, self.wind_deg, self.wind_gust, units)?,
            precipitation_probability: probability(self.pop)?,
            rain: precipitation(self.rain)?,
            snow: precipitation(self.snow)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireDaily {
    dt: i64,
    sunrise: Option<i64>,
    sunset: Option<i64>,
    moonrise: Option<i64>,
    moonset: Option<i64>,
    moon_phase: Option<f64>,
    summary: Option<String>,
    temp: WireDailyTemp,
    feels_like: Option<WireDailyFeelsLike>,
    pressure: f64,
    humidity: f64,
    dew_point: Option<f64>,
    wind_speed: Option<f64>,
    wind_deg: Option<f64>,
    wind_gust: Option<f64>,
    #[serde(default)]
    weather: Vec<WireWeatherState>,
    clouds: Option<f64>,
    pop: Option<f64>,
    rain: Option<f64>,
    snow: Option<f64>,
    uvi: Option<f64>,
}

/// Moonrise/moonset are reported as 0 on days without one.
fn optional_event(ts: Option<i64>) -> Result<Option<DateTime<Utc>>> {
    optional_unix_to_utc(ts.filter(|t| *t != 0))
}

impl WireDaily {
    fn into_model(self, units: UnitSystem) -> Result<OneCallDaily> {
        Ok(OneCallDaily {
            forecast_time: unix_to_utc(self.dt)?,
            sunrise: optional_event(self.sunrise)?,
            sunset: optional_event(self.sunset)?,
            moonrise: optional_event(self.moonrise)?,
            moonset: optional_event(self.moonset)?,
            moon_phase: self.moon_phase,
            summary: self.summary,
            state: first_state(self.weather),
            temperature: daily_temperature(&self.temp, self.feels_like.as_ref(), units)?,
            pressure: AtmosphericPressure::new(self.pressure)?,
            humidity: humidity(self.humidity)?,
            dew_point: self.dew_point,
            wind: flat_wind(self.wind_speed, self.wind_deg, self.wind_gust, units)?,
            clouds: self.clouds.map(clouds).transpose()?,
            uv_index: self.uvi,
            precipitation_probability: probability(self.pop)?,
            rain: day_total("Rain", self.rain)?,
            snow: day_total("Snow", self.snow)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireAlert {
    #[serde(default)]
    sender_name: String,
    event: String,
    start: i64,
    end: i64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireOneCall {
    lat: f64,
    lon: f64,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    timezone_offset: i32,
    current: Option<WireCurrent>,
    #[serde(default)]
    minutely: Vec<WireMinutely>,
    #[serde(default)]
    hourly: Vec<WireHourly>,
    #[serde(default)]
    daily: Vec<WireDaily>,
    #[serde(default)]
    alerts: Vec<WireAlert>,
}

impl WireOneCall {
    fn into_model(self, units: UnitSystem) -> Result<OneCallWeather> {
        Ok(OneCallWeather {
            coordinate: Coordinate::new(self.lat, self.lon)?,
            timezone: self.timezone,
            timezone_offset: zone_offset(self.timezone_offset)?,
            current: self.current.map(|c| c.into_model(units)).transpose()?,
            minutely: self
                .minutely
                .into_iter()
                .map(|m| {
                    Ok(MinutelyForecast {
                        forecast_time: unix_to_utc(m.dt)?,
                        precipitation: m.precipitation,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            hourly: self
                .hourly
                .into_iter()
                .map(|h| h.into_model(units))
                .collect::<Result<Vec<_>>>()?,
            daily: self
                .daily
                .into_iter()
                .map(|d| d.into_model(units))
                .collect::<Result<Vec<_>>>()?,
            alerts: self
                .alerts
                .into_iter()
                .map(|a| {
                    Ok(Alert {
                        sender_name: a.sender_name,
                        event: a.event,
                        start: unix_to_utc(a.start)?,
                        end: unix_to_utc(a.end)?,
                        description: a.description,
                        tags: a.tags,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireTimeMachine {
    lat: f64,
    lon: f64,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    timezone_offset: i32,
    #[serde(default)]
    data: Vec<WireCurrent>,
}

#[derive(Debug, Default, Deserialize)]
struct WireAfternoon {
    afternoon: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct WireTotal {
    total: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireSummaryTemperature {
    min: f64,
    max: f64,
    morning: f64,
    afternoon: f64,
    evening: f64,
    night: f64,
}

#[derive(Debug, Deserialize)]
struct WireMaxWindValue {
    speed: Option<f64>,
    direction: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMaxWind {
    max: Option<WireMaxWindValue>,
}

#[derive(Debug, Deserialize)]
struct WireDaySummary {
    lat: f64,
    lon: f64,
    tz: String,
    date: String,
    #[serde(default)]
    units: String,
    #[serde(default)]
    cloud_cover: WireAfternoon,
    #[serde(default)]
    humidity: WireAfternoon,
    #[serde(default)]
    precipitation: WireTotal,
    temperature: WireSummaryTemperature,
    #[serde(default)]
    pressure: WireAfternoon,
    #[serde(default)]
    wind: WireMaxWind,
}

impl WireDaySummary {
    fn into_model(self, requested: UnitSystem) -> Result<DaySummary> {
        let units = if self.units.is_empty() {
            requested
        } else {
            UnitSystem::try_from(self.units.as_str())?
        };
        let unit = units.temperature_unit();
        let check = |v: f64| Temperature::new(v, unit).map(|t| t.value());
        let t = self.temperature;
        let max_wind = self.wind.max;

        Ok(DaySummary {
            coordinate: Coordinate::new(self.lat, self.lon)?,
            timezone_offset: self.tz,
            date: parse_date(&self.date)?,
            units,
            cloud_cover_afternoon: self.cloud_cover.afternoon,
            humidity_afternoon: self.humidity.afternoon,
            precipitation_total: day_total("Precipitation", self.precipitation.total)?,
            pressure_afternoon: self.pressure.afternoon,
            temperature: DaySummaryTemperature {
                min: check(t.min)?,
                max: check(t.max)?,
                morning: check(t.morning)?,
                afternoon: check(t.afternoon)?,
                evening: check(t.evening)?,
                night: check(t.night)?,
            },
            max_wind_speed: max_wind.as_ref().and_then(|w| w.speed),
            max_wind_direction: max_wind.as_ref().and_then(|w| w.direction),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireOverview {
    lat: f64,
    lon: f64,
    tz: String,
    date: String,
    units: String,
    weather_overview: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::canned_client;
    use crate::model::{Language, TemperatureUnit, WindSpeedUnit};
    use chrono::TimeZone;

    const ONE_CALL: &str = r#"{
        "lat": 33.44, "lon": -94.04, "timezone": "America/Chicago", "timezone_offset": -18000,
        "current": {"dt": 1684929490, "sunrise": 1684926645, "sunset": 1684977332,
                    "temp": 292.55, "feels_like": 292.87, "pressure": 1014, "humidity": 89,
                    "dew_point": 290.69, "uvi": 0.16, "clouds": 53, "visibility": 10000,
                    "wind_speed": 3.13, "wind_deg": 93, "wind_gust": 6.71,
                    "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
                    "rain": {"1h": 0.12}},
        "minutely": [{"dt": 1684929540, "precipitation": 0}, {"dt": 1684929600, "precipitation": 0.2}],
        "hourly": [{"dt": 1684926000, "temp": 292.01, "feels_like": 292.33, "pressure": 1014,
                    "humidity": 91, "dew_point": 290.51, "uvi": 0, "clouds": 54, "visibility": 10000,
                    "wind_speed": 2.58, "wind_deg": 86, "wind_gust": 5.88,
                    "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04n"}],
                    "pop": 0.15}],
        "daily": [{"dt": 1684951200, "sunrise": 1684926645, "sunset": 1684977332,
                   "moonrise": 1684941060, "moonset": 0, "moon_phase": 0.16,
                   "summary": "Expect a day of partly cloudy with rain",
                   "temp": {"day": 299.03, "min": 290.69, "max": 300.35, "night": 291.45, "eve": 297.51, "morn": 292.55},
                   "feels_like": {"day": 299.21, "night": 291.37, "eve": 297.86, "morn": 292.87},
                   "pressure": 1016, "humidity": 59, "dew_point": 290.48,
                   "wind_speed": 3.98, "wind_deg": 76, "wind_gust": 8.92,
                   "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                   "clouds": 92, "pop": 0.47, "rain": 0.15, "uvi": 9.23}],
        "alerts": [{"sender_name": "NWS Philadelphia - Mount Holly", "event": "Small Craft Advisory",
                    "start": 1684952747, "end": 1684988747,
                    "description": "...SMALL CRAFT ADVISORY REMAINS IN EFFECT...", "tags": []}]
    }"#;

    const DAY_SUMMARY: &str = r#"{
        "lat": 33, "lon": 35, "tz": "+02:00", "date": "2020-03-04", "units": "standard",
        "cloud_cover": {"afternoon": 0},
        "humidity": {"afternoon": 33},
        "precipitation": {"total": 0},
        "temperature": {"min": 286.48, "max": 299.24, "afternoon": 296.15,
                        "night": 289.56, "evening": 295.93, "morning": 287.59},
        "pressure": {"afternoon": 1015},
        "wind": {"max": {"speed": 8.7, "direction": 120}}
    }"#;

    fn coordinate() -> Coordinate {
        Coordinate::new(33.44, -94.04).unwrap()
    }

    #[test]
    fn one_call_url_with_exclusions() {
        let (client, _) = canned_client(ONE_CALL);

        let url = client
            .one_call()
            .current_and_forecast(coordinate())
            .exclude(&[OneCallPart::Minutely, OneCallPart::Alerts, OneCallPart::Minutely])
            .unit_system(UnitSystem::Imperial)
            .language(Language::French)
            .url()
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/3.0/onecall?lat=33.44&lon=-94.04&exclude=minutely%2Calerts&units=imperial&lang=fr&appid=KEY"
        );
    }

    #[test]
    fn other_one_call_urls() {
        let (client, _) = canned_client(ONE_CALL);
        let date = NaiveDate::from_ymd_opt(2020, 3, 4).unwrap();

        let time = Utc.timestamp_opt(1643803200, 0).unwrap();
        let history = client.one_call().historical(coordinate(), time).url().unwrap();
        assert_eq!(history.path(), "/data/3.0/onecall/timemachine");
        assert_eq!(history.query(), Some("lat=33.44&lon=-94.04&dt=1643803200&appid=KEY"));

        let summary =
            client.one_call().day_summary(coordinate(), date).timezone("+02:00").url().unwrap();
        assert_eq!(
            summary.query(),
            Some("lat=33.44&lon=-94.04&date=2020-03-04&tz=%2B02%3A00&appid=KEY")
        );
        for tz in ["Europe/Kyiv", "+99:99", "+05:75", "+24:00"] {
            let request = client.one_call().day_summary(coordinate(), date).timezone(tz);
            assert!(
                matches!(request.url(), Err(Error::InvalidRequest(_))),
                "{tz} must be rejected"
            );
        }
        assert!(client.one_call().day_summary(coordinate(), date).timezone("-03:30").url().is_ok());

        let overview = client.one_call().overview(coordinate(), None).url().unwrap();
        assert_eq!(overview.path(), "/data/3.0/onecall/overview");
        assert_eq!(overview.query(), Some("lat=33.44&lon=-94.04&appid=KEY"));
    }

    #[test]
    fn maps_one_call() {
        let weather = OneCall { coordinate: coordinate(), exclude: BTreeSet::new() }
            .parse(ONE_CALL, UnitSystem::Standard)
            .unwrap();

        assert_eq!(weather.timezone, "America/Chicago");
        assert_eq!(weather.timezone_offset.local_minus_utc(), -18000);

        let current = weather.current.as_ref().unwrap();
        assert_eq!(current.temperature.unit(), TemperatureUnit::Kelvin);
        assert_eq!(current.temperature.feels_like(), Some(292.87));
        assert_eq!(current.uv_index, Some(0.16));
        assert_eq!(current.rain.unwrap().one_hour_level(), Some(0.12));
        let wind = current.wind.unwrap();
        assert_eq!(wind.gust(), Some(6.71));
        assert_eq!(wind.unit(), WindSpeedUnit::MetersPerSecond);

        assert_eq!(weather.minutely.len(), 2);
        assert_eq!(weather.minutely[1].precipitation, 0.2);

        assert_eq!(weather.hourly[0].precipitation_probability, Some(0.15));
        assert_eq!(weather.hourly[0].clouds.unwrap().value(), 54);

        let daily = &weather.daily[0];
        assert_eq!(daily.moonset, None);
        assert!(daily.moonrise.is_some());
        assert_eq!(daily.rain, Some(0.15));
        assert_eq!(daily.temperature.evening, 297.51);
        assert_eq!(daily.summary.as_deref(), Some("Expect a day of partly cloudy with rain"));

        assert_eq!(weather.alerts[0].event, "Small Craft Advisory");
        assert_eq!(weather.alerts[0].end.timestamp(), 1684988747);
    }

    #[test]
    fn maps_one_call_with_excluded_parts() {
        let body = r#"{"lat": 33.44, "lon": -94.04, "timezone": "America/Chicago", "timezone_offset": -18000}"#;
        let weather = OneCall { coordinate: coordinate(), exclude: BTreeSet::new() }
            .parse(body, UnitSystem::Metric)
            .unwrap();

        assert!(weather.current.is_none());
        assert!(weather.hourly.is_empty());
        assert!(weather.alerts.is_empty());
    }

    #[test]
    fn maps_time_machine() {
        let body = r#"{"lat": 52.2297, "lon": 21.0122, "timezone": "Europe/Warsaw", "timezone_offset": 3600,
            "data": [{"dt": 1645888976, "sunrise": 1645853361, "sunset": 1645891727,
                      "temp": 7.5, "feels_like": 5.1, "pressure": 1029, "humidity": 64,
                      "dew_point": 1.1, "uvi": 0.06, "clouds": 0, "visibility": 10000,
                      "wind_speed": 3.6, "wind_deg": 340,
                      "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}]}]}"#;

        let time = Utc.timestamp_opt(1645888976, 0).unwrap();
        let historical = OneCallTimeMachine { coordinate: coordinate(), time }
            .parse(body, UnitSystem::Metric)
            .unwrap();

        assert_eq!(historical.timezone, "Europe/Warsaw");
        assert_eq!(historical.data.len(), 1);
        assert_eq!(historical.data[0].temperature.unit(), TemperatureUnit::Celsius);
        assert_eq!(historical.data[0].wind.unwrap().gust(), None);
    }

    #[test]
    fn maps_day_summary() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 4).unwrap();
        let summary = OneCallDaySummary { coordinate: coordinate(), date, timezone: None }
            .parse(DAY_SUMMARY, UnitSystem::Metric)
            .unwrap();

        assert_eq!(summary.date, date);
        assert_eq!(summary.units, UnitSystem::Standard);
        assert_eq!(summary.timezone_offset, "+02:00");
        assert_eq!(summary.temperature.max, 299.24);
        assert_eq!(summary.humidity_afternoon, Some(33.0));
        assert_eq!(summary.precipitation_total, Some(0.0));
        assert_eq!(summary.max_wind_speed, Some(8.7));
        assert_eq!(summary.max_wind_direction, Some(120.0));
    }

    #[test]
    fn maps_overview() {
        let body = r#"{"lat": 51.509865, "lon": -0.118092, "tz": "+01:00", "date": "2024-05-13",
                       "units": "metric", "weather_overview": "The current weather is overcast."}"#;
        let overview = OneCallOverview { coordinate: coordinate(), date: None }
            .parse(body, UnitSystem::Metric)
            .unwrap();

        assert_eq!(overview.units, UnitSystem::Metric);
        assert_eq!(overview.date, NaiveDate::from_ymd_opt(2024, 5, 13).unwrap());
        assert_eq!(overview.to_string(), "2024-05-13: The current weather is overcast.");
    }
}
