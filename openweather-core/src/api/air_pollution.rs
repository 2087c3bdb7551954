use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::coordinate_params;
use crate::api::wire::{WireCoord, unix_to_utc};
use crate::client::OpenWeatherClient;
use crate::error::{Error, Result};
use crate::model::{
    AirPollutionConcentration, AirPollutionDetails, AirPollutionRecord, AirQualityIndex, Coordinate,
    UnitSystem,
};
use crate::request::{ApiRequest, Endpoint};

/// Which slice of time the air pollution request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpan {
    Current,
    /// Hourly, 4 days ahead.
    Forecast,
    History { start: DateTime<Utc>, end: DateTime<Utc> },
}

impl TimeSpan {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            TimeSpan::History { start, end } => {
                vec![("start", start.timestamp().to_string()), ("end", end.timestamp().to_string())]
            }
            _ => Vec::new(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            TimeSpan::History { start, end } if start > end => Err(Error::invalid_request(format!(
                "History start {start} must not be after end {end}"
            ))),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirPollution {
    coordinate: Coordinate,
    span: TimeSpan,
}

impl Endpoint for AirPollution {
    type Output = AirPollutionDetails;

    fn path(&self) -> &'static str {
        match self.span {
            TimeSpan::Current => "data/2.5/air_pollution",
            TimeSpan::Forecast => "data/2.5/air_pollution/forecast",
            TimeSpan::History { .. } => "data/2.5/air_pollution/history",
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = coordinate_params(&self.coordinate);
        params.extend(self.span.params());
        params
    }

    fn validate(&self) -> Result<()> {
        self.span.validate()
    }

    fn parse(&self, body: &str, _units: UnitSystem) -> Result<AirPollutionDetails> {
        let wire: WireAirPollution = serde_json::from_str(body)?;
        wire.into_model()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AirPollutionRequester<'a> {
    client: &'a OpenWeatherClient,
}

impl<'a> AirPollutionRequester<'a> {
    pub(crate) fn new(client: &'a OpenWeatherClient) -> Self {
        Self { client }
    }

    pub fn current(self, coordinate: Coordinate) -> ApiRequest<'a, AirPollution> {
        ApiRequest::new(self.client, AirPollution { coordinate, span: TimeSpan::Current })
    }

    pub fn forecast(self, coordinate: Coordinate) -> ApiRequest<'a, AirPollution> {
        ApiRequest::new(self.client, AirPollution { coordinate, span: TimeSpan::Forecast })
    }

    /// Historical data is available from 27 November 2020.
    pub fn history(
        self,
        coordinate: Coordinate,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ApiRequest<'a, AirPollution> {
        ApiRequest::new(
            self.client,
            AirPollution { coordinate, span: TimeSpan::History { start, end } },
        )
    }
}

#[derive(Debug, Deserialize)]
struct WireAqi {
    aqi: u8,
}

#[derive(Debug, Default, Deserialize)]
struct WireComponents {
    #[serde(default)]
    co: f64,
    #[serde(default)]
    no: f64,
    #[serde(default)]
    no2: f64,
    #[serde(default)]
    o3: f64,
    #[serde(default)]
    so2: f64,
    #[serde(default)]
    pm2_5: f64,
    #[serde(default)]
    pm10: f64,
    #[serde(default)]
    nh3: f64,
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    dt: i64,
    main: WireAqi,
    #[serde(default)]
    components: WireComponents,
}

#[derive(Debug, Deserialize)]
struct WireAirPollution {
    coord: WireCoord,
    #[serde(default)]
    list: Vec<WireRecord>,
}

impl WireAirPollution {
    fn into_model(self) -> Result<AirPollutionDetails> {
        let records = self
            .list
            .into_iter()
            .map(|r| {
                let c = r.components;
                Ok(AirPollutionRecord {
                    forecast_time: unix_to_utc(r.dt)?,
                    air_quality_index: AirQualityIndex::from_value(r.main.aqi)?,
                    concentration: AirPollutionConcentration {
                        carbon_monoxide: c.co,
                        nitrogen_monoxide: c.no,
                        nitrogen_dioxide: c.no2,
                        ozone: c.o3,
                        sulphur_dioxide: c.so2,
                        fine_particles: c.pm2_5,
                        coarse_particles: c.pm10,
                        ammonia: c.nh3,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AirPollutionDetails { coordinate: self.coord.to_model()?, records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::canned_client;
    use chrono::TimeZone;

    const AIR: &str = r#"{
        "coord": {"lon": 50.0, "lat": 50.0},
        "list": [
            {"main": {"aqi": 1},
             "components": {"co": 201.94, "no": 0.02, "no2": 0.77, "o3": 68.66,
                            "so2": 0.64, "pm2_5": 0.5, "pm10": 0.54, "nh3": 0.12},
             "dt": 1606147200},
            {"main": {"aqi": 4},
             "components": {"co": 250.0, "no2": 12.5, "o3": 40.1, "pm2_5": 30.2, "pm10": 55.0},
             "dt": 1606150800}
        ]
    }"#;

    #[test]
    fn urls_per_time_span() {
        let (client, _) = canned_client(AIR);
        let coordinate = Coordinate::new(50.0, 50.0).unwrap();

        let current = client.air_pollution().current(coordinate).url().unwrap();
        assert_eq!(
            current.as_str(),
            "https://api.openweathermap.org/data/2.5/air_pollution?lat=50&lon=50&appid=KEY"
        );

        let forecast = client.air_pollution().forecast(coordinate).url().unwrap();
        assert_eq!(forecast.path(), "/data/2.5/air_pollution/forecast");

        let start = Utc.timestamp_opt(1606223802, 0).unwrap();
        let end = Utc.timestamp_opt(1606482999, 0).unwrap();
        let history = client.air_pollution().history(coordinate, start, end).url().unwrap();
        assert_eq!(history.path(), "/data/2.5/air_pollution/history");
        assert_eq!(
            history.query(),
            Some("lat=50&lon=50&start=1606223802&end=1606482999&appid=KEY")
        );

        let err = client.air_pollution().history(coordinate, end, start).url().unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn maps_air_pollution() {
        let coordinate = Coordinate::new(50.0, 50.0).unwrap();
        let details = AirPollution { coordinate, span: TimeSpan::Current }
            .parse(AIR, UnitSystem::Standard)
            .unwrap();

        assert_eq!(details.coordinate, coordinate);
        assert_eq!(details.records.len(), 2);

        let first = &details.records[0];
        assert_eq!(first.air_quality_index, AirQualityIndex::Good);
        assert_eq!(first.concentration.carbon_monoxide, 201.94);
        assert_eq!(first.concentration.fine_particles, 0.5);
        assert_eq!(first.forecast_time.timestamp(), 1606147200);

        let second = &details.records[1];
        assert_eq!(second.air_quality_index, AirQualityIndex::Poor);
        assert_eq!(second.concentration.nitrogen_monoxide, 0.0);
    }

    #[test]
    fn unknown_aqi_fails_mapping() {
        let body = r#"{"coord": {"lon": 1, "lat": 1}, "list": [{"main": {"aqi": 9}, "dt": 1}]}"#;
        let coordinate = Coordinate::new(1.0, 1.0).unwrap();
        let err = AirPollution { coordinate, span: TimeSpan::Forecast }
            .parse(body, UnitSystem::Standard)
            .unwrap_err();

        assert!(err.to_string().contains("Air quality index"));
    }
}
