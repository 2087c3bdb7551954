use serde::{Deserialize, Serialize};

use crate::api::wire::unix_to_utc;
use crate::client::OpenWeatherClient;
use crate::error::{Error, Result};
use crate::model::{
    AlertLevel, Coordinate, RoadAlert, RoadDetails, RoadRiskRecord, RoadState, RoadWeather,
    TrackPoint, UnitSystem,
};
use crate::request::{ApiRequest, Endpoint};

/// `data/2.5/roadrisk`, called with POST and the route as JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRisk {
    track: Vec<TrackPoint>,
}

#[derive(Debug, Serialize)]
struct WireTrackPoint {
    lat: f64,
    lon: f64,
    dt: i64,
}

#[derive(Debug, Serialize)]
struct WireTrack {
    track: Vec<WireTrackPoint>,
}

impl Endpoint for RoadRisk {
    type Output = Vec<RoadRiskRecord>;

    fn path(&self) -> &'static str {
        "data/2.5/roadrisk"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn validate(&self) -> Result<()> {
        if self.track.is_empty() {
            return Err(Error::invalid_request("Road risk track must contain at least one point"));
        }
        Ok(())
    }

    fn body(&self) -> Result<Option<String>> {
        let payload = WireTrack {
            track: self
                .track
                .iter()
                .map(|p| WireTrackPoint {
                    lat: p.coordinate.latitude(),
                    lon: p.coordinate.longitude(),
                    dt: p.time.timestamp(),
                })
                .collect(),
        };
        Ok(Some(serde_json::to_string(&payload)?))
    }

    fn parse(&self, body: &str, _units: UnitSystem) -> Result<Vec<RoadRiskRecord>> {
        let wire: Vec<WireRecord> = serde_json::from_str(body)?;
        wire.into_iter().map(WireRecord::into_model).collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RoadRiskRequester<'a> {
    client: &'a OpenWeatherClient,
}

impl<'a> RoadRiskRequester<'a> {
    pub(crate) fn new(client: &'a OpenWeatherClient) -> Self {
        Self { client }
    }

    pub fn by_track(self, track: Vec<TrackPoint>) -> ApiRequest<'a, RoadRisk> {
        ApiRequest::new(self.client, RoadRisk { track })
    }
}

#[derive(Debug, Deserialize)]
struct WireRoadWeather {
    temp: Option<f64>,
    wind_speed: Option<f64>,
    wind_deg: Option<f64>,
    precipitation_intensity: Option<f64>,
    dew_point: Option<f64>,
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireRoad {
    state: u8,
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireAlert {
    #[serde(default)]
    sender_name: String,
    #[serde(default)]
    event: String,
    event_level: u8,
}

/// `coord` is a `[lat, lon]` pair here, unlike every other endpoint.
#[derive(Debug, Deserialize)]
struct WireRecord {
    dt: i64,
    coord: (f64, f64),
    weather: Option<WireRoadWeather>,
    road: Option<WireRoad>,
    #[serde(default)]
    alerts: Vec<WireAlert>,
}

impl WireRecord {
    fn into_model(self) -> Result<RoadRiskRecord> {
        let (lat, lon) = self.coord;

        let road = self
            .road
            .map(|r| {
                Ok::<_, Error>(RoadDetails {
                    state: RoadState::from_code(r.state)?,
                    temperature: r.temp,
                })
            })
            .transpose()?;

        let alerts = self
            .alerts
            .into_iter()
            .map(|a| {
                Ok(RoadAlert {
                    sender_name: a.sender_name,
                    event: a.event,
                    level: AlertLevel::from_value(a.event_level)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RoadRiskRecord {
            forecast_time: unix_to_utc(self.dt)?,
            coordinate: Coordinate::new(lat, lon)?,
            weather: self.weather.map(|w| RoadWeather {
                temperature: w.temp,
                wind_speed: w.wind_speed,
                wind_degrees: w.wind_deg,
                precipitation_intensity: w.precipitation_intensity,
                dew_point: w.dew_point,
                visibility: w.visibility,
            }),
            road,
            alerts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::canned_client;
    use chrono::{TimeZone, Utc};

    const ROAD_RISK: &str = r#"[
        {"dt": 1602702000, "coord": [7.27, 44.04],
         "weather": {"temp": 278.44, "wind_speed": 2.27, "wind_deg": 7,
                     "precipitation_intensity": 0.38, "dew_point": 276.13},
         "road": {"state": 2, "temp": 293.85},
         "alerts": [{"sender_name": "METEO-FRANCE", "event": "Moderate thunderstorm warning", "event_level": 2}]},
        {"dt": 1602702400, "coord": [7.37, 45.04],
         "weather": {"temp": 282.0}}
    ]"#;

    fn track() -> Vec<TrackPoint> {
        vec![
            TrackPoint::new(
                Coordinate::new(7.27, 44.04).unwrap(),
                Utc.timestamp_opt(1602702000, 0).unwrap(),
            ),
            TrackPoint::new(
                Coordinate::new(7.37, 45.04).unwrap(),
                Utc.timestamp_opt(1602702400, 0).unwrap(),
            ),
        ]
    }

    #[test]
    fn payload_serialization() {
        let body = RoadRisk { track: track() }.body().unwrap().unwrap();
        assert_eq!(
            body,
            r#"{"track":[{"lat":7.27,"lon":44.04,"dt":1602702000},{"lat":7.37,"lon":45.04,"dt":1602702400}]}"#
        );
    }

    #[test]
    fn empty_track_is_rejected() {
        let (client, _) = canned_client(ROAD_RISK);
        let err = client.road_risk().by_track(Vec::new()).url().unwrap_err();
        assert!(err.to_string().contains("at least one point"));
    }

    #[test]
    fn maps_road_risk() {
        let records = RoadRisk { track: track() }.parse(ROAD_RISK, UnitSystem::Standard).unwrap();

        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.coordinate.latitude(), 7.27);
        assert_eq!(first.coordinate.longitude(), 44.04);
        assert_eq!(first.coordinate, track()[0].coordinate);
        assert_eq!(first.road.unwrap().state, RoadState::Moist);
        assert_eq!(first.weather.unwrap().precipitation_intensity, Some(0.38));
        assert_eq!(first.alerts[0].level, AlertLevel::Yellow);
        assert_eq!(first.alerts[0].sender_name, "METEO-FRANCE");

        let second = &records[1];
        assert!(second.road.is_none());
        assert!(second.alerts.is_empty());
    }

    #[test]
    fn coord_is_latitude_first() {
        let body = r#"[
            {"dt": 1602702000, "coord": [10.0, 120.0]},
            {"dt": 1602702000, "coord": [-33.87, -151.21]}
        ]"#;
        let records = RoadRisk { track: track() }.parse(body, UnitSystem::Standard).unwrap();

        assert_eq!(records[0].coordinate.latitude(), 10.0);
        assert_eq!(records[0].coordinate.longitude(), 120.0);
        assert_eq!(records[1].coordinate, Coordinate::new(-33.87, -151.21).unwrap());
    }

    #[tokio::test]
    async fn retrieve_posts_track() {
        let (client, transport) = canned_client(ROAD_RISK);

        let records = client.road_risk().by_track(track()).retrieve().await.unwrap();
        assert_eq!(records.len(), 2);

        let (url, body) = transport.last_call();
        assert_eq!(url, "https://api.openweathermap.org/data/2.5/roadrisk?appid=KEY");
        assert!(body.unwrap().starts_with(r#"{"track":["#));
    }
}
