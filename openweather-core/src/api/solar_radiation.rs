use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::air_pollution::TimeSpan;
use crate::api::coordinate_params;
use crate::api::wire::{WireCoord, unix_to_utc};
use crate::client::OpenWeatherClient;
use crate::error::Result;
use crate::model::{Coordinate, SolarRadiation, SolarRadiationRecord, UnitSystem};
use crate::request::{ApiRequest, Endpoint};

#[derive(Debug, Clone, PartialEq)]
pub struct SolarRadiationEndpoint {
    coordinate: Coordinate,
    span: TimeSpan,
}

impl Endpoint for SolarRadiationEndpoint {
    type Output = SolarRadiation;

    fn path(&self) -> &'static str {
        match self.span {
            TimeSpan::Current => "data/2.5/solar_radiation",
            TimeSpan::Forecast => "data/2.5/solar_radiation/forecast",
            TimeSpan::History { .. } => "data/2.5/solar_radiation/history",
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

    fn parse(&self, body: &str, _units: UnitSystem) -> Result<SolarRadiation> {
        let wire: WireSolarRadiation = serde_json::from_str(body)?;

        let records = wire
            .list
            .into_iter()
            .map(|r| {
                Ok(SolarRadiationRecord {
                    measurement_time: unix_to_utc(r.dt)?,
                    ghi: r.radiation.ghi,
                    dni: r.radiation.dni,
                    dhi: r.radiation.dhi,
                    ghi_clear_sky: r.radiation.ghi_cs,
                    dni_clear_sky: r.radiation.dni_cs,
                    dhi_clear_sky: r.radiation.dhi_cs,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SolarRadiation { coordinate: wire.coord.to_model()?, records })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SolarRadiationRequester<'a> {
    client: &'a OpenWeatherClient,
}

impl<'a> SolarRadiationRequester<'a> {
    pub(crate) fn new(client: &'a OpenWeatherClient) -> Self {
        Self { client }
    }

    pub fn current(self, coordinate: Coordinate) -> ApiRequest<'a, SolarRadiationEndpoint> {
        ApiRequest::new(self.client, SolarRadiationEndpoint { coordinate, span: TimeSpan::Current })
    }

    pub fn forecast(self, coordinate: Coordinate) -> ApiRequest<'a, SolarRadiationEndpoint> {
        ApiRequest::new(
            self.client,
            SolarRadiationEndpoint { coordinate, span: TimeSpan::Forecast },
        )
    }

    pub fn history(
        self,
        coordinate: Coordinate,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ApiRequest<'a, SolarRadiationEndpoint> {
        ApiRequest::new(
            self.client,
            SolarRadiationEndpoint { coordinate, span: TimeSpan::History { start, end } },
        )
    }
}

#[derive(Debug, Deserialize)]
struct WireRadiation {
    ghi: f64,
    dni: f64,
    dhi: f64,
    #[serde(default)]
    ghi_cs: f64,
    #[serde(default)]
    dni_cs: f64,
    #[serde(default)]
    dhi_cs: f64,
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    radiation: WireRadiation,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct WireSolarRadiation {
    coord: WireCoord,
    #[serde(default)]
    list: Vec<WireRecord>,
}
