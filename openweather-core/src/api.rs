//! Per-endpoint request descriptions and response mapping.
//!
//! Each submodule owns the wire structs for its JSON shape and converts them
//! into [`crate::model`] values. Shapes shared across endpoints live in `wire`.

use crate::client::OpenWeatherClient;
use crate::model::Coordinate;
use crate::request::{ApiRequest, Localized};

pub mod air_pollution;
pub mod current;
pub mod daily;
pub mod forecast;
pub mod geocoding;
pub mod one_call;
pub mod road_risk;
pub mod solar_radiation;
mod wire;

/// The ways the weather endpoints accept a location.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// `q`: `city`, `city,country` or `city,state,country`.
    CityName(String),
    CityId(u64),
    Coordinate(Coordinate),
    /// `zip`: `zip,country`.
    ZipCode { zip_code: String, country_code: String },
}

impl LocationQuery {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            LocationQuery::CityName(name) => vec![("q", name.clone())],
            LocationQuery::CityId(id) => vec![("id", id.to_string())],
            LocationQuery::Coordinate(coordinate) => coordinate_params(coordinate),
            LocationQuery::ZipCode { zip_code, country_code } => {
                vec![("zip", format!("{zip_code},{country_code}"))]
            }
        }
    }

    pub(crate) fn validate(&self) -> crate::error::Result<()> {
        match self {
            LocationQuery::CityName(name) if name.trim().is_empty() => {
                Err(crate::error::Error::invalid_request("City name must not be empty"))
            }
            LocationQuery::ZipCode { zip_code, .. } if zip_code.trim().is_empty() => {
                Err(crate::error::Error::invalid_request("Zip code must not be empty"))
            }
            _ => Ok(()),
        }
    }
}

pub(crate) fn coordinate_params(coordinate: &Coordinate) -> Vec<(&'static str, String)> {
    vec![("lat", coordinate.latitude().to_string()), ("lon", coordinate.longitude().to_string())]
}

/// Endpoints addressed by a [`LocationQuery`].
pub trait FromLocation: Localized + Sized {
    fn from_location(location: LocationQuery) -> Self;
}

/// Picks the location for a weather or forecast endpoint.
#[derive(Debug, Clone)]
pub struct LocationRequester<'a, E> {
    client: &'a OpenWeatherClient,
    endpoint: std::marker::PhantomData<E>,
}

impl<'a, E: FromLocation> LocationRequester<'a, E> {
    pub(crate) fn new(client: &'a OpenWeatherClient) -> Self {
        Self { client, endpoint: std::marker::PhantomData }
    }

    pub(crate) fn client(&self) -> &'a OpenWeatherClient {
        self.client
    }

    pub fn by_location(self, location: LocationQuery) -> ApiRequest<'a, E> {
        ApiRequest::localized(self.client, E::from_location(location))
    }

    pub fn by_city_name(self, city_name: &str) -> ApiRequest<'a, E> {
        self.by_location(LocationQuery::CityName(city_name.to_string()))
    }

    pub fn by_city_name_and_country(
        self,
        city_name: &str,
        country_code: &str,
    ) -> ApiRequest<'a, E> {
        self.by_location(LocationQuery::CityName(format!("{city_name},{country_code}")))
    }

    /// State codes are only honored by the API for US locations.
    pub fn by_city_name_state_and_country(
        self,
        city_name: &str,
        state_code: &str,
        country_code: &str,
    ) -> ApiRequest<'a, E> {
        self.by_location(LocationQuery::CityName(format!(
            "{city_name},{state_code},{country_code}"
        )))
    }

    pub fn by_city_id(self, city_id: u64) -> ApiRequest<'a, E> {
        self.by_location(LocationQuery::CityId(city_id))
    }

    pub fn by_coordinate(self, coordinate: Coordinate) -> ApiRequest<'a, E> {
        self.by_location(LocationQuery::Coordinate(coordinate))
    }

    pub fn by_zip_code(self, zip_code: &str, country_code: &str) -> ApiRequest<'a, E> {
        self.by_location(LocationQuery::ZipCode {
            zip_code: zip_code.to_string(),
            country_code: country_code.to_string(),
        })
    }
}
