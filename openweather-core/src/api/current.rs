use serde::Deserialize;

use crate::api::wire::{
    WireClouds, WireCoord, WireMain, WirePrecipitation, WireWeatherState, WireWind, first_state,
    optional_unix_to_utc, precipitation, unix_to_utc, zone_offset,
};
use crate::api::{FromLocation, LocationQuery, LocationRequester, coordinate_params};
use crate::error::{Error, Result};
use crate::model::{Coordinate, CoordinateRectangle, Location, UnitSystem, Weather};
use crate::request::{ApiRequest, Endpoint, HtmlMode, Localized, XmlMode};

/// `data/2.5/weather`: conditions at a single location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    location: LocationQuery,
}

impl FromLocation for CurrentWeather {
    fn from_location(location: LocationQuery) -> Self {
        Self { location }
    }
}

impl Endpoint for CurrentWeather {
    type Output = Weather;

    fn path(&self) -> &'static str {
        "data/2.5/weather"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.location.params()
    }

    fn validate(&self) -> Result<()> {
        self.location.validate()
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<Weather> {
        let wire: WireWeather = serde_json::from_str(body)?;
        wire.into_model(units)
    }
}

impl Localized for CurrentWeather {}
impl XmlMode for CurrentWeather {}
impl HtmlMode for CurrentWeather {}

/// `data/2.5/box/city`: every city inside a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct CitiesInRectangle {
    rectangle: CoordinateRectangle,
    zoom: u8,
}

impl Endpoint for CitiesInRectangle {
    type Output = Vec<Weather>;

    fn path(&self) -> &'static str {
        "data/2.5/box/city"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("bbox", format!("{},{}", self.rectangle.format_as_bbox(), self.zoom))]
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<Vec<Weather>> {
        let wire: WireWeatherList = serde_json::from_str(body)?;
        wire.list.into_iter().map(|w| w.into_model(units)).collect()
    }
}

impl Localized for CitiesInRectangle {}

/// `data/2.5/find`: the cities closest to a point.
#[derive(Debug, Clone, PartialEq)]
pub struct CitiesInCircle {
    center: Coordinate,
    count: u8,
}

/// The API caps `cnt` for circle lookups at 50.
pub const MAX_CITIES_IN_CIRCLE: u8 = 50;

impl Endpoint for CitiesInCircle {
    type Output = Vec<Weather>;

    fn path(&self) -> &'static str {
        "data/2.5/find"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = coordinate_params(&self.center);
        params.push(("cnt", self.count.to_string()));
        params
    }

    fn validate(&self) -> Result<()> {
        if self.count == 0 || self.count > MAX_CITIES_IN_CIRCLE {
            return Err(Error::invalid_request(format!(
                "City count must be in range [1, {MAX_CITIES_IN_CIRCLE}], got {}",
                self.count
            )));
        }
        Ok(())
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<Vec<Weather>> {
        let wire: WireWeatherList = serde_json::from_str(body)?;
        wire.list.into_iter().map(|w| w.into_model(units)).collect()
    }
}

impl Localized for CitiesInCircle {}

impl<'a> LocationRequester<'a, CurrentWeather> {
    pub fn by_rectangle(
        self,
        rectangle: CoordinateRectangle,
        zoom: u8,
    ) -> ApiRequest<'a, CitiesInRectangle> {
        ApiRequest::localized(self.client(), CitiesInRectangle { rectangle, zoom })
    }

    pub fn by_circle(self, center: Coordinate, count: u8) -> ApiRequest<'a, CitiesInCircle> {
        ApiRequest::localized(self.client(), CitiesInCircle { center, count })
    }
}

#[derive(Debug, Deserialize)]
struct WireSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireWeather {
    coord: Option<WireCoord>,
    #[serde(default)]
    weather: Vec<WireWeatherState>,
    base: Option<String>,
    main: WireMain,
    visibility: Option<u32>,
    wind: Option<WireWind>,
    rain: Option<WirePrecipitation>,
    snow: Option<WirePrecipitation>,
    clouds: Option<WireClouds>,
    dt: i64,
    sys: Option<WireSys>,
    timezone: Option<i32>,
    id: Option<u64>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireWeatherList {
    #[serde(default)]
    list: Vec<WireWeather>,
}

impl WireWeather {
    fn into_model(self, units: UnitSystem) -> Result<Weather> {
        let sys = self.sys.unwrap_or(WireSys { country: None, sunrise: None, sunset: None });

        let location = Location {
            id: self.id.filter(|id| *id != 0),
            name: self.name,
            country_code: sys.country.filter(|c| !c.is_empty()),
            state: None,
            sunrise: optional_unix_to_utc(sys.sunrise)?,
            sunset: optional_unix_to_utc(sys.sunset)?,
            zone_offset: self.timezone.map(zone_offset).transpose()?,
            coordinate: self.coord.as_ref().map(WireCoord::to_model).transpose()?,
            population: None,
        };

        Ok(Weather {
            calculated_on: unix_to_utc(self.dt)?,
            state: first_state(self.weather),
            temperature: self.main.temperature(units)?,
            pressure: self.main.pressure()?,
            humidity: self.main.humidity()?,
            wind: self.wind.as_ref().map(|w| w.to_model(units)).transpose()?,
            rain: precipitation(self.rain)?,
            snow: precipitation(self.snow)?,
            clouds: self.clouds.as_ref().map(WireClouds::to_model).transpose()?,
            visibility: self.visibility,
            location,
            base: self.base,
        })
    }
}
