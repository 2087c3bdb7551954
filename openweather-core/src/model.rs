//! Domain values returned by the API requests.
//!
//! Validated value objects (coordinates, temperature, wind, ...) keep their
//! fields private and check ranges on construction and in setters. Aggregates
//! built from a response are plain structs with public fields.

pub mod air;
pub mod common;
pub mod daily;
pub mod geo;
pub mod one_call;
pub mod radiation;
pub mod road_risk;
pub mod units;
pub mod weather;

pub use air::{AirPollutionConcentration, AirPollutionDetails, AirPollutionRecord, AirQualityIndex};
pub use common::{
    AtmosphericPressure, Clouds, Coordinate, CoordinateRectangle, DayTime, Humidity, Location,
    Precipitation, Rain, Snow, Temperature, WeatherGroup, WeatherState, Wind,
};
pub use daily::{ClimaticForecast, DailyForecast, DailyTemperature, DailyWeather};
pub use geo::{GeocodingRecord, ZipCodeGeocodingRecord};
pub use one_call::{
    Alert, DaySummary, DaySummaryTemperature, HourlyForecast, MinutelyForecast, OneCallCurrent,
    OneCallDaily, OneCallHistorical, OneCallPart, OneCallWeather, WeatherOverview,
};
pub use radiation::{SolarRadiation, SolarRadiationRecord};
pub use road_risk::{
    AlertLevel, RoadAlert, RoadDetails, RoadRiskRecord, RoadState, RoadWeather, TrackPoint,
};
pub use units::{Language, ResponseFormat, TemperatureUnit, UnitSystem, WindSpeedUnit};
pub use weather::{Forecast, Weather, WeatherForecast};
