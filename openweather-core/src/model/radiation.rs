use chrono::{DateTime, Utc};

use crate::model::common::Coordinate;

/// Irradiance values in W/m². The `_clear_sky` variants assume a cloudless sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarRadiationRecord {
    pub measurement_time: DateTime<Utc>,
    /// Global horizontal irradiance.
    pub ghi: f64,
    /// Direct normal irradiance.
    pub dni: f64,
    /// Diffuse horizontal irradiance.
    pub dhi: f64,
    pub ghi_clear_sky: f64,
    pub dni_clear_sky: f64,
    pub dhi_clear_sky: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolarRadiation {
    pub coordinate: Coordinate,
    pub records: Vec<SolarRadiationRecord>,
}
