use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::{Error, Result};
use crate::model::common::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AirQualityIndex {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AirQualityIndex {
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            1 => Ok(AirQualityIndex::Good),
            2 => Ok(AirQualityIndex::Fair),
            3 => Ok(AirQualityIndex::Moderate),
            4 => Ok(AirQualityIndex::Poor),
            5 => Ok(AirQualityIndex::VeryPoor),
            _ => Err(Error::invalid_value(format!(
                "Air quality index must be in range [1, 5], got {value}"
            ))),
        }
    }

    pub fn value(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn label(&self) -> &'static str {
        match self {
            AirQualityIndex::Good => "Good",
            AirQualityIndex::Fair => "Fair",
            AirQualityIndex::Moderate => "Moderate",
            AirQualityIndex::Poor => "Poor",
            AirQualityIndex::VeryPoor => "Very Poor",
        }
    }
}

impl fmt::Display for AirQualityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}

/// Pollutant concentrations in μg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AirPollutionConcentration {
    pub carbon_monoxide: f64,
    pub nitrogen_monoxide: f64,
    pub nitrogen_dioxide: f64,
    pub ozone: f64,
    pub sulphur_dioxide: f64,
    pub fine_particles: f64,
    pub coarse_particles: f64,
    pub ammonia: f64,
}

impl fmt::Display for AirPollutionConcentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CO: {}, NO: {}, NO2: {}, O3: {}, SO2: {}, PM2.5: {}, PM10: {}, NH3: {} (μg/m³)",
            self.carbon_monoxide,
            self.nitrogen_monoxide,
            self.nitrogen_dioxide,
            self.ozone,
            self.sulphur_dioxide,
            self.fine_particles,
            self.coarse_particles,
            self.ammonia
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirPollutionRecord {
    pub forecast_time: DateTime<Utc>,
    pub air_quality_index: AirQualityIndex,
    pub concentration: AirPollutionConcentration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirPollutionDetails {
    pub coordinate: Coordinate,
    pub records: Vec<AirPollutionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_quality_index_values() {
        assert_eq!(AirQualityIndex::from_value(1).unwrap(), AirQualityIndex::Good);
        assert_eq!(AirQualityIndex::from_value(5).unwrap(), AirQualityIndex::VeryPoor);
        assert_eq!(AirQualityIndex::Moderate.value(), 3);
        assert!(AirQualityIndex::from_value(0).is_err());
        assert!(AirQualityIndex::from_value(6).is_err());
        assert!(AirQualityIndex::Poor > AirQualityIndex::Fair);
    }
}
