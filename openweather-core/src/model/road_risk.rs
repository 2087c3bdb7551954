use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::{Error, Result};
use crate::model::common::Coordinate;

/// A point of the route sent to the road risk endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub coordinate: Coordinate,
    pub time: DateTime<Utc>,
}

impl TrackPoint {
    pub fn new(coordinate: Coordinate, time: DateTime<Utc>) -> Self {
        Self { coordinate, time }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadState {
    NoReport,
    Dry,
    Moist,
    MoistAndChemicallyTreated,
    Wet,
    WetAndChemicallyTreated,
    Ice,
    Frost,
    Snow,
    SnowIceWatch,
    SnowIceWarning,
    WetAboveFreezing,
    WetBelowFreezing,
    Absorption,
    AbsorptionAtDewpoint,
    Dew,
    BlackIceWarning,
    Other,
    Slush,
}

impl RoadState {
    const ALL: [RoadState; 19] = [
        RoadState::NoReport,
        RoadState::Dry,
        RoadState::Moist,
        RoadState::MoistAndChemicallyTreated,
        RoadState::Wet,
        RoadState::WetAndChemicallyTreated,
        RoadState::Ice,
        RoadState::Frost,
        RoadState::Snow,
        RoadState::SnowIceWatch,
        RoadState::SnowIceWarning,
        RoadState::WetAboveFreezing,
        RoadState::WetBelowFreezing,
        RoadState::Absorption,
        RoadState::AbsorptionAtDewpoint,
        RoadState::Dew,
        RoadState::BlackIceWarning,
        RoadState::Other,
        RoadState::Slush,
    ];

    pub fn from_code(code: u8) -> Result<Self> {
        RoadState::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| Error::invalid_value(format!("Unknown road state code {code}")))
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn description(&self) -> &'static str {
        match self {
            RoadState::NoReport => "No report",
            RoadState::Dry => "Dry",
            RoadState::Moist => "Moist",
            RoadState::MoistAndChemicallyTreated => "Moist and chemically treated",
            RoadState::Wet => "Wet",
            RoadState::WetAndChemicallyTreated => "Wet and chemically treated",
            RoadState::Ice => "Ice",
            RoadState::Frost => "Frost",
            RoadState::Snow => "Snow",
            RoadState::SnowIceWatch => "Snow/Ice watch",
            RoadState::SnowIceWarning => "Snow/Ice warning",
            RoadState::WetAboveFreezing => "Wet above freezing",
            RoadState::WetBelowFreezing => "Wet below freezing",
            RoadState::Absorption => "Absorption",
            RoadState::AbsorptionAtDewpoint => "Absorption at dewpoint",
            RoadState::Dew => "Dew",
            RoadState::BlackIceWarning => "Black ice warning",
            RoadState::Other => "Other",
            RoadState::Slush => "Slush",
        }
    }
}

impl fmt::Display for RoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlertLevel {
    Green,
    Yellow,
    Orange,
    Red,
}

impl AlertLevel {
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            1 => Ok(AlertLevel::Green),
            2 => Ok(AlertLevel::Yellow),
            3 => Ok(AlertLevel::Orange),
            4 => Ok(AlertLevel::Red),
            _ => Err(Error::invalid_value(format!("Unknown alert level {value}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadWeather {
    /// Kelvin; road risk does not honor `units`.
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_degrees: Option<f64>,
    /// mm/h
    pub precipitation_intensity: Option<f64>,
    pub dew_point: Option<f64>,
    pub visibility: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadDetails {
    pub state: RoadState,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadAlert {
    pub sender_name: String,
    pub event: String,
    pub level: AlertLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadRiskRecord {
    pub forecast_time: DateTime<Utc>,
    pub coordinate: Coordinate,
    pub weather: Option<RoadWeather>,
    pub road: Option<RoadDetails>,
    pub alerts: Vec<RoadAlert>,
}

impl fmt::Display for RoadRiskRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ ({:.4}, {:.4})",
            self.forecast_time.format("%Y-%m-%d %H:%M"),
            self.coordinate.latitude(),
            self.coordinate.longitude()
        )?;
        if let Some(road) = &self.road {
            write!(f, ", Road: {}", road.state)?;
        }
        for alert in &self.alerts {
            write!(f, ", Alert: {} ({:?})", alert.event, alert.level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn road_state_codes() {
        assert_eq!(RoadState::from_code(0).unwrap(), RoadState::NoReport);
        assert_eq!(RoadState::from_code(16).unwrap(), RoadState::BlackIceWarning);
        assert_eq!(RoadState::from_code(18).unwrap(), RoadState::Slush);
        assert_eq!(RoadState::Slush.code(), 18);
        assert!(RoadState::from_code(19).is_err());
    }

    #[test]
    fn alert_levels() {
        assert_eq!(AlertLevel::from_value(2).unwrap(), AlertLevel::Yellow);
        assert!(AlertLevel::from_value(0).is_err());
        assert!(AlertLevel::Red > AlertLevel::Orange);
    }
}
