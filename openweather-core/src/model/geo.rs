use std::{collections::BTreeMap, fmt};

use crate::model::common::Coordinate;

/// Result of a direct (by name) or reverse (by coordinate) lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingRecord {
    pub name: String,
    /// Keyed by language code, e.g. `"en"` or the special `"ascii"`.
    pub local_names: BTreeMap<String, String>,
    pub coordinate: Coordinate,
    pub country_code: String,
    pub state: Option<String>,
}

impl GeocodingRecord {
    pub fn local_name(&self, code: &str) -> Option<&str> {
        self.local_names.get(code).map(String::as_str)
    }
}

impl fmt::Display for GeocodingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(state) = &self.state {
            write!(f, ", {state}")?;
        }
        write!(
            f,
            ", {} ({:.4}, {:.4})",
            self.country_code,
            self.coordinate.latitude(),
            self.coordinate.longitude()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZipCodeGeocodingRecord {
    pub zip_code: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub country_code: String,
}

impl fmt::Display for ZipCodeGeocodingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} ({:.4}, {:.4})",
            self.zip_code,
            self.name,
            self.country_code,
            self.coordinate.latitude(),
            self.coordinate.longitude()
        )
    }
}
