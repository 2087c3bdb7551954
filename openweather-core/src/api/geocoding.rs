use serde::Deserialize;
use std::collections::BTreeMap;

use crate::api::coordinate_params;
use crate::client::OpenWeatherClient;
use crate::error::{Error, Result};
use crate::model::{Coordinate, GeocodingRecord, UnitSystem, ZipCodeGeocodingRecord};
use crate::request::{ApiRequest, Endpoint};

/// The geocoding API returns five records at most.
pub const MAX_GEOCODING_LIMIT: u8 = 5;

fn validate_limit(limit: Option<u8>) -> Result<()> {
    match limit {
        Some(limit) if limit == 0 || limit > MAX_GEOCODING_LIMIT => {
            Err(Error::invalid_request(format!(
                "Result limit must be in range [1, {MAX_GEOCODING_LIMIT}], got {limit}"
            )))
        }
        _ => Ok(()),
    }
}

/// `geo/1.0/direct`: coordinates by location name.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectGeocoding {
    name: String,
    state_code: Option<String>,
    country_code: Option<String>,
    limit: Option<u8>,
}

impl DirectGeocoding {
    fn query_value(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(state) = &self.state_code {
            parts.push(state);
        }
        if let Some(country) = &self.country_code {
            parts.push(country);
        }
        parts.join(",")
    }
}

impl Endpoint for DirectGeocoding {
    type Output = Vec<GeocodingRecord>;

    fn path(&self) -> &'static str {
        "geo/1.0/direct"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.query_value())];
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_request("Location name must not be empty"));
        }
        if self.state_code.is_some() && self.country_code.is_none() {
            return Err(Error::invalid_request("A state code requires a country code"));
        }
        validate_limit(self.limit)
    }

    fn parse(&self, body: &str, _units: UnitSystem) -> Result<Vec<GeocodingRecord>> {
        parse_records(body)
    }
}

/// `geo/1.0/reverse`: location names by coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseGeocoding {
    coordinate: Coordinate,
    limit: Option<u8>,
}

impl Endpoint for ReverseGeocoding {
    type Output = Vec<GeocodingRecord>;

    fn path(&self) -> &'static str {
        "geo/1.0/reverse"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = coordinate_params(&self.coordinate);
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    fn validate(&self) -> Result<()> {
        validate_limit(self.limit)
    }

    fn parse(&self, body: &str, _units: UnitSystem) -> Result<Vec<GeocodingRecord>> {
        parse_records(body)
    }
}

/// `geo/1.0/zip`: coordinates by zip or post code.
#[derive(Debug, Clone, PartialEq)]
pub struct ZipCodeGeocoding {
    zip_code: String,
    country_code: String,
}

impl Endpoint for ZipCodeGeocoding {
    type Output = ZipCodeGeocodingRecord;

    fn path(&self) -> &'static str {
        "geo/1.0/zip"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("zip", format!("{},{}", self.zip_code, self.country_code))]
    }

    fn validate(&self) -> Result<()> {
        if self.zip_code.trim().is_empty() {
            return Err(Error::invalid_request("Zip code must not be empty"));
        }
        Ok(())
    }

    fn parse(&self, body: &str, _units: UnitSystem) -> Result<ZipCodeGeocodingRecord> {
        let wire: WireZipRecord = serde_json::from_str(body)?;
        Ok(ZipCodeGeocodingRecord {
            zip_code: wire.zip,
            name: wire.name,
            coordinate: Coordinate::new(wire.lat, wire.lon)?,
            country_code: wire.country,
        })
    }
}

impl ApiRequest<'_, DirectGeocoding> {
    pub fn state_code(mut self, state_code: &str) -> Self {
        self.endpoint.state_code = Some(state_code.to_string());
        self
    }

    pub fn country_code(mut self, country_code: &str) -> Self {
        self.endpoint.country_code = Some(country_code.to_string());
        self
    }

    pub fn limit(mut self, limit: u8) -> Self {
        self.endpoint.limit = Some(limit);
        self
    }
}

impl ApiRequest<'_, ReverseGeocoding> {
    pub fn limit(mut self, limit: u8) -> Self {
        self.endpoint.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GeocodingRequester<'a> {
    client: &'a OpenWeatherClient,
}

impl<'a> GeocodingRequester<'a> {
    pub(crate) fn new(client: &'a OpenWeatherClient) -> Self {
        Self { client }
    }

    pub fn by_location_name(self, name: &str) -> ApiRequest<'a, DirectGeocoding> {
        ApiRequest::new(
            self.client,
            DirectGeocoding {
                name: name.to_string(),
                state_code: None,
                country_code: None,
                limit: None,
            },
        )
    }

    pub fn reverse(self, coordinate: Coordinate) -> ApiRequest<'a, ReverseGeocoding> {
        ApiRequest::new(self.client, ReverseGeocoding { coordinate, limit: None })
    }

    pub fn by_zip_code(
        self,
        zip_code: &str,
        country_code: &str,
    ) -> ApiRequest<'a, ZipCodeGeocoding> {
        ApiRequest::new(
            self.client,
            ZipCodeGeocoding {
                zip_code: zip_code.to_string(),
                country_code: country_code.to_string(),
            },
        )
    }
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    name: String,
    #[serde(default)]
    local_names: BTreeMap<String, String>,
    lat: f64,
    lon: f64,
    country: String,
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireZipRecord {
    zip: String,
    name: String,
    lat: f64,
    lon: f64,
    country: String,
}

fn parse_records(body: &str) -> Result<Vec<GeocodingRecord>> {
    let wire: Vec<WireRecord> = serde_json::from_str(body)?;
    wire.into_iter()
        .map(|r| {
            Ok(GeocodingRecord {
                coordinate: Coordinate::new(r.lat, r.lon)?,
                name: r.name,
                local_names: r.local_names,
                country_code: r.country,
                state: r.state,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::canned_client;

    const DIRECT: &str = r#"[
        {"name": "London", "local_names": {"en": "London", "uk": "Лондон", "ascii": "London"},
         "lat": 51.5073219, "lon": -0.1276474, "country": "GB", "state": "England"},
        {"name": "London", "lat": 42.9832406, "lon": -81.243372, "country": "CA", "state": "Ontario"}
    ]"#;

    #[test]
    fn direct_url() {
        let (client, _) = canned_client(DIRECT);

        let url = client
            .geocoding()
            .by_location_name("London")
            .state_code("ENG")
            .country_code("GB")
            .limit(5)
            .url()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/geo/1.0/direct?q=London%2CENG%2CGB&limit=5&appid=KEY"
        );
    }

    #[test]
    fn direct_validation() {
        let (client, _) = canned_client(DIRECT);

        assert!(client.geocoding().by_location_name("").url().is_err());
        assert!(client.geocoding().by_location_name("London").limit(6).url().is_err());

        let err = client.geocoding().by_location_name("Austin").state_code("TX").url().unwrap_err();
        assert!(err.to_string().contains("requires a country code"));
    }

    #[test]
    fn reverse_and_zip_urls() {
        let (client, _) = canned_client("[]");
        let coordinate = Coordinate::new(51.5098, -0.1180).unwrap();

        let reverse = client.geocoding().reverse(coordinate).limit(1).url().unwrap();
        assert_eq!(reverse.path(), "/geo/1.0/reverse");
        assert_eq!(reverse.query(), Some("lat=51.5098&lon=-0.118&limit=1&appid=KEY"));

        let zip = client.geocoding().by_zip_code("E14", "GB").url().unwrap();
        assert_eq!(zip.query(), Some("zip=E14%2CGB&appid=KEY"));
    }

    #[test]
    fn maps_direct_records() {
        let records = parse_records(DIRECT).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].local_name("uk"), Some("Лондон"));
        assert_eq!(records[0].state.as_deref(), Some("England"));
        assert_eq!(records[1].country_code, "CA");
        assert!(records[1].local_names.is_empty());
    }

    #[test]
    fn maps_zip_record() {
        let body = r#"{"zip": "90210", "name": "Beverly Hills", "lat": 34.0901, "lon": -118.4065, "country": "US"}"#;
        let record = ZipCodeGeocoding { zip_code: "90210".into(), country_code: "US".into() }
            .parse(body, UnitSystem::Standard)
            .unwrap();

        assert_eq!(record.name, "Beverly Hills");
        assert_eq!(record.coordinate.longitude(), -118.4065);
        assert_eq!(record.to_string(), "90210 Beverly Hills, US (34.0901, -118.4065)");
    }

    #[tokio::test]
    async fn api_errors_are_surfaced() {
        use crate::transport::testing::CannedTransport;
        use std::sync::Arc;

        let transport =
            Arc::new(CannedTransport::failing(401, r#"{"cod":401,"message":"Invalid API key"}"#));
        let client =
            OpenWeatherClient::with_transport("BAD", Default::default(), transport).unwrap();

        let err = client.geocoding().by_location_name("London").retrieve().await.unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
