use std::{fmt, sync::Arc, time::Duration};
use url::Url;

use crate::api::{
    LocationRequester,
    air_pollution::AirPollutionRequester,
    current::CurrentWeather,
    daily::{ClimaticForecastEndpoint, DailyForecastEndpoint},
    forecast::{FiveDayForecast, HourlyForecastEndpoint},
    geocoding::GeocodingRequester,
    one_call::OneCallRequester,
    road_risk::RoadRiskRequester,
    solar_radiation::SolarRadiationRequester,
};
use crate::error::{Error, Result};
use crate::model::{Language, UnitSystem};
use crate::request::Host;
use crate::transport::{ReqwestTransport, Transport};

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/";
pub const DEFAULT_PRO_URL: &str = "https://pro.openweathermap.org/";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_url: String,
    pub pro_url: String,
    /// Applied to requests that honor `units`; overridable per request.
    pub unit_system: UnitSystem,
    pub language: Option<Language>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            pro_url: DEFAULT_PRO_URL.to_string(),
            unit_system: UnitSystem::Standard,
            language: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Entry point for every request.
///
/// ```no_run
/// use openweather_core::{OpenWeatherClient, model::UnitSystem};
///
/// # async fn run() -> openweather_core::Result<()> {
/// let client = OpenWeatherClient::new("API_KEY")?;
/// let weather = client
///     .current_weather()
///     .by_city_name("London")
///     .unit_system(UnitSystem::Metric)
///     .retrieve()
///     .await?;
/// println!("{weather}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    options: ClientOptions,
    api_url: Url,
    pro_url: Url,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("options", &self.options)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

fn base_url(raw: &str) -> Result<Url> {
    // Relative joins drop the last path segment unless it ends with a slash.
    let url = if raw.ends_with('/') { Url::parse(raw)? } else { Url::parse(&format!("{raw}/"))? };
    if url.cannot_be_a_base() {
        return Err(Error::invalid_request(format!("not a base URL: {raw}")));
    }
    Ok(url)
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, ClientOptions::default())
    }

    pub fn with_options(api_key: impl Into<String>, options: ClientOptions) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(options.timeout)?);
        Self::with_transport(api_key, options, transport)
    }

    pub fn with_transport(
        api_key: impl Into<String>,
        options: ClientOptions,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::invalid_request("API key must not be empty"));
        }

        Ok(Self {
            api_key,
            api_url: base_url(&options.api_url)?,
            pro_url: base_url(&options.pro_url)?,
            options,
            transport,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn base_url(&self, host: Host) -> &Url {
        match host {
            Host::Api => &self.api_url,
            Host::Pro => &self.pro_url,
        }
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Current weather for one location, or for cities in a rectangle or circle.
    pub fn current_weather(&self) -> LocationRequester<'_, CurrentWeather> {
        LocationRequester::new(self)
    }

    /// 5 day forecast with a 3 hour step.
    pub fn five_day_forecast(&self) -> LocationRequester<'_, FiveDayForecast> {
        LocationRequester::new(self)
    }

    /// 4 day forecast with a 1 hour step (pro host).
    pub fn hourly_forecast(&self) -> LocationRequester<'_, HourlyForecastEndpoint> {
        LocationRequester::new(self)
    }

    /// Up to 16 days, one entry per day.
    pub fn daily_forecast(&self) -> LocationRequester<'_, DailyForecastEndpoint> {
        LocationRequester::new(self)
    }

    /// Up to 30 days, one entry per day (pro host).
    pub fn climatic_forecast(&self) -> LocationRequester<'_, ClimaticForecastEndpoint> {
        LocationRequester::new(self)
    }

    pub fn air_pollution(&self) -> AirPollutionRequester<'_> {
        AirPollutionRequester::new(self)
    }

    pub fn geocoding(&self) -> GeocodingRequester<'_> {
        GeocodingRequester::new(self)
    }

    pub fn road_risk(&self) -> RoadRiskRequester<'_> {
        RoadRiskRequester::new(self)
    }

    pub fn solar_radiation(&self) -> SolarRadiationRequester<'_> {
        SolarRadiationRequester::new(self)
    }

    pub fn one_call(&self) -> OneCallRequester<'_> {
        OneCallRequester::new(self)
    }
}
