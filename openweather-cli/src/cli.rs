use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::debug;

use openweather_core::api::air_pollution::TimeSpan;
use openweather_core::model::{Coordinate, Language, OneCallPart, TrackPoint, UnitSystem};
use openweather_core::request::Localized;
use openweather_core::{ApiRequest, Config, Endpoint, LocationQuery, OpenWeatherClient};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "owm", version, about = "OpenWeatherMap CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// standard (K, m/s), metric (°C, m/s) or imperial (°F, mph).
    #[arg(long, global = true)]
    pub units: Option<UnitSystem>,

    /// Language code for descriptions, e.g. "de" or "zh_cn".
    #[arg(long, global = true)]
    pub lang: Option<Language>,

    /// Print the raw JSON body instead of formatted output.
    #[arg(long, global = true, conflicts_with = "url")]
    pub json: bool,

    /// Print the request URL without calling the API.
    #[arg(long, global = true)]
    pub url: bool,
}

/// One of: city name, `--id`, `--lat`/`--lon` or `--zip`.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// City name, optionally with state and country codes: "London,GB".
    pub city: Option<String>,

    #[arg(long)]
    pub id: Option<u64>,

    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Zip code with optional country code: "94040,US".
    #[arg(long)]
    pub zip: Option<String>,
}

impl LocationArgs {
    pub fn query(&self) -> Result<LocationQuery> {
        match (&self.city, self.id, self.lat.zip(self.lon), &self.zip) {
            (Some(city), None, None, None) => Ok(LocationQuery::CityName(city.clone())),
            (None, Some(id), None, None) => Ok(LocationQuery::CityId(id)),
            (None, None, Some((lat, lon)), None) => {
                Ok(LocationQuery::Coordinate(Coordinate::new(lat, lon)?))
            }
            (None, None, None, Some(zip)) => {
                let (zip_code, country_code) = zip.split_once(',').unwrap_or((zip, "US"));
                Ok(LocationQuery::ZipCode {
                    zip_code: zip_code.to_string(),
                    country_code: country_code.to_string(),
                })
            }
            _ => bail!("Specify exactly one location: a city name, --id, --lat/--lon or --zip"),
        }
    }
}

#[derive(Debug, Args)]
pub struct CoordinateArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

impl CoordinateArgs {
    pub fn coordinate(&self) -> Result<Coordinate> {
        Ok(Coordinate::new(self.lat, self.lon)?)
    }
}

#[derive(Debug, Args)]
pub struct TimeSpanArgs {
    /// Forecast instead of current values.
    #[arg(long, conflicts_with = "history")]
    pub forecast: bool,

    /// Historical values between two unix timestamps.
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub history: Option<Vec<i64>>,
}

impl TimeSpanArgs {
    pub fn span(&self) -> Result<TimeSpan> {
        match (&self.history, self.forecast) {
            (Some(bounds), _) => match bounds.as_slice() {
                [start, end] => Ok(TimeSpan::History { start: unix(*start)?, end: unix(*end)? }),
                _ => bail!("--history takes a start and an end timestamp"),
            },
            (None, true) => Ok(TimeSpan::Forecast),
            (None, false) => Ok(TimeSpan::Current),
        }
    }
}

fn unix(ts: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0).with_context(|| format!("Timestamp out of range: {ts}"))
}

/// `lat,lon,unix` as used by `road-risk`.
fn parse_track_point(value: &str) -> std::result::Result<TrackPoint, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [lat, lon, ts] = parts.as_slice() else {
        return Err(format!("expected lat,lon,unix_time, got '{value}'"));
    };

    let lat: f64 = lat.parse().map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
    let lon: f64 = lon.parse().map_err(|e| format!("invalid longitude '{lon}': {e}"))?;
    let ts: i64 = ts.parse().map_err(|e| format!("invalid timestamp '{ts}': {e}"))?;

    let coordinate = Coordinate::new(lat, lon).map_err(|e| e.to_string())?;
    let time = DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| format!("timestamp out of range: {ts}"))?;
    Ok(TrackPoint::new(coordinate, time))
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default units and language.
    Configure,

    /// Current weather.
    Current {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// 5 day forecast with a 3 hour step.
    Forecast {
        #[command(flatten)]
        location: LocationArgs,

        /// Number of 3 hour steps (1-40).
        #[arg(long)]
        count: Option<u8>,
    },

    /// 4 day forecast with a 1 hour step (paid plans).
    Hourly {
        #[command(flatten)]
        location: LocationArgs,

        /// Number of hours (1-96).
        #[arg(long)]
        count: Option<u8>,
    },

    /// Daily forecast up to 16 days.
    Daily {
        #[command(flatten)]
        location: LocationArgs,

        #[arg(long)]
        days: Option<u8>,
    },

    /// Climatic forecast up to 30 days (paid plans).
    Climatic {
        #[command(flatten)]
        location: LocationArgs,

        #[arg(long)]
        days: Option<u8>,
    },

    /// Air quality index and pollutant concentrations.
    Air {
        #[command(flatten)]
        coordinate: CoordinateArgs,

        #[command(flatten)]
        span: TimeSpanArgs,
    },

    /// Coordinates by location name.
    Geocode {
        /// City name, optionally with state and country codes: "Austin,TX,US".
        query: String,

        #[arg(long)]
        limit: Option<u8>,
    },

    /// Location names by coordinates.
    Reverse {
        #[command(flatten)]
        coordinate: CoordinateArgs,

        #[arg(long)]
        limit: Option<u8>,
    },

    /// Coordinates by zip or post code.
    Zip {
        code: String,

        #[arg(long, default_value = "US")]
        country: String,
    },

    /// Solar irradiance (GHI, DNI, DHI).
    Solar {
        #[command(flatten)]
        coordinate: CoordinateArgs,

        #[command(flatten)]
        span: TimeSpanArgs,
    },

    /// One Call 3.0: current, forecasts and alerts, or historical and aggregated data.
    Onecall {
        #[command(flatten)]
        coordinate: CoordinateArgs,

        /// Parts to leave out: current, minutely, hourly, daily, alerts.
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<OneCallPart>,

        /// Conditions at a unix timestamp.
        #[arg(long, conflicts_with_all = ["summary", "overview", "exclude"])]
        at: Option<i64>,

        /// Aggregated values for a date (YYYY-MM-DD).
        #[arg(long, conflicts_with_all = ["overview", "exclude"])]
        summary: Option<NaiveDate>,

        /// Human readable overview for today.
        #[arg(long, conflicts_with = "exclude")]
        overview: bool,
    },

    /// Road conditions along a route.
    RoadRisk {
        /// Track points as lat,lon,unix_time.
        #[arg(required = true, value_parser = parse_track_point, allow_hyphen_values = true)]
        points: Vec<TrackPoint>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Command::Configure = self.command {
            return configure();
        }

        let config = Config::load()?;
        let client =
            OpenWeatherClient::with_options(config.resolved_api_key()?, config.client_options())?;
        debug!(options = ?client.options(), "client ready");
        let c = &client;

        match &self.command {
            Command::Configure => configure(),
            Command::Current { location } => {
                let request = c.current_weather().by_location(location.query()?);
                self.emit(self.localize(request), |w| println!("{w}")).await
            }
            Command::Forecast { location, count } => {
                let mut request = c.five_day_forecast().by_location(location.query()?);
                if let Some(count) = count {
                    request = request.count(*count);
                }
                self.emit(self.localize(request), |f| output::print_forecast(&f)).await
            }
            Command::Hourly { location, count } => {
                let mut request = c.hourly_forecast().by_location(location.query()?);
                if let Some(count) = count {
                    request = request.count(*count);
                }
                self.emit(self.localize(request), |f| output::print_forecast(&f)).await
            }
            Command::Daily { location, days } => {
                let mut request = c.daily_forecast().by_location(location.query()?);
                if let Some(days) = days {
                    request = request.days(*days);
                }
                self.emit(self.localize(request), |f| output::print_daily(&f.location, &f.items))
                    .await
            }
            Command::Climatic { location, days } => {
                let mut request = c.climatic_forecast().by_location(location.query()?);
                if let Some(days) = days {
                    request = request.days(*days);
                }
                self.emit(self.localize(request), |f| output::print_daily(&f.location, &f.items))
                    .await
            }
            Command::Air { coordinate, span } => {
                let air = c.air_pollution();
                let coordinate = coordinate.coordinate()?;
                let request = match span.span()? {
                    TimeSpan::Current => air.current(coordinate),
                    TimeSpan::Forecast => air.forecast(coordinate),
                    TimeSpan::History { start, end } => air.history(coordinate, start, end),
                };
                self.emit(request, |d| output::print_air_pollution(&d)).await
            }
            Command::Geocode { query, limit } => {
                let mut parts = query.splitn(3, ',').map(str::trim);
                let mut request = c.geocoding().by_location_name(parts.next().unwrap_or_default());
                match (parts.next(), parts.next()) {
                    (Some(state), Some(country)) => {
                        request = request.state_code(state).country_code(country)
                    }
                    (Some(country), None) => request = request.country_code(country),
                    _ => {}
                }
                if let Some(limit) = limit {
                    request = request.limit(*limit);
                }
                self.emit(request, |r| output::print_lines(&r)).await
            }
            Command::Reverse { coordinate, limit } => {
                let mut request = c.geocoding().reverse(coordinate.coordinate()?);
                if let Some(limit) = limit {
                    request = request.limit(*limit);
                }
                self.emit(request, |r| output::print_lines(&r)).await
            }
            Command::Zip { code, country } => {
                let request = c.geocoding().by_zip_code(code, country);
                self.emit(request, |r| println!("{r}")).await
            }
            Command::Solar { coordinate, span } => {
                let solar = c.solar_radiation();
                let coordinate = coordinate.coordinate()?;
                let request = match span.span()? {
                    TimeSpan::Current => solar.current(coordinate),
                    TimeSpan::Forecast => solar.forecast(coordinate),
                    TimeSpan::History { start, end } => solar.history(coordinate, start, end),
                };
                self.emit(request, |r| output::print_solar_radiation(&r)).await
            }
            Command::Onecall { coordinate, exclude, at, summary, overview } => {
                let one_call = c.one_call();
                let coordinate = coordinate.coordinate()?;
                if let Some(at) = at {
                    let request = self.localize(one_call.historical(coordinate, unix(*at)?));
                    self.emit(request, |h| output::print_historical(&h)).await
                } else if let Some(date) = summary {
                    let request = self.localize(one_call.day_summary(coordinate, *date));
                    self.emit(request, |s| println!("{s}")).await
                } else if *overview {
                    let request = self.localize(one_call.overview(coordinate, None));
                    self.emit(request, |o| println!("{o}")).await
                } else {
                    let request =
                        self.localize(one_call.current_and_forecast(coordinate).exclude(exclude));
                    self.emit(request, |w| output::print_one_call(&w)).await
                }
            }
            Command::RoadRisk { points } => {
                let request = c.road_risk().by_track(points.clone());
                self.emit(request, |r| output::print_lines(&r)).await
            }
        }
    }

    fn localize<'a, E: Localized>(&self, request: ApiRequest<'a, E>) -> ApiRequest<'a, E> {
        let request = match self.units {
            Some(units) => request.unit_system(units),
            None => request,
        };
        match self.lang {
            Some(language) => request.language(language),
            None => request,
        }
    }

    /// Prints the URL, the raw body or the rendered model depending on the global flags.
    async fn emit<E: Endpoint>(
        &self,
        request: ApiRequest<'_, E>,
        render: impl FnOnce(E::Output),
    ) -> Result<()> {
        if self.url {
            println!("{}", request.url()?);
            return Ok(());
        }
        if self.json {
            println!("{}", request.retrieve_json().await?);
            return Ok(());
        }

        render(request.retrieve().await?);
        Ok(())
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key.trim());

    let units = Select::new("Default unit system:", UnitSystem::all().to_vec())
        .prompt()
        .context("Failed to read unit system")?;
    config.unit_system = Some(units);

    let language = Text::new("Default language code (empty for the API default):")
        .prompt()
        .context("Failed to read language")?;
    config.language = match language.trim() {
        "" => None,
        code => Some(Language::try_from(code)?),
    };

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
