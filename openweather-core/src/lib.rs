//! Core library for the `owm` CLI: a typed client for the OpenWeatherMap API.
//!
//! This crate defines:
//! - Request builders for every endpoint, validated before any network I/O
//! - Domain models with range checks and unit conversions
//! - Configuration & credentials handling
//!
//! It is used by `openweather-cli`, but can also be reused by other binaries or services.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod request;
pub mod transport;

pub use api::LocationQuery;
pub use client::{ClientOptions, OpenWeatherClient};
pub use config::Config;
pub use error::{Error, Result};
pub use request::{ApiRequest, Endpoint, Host};
pub use transport::{ReqwestTransport, Transport};
