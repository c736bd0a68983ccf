//! Core library for the `airquality` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The AirVisual client behind the `AirQualityProvider` trait
//! - Summary field extraction and report rendering
//!
//! It is used by `airquality-cli`, but `run` takes the provider and the output
//! sink as parameters so other binaries and tests can substitute their own.

pub mod config;
pub mod model;
pub mod provider;
pub mod report;
pub mod runner;

pub use config::Config;
pub use model::{CityReport, CityRequest, ExtractError};
pub use provider::{AirQualityProvider, AirVisualClient, FetchError};
pub use runner::run;
