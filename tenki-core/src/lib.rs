//! Core library for the `tenki` status-bar widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client and response decoding
//! - The static condition translation table
//! - The widget record printed for the status bar
//!
//! It is used by `tenki-cli`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod translate;
pub mod widget;

pub use config::{Config, Overrides, Settings};
pub use error::WeatherError;
pub use model::{WeatherReading, WeatherRequest};
pub use provider::{WeatherApiProvider, WeatherProvider};
pub use translate::{Translation, TranslationEntry};
pub use widget::{OutputRecord, current_record};
