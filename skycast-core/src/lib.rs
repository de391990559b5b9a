//! Core library for the `skycast` weather tool.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather lookup client and fetch orchestration
//! - View-model mapping (truncated temperatures, location-local times,
//!   icon/theme selection, the midday forecast filter)
//! - The recent-search store and the presentation state machine
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod app;
pub mod client;
pub mod config;
pub mod geo;
pub mod history;
pub mod model;
pub mod session;
pub mod view;

pub use app::App;
pub use client::{LookupError, WeatherClient, fetch_report};
pub use config::Config;
pub use geo::{GeoError, IpLocator, LocationProvider};
pub use history::{FileStore, KvStore, MemoryStore, RecentSearches};
pub use model::{
    AqiLevel, ConditionCode, Coordinates, ForecastEntry, Icon, Query, Theme, Unit, WeatherReport,
    WeatherSnapshot,
};
pub use session::{Session, ViewState};
