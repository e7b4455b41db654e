//! Weather Domain Module
//!
//! This module contains the weather data layer, including:
//! - Normalized result models (CurrentWeather, Forecast)
//! - Domain helpers (days normalization, rounding, daily aggregation)
//! - The provider trait and the OpenWeatherMap adapter

pub mod adapter;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use adapter::{OpenWeatherAdapter, WeatherProvider};
pub use models::{CurrentWeather, Forecast, ForecastDay};
