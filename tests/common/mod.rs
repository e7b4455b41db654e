//! Shared test fixtures: stub weather providers and app construction
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use weather_mcp_rust::error::WeatherError;
use weather_mcp_rust::router::create_app_router;
use weather_mcp_rust::state::AppState;
use weather_mcp_rust::weather::adapter::WeatherProvider;
use weather_mcp_rust::weather::models::{CurrentWeather, Forecast, ForecastDay};

/// Provider stub returning canned data (or a canned failure) and counting
/// how often the dispatcher reached it.
pub struct StubProvider {
    fail_with: Option<WeatherError>,
    calls: AtomicUsize,
}

impl StubProvider {
    /// Stub that always succeeds with the sample data.
    pub fn ok() -> Self {
        Self {
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Stub whose every operation fails with `err`.
    pub fn failing(err: WeatherError) -> Self {
        Self {
            fail_with: Some(err),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the dispatcher invoked this provider.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The canned current-weather result: 18.0 °C, humidity 72,
    /// "scattered clouds".
    pub fn sample_current(city: &str, country: &str) -> CurrentWeather {
        CurrentWeather {
            city: city.to_string(),
            country: country.to_string(),
            temperature: 18.0,
            feels_like: 17.2,
            temp_min: 15.6,
            temp_max: 19.4,
            humidity: 72,
            pressure: 1012,
            wind_speed: 4.1,
            wind_direction: Some(240),
            condition: "scattered clouds".to_string(),
            icon: "03d".to_string(),
        }
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<CurrentWeather, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(Self::sample_current(city, country_code.unwrap_or("GB")))
    }

    async fn forecast(
        &self,
        city: &str,
        country_code: Option<&str>,
        days: u32,
    ) -> Result<Forecast, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let days = (0..days)
            .map(|offset| ForecastDay {
                date: start + chrono::Duration::days(i64::from(offset)),
                temperature: 16.0 + f64::from(offset),
                temp_min: 13.0 + f64::from(offset),
                temp_max: 19.0 + f64::from(offset),
                humidity: 70,
                wind_speed: 3.5,
                condition: "light rain".to_string(),
                icon: "10d".to_string(),
            })
            .collect();

        Ok(Forecast {
            city: city.to_string(),
            country: country_code.unwrap_or("GB").to_string(),
            days,
        })
    }
}

/// Assembles the full application router around a stub provider.
pub fn test_app(provider: Arc<StubProvider>) -> axum::Router {
    test_state(provider).1
}

/// Like `test_app`, also exposing the state for direct dispatcher calls.
pub fn test_state(provider: Arc<StubProvider>) -> (Arc<AppState>, axum::Router) {
    let state = Arc::new(AppState::new(provider));
    let app = create_app_router(state.clone());
    (state, app)
}
