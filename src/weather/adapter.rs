//! Weather Data Adapter
//!
//! `WeatherProvider` is the seam between the dispatcher and the outside
//! world; tests substitute stub implementations through it. The real
//! implementation, `OpenWeatherAdapter`, wraps the OpenWeatherMap HTTP
//! API and owns the translation from provider field names and units into
//! the normalized result models.
//!
//! One outbound call per operation, bounded by the configured timeout.
//! No caching and no retries live at this layer.

use super::helpers::{aggregate_daily, round1, ForecastSlot};
use super::models::{CurrentWeather, Forecast, MAX_FORECAST_DAYS};
use crate::config::Config;
use crate::error::WeatherError;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

/// Production endpoint; tests point the adapter elsewhere.
pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// The provider serves at most 40 three-hour slots (five days).
const MAX_FORECAST_SLOTS: u32 = 40;

/// Operations the dispatcher can route to.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a city.
    async fn current(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<CurrentWeather, WeatherError>;

    /// Daily forecast for a city, `days` entries long at most.
    async fn forecast(
        &self,
        city: &str,
        country_code: Option<&str>,
        days: u32,
    ) -> Result<Forecast, WeatherError>;
}

/// OpenWeatherMap-backed provider.
pub struct OpenWeatherAdapter {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherAdapter {
    /// Builds an adapter with its own HTTP client bounded by `timeout`.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Upstream(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: OPENWEATHER_BASE_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Builds an adapter from the resolved runtime configuration.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(config.api_key.clone(), config.upstream_timeout)
    }

    /// Overrides the provider endpoint. Tests use this to aim the
    /// adapter at a local stub server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Provider location query: `city` or `city,CC`.
    fn location_query(city: &str, country_code: Option<&str>) -> String {
        match country_code {
            Some(code) if !code.is_empty() => format!("{city},{code}"),
            _ => city.to_string(),
        }
    }

    /// Issues the single upstream GET for `path`, mapping the three
    /// upstream outcomes onto the error taxonomy: 404 → not found,
    /// credential/quota statuses → auth error, anything else that is not
    /// a decodable success → upstream error.
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        location: &str,
        extra: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut query: Vec<(&str, String)> = vec![
            ("q", location.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        query.extend_from_slice(extra);

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| WeatherError::Upstream(describe_send_error(&e)))?;

        let status = response.status();
        match status {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| WeatherError::Upstream(format!("undecodable provider response: {e}"))),
            StatusCode::NOT_FOUND => Err(WeatherError::NotFound(location.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                Err(WeatherError::UpstreamAuth(format!(
                    "provider returned {status}"
                )))
            }
            status => Err(WeatherError::Upstream(format!("provider returned {status}"))),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherAdapter {
    async fn current(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<CurrentWeather, WeatherError> {
        validate_city(city)?;
        let location = Self::location_query(city, country_code);
        info!(%location, "fetching current weather");

        let payload: OwmCurrentPayload = self.fetch("weather", &location, &[]).await?;
        map_current(payload)
    }

    async fn forecast(
        &self,
        city: &str,
        country_code: Option<&str>,
        days: u32,
    ) -> Result<Forecast, WeatherError> {
        validate_city(city)?;
        if days == 0 {
            return Err(WeatherError::Validation("days must be positive".to_string()));
        }
        // The dispatcher clamps before calling; re-clamp for direct users.
        let days = days.min(MAX_FORECAST_DAYS);
        let slots = (days * 8).min(MAX_FORECAST_SLOTS);

        let location = Self::location_query(city, country_code);
        info!(%location, days, "fetching forecast");

        let payload: OwmForecastPayload = self
            .fetch("forecast", &location, &[("cnt", slots.to_string())])
            .await?;
        map_forecast(payload, days)
    }
}

fn validate_city(city: &str) -> Result<(), WeatherError> {
    if city.trim().is_empty() {
        return Err(WeatherError::Validation("city must not be empty".to_string()));
    }
    Ok(())
}

fn describe_send_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "provider request timed out".to_string()
    } else {
        format!("provider request failed: {err}")
    }
}

// =============================================================================
// Provider Payloads
// =============================================================================

// Minimal views of the OpenWeatherMap responses; unknown fields are
// ignored so provider-side additions cannot break decoding.

#[derive(Debug, Deserialize)]
struct OwmCurrentPayload {
    name: String,
    sys: OwmSys,
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    #[serde(default)]
    deg: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastPayload {
    city: OwmForecastCity,
    list: Vec<OwmForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwmForecastEntry {
    /// Slot timestamp, `YYYY-MM-DD HH:MM:SS`
    dt_txt: String,
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
}

// =============================================================================
// Normalization
// =============================================================================

fn map_current(payload: OwmCurrentPayload) -> Result<CurrentWeather, WeatherError> {
    let OwmCurrentPayload {
        name,
        sys,
        main,
        weather,
        wind,
    } = payload;
    let condition = primary_condition(weather)?;

    Ok(CurrentWeather {
        city: name,
        country: sys.country,
        temperature: round1(main.temp),
        feels_like: round1(main.feels_like),
        temp_min: round1(main.temp_min),
        temp_max: round1(main.temp_max),
        humidity: main.humidity,
        pressure: main.pressure,
        wind_speed: round1(wind.speed),
        wind_direction: wind.deg,
        condition: condition.description,
        icon: condition.icon,
    })
}

fn map_forecast(payload: OwmForecastPayload, days: u32) -> Result<Forecast, WeatherError> {
    let OwmForecastPayload { city, list } = payload;

    let mut slots = Vec::with_capacity(list.len());
    for entry in list {
        let date = parse_slot_date(&entry.dt_txt)?;
        let condition = primary_condition(entry.weather)?;
        slots.push(ForecastSlot {
            date,
            temp: entry.main.temp,
            temp_min: entry.main.temp_min,
            temp_max: entry.main.temp_max,
            humidity: entry.main.humidity,
            wind_speed: entry.wind.speed,
            condition: condition.description,
            icon: condition.icon,
        });
    }

    let daily = aggregate_daily(slots, days);
    if daily.is_empty() {
        return Err(WeatherError::Upstream(
            "provider returned an empty forecast".to_string(),
        ));
    }

    Ok(Forecast {
        city: city.name,
        country: city.country,
        days: daily,
    })
}

fn primary_condition(mut conditions: Vec<OwmCondition>) -> Result<OwmCondition, WeatherError> {
    if conditions.is_empty() {
        return Err(WeatherError::Upstream(
            "provider response carried no condition".to_string(),
        ));
    }
    Ok(conditions.swap_remove(0))
}

fn parse_slot_date(dt_txt: &str) -> Result<NaiveDate, WeatherError> {
    let date_part = dt_txt.split_whitespace().next().unwrap_or(dt_txt);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| WeatherError::Upstream(format!("unrecognized forecast timestamp {dt_txt:?}")))
}
