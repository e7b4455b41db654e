//! Normalized Weather Result Models
//!
//! These are the shapes that cross the protocol boundary. The adapter
//! owns the mapping from provider-specific field names into these types;
//! nothing downstream ever sees raw provider JSON.
//!
//! Units are deterministic so identical upstream data always maps to
//! identical results: temperatures in Celsius and wind speeds in m/s,
//! both rounded to one decimal place; humidity in percent; pressure in
//! hPa.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upper bound on forecast length; the provider serves 3-hour slots five
/// days out.
pub const MAX_FORECAST_DAYS: u32 = 5;

/// Forecast length used when the caller does not ask for one.
pub const DEFAULT_FORECAST_DAYS: u32 = 5;

// =============================================================================
// Weather Domain Models
// =============================================================================

/// Current conditions for a single location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Resolved city name as reported by the provider
    pub city: String,

    /// ISO country code
    pub country: String,

    /// Air temperature, °C
    pub temperature: f64,

    /// Perceived temperature, °C
    pub feels_like: f64,

    /// Low of the observation window, °C
    pub temp_min: f64,

    /// High of the observation window, °C
    pub temp_max: f64,

    /// Relative humidity, percent
    pub humidity: u8,

    /// Atmospheric pressure, hPa
    pub pressure: u32,

    /// Wind speed, m/s
    pub wind_speed: f64,

    /// Wind direction in meteorological degrees, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<u16>,

    /// Condition description (e.g. "scattered clouds")
    pub condition: String,

    /// Provider icon code for the condition
    pub icon: String,
}

/// Daily forecast for a single location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Resolved city name as reported by the provider
    pub city: String,

    /// ISO country code
    pub country: String,

    /// Daily entries in date order; never empty on success, at most
    /// [`MAX_FORECAST_DAYS`] long
    pub days: Vec<ForecastDay>,
}

/// One calendar day of a forecast, aggregated from the provider's
/// 3-hour slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Mean temperature across the day's slots, °C
    pub temperature: f64,

    /// Lowest slot minimum, °C
    pub temp_min: f64,

    /// Highest slot maximum, °C
    pub temp_max: f64,

    /// Mean relative humidity, percent
    pub humidity: u8,

    /// Mean wind speed, m/s
    pub wind_speed: f64,

    /// Most frequent condition of the day
    pub condition: String,

    /// Icon code belonging to `condition`
    pub icon: String,
}
