//! Weather Domain Helpers
//!
//! Parameter normalization, deterministic rounding and the slot-to-day
//! aggregation used by the forecast path.

use super::models::{ForecastDay, DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS};
use crate::error::WeatherError;
use chrono::NaiveDate;

/// Resolves the `days` parameter: absent falls back to the default,
/// oversized values are clamped to the supported maximum, and a
/// non-positive value is rejected outright.
pub fn normalize_days(days: Option<i64>) -> Result<u32, WeatherError> {
    match days {
        None => Ok(DEFAULT_FORECAST_DAYS),
        Some(n) if n <= 0 => Err(WeatherError::Validation(format!(
            "days must be positive, got {n}"
        ))),
        Some(n) => Ok((n as u32).min(MAX_FORECAST_DAYS)),
    }
}

/// Rounds to one decimal place so identical upstream data always maps to
/// identical results.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One 3-hour forecast slot after provider decoding, before daily
/// aggregation.
#[derive(Debug, Clone)]
pub struct ForecastSlot {
    pub date: NaiveDate,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub condition: String,
    pub icon: String,
}

/// Collapses 3-hour slots into at most `days` daily entries.
///
/// Slots arrive in chronological order from the provider, so days are
/// grouped by consecutive runs of the same date and the output preserves
/// that order. Per day: lowest slot minimum, highest slot maximum, mean
/// temperature/humidity/wind, and the day's most frequent condition.
pub fn aggregate_daily(slots: Vec<ForecastSlot>, days: u32) -> Vec<ForecastDay> {
    let mut grouped: Vec<(NaiveDate, Vec<ForecastSlot>)> = Vec::new();
    for slot in slots {
        match grouped.last_mut() {
            Some((date, bucket)) if *date == slot.date => bucket.push(slot),
            _ => grouped.push((slot.date, vec![slot])),
        }
    }

    grouped
        .into_iter()
        .take(days as usize)
        .map(|(date, bucket)| summarize_day(date, &bucket))
        .collect()
}

fn summarize_day(date: NaiveDate, bucket: &[ForecastSlot]) -> ForecastDay {
    let count = bucket.len() as f64;
    let temperature = round1(bucket.iter().map(|s| s.temp).sum::<f64>() / count);
    let temp_min = round1(bucket.iter().map(|s| s.temp_min).fold(f64::INFINITY, f64::min));
    let temp_max = round1(
        bucket
            .iter()
            .map(|s| s.temp_max)
            .fold(f64::NEG_INFINITY, f64::max),
    );
    let humidity =
        (bucket.iter().map(|s| u32::from(s.humidity)).sum::<u32>() as f64 / count).round() as u8;
    let wind_speed = round1(bucket.iter().map(|s| s.wind_speed).sum::<f64>() / count);
    let (condition, icon) = modal_condition(bucket);

    ForecastDay {
        date,
        temperature,
        temp_min,
        temp_max,
        humidity,
        wind_speed,
        condition,
        icon,
    }
}

/// Most frequent condition of the day; the earliest slot wins ties.
fn modal_condition(bucket: &[ForecastSlot]) -> (String, String) {
    let mut condition = String::new();
    let mut icon = String::new();
    let mut best = 0;
    for slot in bucket {
        let count = bucket
            .iter()
            .filter(|s| s.condition == slot.condition)
            .count();
        if count > best {
            best = count;
            condition = slot.condition.clone();
            icon = slot.icon.clone();
        }
    }
    (condition, icon)
}
