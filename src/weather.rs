//! Climate data aggregation
//!
//! Queries the NASA POWER hourly point API for a fixed set of parameters
//! over a fixed year and reduces each hourly series to per-day statistics.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const POWER_HOURLY_URL: &str = "https://power.larc.nasa.gov/api/temporal/hourly/point";
/// Value the API reports for missing samples
const FILL_VALUE: f64 = -999.0;

pub const WINDOW_START: &str = "20230101";
pub const WINDOW_END: &str = "20231231";

/// Hourly parameters requested from the service
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeatherParameter {
    /// Temperature at 2 m (°C)
    T2M,
    /// Relative humidity at 2 m (%)
    RH2M,
    /// Wind speed at 2 m (m/s)
    WS2M,
    /// Corrected precipitation (mm/hour)
    PRECTOTCORR,
}

impl WeatherParameter {
    pub const ALL: [WeatherParameter; 4] = [
        WeatherParameter::T2M,
        WeatherParameter::RH2M,
        WeatherParameter::WS2M,
        WeatherParameter::PRECTOTCORR,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherParameter::T2M => "T2M",
            WeatherParameter::RH2M => "RH2M",
            WeatherParameter::WS2M => "WS2M",
            WeatherParameter::PRECTOTCORR => "PRECTOTCORR",
        }
    }
}

/// Query URL for a location over the fixed window
pub fn query_url(latitude: f64, longitude: f64) -> String {
    let parameters: Vec<_> = WeatherParameter::ALL.iter().map(|p| p.as_str()).collect();
    format!(
        "{}?parameters={}&community=RE&longitude={:.4}&latitude={:.4}&start={}&end={}&format=JSON",
        POWER_HOURLY_URL,
        parameters.join(","),
        longitude,
        latitude,
        WINDOW_START,
        WINDOW_END
    )
}

/// Statistics for one day of one parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// `YYYYMMDD`
    pub date: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Valid hourly samples that went into the statistics
    pub samples: usize,
}

#[derive(Debug, Deserialize)]
struct PowerResponse {
    #[serde(default)]
    properties: PowerProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PowerProperties {
    #[serde(default)]
    parameter: HashMap<String, BTreeMap<String, f64>>,
}

/// Daily statistics per parameter, days in ascending order
pub type DailySeries = BTreeMap<WeatherParameter, Vec<DailySummary>>;

/// Parse a service response and aggregate every known parameter
pub fn aggregate_json(json: &str) -> Result<DailySeries> {
    let response: PowerResponse = serde_json::from_str(json)?;
    let mut series = DailySeries::new();
    for param in WeatherParameter::ALL {
        match response.properties.parameter.get(param.as_str()) {
            Some(hourly) => {
                series.insert(param, aggregate_daily(hourly));
            }
            None => log::debug!("Weather response has no {} series", param.as_str()),
        }
    }
    Ok(series)
}

/// Reduce a `YYYYMMDDHH → value` series to per-day mean/min/max
pub fn aggregate_daily(hourly: &BTreeMap<String, f64>) -> Vec<DailySummary> {
    let mut days: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (stamp, &value) in hourly {
        let Some(day) = stamp.get(..8) else {
            continue;
        };
        let samples = days.entry(day).or_default();
        if value != FILL_VALUE && value.is_finite() {
            samples.push(value);
        }
    }

    days.into_iter()
        .map(|(date, samples)| summarize(date, &samples))
        .collect()
}

fn summarize(date: &str, samples: &[f64]) -> DailySummary {
    if samples.is_empty() {
        return DailySummary {
            date: date.to_string(),
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            samples: 0,
        };
    }
    let sum: f64 = samples.iter().sum();
    DailySummary {
        date: date.to_string(),
        mean: sum / samples.len() as f64,
        min: samples.iter().copied().fold(f64::INFINITY, f64::min),
        max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        samples: samples.len(),
    }
}
