//! City builder environmental scoring
//!
//! Placed elements shift five environmental scores away from a baseline of
//! 50. A remote prediction service can override the local model; when it
//! fails or answers with garbage, the local model is used instead.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::finite_or;

/// Maximum count of any single element kind
pub const MAX_PER_KIND: u8 = 10;
/// Score every dimension starts from (and falls back to)
pub const BASELINE_SCORE: f32 = 50.0;
/// Path of the remote prediction endpoint
pub const PREDICT_PATH: &str = "/predict/complete";

/// Something the player can place in the city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Tree,
    Park,
    SolarPanel,
    WindTurbine,
    Factory,
    Road,
}

impl ElementKind {
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Tree,
        ElementKind::Park,
        ElementKind::SolarPanel,
        ElementKind::WindTurbine,
        ElementKind::Factory,
        ElementKind::Road,
    ];

    /// Per-unit score change: air quality, temperature, vegetation, energy, atmosphere
    pub fn impact(&self) -> EnvironmentScores {
        let [air_quality, temperature, vegetation, energy, atmosphere] = match self {
            ElementKind::Tree => [3.0, 1.5, 5.0, 0.0, 2.0],
            ElementKind::Park => [2.0, 1.0, 4.0, -0.5, 1.5],
            ElementKind::SolarPanel => [1.0, 0.5, 0.0, 5.0, 1.0],
            ElementKind::WindTurbine => [1.0, 0.0, -0.5, 6.0, 1.0],
            ElementKind::Factory => [-6.0, -3.0, -2.0, 4.0, -5.0],
            ElementKind::Road => [-3.0, -1.5, -2.0, -2.0, -3.0],
        };
        EnvironmentScores {
            air_quality,
            temperature,
            vegetation,
            energy,
            atmosphere,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Five environmental scores, each in [0, 100] once sanitized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentScores {
    pub air_quality: f32,
    pub temperature: f32,
    pub vegetation: f32,
    pub energy: f32,
    pub atmosphere: f32,
}

impl Default for EnvironmentScores {
    fn default() -> Self {
        Self::uniform(BASELINE_SCORE)
    }
}

impl EnvironmentScores {
    pub fn uniform(value: f32) -> Self {
        Self {
            air_quality: value,
            temperature: value,
            vegetation: value,
            energy: value,
            atmosphere: value,
        }
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            air_quality: f(self.air_quality),
            temperature: f(self.temperature),
            vegetation: f(self.vegetation),
            energy: f(self.energy),
            atmosphere: f(self.atmosphere),
        }
    }

    /// Non-finite values become the baseline, everything is clamped to [0, 100]
    pub fn sanitized(self) -> Self {
        self.map(|v| finite_or(v, BASELINE_SCORE).clamp(0.0, 100.0))
    }

    pub fn as_array(&self) -> [f32; 5] {
        [
            self.air_quality,
            self.temperature,
            self.vegetation,
            self.energy,
            self.atmosphere,
        ]
    }

    /// Mean of the five scores
    pub fn overall(&self) -> f32 {
        self.as_array().iter().sum::<f32>() / 5.0
    }
}

/// Element counts placed by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CityLayout {
    counts: [u8; 6],
}

impl CityLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: ElementKind) -> u8 {
        self.counts[kind.index()]
    }

    /// Place one element. Returns false if that kind is already at the cap.
    pub fn place(&mut self, kind: ElementKind) -> bool {
        let count = &mut self.counts[kind.index()];
        if *count >= MAX_PER_KIND {
            return false;
        }
        *count += 1;
        true
    }

    /// Remove one element. Returns false if none were placed.
    pub fn remove(&mut self, kind: ElementKind) -> bool {
        let count = &mut self.counts[kind.index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Set a count directly, clamped to the cap
    pub fn set(&mut self, kind: ElementKind, count: u8) {
        self.counts[kind.index()] = count.min(MAX_PER_KIND);
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    pub fn clear(&mut self) {
        self.counts = [0; 6];
    }

    /// Local linear model
    pub fn local_scores(&self) -> EnvironmentScores {
        let mut scores = EnvironmentScores::default();
        for kind in ElementKind::ALL {
            let n = self.count(kind) as f32;
            let impact = kind.impact();
            scores.air_quality += n * impact.air_quality;
            scores.temperature += n * impact.temperature;
            scores.vegetation += n * impact.vegetation;
            scores.energy += n * impact.energy;
            scores.atmosphere += n * impact.atmosphere;
        }
        scores.sanitized()
    }

    /// Request body for the prediction service
    pub fn metrics(&self) -> CityMetrics {
        let total = self.total() as f32;
        let share = |n: u8| -> f32 {
            if total > 0.0 {
                n as f32 / total * 100.0
            } else {
                0.0
            }
        };
        let green = self.count(ElementKind::Tree) + self.count(ElementKind::Park);
        let renewable = self.count(ElementKind::SolarPanel) + self.count(ElementKind::WindTurbine);
        let max_kind = MAX_PER_KIND as f32;

        CityMetrics {
            trees: self.count(ElementKind::Tree) as f32,
            parks: self.count(ElementKind::Park) as f32,
            solar_panels: self.count(ElementKind::SolarPanel) as f32,
            wind_turbines: self.count(ElementKind::WindTurbine) as f32,
            factories: self.count(ElementKind::Factory) as f32,
            roads: self.count(ElementKind::Road) as f32,
            total_elements: total,
            green_coverage: share(green),
            renewable_share: share(renewable),
            industrial_density: self.count(ElementKind::Factory) as f32 / max_kind * 100.0,
            traffic_density: self.count(ElementKind::Road) as f32 / max_kind * 100.0,
            population: 1000.0
                + 250.0 * self.count(ElementKind::Factory) as f32
                + 150.0 * self.count(ElementKind::Road) as f32,
        }
    }
}

/// Twelve-field city description sent to the prediction service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityMetrics {
    pub trees: f32,
    pub parks: f32,
    pub solar_panels: f32,
    pub wind_turbines: f32,
    pub factories: f32,
    pub roads: f32,
    pub total_elements: f32,
    /// Percent of placed elements that are trees or parks
    pub green_coverage: f32,
    /// Percent of placed elements that generate renewable energy
    pub renewable_share: f32,
    pub industrial_density: f32,
    pub traffic_density: f32,
    pub population: f32,
}

/// Prediction service response; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PredictionResponse {
    pub temperature: Option<TemperaturePrediction>,
    pub air_quality: Option<AirQualityPrediction>,
    pub energy: Option<EnergyPrediction>,
    pub scores: Option<PredictedScores>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemperaturePrediction {
    pub predicted_change: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AirQualityPrediction {
    pub aqi: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnergyPrediction {
    pub renewable_percentage: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PredictedScores {
    pub air_quality: Option<f32>,
    pub temperature: Option<f32>,
    pub vegetation: Option<f32>,
    pub energy: Option<f32>,
    pub atmosphere: Option<f32>,
}

/// Map an air quality index onto a 0-100 score (AQI 150 is 0)
pub fn aqi_to_score(aqi: f32) -> f32 {
    100.0 - aqi * 0.67
}

/// Map a predicted temperature change (°C) onto a 0-100 score.
/// No change is the baseline; +4 °C is 0 and -4 °C is 100.
pub fn temperature_change_to_score(change: f32) -> f32 {
    BASELINE_SCORE - change * 12.5
}

impl PredictionResponse {
    /// Parse a raw response body
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Scores from the response, falling back per field
    pub fn scores(&self) -> EnvironmentScores {
        let s = self.scores.clone().unwrap_or_default();
        let aqi = self.air_quality.as_ref().and_then(|a| a.aqi);
        let renewable = self.energy.as_ref().and_then(|e| e.renewable_percentage);
        let warming = self.temperature.as_ref().and_then(|t| t.predicted_change);

        EnvironmentScores {
            air_quality: s
                .air_quality
                .or(aqi.map(aqi_to_score))
                .unwrap_or(BASELINE_SCORE),
            temperature: s
                .temperature
                .or(warming.map(temperature_change_to_score))
                .unwrap_or(BASELINE_SCORE),
            vegetation: s.vegetation.unwrap_or(BASELINE_SCORE),
            energy: s.energy.or(renewable).unwrap_or(BASELINE_SCORE),
            atmosphere: s.atmosphere.unwrap_or(BASELINE_SCORE),
        }
        .sanitized()
    }
}

/// Remote scoring service
pub trait Predictor {
    fn predict(&self, metrics: &CityMetrics) -> Result<PredictionResponse>;
}

/// Where an evaluation's scores came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    Remote,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub scores: EnvironmentScores,
    pub source: ScoreSource,
}

/// Score a layout, preferring the predictor and falling back to the local model
pub fn evaluate(layout: &CityLayout, predictor: Option<&dyn Predictor>) -> Evaluation {
    if let Some(predictor) = predictor {
        match predictor.predict(&layout.metrics()) {
            Ok(response) => {
                return Evaluation {
                    scores: response.scores(),
                    source: ScoreSource::Remote,
                };
            }
            Err(e) => log::warn!("Prediction unavailable, using local model: {}", e),
        }
    }

    Evaluation {
        scores: layout.local_scores(),
        source: ScoreSource::Local,
    }
}

/// Full prediction URL for a service base URL
pub fn prediction_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), PREDICT_PATH)
}
