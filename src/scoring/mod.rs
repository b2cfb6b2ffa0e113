//! Risk score estimation.
//!
//! Neither estimator is a trained model. `RandomEstimator` is purely
//! illustrative; `PredictionEstimator` derives the score from per-condition
//! predictions produced by a swappable `Predictor`.

pub mod prediction;
pub mod random;

use std::time::Duration;

use serde::Serialize;

use crate::models::HealthRecord;

pub use prediction::{
    score_from_predictions, Condition, ConditionPrediction, FixedPredictor, MockPredictor,
    PredictionEstimator, Predictor,
};
pub use random::RandomEstimator;

/// Three-level band derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Low ≤33, Medium ≤66, High above.
    pub fn from_score(value: u8) -> Self {
        match value {
            0..=33 => RiskBand::Low,
            34..=66 => RiskBand::Medium,
            _ => RiskBand::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Medium => "Medium",
            RiskBand::High => "High",
        }
    }
}

/// Integer risk score in [0, 100] with its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskScore {
    value: u8,
    band: RiskBand,
}

impl RiskScore {
    /// Values above 100 are clamped.
    pub fn new(value: u8) -> Self {
        let value = value.min(100);
        Self {
            value,
            band: RiskBand::from_score(value),
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn band(&self) -> RiskBand {
        self.band
    }
}

/// Output of one estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub score: RiskScore,
    /// `None` for estimators that do not predict per condition.
    pub predictions: Option<Vec<ConditionPrediction>>,
}

pub trait RiskEstimator: Send + Sync {
    fn estimate(&self, record: &HealthRecord) -> Estimate;

    /// Artificial latency the caller awaits before `estimate`.
    fn latency(&self) -> Duration {
        Duration::ZERO
    }

    fn name(&self) -> &'static str;
}
