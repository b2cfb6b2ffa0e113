//! Per-condition predictions and the score derived from them.
//!
//! The production `MockPredictor` is a fixed additive table, not a model:
//! each condition starts from a base probability and gains a fixed increment
//! for every contributing risk factor present, capped at 0.99.

use std::time::Duration;

use serde::Serialize;

use super::{Estimate, RiskEstimator, RiskScore};
use crate::models::HealthRecord;
use crate::suggestions::thresholds;

/// Probability ceiling for any mocked condition.
pub const MAX_PROBABILITY: f64 = 0.99;

/// A condition is predicted positive strictly above this probability.
pub const POSITIVE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Condition {
    #[serde(rename = "Heart Disease")]
    HeartDisease,
    Diabetes,
    Hypertension,
    Stress,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::HeartDisease,
        Condition::Diabetes,
        Condition::Hypertension,
        Condition::Stress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::HeartDisease => "Heart Disease",
            Condition::Diabetes => "Diabetes",
            Condition::Hypertension => "Hypertension",
            Condition::Stress => "Stress",
        }
    }
}

/// Binary classification of one condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionPrediction {
    condition: Condition,
    probability: f64,
    at_risk: bool,
    /// Confidence in the predicted class: `probability` when at risk,
    /// `1 - probability` otherwise.
    confidence: f64,
}

impl ConditionPrediction {
    /// `probability` is clamped to [0, 1].
    pub fn new(condition: Condition, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        let at_risk = probability > POSITIVE_THRESHOLD;
        let confidence = if at_risk { probability } else { 1.0 - probability };
        Self {
            condition,
            probability,
            at_risk,
            confidence,
        }
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn is_at_risk(&self) -> bool {
        self.at_risk
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// One-line summary used in assistant prompts.
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} (confidence {:.0}%)",
            self.condition.as_str(),
            if self.at_risk { "At Risk" } else { "Not At Risk" },
            self.confidence * 100.0
        )
    }
}

/// Score in [0, 100] from a set of predictions.
///
/// Any positive: `round(max positive confidence × 90) + 10`.
/// None positive: `round((1 − max negative confidence) × 40)`.
pub fn score_from_predictions(predictions: &[ConditionPrediction]) -> RiskScore {
    let max_conf = |positive: bool| {
        predictions
            .iter()
            .filter(|p| p.at_risk == positive)
            .map(|p| p.confidence)
            .fold(None, |acc: Option<f64>, c| Some(acc.map_or(c, |a| a.max(c))))
    };

    let raw = match max_conf(true) {
        Some(conf) => (conf * 90.0).round() + 10.0,
        None => ((1.0 - max_conf(false).unwrap_or(0.0)) * 40.0).round(),
    };
    RiskScore::new(raw.clamp(0.0, 100.0) as u8)
}

/// Source of per-condition predictions.
pub trait Predictor: Send + Sync {
    fn predict(&self, record: &HealthRecord) -> Vec<ConditionPrediction>;
}

/// Additive risk-factor table standing in for a trained model.
pub struct MockPredictor;

struct ConditionProfile {
    base: f64,
    increment: f64,
}

impl MockPredictor {
    fn profile(condition: Condition) -> ConditionProfile {
        match condition {
            Condition::HeartDisease => ConditionProfile {
                base: 0.10,
                increment: 0.12,
            },
            Condition::Diabetes => ConditionProfile {
                base: 0.08,
                increment: 0.15,
            },
            Condition::Hypertension => ConditionProfile {
                base: 0.10,
                increment: 0.13,
            },
            Condition::Stress => ConditionProfile {
                base: 0.15,
                increment: 0.10,
            },
        }
    }

    /// Number of contributing risk factors present for `condition`.
    fn factor_count(condition: Condition, r: &HealthRecord) -> usize {
        let bp_elevated = thresholds::blood_pressure_elevated(r.systolic.whole(), r.diastolic.whole());
        let overweight = r.bmi.value >= thresholds::BMI_OVERWEIGHT;
        let low_activity = r.activity_days.whole() < thresholds::MIN_ACTIVE_DAYS;

        let factors = match condition {
            Condition::HeartDisease => vec![
                r.age.value >= 50.0,
                bp_elevated,
                r.cholesterol.whole() > thresholds::CHOLESTEROL_HIGH,
                r.smoking,
                r.family_history,
                r.bmi.value >= thresholds::BMI_OBESE,
            ],
            Condition::Diabetes => vec![
                r.glucose.whole() >= thresholds::GLUCOSE_ELEVATED,
                overweight,
                low_activity,
                r.family_history,
                r.age.value >= 45.0,
            ],
            Condition::Hypertension => vec![
                bp_elevated,
                overweight,
                r.alcohol,
                r.smoking,
                r.age.value >= 55.0,
            ],
            Condition::Stress => vec![low_activity, r.smoking, r.alcohol, bp_elevated],
        };
        factors.iter().filter(|present| **present).count()
    }
}

impl Predictor for MockPredictor {
    fn predict(&self, record: &HealthRecord) -> Vec<ConditionPrediction> {
        Condition::ALL
            .iter()
            .map(|&condition| {
                let profile = Self::profile(condition);
                let factors = Self::factor_count(condition, record) as f64;
                let probability = (profile.base + profile.increment * factors).min(MAX_PROBABILITY);
                ConditionPrediction::new(condition, probability)
            })
            .collect()
    }
}

/// Deterministic predictor returning a preset list.
pub struct FixedPredictor(pub Vec<ConditionPrediction>);

impl Predictor for FixedPredictor {
    fn predict(&self, _record: &HealthRecord) -> Vec<ConditionPrediction> {
        self.0.clone()
    }
}

/// Estimator that scores from a `Predictor`'s output.
pub struct PredictionEstimator<P: Predictor> {
    predictor: P,
    latency: Duration,
}

impl<P: Predictor> PredictionEstimator<P> {
    pub fn new(predictor: P, latency: Duration) -> Self {
        Self { predictor, latency }
    }
}

impl<P: Predictor> RiskEstimator for PredictionEstimator<P> {
    fn estimate(&self, record: &HealthRecord) -> Estimate {
        let predictions = self.predictor.predict(record);
        let score = score_from_predictions(&predictions);
        tracing::debug!(
            score = score.value(),
            positives = predictions.iter().filter(|p| p.is_at_risk()).count(),
            "Prediction-derived risk score"
        );
        Estimate {
            score,
            predictions: Some(predictions),
        }
    }

    fn latency(&self) -> Duration {
        self.latency
    }

    fn name(&self) -> &'static str {
        "prediction"
    }
}
