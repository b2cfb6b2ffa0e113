use rand::Rng;

use super::{Estimate, RiskEstimator, RiskScore};
use crate::models::HealthRecord;

/// Uniform random score in [1, 100], independent of the record.
pub struct RandomEstimator;

impl RiskEstimator for RandomEstimator {
    fn estimate(&self, _record: &HealthRecord) -> Estimate {
        let value = rand::thread_rng().gen_range(1..=100u8);
        Estimate {
            score: RiskScore::new(value),
            predictions: None,
        }
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::health_record::fixtures::healthy_record;

    #[test]
    fn score_stays_in_range() {
        let record = healthy_record();
        for _ in 0..500 {
            let estimate = RandomEstimator.estimate(&record);
            assert!((1..=100).contains(&estimate.score.value()));
            assert!(estimate.predictions.is_none());
        }
    }
}
