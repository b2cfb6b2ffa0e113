use super::thresholds::CHOLESTEROL_HIGH;
use super::{CategoryMap, SuggestionCategory, SuggestionRule};
use crate::models::HealthRecord;

pub struct CholesterolRule;

impl SuggestionRule for CholesterolRule {
    fn name(&self) -> &'static str {
        "cholesterol"
    }

    fn apply(&self, record: &HealthRecord, out: &mut CategoryMap) {
        if record.cholesterol.whole() > CHOLESTEROL_HIGH {
            out.add(
                SuggestionCategory::Cholesterol,
                format!(
                    "Your total cholesterol of {} mg/dL is high. It's important to manage this to protect your arteries.",
                    record.cholesterol
                ),
            );
            out.add(
                SuggestionCategory::Diet,
                "Increase soluble fiber (oats, beans, apples) and replace saturated/trans fats with unsaturated fats. Add sources of Omega-3s like salmon or walnuts to your diet twice a week.",
            );
        } else {
            out.add(
                SuggestionCategory::Cholesterol,
                "Your cholesterol level is within a healthy range.",
            );
        }
    }
}
