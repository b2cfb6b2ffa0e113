use super::thresholds::GLUCOSE_ELEVATED;
use super::{CategoryMap, SuggestionCategory, SuggestionRule};
use crate::models::HealthRecord;

pub struct GlucoseRule;

impl SuggestionRule for GlucoseRule {
    fn name(&self) -> &'static str {
        "glucose"
    }

    fn apply(&self, record: &HealthRecord, out: &mut CategoryMap) {
        if record.glucose.whole() < GLUCOSE_ELEVATED {
            out.add(
                SuggestionCategory::Glucose,
                "Your glucose level is in a healthy range.",
            );
            return;
        }

        out.add(
            SuggestionCategory::Glucose,
            format!(
                "Your fasting glucose of {} mg/dL is elevated, suggesting pre-diabetes risk. Prompt lifestyle changes can significantly reduce the risk of developing type 2 diabetes.",
                record.glucose
            ),
        );
        out.add(
            SuggestionCategory::Diet,
            "Minimize sugary drinks and refined carbs (white bread, pasta). Prioritize non-starchy vegetables, lean proteins, and whole grains to stabilize blood sugar.",
        );
        out.add(
            SuggestionCategory::Exercise,
            "Regular exercise improves insulin sensitivity. Even a 10-15 minute walk after meals can help manage blood sugar levels.",
        );
    }
}
