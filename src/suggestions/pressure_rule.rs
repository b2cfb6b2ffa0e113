use super::thresholds::blood_pressure_elevated;
use super::{CategoryMap, SuggestionCategory, SuggestionRule};
use crate::models::HealthRecord;

pub struct BloodPressureRule;

impl SuggestionRule for BloodPressureRule {
    fn name(&self) -> &'static str {
        "blood_pressure"
    }

    fn apply(&self, record: &HealthRecord, out: &mut CategoryMap) {
        if !blood_pressure_elevated(record.systolic.whole(), record.diastolic.whole()) {
            out.add(
                SuggestionCategory::BloodPressure,
                "Your blood pressure is in a healthy range. Keep up the great work!",
            );
            return;
        }

        out.add(
            SuggestionCategory::BloodPressure,
            format!(
                "Your reading of {}/{} mmHg is elevated. High blood pressure increases the risk of heart disease and stroke.",
                record.systolic, record.diastolic
            ),
        );
        out.add(
            SuggestionCategory::Diet,
            "Significantly reduce sodium intake by avoiding processed foods and canned soups. Aim for less than 2,300 mg per day. The DASH diet is a proven approach.",
        );
        out.add(
            SuggestionCategory::LifestyleHabits,
            "Limit alcohol to no more than 1 drink/day for women, 2 for men. Practice daily stress management for 10-15 minutes (meditation, deep breathing, journaling).",
        );
    }
}
