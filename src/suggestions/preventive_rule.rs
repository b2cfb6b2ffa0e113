use super::{CategoryMap, SuggestionCategory, SuggestionRule};
use crate::models::HealthRecord;

/// Appended to every document regardless of the record.
pub const PREVENTIVE_CARE: [&str; 4] = [
    "Hydration Goal: Aim to drink around 8 glasses (2 liters) of water daily. Proper hydration is crucial for energy, organ function, and skin health.",
    "Sleep Hygiene: Target 7-9 hours of quality sleep per night. Create a relaxing bedtime routine and maintain a consistent sleep/wake schedule.",
    "Mental Wellness: Dedicate time to activities that reduce stress and bring you joy, such as hobbies, mindfulness, or spending time in nature.",
    "Regular Check-ups: Schedule annual physicals and recommended screenings with your doctor to monitor your health and catch potential issues early.",
];

pub struct PreventiveCareRule;

impl SuggestionRule for PreventiveCareRule {
    fn name(&self) -> &'static str {
        "preventive_care"
    }

    fn apply(&self, _record: &HealthRecord, out: &mut CategoryMap) {
        for entry in PREVENTIVE_CARE {
            out.add(SuggestionCategory::PreventativeCare, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::health_record::fixtures::{healthy_record, high_risk_record};

    #[test]
    fn same_four_entries_for_any_record() {
        for record in [healthy_record(), high_risk_record()] {
            let mut map = CategoryMap::new();
            PreventiveCareRule.apply(&record, &mut map);
            assert_eq!(map.entries(SuggestionCategory::PreventativeCare), PREVENTIVE_CARE);
        }
    }
}
