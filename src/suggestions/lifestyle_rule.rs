//! Flags and habits: smoking, alcohol, activity level, family history.

use super::thresholds::{blood_pressure_elevated, MIN_ACTIVE_DAYS};
use super::{CategoryMap, SuggestionCategory, SuggestionRule};
use crate::models::HealthRecord;

pub const SMOKING_CESSATION: &str = "Quitting smoking is the single most effective action you can take to improve your health. Speak with your doctor about support resources like counseling and nicotine replacement therapy.";

pub const ALCOHOL_MODERATION: &str = "If you consume alcohol, do so in moderation (up to 1 drink/day for women, 2 for men) to minimize health risks.";

pub const FAMILY_HISTORY_SCREENING: &str = "Your family history increases your predisposition to certain conditions. Regular health screenings and a proactive approach to lifestyle are particularly important for you.";

pub struct LifestyleRule;

impl SuggestionRule for LifestyleRule {
    fn name(&self) -> &'static str {
        "lifestyle"
    }

    fn apply(&self, record: &HealthRecord, out: &mut CategoryMap) {
        if record.smoking {
            out.add(SuggestionCategory::LifestyleHabits, SMOKING_CESSATION);
        }

        // Elevated pressure already carries the stricter alcohol limit.
        if record.alcohol && !blood_pressure_elevated(record.systolic.whole(), record.diastolic.whole()) {
            out.add(SuggestionCategory::LifestyleHabits, ALCOHOL_MODERATION);
        }

        if record.activity_days.whole() < MIN_ACTIVE_DAYS {
            out.add(
                SuggestionCategory::Exercise,
                format!(
                    "An activity level of {} days/week is below recommendations. Find an enjoyable activity to build consistency. Start small, e.g., a 15-minute daily walk, and gradually increase.",
                    record.activity_days
                ),
            );
        }

        if record.family_history {
            out.add(SuggestionCategory::GeneralHealth, FAMILY_HISTORY_SCREENING);
        }
    }
}
