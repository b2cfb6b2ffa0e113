use super::thresholds::{BMI_OVERWEIGHT, BMI_UNDERWEIGHT};
use super::{CategoryMap, SuggestionCategory, SuggestionRule};
use crate::models::HealthRecord;

pub struct BmiRule;

impl SuggestionRule for BmiRule {
    fn name(&self) -> &'static str {
        "bmi"
    }

    fn apply(&self, record: &HealthRecord, out: &mut CategoryMap) {
        let bmi = &record.bmi;

        if bmi.value >= BMI_OVERWEIGHT {
            out.add(
                SuggestionCategory::Bmi,
                format!(
                    "Your BMI of {bmi} is in the overweight/obese range. A healthy BMI is typically between 18.5 and 24.9. Focusing on gradual, sustainable changes is key."
                ),
            );
            out.add(
                SuggestionCategory::Diet,
                "Adopt the \"plate method\": Fill half your plate with non-starchy vegetables (like broccoli, spinach, peppers), a quarter with lean protein (chicken, fish, tofu), and a quarter with complex carbs (quinoa, sweet potatoes).",
            );
            out.add(
                SuggestionCategory::Exercise,
                "Target 150 minutes of moderate-intensity cardio weekly (e.g., 30 minutes/day, 5 days/week of brisk walking, swimming, or cycling) plus two days of strength training (weights, bodyweight exercises).",
            );
            out.add(
                SuggestionCategory::LifestyleHabits,
                "Practice mindful eating: pay attention to hunger cues and eat slowly. Using smaller plates can also help manage portion sizes effectively.",
            );
        } else if bmi.value < BMI_UNDERWEIGHT {
            out.add(
                SuggestionCategory::Bmi,
                format!(
                    "Your BMI of {bmi} is in the underweight range. Ensuring adequate nutrition is important for energy and overall health."
                ),
            );
            out.add(
                SuggestionCategory::Diet,
                "Focus on nutrient-dense foods. Add healthy fats like avocado, nuts, and seeds to meals. Consider nutrient-rich smoothies with protein powder, fruit, and spinach.",
            );
            out.add(
                SuggestionCategory::LifestyleHabits,
                "Eat smaller, more frequent meals (5-6 per day) if you feel full quickly. Consulting a registered dietitian can provide a personalized plan.",
            );
        } else {
            out.add(
                SuggestionCategory::Bmi,
                format!(
                    "Your BMI of {bmi} is in a healthy range. Excellent! Maintain your current habits and explore new healthy recipes or activities to stay motivated."
                ),
            );
        }
    }
}
