//! Canonical risk threshold table.
//!
//! One ruleset only: diastolic elevation starts at 80 mmHg.

/// BMI at or above this is overweight/obese.
pub const BMI_OVERWEIGHT: f64 = 25.0;
/// BMI below this is underweight.
pub const BMI_UNDERWEIGHT: f64 = 18.5;
/// BMI at or above this counts as obese (heart disease factor).
pub const BMI_OBESE: f64 = 30.0;

/// Systolic at or above this is elevated (mmHg).
pub const SYSTOLIC_ELEVATED: f64 = 130.0;
/// Diastolic at or above this is elevated (mmHg).
pub const DIASTOLIC_ELEVATED: f64 = 80.0;

/// Total cholesterol strictly above this is high (mg/dL).
pub const CHOLESTEROL_HIGH: f64 = 200.0;

/// Fasting glucose at or above this indicates pre-diabetes risk (mg/dL).
pub const GLUCOSE_ELEVATED: f64 = 100.0;

/// Fewer active days per week than this is low activity.
pub const MIN_ACTIVE_DAYS: f64 = 3.0;

pub fn blood_pressure_elevated(systolic: f64, diastolic: f64) -> bool {
    systolic >= SYSTOLIC_ELEVATED || diastolic >= DIASTOLIC_ELEVATED
}
