//! Health self-assessment input.
//!
//! `HealthForm` is the submission exactly as the form delivers it: numbers
//! arrive as strings. `HealthForm::validate` is the only way to obtain a
//! `HealthRecord`, so everything downstream may assume well-formed numbers
//! within their ranges. Each number keeps the text it was typed as, so
//! sentences quote the user verbatim.

use serde::{Deserialize, Serialize};

use super::enums::{Gender, YesNo};

/// Raw form submission. Absent fields deserialize as empty so validation
/// reports them as `Required` alongside every other failing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthForm {
    pub age: String,
    pub gender: Option<Gender>,
    pub bmi: String,
    pub systolic: String,
    pub diastolic: String,
    pub cholesterol: String,
    pub glucose: String,
    pub smoking: Option<YesNo>,
    pub alcohol: Option<YesNo>,
    /// Active days per week.
    pub activity: String,
    pub family_history: Option<YesNo>,
}

/// A validated number together with its trimmed input text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub value: f64,
    pub text: String,
}

impl Measurement {
    /// Integer part of the value; thresholds on whole-unit readings
    /// (pressure, cholesterol, glucose, active days) compare this.
    pub fn whole(&self) -> f64 {
        self.value.trunc()
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validated health record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthRecord {
    pub age: Measurement,
    pub gender: Gender,
    pub bmi: Measurement,
    pub systolic: Measurement,
    pub diastolic: Measurement,
    pub cholesterol: Measurement,
    pub glucose: Measurement,
    pub smoking: bool,
    pub alcohol: bool,
    pub activity_days: Measurement,
    pub family_history: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    NotANumber,
    Negative,
    OutOfRange,
}

/// A single field that failed validation, with the inline message for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
    pub message: String,
}

/// Every failing field of one submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn field(&self, name: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == name)
    }
}

/// Accepted range for a numeric form field.
struct NumericRule {
    field: &'static str,
    min: f64,
    max: f64,
    /// Exclusive lower bound (value must be strictly greater than `min`).
    min_exclusive: bool,
    range_message: &'static str,
}

const AGE: NumericRule = NumericRule {
    field: "age",
    min: 1.0,
    max: 120.0,
    min_exclusive: false,
    range_message: "Age: 1-120",
};
const BMI: NumericRule = NumericRule {
    field: "bmi",
    min: 10.0,
    max: 60.0,
    min_exclusive: false,
    range_message: "BMI: 10-60",
};
const SYSTOLIC: NumericRule = NumericRule {
    field: "systolic",
    min: 80.0,
    max: 200.0,
    min_exclusive: false,
    range_message: "Sys: 80-200",
};
const DIASTOLIC: NumericRule = NumericRule {
    field: "diastolic",
    min: 40.0,
    max: 150.0,
    min_exclusive: false,
    range_message: "Dia: 40-150",
};
const CHOLESTEROL: NumericRule = NumericRule {
    field: "cholesterol",
    min: 0.0,
    max: f64::MAX,
    min_exclusive: true,
    range_message: "Cholesterol must be greater than 0",
};
const GLUCOSE: NumericRule = NumericRule {
    field: "glucose",
    min: 50.0,
    max: 400.0,
    min_exclusive: false,
    range_message: "Glucose: 50-400",
};
const ACTIVITY: NumericRule = NumericRule {
    field: "activity",
    min: 0.0,
    max: 7.0,
    min_exclusive: false,
    range_message: "Activity: 0-7 days",
};

impl NumericRule {
    fn check(&self, raw: &str, errors: &mut Vec<FieldError>) -> Measurement {
        let trimmed = raw.trim();
        let fail = |errors: &mut Vec<FieldError>, kind, message: &str| {
            errors.push(FieldError {
                field: self.field,
                kind,
                message: message.to_string(),
            });
            Measurement {
                value: 0.0,
                text: trimmed.to_string(),
            }
        };

        if trimmed.is_empty() {
            return fail(errors, FieldErrorKind::Required, "Required");
        }
        let value = match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => return fail(errors, FieldErrorKind::NotANumber, "Must be a positive number"),
        };
        if value < 0.0 {
            return fail(errors, FieldErrorKind::Negative, "Must be a positive number");
        }
        let below = if self.min_exclusive {
            value <= self.min
        } else {
            value < self.min
        };
        if below || value > self.max {
            return fail(errors, FieldErrorKind::OutOfRange, self.range_message);
        }
        Measurement {
            value,
            text: trimmed.to_string(),
        }
    }
}

/// A select field must carry one of its options.
fn chosen<T: Copy>(
    field: &'static str,
    value: Option<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    if value.is_none() {
        errors.push(FieldError {
            field,
            kind: FieldErrorKind::Required,
            message: "Required".to_string(),
        });
    }
    value
}

fn answered(field: &'static str, value: Option<YesNo>, errors: &mut Vec<FieldError>) -> bool {
    chosen(field, value, errors).is_some_and(|v| v.is_yes())
}

impl HealthForm {
    /// Validate every field, reporting all failures at once.
    pub fn validate(&self) -> Result<HealthRecord, ValidationErrors> {
        let mut errors = Vec::new();

        let record = HealthRecord {
            age: AGE.check(&self.age, &mut errors),
            gender: chosen("gender", self.gender, &mut errors).unwrap_or(Gender::Other),
            bmi: BMI.check(&self.bmi, &mut errors),
            systolic: SYSTOLIC.check(&self.systolic, &mut errors),
            diastolic: DIASTOLIC.check(&self.diastolic, &mut errors),
            cholesterol: CHOLESTEROL.check(&self.cholesterol, &mut errors),
            glucose: GLUCOSE.check(&self.glucose, &mut errors),
            smoking: answered("smoking", self.smoking, &mut errors),
            alcohol: answered("alcohol", self.alcohol, &mut errors),
            activity_days: ACTIVITY.check(&self.activity, &mut errors),
            family_history: answered("family_history", self.family_history, &mut errors),
        };

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(ValidationErrors(errors))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn valid_form_converts_to_record() {
        let record = high_risk_form().validate().unwrap();
        assert_eq!(record.bmi.value, 29.0);
        assert_eq!(record.systolic.value, 140.0);
        assert!(record.smoking);
        assert!(!record.alcohol);
        assert!(record.family_history);
        assert_eq!(record.activity_days.value, 1.0);
    }

    #[test]
    fn whitespace_is_trimmed_before_parsing() {
        let mut form = healthy_form();
        form.bmi = " 23.4 ".into();
        let bmi = form.validate().unwrap().bmi;
        assert_eq!(bmi.value, 23.4);
        assert_eq!(bmi.text, "23.4");
    }

    #[test]
    fn empty_field_is_required() {
        let mut form = healthy_form();
        form.glucose = "   ".into();
        let errors = form.validate().unwrap_err();
        let err = errors.field("glucose").unwrap();
        assert_eq!(err.kind, FieldErrorKind::Required);
        assert_eq!(err.message, "Required");
    }

    #[test]
    fn non_numeric_and_negative_rejected() {
        let mut form = healthy_form();
        form.cholesterol = "abc".into();
        form.activity = "-2".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.field("cholesterol").unwrap().kind,
            FieldErrorKind::NotANumber
        );
        assert_eq!(errors.field("activity").unwrap().kind, FieldErrorKind::Negative);
    }

    #[test]
    fn out_of_range_uses_range_message() {
        let mut form = healthy_form();
        form.age = "121".into();
        form.systolic = "79".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("age").unwrap().message, "Age: 1-120");
        assert_eq!(errors.field("systolic").unwrap().message, "Sys: 80-200");
    }

    #[test]
    fn reports_every_failing_field() {
        let form = HealthForm {
            age: String::new(),
            gender: Some(Gender::Other),
            bmi: "5".into(),
            systolic: "x".into(),
            diastolic: "200".into(),
            cholesterol: "0".into(),
            glucose: "20".into(),
            smoking: Some(YesNo::No),
            alcohol: Some(YesNo::No),
            activity: "9".into(),
            family_history: Some(YesNo::No),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.0.len(), 7);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut form = healthy_form();
        form.age = "1".into();
        form.bmi = "60".into();
        form.systolic = "200".into();
        form.diastolic = "40".into();
        form.glucose = "400".into();
        form.activity = "0".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_fields_are_required() {
        let form: HealthForm = serde_json::from_str(r#"{"age": "40", "gender": "Male"}"#).unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field("age").is_none());
        assert!(errors.field("gender").is_none());
        for field in ["bmi", "smoking", "activity", "family_history"] {
            assert_eq!(errors.field(field).unwrap().kind, FieldErrorKind::Required, "{field}");
        }
        assert_eq!(errors.0.len(), 9);
    }

    #[test]
    fn measurement_keeps_typed_text() {
        let mut form = healthy_form();
        form.bmi = "29.0".into();
        form.cholesterol = "0250".into();
        let record = form.validate().unwrap();
        assert_eq!(record.bmi.to_string(), "29.0");
        assert_eq!(record.cholesterol.to_string(), "0250");
        assert_eq!(record.cholesterol.value, 250.0);
    }

    #[test]
    fn whole_truncates_fraction() {
        assert_eq!(fixtures::measured("200.5").whole(), 200.0);
        assert_eq!(fixtures::measured("99.9").whole(), 99.0);
    }
}
