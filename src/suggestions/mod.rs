//! Rule-based health suggestion engine.
//!
//! Each health dimension is an independent `SuggestionRule`. Rules run in a
//! fixed order and append entries into a `CategoryMap`; `document::assemble`
//! renders the map in category priority order with the closing disclaimer.
//! No randomness and no I/O: the same record always yields the same map.

pub mod bmi_rule;
pub mod cholesterol_rule;
pub mod document;
pub mod glucose_rule;
pub mod lifestyle_rule;
pub mod pressure_rule;
pub mod preventive_rule;
pub mod thresholds;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::HealthRecord;

pub use document::{assemble, DISCLAIMER, DOCUMENT_TITLE};

// ─── Categories ──────────────────────────────────────────────────────────────

/// Suggestion bucket. Declaration order is the emission priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SuggestionCategory {
    Bmi,
    BloodPressure,
    Cholesterol,
    Glucose,
    Diet,
    Exercise,
    LifestyleHabits,
    GeneralHealth,
    PreventativeCare,
}

impl SuggestionCategory {
    pub const PRIORITY: [SuggestionCategory; 9] = [
        SuggestionCategory::Bmi,
        SuggestionCategory::BloodPressure,
        SuggestionCategory::Cholesterol,
        SuggestionCategory::Glucose,
        SuggestionCategory::Diet,
        SuggestionCategory::Exercise,
        SuggestionCategory::LifestyleHabits,
        SuggestionCategory::GeneralHealth,
        SuggestionCategory::PreventativeCare,
    ];

    /// Header line rendered above the category's bullets.
    pub fn header(&self) -> &'static str {
        match self {
            SuggestionCategory::Bmi => "Body Mass Index (BMI) 🏋️",
            SuggestionCategory::BloodPressure => "Blood Pressure 🩺",
            SuggestionCategory::Cholesterol => "Cholesterol 🩸",
            SuggestionCategory::Glucose => "Blood Sugar (Glucose) 🍬",
            SuggestionCategory::Diet => "Diet 🥗",
            SuggestionCategory::Exercise => "Exercise 🏃‍♀️",
            SuggestionCategory::LifestyleHabits => "Lifestyle Habits 💡",
            SuggestionCategory::GeneralHealth => "General Health ⚕️",
            SuggestionCategory::PreventativeCare => "Preventative Care 🛡️",
        }
    }
}

// ─── Category map ────────────────────────────────────────────────────────────

/// Category → ordered, duplicate-free entries.
///
/// Entries keep insertion order within a category; categories always iterate
/// in priority order regardless of when they were first filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: BTreeMap<SuggestionCategory, Vec<String>>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` to `category`. Returns `false` if it was already present.
    pub fn add(&mut self, category: SuggestionCategory, text: impl Into<String>) -> bool {
        let text = text.into();
        let bucket = self.entries.entry(category).or_default();
        if bucket.contains(&text) {
            return false;
        }
        bucket.push(text);
        true
    }

    pub fn entries(&self, category: SuggestionCategory) -> &[String] {
        self.entries.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty categories in priority order.
    pub fn categories(&self) -> impl Iterator<Item = (SuggestionCategory, &[String])> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(c, v)| (*c, v.as_slice()))
    }

    pub fn contains(&self, category: SuggestionCategory, text: &str) -> bool {
        self.entries(category).iter().any(|e| e == text)
    }

    pub fn is_empty(&self) -> bool {
        self.categories().next().is_none()
    }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// One per health dimension. Self-contained, independently testable.
pub trait SuggestionRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Evaluate `record` against this rule's thresholds and append entries.
    fn apply(&self, record: &HealthRecord, out: &mut CategoryMap);
}

pub struct SuggestionBuilder {
    rules: Vec<Box<dyn SuggestionRule>>,
}

impl Default for SuggestionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionBuilder {
    /// Standard rule set, in evaluation order.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(bmi_rule::BmiRule),
                Box::new(pressure_rule::BloodPressureRule),
                Box::new(cholesterol_rule::CholesterolRule),
                Box::new(glucose_rule::GlucoseRule),
                Box::new(lifestyle_rule::LifestyleRule),
                Box::new(preventive_rule::PreventiveCareRule),
            ],
        }
    }

    pub fn build(&self, record: &HealthRecord) -> CategoryMap {
        let mut map = CategoryMap::new();
        for rule in &self.rules {
            tracing::trace!(rule = rule.name(), "Applying suggestion rule");
            rule.apply(record, &mut map);
        }
        map
    }
}

/// Build and render the suggestion document for `record`.
pub fn generate_suggestions(record: &HealthRecord) -> String {
    assemble(&SuggestionBuilder::new().build(record))
}
