use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::enums::ConsultationStatus;
use super::health_record::HealthRecord;
use super::user::User;
use crate::scoring::prediction::ConditionPrediction;
use crate::scoring::RiskScore;

/// What has been derived from a report's record so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// Record accepted, nothing derived yet.
    Draft,
    Scored {
        score: RiskScore,
        suggestions: String,
    },
    ScoredWithPredictions {
        score: RiskScore,
        suggestions: String,
        predictions: Vec<ConditionPrediction>,
    },
}

impl ReportOutcome {
    pub fn score(&self) -> Option<RiskScore> {
        match self {
            ReportOutcome::Draft => None,
            ReportOutcome::Scored { score, .. }
            | ReportOutcome::ScoredWithPredictions { score, .. } => Some(*score),
        }
    }

    pub fn suggestions(&self) -> Option<&str> {
        match self {
            ReportOutcome::Draft => None,
            ReportOutcome::Scored { suggestions, .. }
            | ReportOutcome::ScoredWithPredictions { suggestions, .. } => Some(suggestions),
        }
    }

    pub fn predictions(&self) -> &[ConditionPrediction] {
        match self {
            ReportOutcome::ScoredWithPredictions { predictions, .. } => predictions,
            _ => &[],
        }
    }
}

/// A submitted health record plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub user_id: String,
    pub patient_name: String,
    pub record: HealthRecord,
    pub outcome: ReportOutcome,
    pub status: ConsultationStatus,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// New private report for `patient` with nothing derived yet.
    pub fn draft(patient: &User, record: HealthRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            record,
            outcome: ReportOutcome::Draft,
            status: ConsultationStatus::Private,
            created_at: Utc::now(),
        }
    }

    pub fn with_outcome(mut self, outcome: ReportOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn is_owned_by(&self, user: &User) -> bool {
        self.user_id == user.id
    }
}
