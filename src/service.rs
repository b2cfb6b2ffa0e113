//! Application operations shared by every transport.
//!
//! `HealthService` owns the store, the risk estimator and the assistant
//! oracle, all injected through `new`. Role and ownership checks live here so
//! the HTTP layer stays a thin mapping.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::assistant::prompt::{build_assistant_prompt, ASSISTANT_SYSTEM_PROMPT};
use crate::assistant::{self, TextOracle, ASSISTANT_GREETING};
use crate::auth;
use crate::config::{AppConfig, ScoreMode};
use crate::consultation::{self, TransitionError};
use crate::models::{
    AssistantTurn, ChatMessage, ConsultationStatus, HealthForm, Notification, Report,
    ReportOutcome, Role, User, ValidationErrors,
};
use crate::scoring::{MockPredictor, PredictionEstimator, RandomEstimator, RiskEstimator};
use crate::store::{DataStore, StoreError};
use crate::suggestions::generate_suggestions;

/// Longest accepted chat message or assistant question, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

const MEETING_BASE_URL: &str = "https://meet.google.com/lookup/";
const MEETING_CODE_LEN: usize = 8;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Report not found: {0}")]
    NotFound(Uuid),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// Video-call link created by a doctor for a report.
#[derive(Debug, Clone, Serialize)]
pub struct Meeting {
    pub report_id: Uuid,
    pub link: String,
}

pub struct HealthService {
    store: Arc<DataStore>,
    estimator: Box<dyn RiskEstimator>,
    oracle: Arc<dyn TextOracle>,
}

impl HealthService {
    pub fn new(
        store: Arc<DataStore>,
        estimator: Box<dyn RiskEstimator>,
        oracle: Arc<dyn TextOracle>,
    ) -> Self {
        Self {
            store,
            estimator,
            oracle,
        }
    }

    /// Wire the production estimator and oracle selected by `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let estimator: Box<dyn RiskEstimator> = match config.score_mode {
            ScoreMode::Random => Box::new(RandomEstimator),
            ScoreMode::Prediction => Box::new(PredictionEstimator::new(
                MockPredictor,
                config.prediction_delay,
            )),
        };
        tracing::info!(estimator = estimator.name(), "Risk estimator selected");
        Self::new(
            Arc::new(DataStore::new()),
            estimator,
            assistant::oracle_from_config(config),
        )
    }

    // ── Assessment ───────────────────────────────────────────

    /// Validate the form, build suggestions, estimate the score and store a
    /// new private report.
    pub async fn submit_assessment(
        &self,
        user: &User,
        form: &HealthForm,
    ) -> Result<Report, ServiceError> {
        require_role(user, Role::Patient)?;
        let record = form.validate()?;
        let suggestions = generate_suggestions(&record);

        let latency = self.estimator.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let estimate = self.estimator.estimate(&record);
        let score = estimate.score;
        let outcome = match estimate.predictions {
            Some(predictions) => ReportOutcome::ScoredWithPredictions {
                score,
                suggestions,
                predictions,
            },
            None => ReportOutcome::Scored { score, suggestions },
        };

        let report = Report::draft(user, record).with_outcome(outcome);
        self.store.add_report(report.clone())?;
        tracing::info!(
            report_id = %report.id,
            user_id = %user.id,
            score = score.value(),
            band = score.band().as_str(),
            estimator = self.estimator.name(),
            "Assessment submitted"
        );
        Ok(report)
    }

    pub fn latest_report(&self, user: &User) -> Result<Option<Report>, ServiceError> {
        require_role(user, Role::Patient)?;
        Ok(self.store.reports_for_user(&user.id)?.into_iter().next())
    }

    /// Newest first.
    pub fn patient_reports(&self, user: &User) -> Result<Vec<Report>, ServiceError> {
        require_role(user, Role::Patient)?;
        Ok(self.store.reports_for_user(&user.id)?)
    }

    /// Patients see their own reports; doctors see any report that has
    /// entered consultation. Private reports stay hidden from doctors.
    pub fn report_for(&self, user: &User, id: Uuid) -> Result<Report, ServiceError> {
        let report = self.store.report(id)?.ok_or(ServiceError::NotFound(id))?;
        match user.role {
            Role::Patient if !report.is_owned_by(user) => Err(ServiceError::Forbidden(
                "This report belongs to another patient".into(),
            )),
            Role::Doctor if report.status == ConsultationStatus::Private => {
                Err(ServiceError::NotFound(id))
            }
            _ => Ok(report),
        }
    }

    // ── Consultation ─────────────────────────────────────────

    /// `private → requested`, then notify every doctor.
    pub fn request_consultation(&self, user: &User, id: Uuid) -> Result<Report, ServiceError> {
        require_role(user, Role::Patient)?;
        let report = self.store.update_report(id, |r| {
            if !r.is_owned_by(user) {
                return Err(ServiceError::Forbidden(
                    "This report belongs to another patient".into(),
                ));
            }
            consultation::request(r.status)?;
            r.status = ConsultationStatus::Requested;
            Ok::<_, ServiceError>(r.clone())
        })?;

        for doctor in auth::doctors() {
            self.store.add_notification(Notification::new(
                &doctor.id,
                format!("New consultation request from {}.", user.name),
            ))?;
        }
        tracing::info!(report_id = %id, user_id = %user.id, "Consultation requested");
        Ok(report)
    }

    /// Reports awaiting a doctor, oldest first.
    pub fn consultation_queue(&self, user: &User) -> Result<Vec<Report>, ServiceError> {
        require_role(user, Role::Doctor)?;
        Ok(self
            .store
            .reports_with_status(ConsultationStatus::Requested)?)
    }

    /// `requested → reviewed`. Already reviewed is a no-op and sends nothing.
    pub fn open_chat(&self, user: &User, id: Uuid) -> Result<Report, ServiceError> {
        require_role(user, Role::Doctor)?;
        let (report, changed) = self.store.update_report(id, |r| {
            let changed = consultation::open_chat(r.status)?;
            if changed {
                r.status = ConsultationStatus::Reviewed;
            }
            Ok::<_, ServiceError>((r.clone(), changed))
        })?;

        if changed {
            self.store.add_notification(Notification::new(
                &report.user_id,
                format!(
                    "Dr. {} has reviewed your report. You can now chat.",
                    user.name
                ),
            ))?;
            tracing::info!(report_id = %id, doctor_id = %user.id, "Consultation opened");
        }
        Ok(report)
    }

    pub fn create_meeting(&self, user: &User, id: Uuid) -> Result<Meeting, ServiceError> {
        require_role(user, Role::Doctor)?;
        let report = self.report_for(user, id)?;
        let link = format!("{MEETING_BASE_URL}{}", meeting_code());

        self.store.add_notification(
            Notification::new(
                &report.user_id,
                format!("Dr. {} has created a meeting for you.", user.name),
            )
            .with_link(link.clone()),
        )?;
        tracing::info!(report_id = %id, doctor_id = %user.id, "Meeting created");
        Ok(Meeting {
            report_id: id,
            link,
        })
    }

    // ── Chat ─────────────────────────────────────────────────

    /// Post a chat message. A doctor writing on a requested report opens
    /// the chat first; patients must wait for the review.
    pub fn send_message(
        &self,
        user: &User,
        id: Uuid,
        text: &str,
    ) -> Result<ChatMessage, ServiceError> {
        let text = clean_text(text, "Message")?;
        let mut report = self.report_for(user, id)?;

        if user.is_doctor() && report.status == ConsultationStatus::Requested {
            report = self.open_chat(user, id)?;
        }
        if !consultation::chat_allowed(report.status, user.role) {
            return Err(ServiceError::Forbidden(
                "Chat opens once a doctor has reviewed this report".into(),
            ));
        }

        let message = ChatMessage::new(id, user.clone(), &text);
        self.store.add_message(message.clone())?;

        let notice = format!("You have a new message from {}.", user.name);
        match user.role {
            Role::Doctor => {
                self.store
                    .add_notification(Notification::new(&report.user_id, notice))?;
            }
            Role::Patient => {
                for doctor in auth::doctors() {
                    self.store
                        .add_notification(Notification::new(&doctor.id, notice.clone()))?;
                }
            }
        }
        tracing::debug!(report_id = %id, sender = %user.id, "Chat message sent");
        Ok(message)
    }

    /// Chat transcript, oldest first.
    pub fn messages(&self, user: &User, id: Uuid) -> Result<Vec<ChatMessage>, ServiceError> {
        self.report_for(user, id)?;
        Ok(self.store.messages_for_report(id)?)
    }

    // ── Assistant ────────────────────────────────────────────

    /// Assistant conversation for a report, opening with the greeting.
    pub fn assistant_history(
        &self,
        user: &User,
        id: Uuid,
    ) -> Result<Vec<AssistantTurn>, ServiceError> {
        let report = self.owned_report(user, id)?;
        let mut history = vec![AssistantTurn::assistant(ASSISTANT_GREETING)];
        history.extend(self.store.assistant_history(report.id)?);
        Ok(history)
    }

    /// Ask the assistant about a report. Never fails because of the oracle:
    /// any oracle error is answered with the fallback text.
    pub async fn ask_assistant(
        &self,
        user: &User,
        id: Uuid,
        question: &str,
    ) -> Result<AssistantTurn, ServiceError> {
        let question = clean_text(question, "Question")?;
        let report = self.owned_report(user, id)?;

        // The question closes the history and is repeated as the new question.
        let mut history = vec![AssistantTurn::assistant(ASSISTANT_GREETING)];
        history.extend(self.store.assistant_history(id)?);
        history.push(AssistantTurn::user(&question));
        let prompt = build_assistant_prompt(&report, &history, &question);

        let reply = assistant::generate_with_fallback(
            Arc::clone(&self.oracle),
            ASSISTANT_SYSTEM_PROMPT.to_string(),
            prompt,
        )
        .await;

        let answer = AssistantTurn::assistant(&reply);
        self.store.append_assistant_turns(
            id,
            vec![AssistantTurn::user(&question), answer.clone()],
        )?;
        tracing::debug!(report_id = %id, "Assistant answered");
        Ok(answer)
    }

    // ── Notifications ────────────────────────────────────────

    /// Newest first.
    pub fn notifications(&self, user: &User) -> Result<Vec<Notification>, ServiceError> {
        Ok(self.store.notifications_for_user(&user.id)?)
    }

    pub fn unread_count(&self, user: &User) -> Result<usize, ServiceError> {
        Ok(self.store.unread_count(&user.id)?)
    }

    pub fn mark_notifications_read(&self, user: &User) -> Result<usize, ServiceError> {
        Ok(self.store.mark_notifications_read(&user.id)?)
    }

    fn owned_report(&self, user: &User, id: Uuid) -> Result<Report, ServiceError> {
        require_role(user, Role::Patient)?;
        self.report_for(user, id)
    }
}

fn require_role(user: &User, role: Role) -> Result<(), ServiceError> {
    if user.role == role {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "This action requires the {role} role"
        )))
    }
}

fn clean_text(text: &str, what: &str) -> Result<String, ServiceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{what} cannot be empty")));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ServiceError::InvalidInput(format!(
            "{what} exceeds {MAX_MESSAGE_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn meeting_code() -> String {
    let mut rng = rand::thread_rng();
    (0..MEETING_CODE_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
