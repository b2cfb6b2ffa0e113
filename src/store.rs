//! Process-local application store.
//!
//! `DataStore` holds an immutable `Snapshot` behind an `RwLock<Arc<_>>`.
//! Every mutation clones the current snapshot, edits the clone and swaps it
//! in, so a reader holding an older `Arc<Snapshot>` never sees a partial
//! update. Accessors hand out owned clones, never internal references.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::models::{AssistantTurn, ChatMessage, ConsultationStatus, Notification, Report};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Report not found: {0}")]
    NotFound(Uuid),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Everything the application knows, at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Insertion (oldest first) order.
    pub reports: Vec<Report>,
    /// Newest first.
    pub notifications: Vec<Notification>,
    /// Insertion order.
    pub messages: Vec<ChatMessage>,
    pub assistant_threads: HashMap<Uuid, Vec<AssistantTurn>>,
}

#[derive(Default)]
pub struct DataStore {
    snapshot: RwLock<Arc<Snapshot>>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. Later mutations do not affect it.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, StoreError> {
        self.snapshot
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| StoreError::LockPoisoned)
    }

    /// Replace-on-write. `f` edits a private copy; the copy is published
    /// only if `f` succeeds.
    fn mutate<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Snapshot) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let mut next = Snapshot::clone(&guard);
        let out = f(&mut next)?;
        *guard = Arc::new(next);
        Ok(out)
    }

    // ── Reports ──────────────────────────────────────────────

    pub fn add_report(&self, report: Report) -> Result<(), StoreError> {
        tracing::debug!(report_id = %report.id, user_id = %report.user_id, "Report stored");
        self.mutate(|s| {
            s.reports.push(report);
            Ok(())
        })
    }

    /// Apply `f` to the stored report `id` atomically.
    ///
    /// If `f` fails, nothing is published and the store is unchanged.
    pub fn update_report<T, E, F>(&self, id: Uuid, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Report) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.mutate(|s| {
            let report = s
                .reports
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(StoreError::NotFound(id))?;
            f(report)
        })
    }

    pub fn report(&self, id: Uuid) -> Result<Option<Report>, StoreError> {
        Ok(self.snapshot()?.reports.iter().find(|r| r.id == id).cloned())
    }

    /// Newest first.
    pub fn reports_for_user(&self, user_id: &str) -> Result<Vec<Report>, StoreError> {
        let snapshot = self.snapshot()?;
        let mut reports: Vec<Report> = snapshot
            .reports
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    /// Oldest first.
    pub fn reports_with_status(
        &self,
        status: ConsultationStatus,
    ) -> Result<Vec<Report>, StoreError> {
        let snapshot = self.snapshot()?;
        let mut reports: Vec<Report> = snapshot
            .reports
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        reports.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(reports)
    }

    // ── Chat ─────────────────────────────────────────────────

    pub fn add_message(&self, message: ChatMessage) -> Result<(), StoreError> {
        self.mutate(|s| {
            s.messages.push(message);
            Ok(())
        })
    }

    /// Ascending by timestamp.
    pub fn messages_for_report(&self, report_id: Uuid) -> Result<Vec<ChatMessage>, StoreError> {
        let snapshot = self.snapshot()?;
        let mut messages: Vec<ChatMessage> = snapshot
            .messages
            .iter()
            .filter(|m| m.report_id == report_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(messages)
    }

    // ── Notifications ────────────────────────────────────────

    pub fn add_notification(&self, notification: Notification) -> Result<(), StoreError> {
        tracing::debug!(user_id = %notification.user_id, "Notification queued");
        self.mutate(|s| {
            s.notifications.insert(0, notification);
            Ok(())
        })
    }

    /// Newest first.
    pub fn notifications_for_user(&self, user_id: &str) -> Result<Vec<Notification>, StoreError> {
        Ok(self
            .snapshot()?
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    pub fn unread_count(&self, user_id: &str) -> Result<usize, StoreError> {
        Ok(self
            .snapshot()?
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count())
    }

    /// Mark every notification of `user_id` read. Returns how many changed.
    pub fn mark_notifications_read(&self, user_id: &str) -> Result<usize, StoreError> {
        self.mutate(|s| {
            let mut changed = 0;
            for n in s.notifications.iter_mut().filter(|n| n.user_id == user_id) {
                if !n.read {
                    n.read = true;
                    changed += 1;
                }
            }
            Ok(changed)
        })
    }

    // ── Assistant threads ────────────────────────────────────

    pub fn assistant_history(&self, report_id: Uuid) -> Result<Vec<AssistantTurn>, StoreError> {
        Ok(self
            .snapshot()?
            .assistant_threads
            .get(&report_id)
            .cloned()
            .unwrap_or_default())
    }

    pub fn append_assistant_turns(
        &self,
        report_id: Uuid,
        turns: Vec<AssistantTurn>,
    ) -> Result<(), StoreError> {
        self.mutate(|s| {
            s.assistant_threads.entry(report_id).or_default().extend(turns);
            Ok(())
        })
    }
}
