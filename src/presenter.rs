//! Active / completed views over the reminder store.
use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tokio::sync::watch;

use crate::{Reminder, ReminderStore, Result};

/// The two display lists derived from the collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReminderLists {
    /// Incomplete reminders, soonest first
    pub active: Vec<Reminder>,
    /// Completed reminders, most recently due first
    pub completed: Vec<Reminder>,
}

impl ReminderLists {
    /// Derives both lists from a collection
    pub fn derive(reminders: &[Reminder]) -> Self {
        Self {
            active: active(reminders),
            completed: completed(reminders),
        }
    }
}

/// Incomplete reminders ordered by due date ascending
pub fn active(reminders: &[Reminder]) -> Vec<Reminder> {
    let mut active: Vec<Reminder> = reminders
        .iter()
        .filter(|r| !r.is_completed)
        .cloned()
        .collect();

    active.sort_by(|a, b| {
        a.scheduled_date
            .cmp(&b.scheduled_date)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    active
}

/// Completed reminders ordered by due date descending
pub fn completed(reminders: &[Reminder]) -> Vec<Reminder> {
    let mut completed: Vec<Reminder> = reminders
        .iter()
        .filter(|r| r.is_completed)
        .cloned()
        .collect();

    completed.sort_by(|a, b| {
        b.scheduled_date
            .cmp(&a.scheduled_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
    completed
}

/// Presents the store as active and completed lists and forwards list commands.
///
/// Nothing is cached: every call derives from the store's current snapshot.
pub struct ReminderListPresenter {
    store: Arc<ReminderStore>,
    updates: watch::Receiver<Vec<Reminder>>,
}

impl ReminderListPresenter {
    pub fn new(store: Arc<ReminderStore>) -> Self {
        let updates = store.subscribe();
        Self { store, updates }
    }

    /// Derives the lists from the store as it is now
    pub fn lists(&self) -> Result<ReminderLists> {
        let reminders = self.store.reminders()?;
        Ok(ReminderLists::derive(&reminders))
    }

    /// Waits for the next store change and derives fresh lists from it.
    ///
    /// Returns `None` if the update channel has closed.
    pub async fn next_change(&mut self) -> Option<ReminderLists> {
        if self.updates.changed().await.is_err() {
            debug!("Reminder update channel closed");
            return None;
        }
        let snapshot = self.updates.borrow_and_update();
        Some(ReminderLists::derive(&snapshot))
    }

    /// Completes a reminder from the list.
    ///
    /// Unknown or already-completed ids are ignored and return `false`.
    pub fn complete(&self, id: &str) -> Result<bool> {
        self.store.complete_reminder(id)
    }

    /// Deletes a reminder from the list. Unknown ids are ignored and return `false`.
    pub fn delete(&self, id: &str) -> Result<bool> {
        self.store.delete_reminder(id)
    }
}
