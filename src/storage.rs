use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use log::{debug, info, trace, warn};
use tokio::sync::watch;

use crate::{
    load_json_file, save_json_atomic, CalendarSync, CreateReminderRequest, NoopCalendar,
    PlannerError, Reminder, Result,
};

/// Owns the canonical reminder collection.
///
/// Every command is serialized through one lock. A mutation is written to the
/// backing file (if any) before the in-memory collection is replaced, and only
/// then published to subscribers. Commands that change nothing publish nothing.
pub struct ReminderStore {
    /// Canonical collection in creation order
    reminders: Mutex<Vec<Reminder>>,

    /// JSON file backing the collection, `None` for an in-memory store
    path: Option<PathBuf>,

    /// Publishes a snapshot after every successful mutation
    updates: watch::Sender<Vec<Reminder>>,

    /// Best-effort external calendar
    calendar: Arc<dyn CalendarSync>,
}

impl ReminderStore {
    /// Creates a store with no backing file
    pub fn in_memory() -> Self {
        Self::with_reminders(Vec::new(), None)
    }

    /// Opens a store backed by the given JSON file, loading any existing reminders
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the reminders file; it is created on first write
    ///
    /// # Returns
    ///
    /// The store in case of success or an error if the file exists but can't be read
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!("Opening reminder store at {}", path.display());

        let reminders: Vec<Reminder> = load_json_file(&path)?.unwrap_or_default();
        info!("Loaded {} reminders", reminders.len());

        Ok(Self::with_reminders(reminders, Some(path)))
    }

    fn with_reminders(reminders: Vec<Reminder>, path: Option<PathBuf>) -> Self {
        let (updates, _) = watch::channel(reminders.clone());
        Self {
            reminders: Mutex::new(reminders),
            path,
            updates,
            calendar: Arc::new(NoopCalendar),
        }
    }

    /// Replaces the calendar adapter used for `add_to_calendar` requests
    pub fn with_calendar(mut self, calendar: Arc<dyn CalendarSync>) -> Self {
        self.calendar = calendar;
        self
    }

    /// Subscribes to collection snapshots. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Reminder>> {
        self.updates.subscribe()
    }

    /// Returns a snapshot of every reminder in creation order
    pub fn reminders(&self) -> Result<Vec<Reminder>> {
        Ok(self.lock()?.clone())
    }

    /// Looks up a single reminder
    pub fn get_reminder(&self, id: &str) -> Result<Option<Reminder>> {
        Ok(self.lock()?.iter().find(|r| r.id == id).cloned())
    }

    /// Creates and stores a new reminder, then requests a calendar event if asked.
    ///
    /// Fails with `EmptyTitle` when the title is blank after trimming.
    /// Calendar failures are logged and never undo the creation.
    pub fn create_reminder(&self, request: CreateReminderRequest) -> Result<Reminder> {
        if request.title.trim().is_empty() {
            warn!("Refusing to create a reminder with a blank title");
            return Err(PlannerError::EmptyTitle);
        }

        let reminder = Reminder::new(request);
        info!("Creating reminder {} '{}'", reminder.id, reminder.title);

        {
            let mut reminders = self.lock()?;
            let mut next = reminders.clone();
            next.push(reminder.clone());
            self.commit(&mut reminders, next)?;
        }

        if reminder.notify_via_calendar {
            match self.calendar.add_event(&reminder) {
                Ok(()) => debug!("Calendar event added for reminder {}", reminder.id),
                Err(e) => warn!(
                    "Calendar sync failed for reminder {}, keeping reminder: {}",
                    reminder.id, e
                ),
            }
        }

        Ok(reminder)
    }

    /// Marks a reminder completed.
    ///
    /// Returns `Ok(false)` when the id is unknown or the reminder was already completed.
    pub fn complete_reminder(&self, id: &str) -> Result<bool> {
        let mut reminders = self.lock()?;

        let Some(index) = reminders.iter().position(|r| r.id == id) else {
            debug!("Complete ignored, reminder not found: {}", id);
            return Ok(false);
        };

        if reminders[index].is_completed {
            debug!("Reminder {} already completed", id);
            return Ok(false);
        }

        let mut next = reminders.clone();
        next[index].mark_completed();
        self.commit(&mut reminders, next)?;

        info!("Reminder completed: {}", id);
        Ok(true)
    }

    /// Permanently removes a reminder.
    ///
    /// Returns `Ok(false)` when the id is unknown.
    pub fn delete_reminder(&self, id: &str) -> Result<bool> {
        let mut reminders = self.lock()?;

        if !reminders.iter().any(|r| r.id == id) {
            debug!("Delete ignored, reminder not found: {}", id);
            return Ok(false);
        }

        let next: Vec<Reminder> = reminders.iter().filter(|r| r.id != id).cloned().collect();
        self.commit(&mut reminders, next)?;

        info!("Reminder deleted: {}", id);
        Ok(true)
    }

    /// Persists `next`, swaps it in and notifies subscribers
    fn commit(
        &self,
        current: &mut MutexGuard<'_, Vec<Reminder>>,
        next: Vec<Reminder>,
    ) -> Result<()> {
        if let Some(path) = &self.path {
            trace!("Writing {} reminders to {}", next.len(), path.display());
            save_json_atomic(path, &next)?;
        }

        self.updates.send_replace(next.clone());
        **current = next;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Reminder>>> {
        self.reminders
            .lock()
            .map_err(|_| PlannerError::LockAcquisitionFailed {
                message: "Failed to acquire lock on reminder collection".to_string(),
            })
    }
}
