//! The reminder composer form.
//!
//! A composer is opened with a caller-supplied default due date, edited, and
//! then either confirmed or cancelled. Confirming consumes it, so one open
//! composer can emit at most one creation request.

use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::{CreateReminderRequest, ReminderPriority, ReminderType};

/// The values a confirmed composer hands to its creation callback
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDraft {
    pub title: String,
    pub note: String,
    pub due_date: DateTime<Utc>,
    pub add_to_calendar: bool,
    pub priority: ReminderPriority,
    pub reminder_type: ReminderType,
}

impl From<ReminderDraft> for CreateReminderRequest {
    fn from(draft: ReminderDraft) -> Self {
        CreateReminderRequest {
            title: draft.title,
            description: draft.note,
            due_date: draft.due_date,
            reminder_type: draft.reminder_type,
            priority: draft.priority,
            add_to_calendar: draft.add_to_calendar,
            notify: true,
        }
    }
}

/// Result of pressing confirm
#[derive(Debug)]
pub enum ConfirmOutcome {
    /// The creation callback ran and the composer is closed
    Submitted,
    /// Confirm is disabled; the untouched composer is handed back
    Disabled(ReminderComposer),
}

/// Input form for a new reminder
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderComposer {
    title: String,
    note: String,
    due_date: DateTime<Utc>,
    add_to_calendar: bool,
    priority: ReminderPriority,
    reminder_type: ReminderType,
}

impl ReminderComposer {
    /// Opens a fresh composer with the given default due date
    pub fn new(default_due: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            note: String::new(),
            due_date: default_due,
            add_to_calendar: false,
            priority: ReminderPriority::default(),
            reminder_type: ReminderType::default(),
        }
    }

    /// Opens a composer due `offset` after now, e.g. one hour out
    pub fn due_in(offset: Duration) -> Self {
        Self::new(Utc::now() + offset)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn set_due_date(&mut self, due_date: DateTime<Utc>) {
        self.due_date = due_date;
    }

    pub fn set_add_to_calendar(&mut self, add_to_calendar: bool) {
        self.add_to_calendar = add_to_calendar;
    }

    pub fn set_priority(&mut self, priority: ReminderPriority) {
        self.priority = priority;
    }

    pub fn set_reminder_type(&mut self, reminder_type: ReminderType) {
        self.reminder_type = reminder_type;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Whether the confirm action is enabled
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Confirms the form.
    ///
    /// With a blank title nothing is emitted and the composer comes back in
    /// [`ConfirmOutcome::Disabled`]. Otherwise `on_create` runs exactly once
    /// with the values as entered and the composer is consumed. The callback's
    /// own work (persisting, calendar access) is not awaited here.
    pub fn confirm<F>(self, on_create: F) -> ConfirmOutcome
    where
        F: FnOnce(ReminderDraft),
    {
        if !self.can_submit() {
            debug!("Composer confirm ignored, title is blank");
            return ConfirmOutcome::Disabled(self);
        }

        on_create(ReminderDraft {
            title: self.title,
            note: self.note,
            due_date: self.due_date,
            add_to_calendar: self.add_to_calendar,
            priority: self.priority,
            reminder_type: self.reminder_type,
        });
        ConfirmOutcome::Submitted
    }

    /// Closes the composer without emitting anything
    pub fn cancel(self) {
        debug!("Composer cancelled");
    }
}
