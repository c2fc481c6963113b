//! External calendar integration.
//!
//! Calendar sync is best-effort: the store calls it after a reminder has been
//! stored and only logs failures. A reminder is never rolled back because the
//! calendar was unavailable or permission was denied.

use log::info;

use crate::{Reminder, Result};

/// Adds reminder events to an external calendar
pub trait CalendarSync: Send + Sync {
    /// Requests an event for the given reminder
    fn add_event(&self, reminder: &Reminder) -> Result<()>;
}

/// Calendar adapter that only records the request in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingCalendar;

impl CalendarSync for LoggingCalendar {
    fn add_event(&self, reminder: &Reminder) -> Result<()> {
        info!(
            "Calendar event requested for reminder {} '{}' at {}",
            reminder.id,
            reminder.title,
            reminder.scheduled_date.to_rfc3339()
        );
        Ok(())
    }
}

/// Calendar adapter used when calendar sync is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCalendar;

impl CalendarSync for NoopCalendar {
    fn add_event(&self, _reminder: &Reminder) -> Result<()> {
        Ok(())
    }
}
