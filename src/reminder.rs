//! Reminder records and the request used to create them.
use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How urgent a reminder is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// What kind of business event a reminder is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    #[default]
    Custom,
    Meeting,
    Deadline,
    Followup,
    Milestone,
}

impl fmt::Display for ReminderPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReminderPriority::Low => "low",
            ReminderPriority::Medium => "medium",
            ReminderPriority::High => "high",
            ReminderPriority::Critical => "critical",
        };
        f.write_str(label)
    }
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReminderType::Custom => "custom",
            ReminderType::Meeting => "meeting",
            ReminderType::Deadline => "deadline",
            ReminderType::Followup => "followup",
            ReminderType::Milestone => "milestone",
        };
        f.write_str(label)
    }
}

/// Represents a single reminder in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Unique identifier, never changes after creation
    pub id: String,
    /// Display title, never empty
    pub title: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// When the reminder is due
    pub scheduled_date: DateTime<Utc>,
    /// Set once by an explicit completion
    #[serde(default)]
    pub is_completed: bool,
    /// Whether an external calendar event was requested
    #[serde(default)]
    pub notify_via_calendar: bool,
    /// Whether a local notification was requested
    #[serde(default)]
    pub notify: bool,
    #[serde(default)]
    pub priority: ReminderPriority,
    #[serde(default)]
    pub reminder_type: ReminderType,
    /// When the reminder was created
    pub created_at: DateTime<Utc>,
    /// When the reminder was first completed
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Reminder {
    /// Builds a fresh, incomplete reminder from a creation request
    pub fn new(request: CreateReminderRequest) -> Self {
        Reminder {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            description: request.description,
            scheduled_date: request.due_date,
            is_completed: false,
            notify_via_calendar: request.add_to_calendar,
            notify: request.notify,
            priority: request.priority,
            reminder_type: request.reminder_type,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Marks the reminder completed. Returns false if it already was.
    pub fn mark_completed(&mut self) -> bool {
        if self.is_completed {
            return false;
        }
        self.is_completed = true;
        self.completed_at = Some(Utc::now());
        true
    }
}

/// Everything the store needs to create a reminder
#[derive(Debug, Clone, PartialEq)]
pub struct CreateReminderRequest {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub reminder_type: ReminderType,
    pub priority: ReminderPriority,
    pub add_to_calendar: bool,
    pub notify: bool,
}

impl CreateReminderRequest {
    /// A request with the default type, priority and notification settings
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date,
            reminder_type: ReminderType::default(),
            priority: ReminderPriority::default(),
            add_to_calendar: false,
            notify: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reminder_starts_incomplete() {
        let due = Utc::now();
        let reminder = Reminder::new(CreateReminderRequest::new("Pitch deck", due));

        assert!(!reminder.is_completed);
        assert!(reminder.completed_at.is_none());
        assert_eq!(reminder.scheduled_date, due);
        assert_eq!(reminder.priority, ReminderPriority::Medium);
        assert_eq!(reminder.reminder_type, ReminderType::Custom);
        assert!(!reminder.id.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let due = Utc::now();
        let a = Reminder::new(CreateReminderRequest::new("Same", due));
        let b = Reminder::new(CreateReminderRequest::new("Same", due));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_mark_completed_is_one_way() {
        let mut reminder = Reminder::new(CreateReminderRequest::new("Invoice", Utc::now()));

        assert!(reminder.mark_completed());
        let first_completion = reminder.completed_at;

        assert!(!reminder.mark_completed());
        assert!(reminder.is_completed);
        assert_eq!(reminder.completed_at, first_completion);
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        let json = serde_json::to_string(&ReminderType::Followup).unwrap();
        assert_eq!(json, "\"followup\"");
        let priority: ReminderPriority = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(priority, ReminderPriority::Critical);
    }
}
