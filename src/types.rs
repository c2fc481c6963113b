//! Shared result type and the CLI command set.
use clap::Subcommand;

use crate::{PlannerError, ReminderPriority, ReminderType};

/// A specialized Result type for bizplanner operations.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Available subcommands for the bizplanner application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose a new reminder
    Add {
        /// Title of the reminder
        #[clap(short = 'T', long, default_value = "")]
        title: String,

        /// Free-text note
        #[clap(short, long, default_value = "")]
        note: String,

        /// Due date as RFC 3339 or an offset like +90m, +2h, +1d
        #[clap(short, long)]
        due: Option<String>,

        /// Also add the reminder to the calendar
        #[clap(short, long)]
        calendar: bool,

        /// Priority of the reminder
        #[clap(short, long, value_enum, default_value_t = ReminderPriority::Medium)]
        priority: ReminderPriority,

        /// Kind of reminder
        #[clap(short, long, value_enum, default_value_t = ReminderType::Custom)]
        kind: ReminderType,
    },

    /// List active and completed reminders
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Mark a reminder as completed
    Complete {
        /// ID of the reminder
        id: String,
    },

    /// Delete a reminder permanently
    Delete {
        /// ID of the reminder
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Answer the onboarding questionnaire
    Onboard {
        /// Clear the completion flag first
        #[clap(short, long)]
        reset: bool,
    },

    /// Show which screen the app would open on launch
    Status,

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
