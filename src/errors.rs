//! Error types for the bizplanner application.
//!
//! This module defines the error categories that can surface from the
//! reminder store, the onboarding flow and the configuration layer.
//! Disabled actions (an empty composer title, an advance with nothing
//! selected) and missing-entity commands are not errors and never show up here.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the bizplanner application.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A reminder creation request with a blank title.
    #[error("Reminder title must not be empty")]
    EmptyTitle,

    /// The onboarding question catalog has no questions.
    #[error("Onboarding question catalog is empty")]
    EmptyQuestionCatalog,

    /// A catalog question offers no options, so it could never be answered.
    #[error("Onboarding question {index} has no options")]
    QuestionWithoutOptions { index: usize },

    /// An option index outside the current question's options.
    #[error("Option {index} is out of range for a question with {option_count} options")]
    InvalidOption { index: usize, option_count: usize },

    /// A due date string that could not be parsed.
    #[error("Invalid due date: {input}")]
    InvalidDueDate { input: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// for mutex lock acquisition issues
    #[error("{message}")]
    LockAcquisitionFailed { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}
