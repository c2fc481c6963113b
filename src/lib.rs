//! Business planning app core library
//!
//! This library provides the reminder store, the reminder composer, the
//! active/completed list presenter and the onboarding questionnaire, free of
//! any UI framework, plus a small CLI front end over them.

mod calendar;
mod cli;
mod composer;
mod config;
mod errors;
mod helper;
mod navigation;
mod onboarding;
mod presenter;
mod reminder;
mod storage;
mod types;

// Re-export key components
pub use calendar::*;
pub use cli::*;
pub use composer::*;
pub use config::*;
pub use errors::*;
pub use helper::*;
pub use navigation::*;
pub use onboarding::*;
pub use presenter::*;
pub use reminder::*;
pub use storage::*;
pub use types::*;
