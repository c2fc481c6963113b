//! First-run onboarding questionnaire.
//!
//! The flow walks a fixed, ordered [`QuestionCatalog`]. Each question must have
//! at least one option selected before the flow can advance; advancing past the
//! last question writes the "completed onboarding" flag once and ends the flow.
//! Dismissing leaves the flag untouched.
use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{load_json_file, save_json_atomic, PlannerError, Result};

/// One multiple-choice prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingQuestion {
    pub text: String,
    pub options: Vec<String>,
}

impl OnboardingQuestion {
    pub fn new(text: &str, options: &[&str]) -> Self {
        Self {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Validated, ordered list of onboarding questions
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCatalog {
    questions: Vec<OnboardingQuestion>,
}

impl QuestionCatalog {
    /// Validates a question list.
    ///
    /// Fails with `EmptyQuestionCatalog` when there are no questions and with
    /// `QuestionWithoutOptions` when a question could never be answered.
    pub fn new(questions: Vec<OnboardingQuestion>) -> Result<Self> {
        if questions.is_empty() {
            return Err(PlannerError::EmptyQuestionCatalog);
        }
        if let Some(index) = questions.iter().position(|q| q.options.is_empty()) {
            return Err(PlannerError::QuestionWithoutOptions { index });
        }
        Ok(Self { questions })
    }

    /// The catalog shipped with the app
    pub fn builtin() -> Self {
        Self {
            questions: vec![
                OnboardingQuestion::new(
                    "Where is your business today?",
                    &[
                        "Just an idea",
                        "Getting ready to launch",
                        "Launched in the last year",
                        "Established and growing",
                    ],
                ),
                OnboardingQuestion::new(
                    "What is your main goal for the next 90 days?",
                    &[
                        "Validate the idea",
                        "Write a business plan",
                        "Raise funding",
                        "Grow revenue",
                        "Get organized",
                    ],
                ),
                OnboardingQuestion::new(
                    "Which areas do you want help with?",
                    &[
                        "Finance and budgeting",
                        "Marketing and sales",
                        "Operations",
                        "Legal and compliance",
                        "Hiring",
                    ],
                ),
                OnboardingQuestion::new(
                    "How do you like to stay on track?",
                    &[
                        "Daily reminders",
                        "Weekly check-ins",
                        "Only before deadlines",
                    ],
                ),
            ],
        }
    }

    /// Loads a catalog from a JSON array of questions
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading question catalog from {}", path.display());
        let questions: Vec<OnboardingQuestion> =
            load_json_file(path)?.ok_or_else(|| PlannerError::ConfigError {
                message: format!("Question catalog not found: {}", path.display()),
            })?;
        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated catalog
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OnboardingQuestion> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[OnboardingQuestion] {
        &self.questions
    }
}

/// Persisted "has completed onboarding" flag
pub trait OnboardingFlag {
    fn has_completed(&self) -> Result<bool>;
    fn mark_completed(&self) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Settings {
    #[serde(default)]
    has_completed_onboarding: bool,
}

/// Flag stored in a small JSON settings file
#[derive(Debug, Clone)]
pub struct FileOnboardingFlag {
    path: PathBuf,
}

impl FileOnboardingFlag {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Clears the flag so the questionnaire shows again on next launch
    pub fn reset(&self) -> Result<()> {
        info!("Resetting onboarding flag at {}", self.path.display());
        save_json_atomic(&self.path, &Settings::default())
    }
}

impl OnboardingFlag for FileOnboardingFlag {
    fn has_completed(&self) -> Result<bool> {
        let settings: Settings = load_json_file(&self.path)?.unwrap_or_default();
        Ok(settings.has_completed_onboarding)
    }

    fn mark_completed(&self) -> Result<()> {
        save_json_atomic(
            &self.path,
            &Settings {
                has_completed_onboarding: true,
            },
        )
    }
}

/// In-process flag that also counts writes
#[derive(Debug, Default)]
pub struct MemoryOnboardingFlag {
    completed: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryOnboardingFlag {
    /// Number of times `mark_completed` has been called
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl OnboardingFlag for MemoryOnboardingFlag {
    fn has_completed(&self) -> Result<bool> {
        Ok(self.completed.load(Ordering::SeqCst))
    }

    fn mark_completed(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.completed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// What an advance attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    /// Nothing selected yet, index unchanged
    Blocked,
    /// Moved to the question at `index`
    Advanced { index: usize },
    /// Past the last question, flag written
    Completed,
}

/// Linear state machine over a question catalog
pub struct OnboardingFlow {
    catalog: QuestionCatalog,
    flag: Arc<dyn OnboardingFlag>,
    current_index: usize,
    selections: Vec<bool>,
    completed: bool,
}

impl OnboardingFlow {
    /// Starts at the first question with nothing selected
    pub fn new(catalog: QuestionCatalog, flag: Arc<dyn OnboardingFlag>) -> Self {
        let selections = vec![false; catalog.questions[0].options.len()];
        Self {
            catalog,
            flag,
            current_index: 0,
            selections,
            completed: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &OnboardingQuestion {
        &self.catalog.questions[self.current_index]
    }

    pub fn total_questions(&self) -> usize {
        self.catalog.len()
    }

    pub fn selections(&self) -> &[bool] {
        &self.selections
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// `(current_index + 1) / total_questions`
    pub fn progress(&self) -> f64 {
        (self.current_index + 1) as f64 / self.catalog.len() as f64
    }

    /// Whether the continue action is enabled
    pub fn can_advance(&self) -> bool {
        !self.completed && self.selections.iter().any(|&selected| selected)
    }

    /// Marks an option of the current question as selected.
    ///
    /// Other selections are left as they are.
    pub fn select(&mut self, option_index: usize) -> Result<()> {
        let option_count = self.selections.len();
        match self.selections.get_mut(option_index) {
            Some(selected) => {
                *selected = true;
                debug!(
                    "Selected option {} of question {}",
                    option_index, self.current_index
                );
                Ok(())
            }
            None => Err(PlannerError::InvalidOption {
                index: option_index,
                option_count,
            }),
        }
    }

    /// Moves to the next question, or finishes after the last one.
    ///
    /// Blocked while no option is selected. Once finished, further calls
    /// return `Completed` without writing the flag again.
    pub fn advance(&mut self) -> Result<FlowStep> {
        if self.completed {
            return Ok(FlowStep::Completed);
        }
        if !self.can_advance() {
            debug!("Advance blocked, nothing selected on question {}", self.current_index);
            return Ok(FlowStep::Blocked);
        }

        let next = self.current_index + 1;
        if next < self.catalog.len() {
            self.current_index = next;
            self.selections = vec![false; self.catalog.questions[next].options.len()];
            debug!("Advanced to question {} of {}", next + 1, self.catalog.len());
            return Ok(FlowStep::Advanced { index: next });
        }

        self.flag.mark_completed()?;
        self.completed = true;
        info!("Onboarding completed");
        Ok(FlowStep::Completed)
    }

    /// Leaves the flow without recording completion
    pub fn dismiss(self) {
        debug!("Onboarding dismissed at question {}", self.current_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(option_counts: &[usize]) -> QuestionCatalog {
        let questions = option_counts
            .iter()
            .enumerate()
            .map(|(i, &count)| OnboardingQuestion {
                text: format!("Question {}", i),
                options: (0..count).map(|o| format!("Option {}", o)).collect(),
            })
            .collect();
        QuestionCatalog::new(questions).unwrap()
    }

    fn flow(option_counts: &[usize]) -> (OnboardingFlow, Arc<MemoryOnboardingFlag>) {
        let flag = Arc::new(MemoryOnboardingFlag::default());
        let flow = OnboardingFlow::new(catalog(option_counts), flag.clone());
        (flow, flag)
    }

    #[test]
    fn test_initial_state() {
        let (flow, _) = flow(&[3, 4]);
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.selections(), &[false, false, false]);
        assert!(!flow.can_advance());
        assert_eq!(flow.progress(), 0.5);
    }

    #[test]
    fn test_select_then_advance_resets_selections() {
        let (mut flow, flag) = flow(&[3, 4, 2]);

        flow.select(1).unwrap();
        assert_eq!(flow.selections(), &[false, true, false]);

        assert_eq!(flow.advance().unwrap(), FlowStep::Advanced { index: 1 });
        assert_eq!(flow.current_index(), 1);
        assert_eq!(flow.selections(), &[false, false, false, false]);
        assert!((flow.progress() - 2.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(flag.write_count(), 0);
    }

    #[test]
    fn test_advance_without_selection_is_noop() {
        let (mut flow, flag) = flow(&[3, 4]);

        assert_eq!(flow.advance().unwrap(), FlowStep::Blocked);
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.selections(), &[false, false, false]);
        assert_eq!(flag.write_count(), 0);
    }

    #[test]
    fn test_select_keeps_other_selections() {
        let (mut flow, _) = flow(&[3]);
        flow.select(0).unwrap();
        flow.select(2).unwrap();
        assert_eq!(flow.selections(), &[true, false, true]);
    }

    #[test]
    fn test_select_out_of_range() {
        let (mut flow, _) = flow(&[2]);
        assert!(matches!(
            flow.select(2),
            Err(PlannerError::InvalidOption {
                index: 2,
                option_count: 2
            })
        ));
        assert_eq!(flow.selections(), &[false, false]);
    }

    #[test]
    fn test_completion_writes_flag_once() {
        for total in 1..=4 {
            let counts = vec![2; total];
            let (mut flow, flag) = flow(&counts);

            for _ in 0..total {
                flow.select(0).unwrap();
                flow.advance().unwrap();
            }

            assert!(flow.is_completed());
            assert!(flag.has_completed().unwrap());
            assert_eq!(flag.write_count(), 1);

            assert_eq!(flow.advance().unwrap(), FlowStep::Completed);
            assert_eq!(flag.write_count(), 1);
        }
    }

    #[test]
    fn test_single_question_completes_directly() {
        let (mut flow, flag) = flow(&[3]);
        assert_eq!(flow.progress(), 1.0);

        flow.select(2).unwrap();
        assert_eq!(flow.advance().unwrap(), FlowStep::Completed);
        assert_eq!(flag.write_count(), 1);
    }

    #[test]
    fn test_dismiss_does_not_write_flag() {
        let (mut flow, flag) = flow(&[3, 3]);
        flow.select(0).unwrap();
        flow.advance().unwrap();
        flow.dismiss();

        assert!(!flag.has_completed().unwrap());
        assert_eq!(flag.write_count(), 0);
    }

    #[test]
    fn test_empty_catalog_fails_fast() {
        assert!(matches!(
            QuestionCatalog::new(Vec::new()),
            Err(PlannerError::EmptyQuestionCatalog)
        ));
    }

    #[test]
    fn test_question_without_options_fails_fast() {
        let questions = vec![
            OnboardingQuestion::new("Stage?", &["Idea"]),
            OnboardingQuestion::new("Goal?", &[]),
        ];
        assert!(matches!(
            QuestionCatalog::new(questions),
            Err(PlannerError::QuestionWithoutOptions { index: 1 })
        ));
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = QuestionCatalog::builtin();
        assert!(QuestionCatalog::new(builtin.questions().to_vec()).is_ok());
        assert!(!builtin.is_empty());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(
            &path,
            r#"[{"text": "Industry?", "options": ["Retail", "Services"]}]"#,
        )
        .unwrap();

        let loaded = QuestionCatalog::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).unwrap().options, vec!["Retail", "Services"]);

        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(
            QuestionCatalog::load(&path),
            Err(PlannerError::EmptyQuestionCatalog)
        ));
    }

    #[test]
    fn test_file_flag_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let flag = FileOnboardingFlag::new(dir.path().join("settings.json"));

        assert!(!flag.has_completed().unwrap());
        flag.mark_completed().unwrap();
        assert!(flag.has_completed().unwrap());

        flag.reset().unwrap();
        assert!(!flag.has_completed().unwrap());
    }

    #[test]
    fn test_flow_with_file_flag() {
        let dir = tempfile::tempdir().unwrap();
        let flag = Arc::new(FileOnboardingFlag::new(dir.path().join("settings.json")));
        let mut flow = OnboardingFlow::new(catalog(&[2]), flag.clone());

        flow.select(1).unwrap();
        flow.advance().unwrap();
        assert!(flag.has_completed().unwrap());
    }

    /// Fails the first write, then behaves like the in-memory flag
    #[derive(Default)]
    struct FlakyFlag {
        failed_once: AtomicBool,
        inner: MemoryOnboardingFlag,
    }

    impl OnboardingFlag for FlakyFlag {
        fn has_completed(&self) -> Result<bool> {
            self.inner.has_completed()
        }

        fn mark_completed(&self) -> Result<()> {
            if !self.failed_once.swap(true, Ordering::SeqCst) {
                return Err(PlannerError::Io(std::io::Error::other("disk full")));
            }
            self.inner.mark_completed()
        }
    }

    #[test]
    fn test_failed_flag_write_can_be_retried() {
        let flag = Arc::new(FlakyFlag::default());
        let mut flow = OnboardingFlow::new(catalog(&[2, 2]), flag.clone());

        flow.select(0).unwrap();
        assert_eq!(flow.advance().unwrap(), FlowStep::Advanced { index: 1 });
        flow.select(1).unwrap();

        assert!(matches!(flow.advance(), Err(PlannerError::Io(_))));
        assert!(!flow.is_completed());
        assert_eq!(flow.current_index(), 1);
        assert_eq!(flow.selections(), &[false, true]);
        assert!(!flag.has_completed().unwrap());

        assert_eq!(flow.advance().unwrap(), FlowStep::Completed);
        assert!(flow.is_completed());
        assert_eq!(flag.inner.write_count(), 1);

        assert_eq!(flow.advance().unwrap(), FlowStep::Completed);
        assert_eq!(flag.inner.write_count(), 1);
    }
}
