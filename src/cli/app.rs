//! CLI module for the bizplanner application
//!
//! This module turns CLI commands into composer, reminder list and onboarding
//! actions, and renders their results to the terminal.
use std::{
    io::{stdin, stdout, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use chrono::{Duration, Utc};
use log::{debug, info};

use crate::{
    parse_due_date, CalendarSync, Commands, Config, ConfirmOutcome, FileOnboardingFlag, FlowStep,
    LoggingCalendar, Navigator, NoopCalendar, OnboardingFlag, OnboardingFlow, PlannerError,
    QuestionCatalog, Reminder, ReminderComposer, ReminderListPresenter, ReminderLists,
    ReminderPriority, ReminderStore, ReminderType, Result,
};

/// Options collected from `add` before they are typed into a composer
pub struct ComposeOptions {
    pub title: String,
    pub note: String,
    pub due: Option<String>,
    pub calendar: bool,
    pub priority: ReminderPriority,
    pub kind: ReminderType,
}

/// CLI Application handler - processes CLI commands against the reminder store
pub struct App {
    /// The reminder store backend
    store: Arc<ReminderStore>,

    /// List views over the store
    presenter: ReminderListPresenter,

    /// Persisted onboarding flag
    onboarding_flag: Arc<FileOnboardingFlag>,

    /// Application configuration
    config: Config,

    /// Where the configuration lives on disk
    config_path: PathBuf,
}

impl App {
    /// Opens the store and onboarding flag described by `config`
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let calendar: Arc<dyn CalendarSync> = if config.calendar_sync {
            Arc::new(LoggingCalendar)
        } else {
            Arc::new(NoopCalendar)
        };

        let store = Arc::new(ReminderStore::open(config.reminders_path())?.with_calendar(calendar));
        let presenter = ReminderListPresenter::new(Arc::clone(&store));
        let onboarding_flag = Arc::new(FileOnboardingFlag::new(config.settings_path()));

        Ok(Self {
            store,
            presenter,
            onboarding_flag,
            config,
            config_path,
        })
    }

    /// Run the CLI application with the given command
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Add {
                title,
                note,
                due,
                calendar,
                priority,
                kind,
            } => {
                self.handle_add(ComposeOptions {
                    title,
                    note,
                    due,
                    calendar,
                    priority,
                    kind,
                })?;
            }

            Commands::List { json } => self.handle_list(json)?,

            Commands::Complete { id } => self.handle_complete(&id)?,

            Commands::Delete { id, force } => self.handle_delete(&id, force)?,

            Commands::Onboard { reset } => {
                let stdin = stdin();
                self.handle_onboard(reset, stdin.lock(), stdout())?;
            }

            Commands::Status => self.handle_status()?,

            Commands::Config { show, reset } => self.handle_config(show, reset)?,
        }

        Ok(())
    }

    /// Fills a fresh composer and confirms it. A blank title leaves the
    /// composer disabled and nothing is created.
    pub fn handle_add(&self, options: ComposeOptions) -> Result<Option<Reminder>> {
        let mut composer =
            ReminderComposer::due_in(Duration::minutes(self.config.default_due_offset_minutes));
        composer.set_title(options.title);
        composer.set_note(options.note);
        composer.set_add_to_calendar(options.calendar);
        composer.set_priority(options.priority);
        composer.set_reminder_type(options.kind);
        if let Some(due) = options.due {
            composer.set_due_date(parse_due_date(&due, Utc::now())?);
        }

        let mut created = None;
        match composer.confirm(|draft| created = Some(self.store.create_reminder(draft.into()))) {
            ConfirmOutcome::Submitted => {}
            ConfirmOutcome::Disabled(composer) => {
                debug!("Add rejected, blank title '{}'", composer.title());
                println!("A title is required; no reminder was created.");
                return Ok(None);
            }
        }

        let reminder = created.transpose()?;
        if let Some(reminder) = &reminder {
            println!("Reminder created with ID: {}", reminder.id);
            println!(
                "Due: {}",
                reminder.scheduled_date.format("%Y-%m-%d %H:%M UTC")
            );
        }
        Ok(reminder)
    }

    fn handle_list(&self, json: bool) -> Result<()> {
        let lists = self.presenter.lists()?;

        if json {
            println!("{}", serde_json::to_string_pretty(&lists)?);
            return Ok(());
        }

        self.display_lists_text(&lists);
        Ok(())
    }

    /// Display both lists in text format
    fn display_lists_text(&self, lists: &ReminderLists) {
        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);
        let separator = "-".repeat(term_width.min(50));

        println!("{}", console::style("Active").bold().underlined());
        if lists.active.is_empty() {
            println!("No active reminders.");
        }
        for reminder in &lists.active {
            self.display_reminder(reminder);
            println!("{}", separator);
        }

        println!();
        println!("{}", console::style("Completed").bold().underlined());
        if lists.completed.is_empty() {
            println!("No completed reminders.");
        }
        for reminder in &lists.completed {
            self.display_reminder(reminder);
            println!("{}", separator);
        }
    }

    fn display_reminder(&self, reminder: &Reminder) {
        let due = reminder.scheduled_date.format("%Y-%m-%d %H:%M");
        let title = if reminder.is_completed {
            console::style(&reminder.title).dim()
        } else {
            console::style(&reminder.title).bold()
        };

        println!("{}", title);
        println!(
            "ID: {} | Due: {} | {} / {}",
            reminder.id, due, reminder.reminder_type, reminder.priority
        );
        if reminder.notify_via_calendar {
            println!("{}", console::style("Calendar").cyan());
        }
        if !reminder.description.is_empty() {
            println!("{}", reminder.description);
        }
    }

    fn handle_complete(&self, id: &str) -> Result<()> {
        if self.presenter.complete(id)? {
            println!("Reminder {} completed", id);
        } else {
            println!("Nothing to complete for {}", id);
        }
        Ok(())
    }

    fn handle_delete(&self, id: &str, force: bool) -> Result<()> {
        let Some(reminder) = self.store.get_reminder(id)? else {
            println!("Nothing to delete for {}", id);
            return Ok(());
        };

        if !force {
            println!("You are about to delete the following reminder:");
            println!("ID:    {}", reminder.id);
            println!("Title: {}", reminder.title);
            println!("Due:   {}", reminder.scheduled_date.format("%Y-%m-%d %H:%M"));
            println!("\nThis action cannot be undone!");
            print!("Are you sure you want to delete this reminder? [y/N]: ");
            stdout().flush().map_err(PlannerError::Io)?;

            let mut input = String::new();
            stdin().read_line(&mut input).map_err(PlannerError::Io)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        if self.presenter.delete(id)? {
            println!("Reminder {} deleted", id);
        }
        Ok(())
    }

    fn question_catalog(&self) -> Result<QuestionCatalog> {
        match &self.config.question_catalog {
            Some(path) => QuestionCatalog::load(path),
            None => Ok(QuestionCatalog::builtin()),
        }
    }

    /// Runs the questionnaire over the given input and output.
    ///
    /// Returns true when the flow reached its end and the flag was written.
    pub fn handle_onboard<R: BufRead, W: Write>(
        &self,
        reset: bool,
        input: R,
        mut output: W,
    ) -> Result<bool> {
        if reset {
            self.onboarding_flag.reset()?;
        } else if self.onboarding_flag.has_completed()? {
            writeln!(output, "Onboarding already completed. Use --reset to run it again.")?;
            return Ok(false);
        }

        let catalog = self.question_catalog()?;
        let flag: Arc<dyn OnboardingFlag> = self.onboarding_flag.clone();
        let flow = OnboardingFlow::new(catalog, flag);

        let completed = run_questionnaire(flow, input, &mut output)?;
        if completed {
            writeln!(output, "{}", console::style("You're all set!").green())?;
        } else {
            writeln!(output, "Onboarding dismissed.")?;
        }
        Ok(completed)
    }

    fn handle_status(&self) -> Result<()> {
        let mut navigator = Navigator::new();
        navigator.finish_launch(self.onboarding_flag.has_completed()?);
        println!("Launch opens: {:?}", navigator.screen());
        Ok(())
    }

    fn handle_config(&self, show: bool, reset: bool) -> Result<()> {
        if reset {
            let defaults = Config::default();
            defaults.save(&self.config_path)?;
            println!("Configuration reset to defaults.");
            println!("{}", serde_json::to_string_pretty(&defaults)?);
            return Ok(());
        }

        if show {
            println!("Config file: {}", self.config_path.display());
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        }
        Ok(())
    }
}

/// Drives an onboarding flow from line-based input.
///
/// Each line lists 1-based option numbers separated by commas. An empty line
/// or end of input dismisses the flow.
pub fn run_questionnaire<R: BufRead, W: Write>(
    mut flow: OnboardingFlow,
    mut input: R,
    output: &mut W,
) -> Result<bool> {
    info!(
        "Starting onboarding with {} questions",
        flow.total_questions()
    );

    loop {
        let question = flow.current_question();
        writeln!(
            output,
            "\n[{}/{}] {:.0}% {}",
            flow.current_index() + 1,
            flow.total_questions(),
            flow.progress() * 100.0,
            question.text
        )?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(output, "  {}. {}", i + 1, option)?;
        }
        write!(output, "Choose (e.g. 1 or 1,3), empty line to exit: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim().is_empty() {
            flow.dismiss();
            return Ok(false);
        }

        for choice in line.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let selected = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(|index| flow.select(index));

            match selected {
                Some(Ok(())) => {}
                Some(Err(e)) => writeln!(output, "{}", e)?,
                None => writeln!(output, "Not an option number: {}", choice)?,
            }
        }

        match flow.advance()? {
            FlowStep::Blocked => writeln!(output, "Pick at least one option to continue.")?,
            FlowStep::Advanced { .. } => {}
            FlowStep::Completed => return Ok(true),
        }
    }
}
