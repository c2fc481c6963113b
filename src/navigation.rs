//! Which screen the app is showing, as plain state.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Tab {
    #[default]
    Home,
    Plan,
    Reminders,
    Profile,
}

/// Modal sheet shown over the main tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Sheet {
    #[default]
    None,
    Composer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AppScreen {
    #[default]
    Launch,
    Onboarding,
    Main { tab: Tab, sheet: Sheet },
}

/// Holds the current screen and applies navigation transitions.
///
/// Transitions that don't apply to the current screen return `false` and
/// leave it unchanged.
#[derive(Debug, Default)]
pub struct Navigator {
    screen: AppScreen,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> AppScreen {
        self.screen
    }

    /// Leaves the launch screen for onboarding or the main tabs
    pub fn finish_launch(&mut self, has_completed_onboarding: bool) -> bool {
        if self.screen != AppScreen::Launch {
            return false;
        }
        self.screen = if has_completed_onboarding {
            AppScreen::Main {
                tab: Tab::Home,
                sheet: Sheet::None,
            }
        } else {
            AppScreen::Onboarding
        };
        true
    }

    pub fn complete_onboarding(&mut self) -> bool {
        if self.screen != AppScreen::Onboarding {
            return false;
        }
        self.screen = AppScreen::Main {
            tab: Tab::Home,
            sheet: Sheet::None,
        };
        true
    }

    /// Exits onboarding without completing it
    pub fn dismiss_onboarding(&mut self) -> bool {
        if self.screen != AppScreen::Onboarding {
            return false;
        }
        self.screen = AppScreen::Launch;
        true
    }

    pub fn select_tab(&mut self, tab: Tab) -> bool {
        match &mut self.screen {
            AppScreen::Main { tab: current, .. } => {
                *current = tab;
                true
            }
            _ => false,
        }
    }

    pub fn open_composer(&mut self) -> bool {
        match &mut self.screen {
            AppScreen::Main { sheet, .. } => {
                *sheet = Sheet::Composer;
                true
            }
            _ => false,
        }
    }

    pub fn close_sheet(&mut self) -> bool {
        match &mut self.screen {
            AppScreen::Main { sheet, .. } if *sheet != Sheet::None => {
                *sheet = Sheet::None;
                true
            }
            _ => false,
        }
    }
}
