use std::collections::{BTreeMap, VecDeque};

use chrono::Local;

use crate::player::{Field, FormValues, RosterRow};
use crate::roster::RosterOutcome;
use crate::submit::SubmitOutcome;

pub const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Register,
    Roster,
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    SubmitPlayer { form: FormValues },
    FetchRoster,
    ClearCredentials,
}

#[derive(Debug, Clone)]
pub enum Delta {
    Log(String),
    PromptCredentials,
    SubmitFinished(SubmitOutcome),
    RosterFinished(RosterOutcome),
}

/// Modal credential entry; password input is masked in the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    pub username: String,
    pub password: String,
    pub on_password: bool,
}

pub struct AppState {
    pub screen: Screen,
    pub form: FormValues,
    pub errors: BTreeMap<Field, String>,
    pub focus: usize,
    pub submitting: bool,
    pub notice: Option<String>,
    pub roster: Vec<RosterRow>,
    pub roster_loading: bool,
    pub roster_error: Option<String>,
    pub roster_selected: usize,
    pub prompt: Option<PromptState>,
    pub pending_roster_refresh: bool,
    pub log: VecDeque<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            form: FormValues::default(),
            errors: BTreeMap::new(),
            focus: 0,
            submitting: false,
            notice: None,
            roster: Vec::new(),
            roster_loading: false,
            roster_error: None,
            roster_selected: 0,
            prompt: None,
            pending_roster_refresh: false,
            log: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        let stamped = format!("{} {}", Local::now().format("%H:%M:%S"), line.into());
        if self.log.len() >= LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(stamped);
    }

    pub fn focused_field(&self) -> Field {
        Field::ALL[self.focus.min(Field::ALL.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Editing a field clears only that field's error.
    pub fn touch_field(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn select_next_row(&mut self) {
        if !self.roster.is_empty() {
            self.roster_selected = (self.roster_selected + 1).min(self.roster.len() - 1);
        }
    }

    pub fn select_prev_row(&mut self) {
        self.roster_selected = self.roster_selected.saturating_sub(1);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Log(line) => state.push_log(line),
        Delta::PromptCredentials => {
            state.prompt = Some(PromptState::default());
        }
        Delta::SubmitFinished(outcome) => {
            state.submitting = false;
            state.prompt = None;
            match outcome {
                SubmitOutcome::Invalid(errors) => {
                    if let Some(field) = errors.keys().next().copied() {
                        if let Some(pos) = Field::ALL.iter().position(|f| *f == field) {
                            state.focus = pos;
                        }
                    }
                    state.errors = errors;
                    state.notice = Some("Please fix the highlighted fields.".to_string());
                }
                SubmitOutcome::AuthRequired => {
                    state.notice = Some("Authentication required to save player.".to_string());
                    state.push_log("[WARN] Registration aborted: no credentials");
                }
                SubmitOutcome::Failed { message } => {
                    state.push_log(format!("[WARN] {message}"));
                    state.notice = Some(message);
                }
                SubmitOutcome::Registered => {
                    state.form = FormValues::default();
                    state.errors.clear();
                    state.focus = 0;
                    state.notice = Some("Thanks for the registration!".to_string());
                    state.push_log("[INFO] Player registered");
                    state.screen = Screen::Roster;
                    state.pending_roster_refresh = true;
                }
            }
        }
        Delta::RosterFinished(outcome) => {
            state.roster_loading = false;
            state.roster = outcome.players;
            state.roster_error = outcome.error;
            if state.roster_selected >= state.roster.len() {
                state.roster_selected = 0;
            }
            if state.roster_error.is_none() {
                state.push_log(format!("[INFO] Loaded {} players", state.roster.len()));
            }
        }
    }
}
