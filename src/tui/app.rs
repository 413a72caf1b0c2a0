use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{LevelUp, ProfileProgress};
use crate::progression::{format_level, LevelCalculator};

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    AwardingXp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List,
    Detail,
    Loading,
}

/// Work the event loop has to do outside the app state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    None,
    Refresh,
}

pub struct App {
    pub input_mode: InputMode,
    pub current_screen: Screen,
    pub current_input: String,
    pub rows: Vec<ProfileProgress>,
    pub selected_index: usize,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub loading_message: Option<String>,
    pub should_quit: bool,
    calculator: LevelCalculator,
}

impl App {
    pub fn new(calculator: LevelCalculator) -> Self {
        Self {
            input_mode: InputMode::Normal,
            current_screen: Screen::Loading,
            current_input: String::new(),
            rows: Vec::new(),
            selected_index: 0,
            error_message: None,
            status_message: None,
            loading_message: Some("Loading profiles...".to_string()),
            should_quit: false,
            calculator,
        }
    }

    pub fn selected(&self) -> Option<&ProfileProgress> {
        self.rows.get(self.selected_index)
    }

    pub fn set_rows(&mut self, rows: Vec<ProfileProgress>) {
        self.rows = rows;
        if self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len().saturating_sub(1);
        }
        self.current_screen = Screen::List;
        self.loading_message = None;
        self.error_message = None;
    }

    pub fn set_loading(&mut self, message: &str) {
        self.current_screen = Screen::Loading;
        self.loading_message = Some(message.to_string());
        self.error_message = None;
    }

    pub fn set_error(&mut self, error: &str) {
        self.error_message = Some(error.to_string());
        self.loading_message = None;
        self.current_screen = Screen::List;
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index < self.rows.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    /// Previews an XP award on the selected profile.
    pub fn apply_award(&mut self, amount: u64) -> Option<LevelUp> {
        let calculator = self.calculator;
        let row = self.rows.get_mut(self.selected_index)?;
        let total = u64::try_from(row.profile.total_xp).ok()?;

        let result = calculator.award(total, amount);
        row.profile.total_xp = i64::try_from(total.saturating_add(amount)).unwrap_or(i64::MAX);
        row.level = result.current;

        self.status_message = Some(if result.leveled_up() {
            format!("+{} XP, reached {}!", amount, format_level(result.current.level))
        } else {
            format!("+{} XP", amount)
        });
        Some(result)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return AppAction::None;
        }

        match self.input_mode {
            InputMode::AwardingXp => self.handle_award_input(key),
            InputMode::Normal => match self.current_screen {
                Screen::List => self.handle_list_key(key),
                Screen::Detail => self.handle_detail_key(key),
                Screen::Loading => {
                    if key.code == KeyCode::Char('q') {
                        self.should_quit = true;
                    }
                    AppAction::None
                }
            },
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Enter if self.selected().is_some() => {
                self.current_screen = Screen::Detail;
                self.status_message = None;
            }
            KeyCode::Char('r') => {
                self.set_loading("Refreshing profiles...");
                return AppAction::Refresh;
            }
            _ => {}
        }
        AppAction::None
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Esc => {
                self.current_screen = Screen::List;
                self.status_message = None;
            }
            KeyCode::Char('x') => {
                self.input_mode = InputMode::AwardingXp;
                self.current_input.clear();
            }
            _ => {}
        }
        AppAction::None
    }

    fn handle_award_input(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() && self.current_input.len() < 9 => {
                self.current_input.push(c);
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Esc => {
                self.current_input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                if let Ok(amount) = self.current_input.parse::<u64>() {
                    self.apply_award(amount);
                }
                self.current_input.clear();
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
        AppAction::None
    }
}
