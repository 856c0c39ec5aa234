use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use engine::{Accounts, DistributionMethod, Goals, PlanInput, SavingsRecord, Store, allocate};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Register,
}

impl AuthTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
}

#[derive(Debug, Default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Feedback line under the active form, mirroring the success/error banners
/// of the original screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

#[derive(Debug)]
pub struct AuthState {
    pub tab: AuthTab,
    pub login: CredentialsForm,
    pub register: CredentialsForm,
    pub focus: AuthField,
    pub feedback: Option<Feedback>,
}

/// Fields of the dashboard form, in Tab order. `Method` is the select
/// control at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashField {
    Income,
    Expenses,
    CurrentSavings,
    GoalBooks,
    GoalTuition,
    GoalMeal,
    Method,
}

impl DashField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Monthly Income",
            Self::Expenses => "Monthly Expenses",
            Self::CurrentSavings => "Current Savings",
            Self::GoalBooks => "Books Goal",
            Self::GoalTuition => "Tuition Goal",
            Self::GoalMeal => "Meal Plan Goal",
            Self::Method => "Method",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Income => Self::Expenses,
            Self::Expenses => Self::CurrentSavings,
            Self::CurrentSavings => Self::GoalBooks,
            Self::GoalBooks => Self::GoalTuition,
            Self::GoalTuition => Self::GoalMeal,
            Self::GoalMeal => Self::Method,
            Self::Method => Self::Income,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Income => Self::Method,
            Self::Expenses => Self::Income,
            Self::CurrentSavings => Self::Expenses,
            Self::GoalBooks => Self::CurrentSavings,
            Self::GoalTuition => Self::GoalBooks,
            Self::GoalMeal => Self::GoalTuition,
            Self::Method => Self::GoalMeal,
        }
    }
}

#[derive(Debug)]
pub struct DashboardState {
    pub income: String,
    pub expenses: String,
    pub current_savings: String,
    pub goal_books: String,
    pub goal_tuition: String,
    pub goal_meal: String,
    pub method: DistributionMethod,
    pub focus: DashField,
    pub saved: Option<SavingsRecord>,
    pub feedback: Option<Feedback>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            income: String::new(),
            expenses: String::new(),
            current_savings: String::new(),
            goal_books: String::new(),
            goal_tuition: String::new(),
            goal_meal: String::new(),
            method: DistributionMethod::default(),
            focus: DashField::Income,
            saved: None,
            feedback: None,
        }
    }
}

impl DashboardState {
    fn field_mut(&mut self, field: DashField) -> Option<&mut String> {
        match field {
            DashField::Income => Some(&mut self.income),
            DashField::Expenses => Some(&mut self.expenses),
            DashField::CurrentSavings => Some(&mut self.current_savings),
            DashField::GoalBooks => Some(&mut self.goal_books),
            DashField::GoalTuition => Some(&mut self.goal_tuition),
            DashField::GoalMeal => Some(&mut self.goal_meal),
            DashField::Method => None,
        }
    }

    /// Parses the form into engine input. Empty fields count as zero, the
    /// way the original numeric inputs defaulted to `0.0`.
    pub fn parse_input(&self) -> std::result::Result<PlanInput, String> {
        Ok(PlanInput {
            income: parse_amount(DashField::Income.label(), &self.income)?,
            expenses: parse_amount(DashField::Expenses.label(), &self.expenses)?,
            current_savings: parse_amount(
                DashField::CurrentSavings.label(),
                &self.current_savings,
            )?,
            goals: Goals {
                books: parse_amount(DashField::GoalBooks.label(), &self.goal_books)?,
                tuition: parse_amount(DashField::GoalTuition.label(), &self.goal_tuition)?,
                meal: parse_amount(DashField::GoalMeal.label(), &self.goal_meal)?,
            },
            method: self.method,
        })
    }

    /// Current goal values for the progress bars, leniently parsed: the
    /// bars are display-only and must never block on a half-typed number.
    pub fn goal_values(&self) -> Goals {
        Goals {
            books: self.goal_books.trim().parse().unwrap_or(0.0),
            tuition: self.goal_tuition.trim().parse().unwrap_or(0.0),
            meal: self.goal_meal.trim().parse().unwrap_or(0.0),
        }
    }
}

fn parse_amount(label: &str, raw: &str) -> std::result::Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| format!("Invalid number for {label}."))
}

/// Ephemeral session context: set on login, cleared on logout, never
/// persisted.
#[derive(Debug)]
pub struct Session {
    pub username: String,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub auth: AuthState,
    pub dashboard: DashboardState,
    pub session: Option<Session>,
    pub data_file: String,
}

pub struct App {
    accounts: Accounts,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = Store::open(config.data_file.as_str())?;
        let state = AppState {
            screen: Screen::Auth,
            auth: AuthState {
                tab: AuthTab::Login,
                login: CredentialsForm {
                    username: config.username.clone(),
                    password: String::new(),
                },
                register: CredentialsForm::default(),
                focus: AuthField::Username,
                feedback: None,
            },
            dashboard: DashboardState::default(),
            session: None,
            data_file: config.data_file,
        };

        Ok(Self {
            accounts: Accounts::new(store),
            state,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.screen {
            Screen::Auth => self.handle_auth_key(action)?,
            Screen::Dashboard => self.handle_dashboard_key(action)?,
        }

        Ok(())
    }

    fn handle_auth_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Cancel => {
                // No session to drop yet: leaving the auth screen exits.
                self.should_quit = true;
            }
            AppAction::PrevTab | AppAction::NextTab => {
                self.state.auth.tab = match self.state.auth.tab {
                    AuthTab::Login => AuthTab::Register,
                    AuthTab::Register => AuthTab::Login,
                };
                self.state.auth.focus = AuthField::Username;
            }
            AppAction::NextField | AppAction::PrevField => {
                self.state.auth.focus = match self.state.auth.focus {
                    AuthField::Username => AuthField::Password,
                    AuthField::Password => AuthField::Username,
                };
            }
            AppAction::Submit => match self.state.auth.tab {
                AuthTab::Login => self.attempt_login()?,
                AuthTab::Register => self.attempt_register()?,
            },
            AppAction::Backspace => {
                self.active_credential_mut().pop();
            }
            AppAction::Input(ch) => {
                self.active_credential_mut().push(ch);
            }
            _ => {}
        }
        Ok(())
    }

    fn active_credential_mut(&mut self) -> &mut String {
        let form = match self.state.auth.tab {
            AuthTab::Login => &mut self.state.auth.login,
            AuthTab::Register => &mut self.state.auth.register,
        };
        match self.state.auth.focus {
            AuthField::Username => &mut form.username,
            AuthField::Password => &mut form.password,
        }
    }

    fn attempt_login(&mut self) -> Result<()> {
        let username = self.state.auth.login.username.trim().to_string();
        let password = self.state.auth.login.password.trim().to_string();

        if username.is_empty() || password.is_empty() {
            self.state.auth.feedback =
                Some(Feedback::Error("Fill in all fields.".to_string()));
            return Ok(());
        }

        if self.accounts.authenticate(&username, &password)? {
            tracing::info!(user = %username, "login ok");
            let saved = self.accounts.savings(&username)?;
            self.state.dashboard = DashboardState::default();
            self.state.dashboard.saved = saved;
            self.state.dashboard.feedback =
                Some(Feedback::Success("Logged in successfully!".to_string()));
            self.state.session = Some(Session { username });
            self.state.screen = Screen::Dashboard;
            self.state.auth.feedback = None;
            self.state.auth.login.password.clear();
        } else {
            tracing::debug!(user = %username, "login rejected");
            self.state.auth.feedback = Some(Feedback::Error(
                "Incorrect username or password.".to_string(),
            ));
        }

        Ok(())
    }

    fn attempt_register(&mut self) -> Result<()> {
        let username = self.state.auth.register.username.trim().to_string();
        let password = self.state.auth.register.password.trim().to_string();

        if username.is_empty() || password.is_empty() {
            self.state.auth.feedback =
                Some(Feedback::Error("Fill in all fields.".to_string()));
            return Ok(());
        }

        if self.accounts.register(&username, &password)? {
            tracing::info!(user = %username, "registered");
            self.state.auth.feedback = Some(Feedback::Success(
                "User registered! You can now log in.".to_string(),
            ));
            self.state.auth.register.password.clear();
        } else {
            self.state.auth.feedback =
                Some(Feedback::Error("Username already exists.".to_string()));
        }

        Ok(())
    }

    fn handle_dashboard_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Cancel => self.log_out(),
            AppAction::NextField => {
                self.state.dashboard.focus = self.state.dashboard.focus.next();
            }
            AppAction::PrevField => {
                self.state.dashboard.focus = self.state.dashboard.focus.prev();
            }
            AppAction::Up => self.bump_method_or_focus(true),
            AppAction::Down => self.bump_method_or_focus(false),
            AppAction::NextTab if self.state.dashboard.focus == DashField::Method => {
                self.state.dashboard.method = self.state.dashboard.method.next();
            }
            AppAction::PrevTab if self.state.dashboard.focus == DashField::Method => {
                self.state.dashboard.method = self.state.dashboard.method.prev();
            }
            AppAction::Submit => self.calculate_and_save()?,
            AppAction::Backspace => {
                let focus = self.state.dashboard.focus;
                if let Some(field) = self.state.dashboard.field_mut(focus) {
                    field.pop();
                }
            }
            AppAction::Input(ch) => {
                let focus = self.state.dashboard.focus;
                if let Some(field) = self.state.dashboard.field_mut(focus) {
                    // Non-negativity hint only: digits and one decimal point.
                    if ch.is_ascii_digit() || (ch == '.' && !field.contains('.')) {
                        field.push(ch);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Up/Down cycle the select control when it has focus and otherwise move
    /// between form fields.
    fn bump_method_or_focus(&mut self, up: bool) {
        let dashboard = &mut self.state.dashboard;
        if dashboard.focus == DashField::Method {
            dashboard.method = if up {
                dashboard.method.prev()
            } else {
                dashboard.method.next()
            };
        } else if up {
            dashboard.focus = dashboard.focus.prev();
        } else {
            dashboard.focus = dashboard.focus.next();
        }
    }

    fn calculate_and_save(&mut self) -> Result<()> {
        let Some(session) = &self.state.session else {
            return Ok(());
        };
        let username = session.username.clone();

        let input = match self.state.dashboard.parse_input() {
            Ok(input) => input,
            Err(message) => {
                self.state.dashboard.feedback = Some(Feedback::Error(message));
                return Ok(());
            }
        };

        let record = allocate(&input);
        self.accounts.update_savings(&username, record)?;
        tracing::info!(user = %username, method = %input.method, "savings saved");

        // Re-read so the breakdown always shows what is actually on disk.
        self.state.dashboard.saved = self.accounts.savings(&username)?;
        self.state.dashboard.feedback = Some(Feedback::Success(
            "Savings calculated and saved!".to_string(),
        ));
        Ok(())
    }

    fn log_out(&mut self) {
        if let Some(session) = self.state.session.take() {
            tracing::info!(user = %session.username, "logout");
        }
        self.state.dashboard = DashboardState::default();
        self.state.auth.login.password.clear();
        self.state.auth.feedback = None;
        self.state.screen = Screen::Auth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_parse_as_zero() {
        let dashboard = DashboardState::default();
        let input = dashboard.parse_input().unwrap();

        assert_eq!(input.income, 0.0);
        assert_eq!(input.goals.total(), 0.0);
    }

    #[test]
    fn half_typed_number_is_reported_by_label() {
        let mut dashboard = DashboardState::default();
        dashboard.income = ".".to_string();

        let err = dashboard.parse_input().unwrap_err();
        assert_eq!(err, "Invalid number for Monthly Income.");
    }

    #[test]
    fn goal_values_never_fail() {
        let mut dashboard = DashboardState::default();
        dashboard.goal_books = "100".to_string();
        dashboard.goal_tuition = ".".to_string();

        let goals = dashboard.goal_values();
        assert_eq!(goals.books, 100.0);
        assert_eq!(goals.tuition, 0.0);
    }
}
