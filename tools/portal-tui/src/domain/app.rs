//! Application state management.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use portal_records::{AttendanceReport, ExamsOverview, FetchState, Timetable};
use portal_session::{Role, Session, SessionStore, UserId};

use super::login::{Field, LoginForm, Submission};
use super::navigation::{menu_for, Page};
use super::router::{Router, View};

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Running,
    /// Help overlay.
    Help,
    Quit,
}

/// Record sets behind the student pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Attendance,
    Exams,
    Timetable,
}

impl DataKind {
    fn for_page(page: &Page) -> Option<Self> {
        match page {
            Page::Attendance => Some(DataKind::Attendance),
            Page::Exams => Some(DataKind::Exams),
            Page::Schedule => Some(DataKind::Timetable),
            _ => None,
        }
    }
}

/// Side effects requested by input or by the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Submit(Submission),
    SignOut,
    Refresh,
    Load(DataKind),
}

/// Page data; `None` until first requested.
#[derive(Debug, Clone, Default)]
pub struct PageData {
    /// Whose records these are.
    pub owner: Option<UserId>,
    pub attendance: Option<FetchState<AttendanceReport>>,
    pub exams: Option<FetchState<ExamsOverview>>,
    pub timetable: Option<FetchState<Timetable>>,
}

impl PageData {
    fn is_requested(&self, kind: DataKind) -> bool {
        match kind {
            DataKind::Attendance => self.attendance.is_some(),
            DataKind::Exams => self.exams.is_some(),
            DataKind::Timetable => self.timetable.is_some(),
        }
    }

    fn mark_loading(&mut self, kind: DataKind) {
        match kind {
            DataKind::Attendance => self.attendance = Some(FetchState::Loading),
            DataKind::Exams => self.exams = Some(FetchState::Loading),
            DataKind::Timetable => self.timetable = Some(FetchState::Loading),
        }
    }
}

/// Main application model.
pub struct App {
    pub state: AppState,
    pub router: Router,
    /// View resolved on the last [`App::sync`].
    pub view: View,
    /// Session snapshot taken on the last [`App::sync`].
    pub session: Session,
    /// Highlighted menu entry.
    pub nav_selected: usize,
    pub login: LoginForm,
    pub data: PageData,
    /// Transient status line.
    pub status: Option<String>,
    pub last_refresh: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Router::default())
    }
}

impl App {
    pub fn new(router: Router) -> Self {
        Self {
            state: AppState::Running,
            router,
            view: View::Loading,
            session: Session::loading(),
            nav_selected: 0,
            login: LoginForm::new(),
            data: PageData::default(),
            status: None,
            last_refresh: None,
        }
    }

    /// Re-run routing against the live session. Returns a fetch to start
    /// when the view needs records nobody has asked for yet.
    pub fn sync(&mut self, store: &SessionStore) -> Option<Action> {
        self.view = self.router.resolve(store);
        self.session = store.session();

        if self.data.owner != self.session.user_id() {
            self.data = PageData {
                owner: self.session.user_id(),
                ..PageData::default()
            };
        }

        if let Some(role) = self.session.role() {
            if let Some(idx) = menu_for(role)
                .iter()
                .position(|item| self.router.current() == item.path)
            {
                self.nav_selected = idx;
            }
        }

        let View::Page(page) = &self.view else {
            return None;
        };
        let kind = DataKind::for_page(page)?;
        if self.data.is_requested(kind) {
            return None;
        }
        self.data.mark_loading(kind);
        Some(Action::Load(kind))
    }

    /// Role of the settled session, if signed in.
    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    pub fn navigate(&mut self, path: &str) {
        self.status = None;
        self.router.navigate(path);
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state = AppState::Quit;
            return None;
        }

        match self.state {
            AppState::Help => {
                // Any key closes help
                self.state = AppState::Running;
                None
            }
            AppState::Quit => None,
            AppState::Running => match self.view.clone() {
                View::Loading => {
                    self.handle_global(key.code);
                    None
                }
                View::Page(Page::Login) => self.handle_login_key(key),
                View::Page(page) if page.in_shell() => self.handle_shell_key(key.code),
                View::Page(_) => {
                    self.handle_public_key(key.code);
                    None
                }
            },
        }
    }

    fn handle_global(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.state = AppState::Quit,
            KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
    }

    fn handle_public_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Enter => self.navigate("/login"),
            KeyCode::Char('a') | KeyCode::Char('A') => self.navigate("/about"),
            KeyCode::Char('h') | KeyCode::Char('H') => self.navigate("/"),
            other => self.handle_global(other),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                if !self.login.busy {
                    self.navigate("/");
                }
            }
            KeyCode::F(2) => self.login.toggle_tab(),
            KeyCode::Tab | KeyCode::Down => self.login.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.login.focus_prev(),
            KeyCode::Left if self.login.focus == Field::Role => self.login.cycle_role(false),
            KeyCode::Right if self.login.focus == Field::Role => self.login.cycle_role(true),
            KeyCode::Backspace => self.login.backspace(),
            KeyCode::Enter => return self.login.submit().map(Action::Submit),
            KeyCode::Char(c) => self.login.input(c),
            _ => {}
        }
        None
    }

    fn handle_shell_key(&mut self, code: KeyCode) -> Option<Action> {
        let menu = self.role().map(menu_for).unwrap_or(&[]);
        match code {
            KeyCode::Up => {
                if !menu.is_empty() {
                    self.nav_selected = (self.nav_selected + menu.len() - 1) % menu.len();
                }
            }
            KeyCode::Down => {
                if !menu.is_empty() {
                    self.nav_selected = (self.nav_selected + 1) % menu.len();
                }
            }
            KeyCode::Enter => {
                if let Some(item) = menu.get(self.nav_selected) {
                    self.navigate(item.path);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                if let Some(item) = menu.get(idx) {
                    self.nav_selected = idx;
                    self.navigate(item.path);
                }
            }
            KeyCode::Char('o') | KeyCode::Char('O') => return Some(Action::SignOut),
            KeyCode::Char('r') | KeyCode::Char('R') => return Some(Action::Refresh),
            KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Backspace => {
                if let Some(role) = self.role() {
                    self.navigate(role.home_path().as_str());
                }
            }
            other => self.handle_global(other),
        }
        None
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }
}
