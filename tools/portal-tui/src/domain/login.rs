//! Sign-in / sign-up form state.

use portal_session::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginTab {
    #[default]
    SignIn,
    SignUp,
}

/// Focusable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    FullName,
    #[default]
    Email,
    Password,
    Role,
}

impl LoginTab {
    fn fields(self) -> &'static [Field] {
        match self {
            LoginTab::SignIn => &[Field::Email, Field::Password],
            LoginTab::SignUp => &[Field::FullName, Field::Email, Field::Password, Field::Role],
        }
    }
}

/// Banner under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Info(String),
}

/// What pressing Enter asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        full_name: String,
        role: Role,
    },
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub tab: LoginTab,
    pub focus: Field,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    pub notice: Option<Notice>,
    /// A request is in flight; input is ignored.
    pub busy: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            LoginTab::SignIn => LoginTab::SignUp,
            LoginTab::SignUp => LoginTab::SignIn,
        };
        self.focus = self.tab.fields()[0];
        self.notice = None;
    }

    pub fn focus_next(&mut self) {
        self.shift_focus(1);
    }

    pub fn focus_prev(&mut self) {
        let len = self.tab.fields().len();
        self.shift_focus(len - 1);
    }

    fn shift_focus(&mut self, by: usize) {
        let fields = self.tab.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + by) % fields.len()];
    }

    /// Next role in the picker.
    pub fn cycle_role(&mut self, forward: bool) {
        let all = Role::ALL;
        let idx = all.iter().position(|r| *r == self.role).unwrap_or(0);
        let next = if forward { idx + 1 } else { idx + all.len() - 1 };
        self.role = all[next % all.len()];
    }

    pub fn input(&mut self, c: char) {
        if self.busy {
            return;
        }
        match self.focus {
            Field::FullName => self.full_name.push(c),
            Field::Email => self.email.push(c),
            Field::Password => self.password.push(c),
            Field::Role => match c {
                's' | 'S' => self.role = Role::Student,
                't' | 'T' => self.role = Role::Teacher,
                'a' | 'A' => self.role = Role::Admin,
                ' ' => self.cycle_role(true),
                _ => {}
            },
        }
    }

    pub fn backspace(&mut self) {
        if self.busy {
            return;
        }
        match self.focus {
            Field::FullName => {
                self.full_name.pop();
            }
            Field::Email => {
                self.email.pop();
            }
            Field::Password => {
                self.password.pop();
            }
            Field::Role => {}
        }
    }

    /// Start a request for the active tab. `None` while one is in flight.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.busy {
            return None;
        }
        self.busy = true;
        self.notice = None;
        Some(match self.tab {
            LoginTab::SignIn => Submission::SignIn {
                email: self.email.clone(),
                password: self.password.clone(),
            },
            LoginTab::SignUp => Submission::SignUp {
                email: self.email.clone(),
                password: self.password.clone(),
                full_name: self.full_name.clone(),
                role: self.role,
            },
        })
    }

    /// Request failed: show the message, keep the fields.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.notice = Some(Notice::Error(message.into()));
    }

    /// Account created: switch to sign-in with the email kept.
    pub fn signed_up(&mut self) {
        self.busy = false;
        self.password.clear();
        self.full_name.clear();
        self.tab = LoginTab::SignIn;
        self.focus = Field::Password;
        self.notice = Some(Notice::Info(
            "Account created. Check your email to confirm it, then sign in.".to_string(),
        ));
    }

    /// Signed in: forget everything typed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
