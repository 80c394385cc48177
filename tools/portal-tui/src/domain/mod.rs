//! Domain models for the dashboard shell.

mod app;
mod login;
mod navigation;
mod router;

pub use app::{Action, App, AppState, DataKind, PageData};
pub use login::{Field, LoginForm, LoginTab, Notice, Submission};
pub use navigation::{label_for, menu_for, NavItem, Page};
pub use router::{Router, View};
