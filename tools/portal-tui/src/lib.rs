//! University Portal terminal dashboard.
//!
//! The host router and dashboard shell for the portal. Every frame the
//! router runs the route guard against the live session; the shell only
//! draws what the guard allowed and never makes authorization decisions.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  UNIVERSITY PORTAL          Attendance        (S) Sam · Student │
//! ├────────────────────────┬────────────────────────────────────────┤
//! │  MENU                  │  ATTENDANCE                            │
//! │  [1] ◆ Dashboard       │  Overall ████████████░░░░░░░░ 58%      │
//! │  [2] ✓ Attendance      │  Total 12 Present 7 Late 2 Absent 3    │
//! │  [3] ▦ Schedule        ├────────────────────────────────────────┤
//! │  ...                   │  RECORDS                               │
//! └────────────────────────┴────────────────────────────────────────┘
//! ```

pub mod controller;
pub mod domain;
pub mod ui;

pub use controller::Portal;
pub use domain::{Action, App, AppState, NavItem, Page, Router, View};
