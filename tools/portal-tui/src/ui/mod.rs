//! UI module - TUI rendering components.
//!
//! - `layout.rs`: screen structure; shell pages vs full-screen public pages
//! - `nav_panel.rs`: role menu on the left of the shell
//! - `pages/`: per-page content renderers
//! - `widgets/`: reusable components

mod layout;
mod nav_panel;

pub mod pages;
pub mod widgets;

pub use layout::render;
