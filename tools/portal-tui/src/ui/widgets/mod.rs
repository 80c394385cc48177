//! Reusable UI components.

mod help_overlay;
mod panels;

pub use help_overlay::render_help_overlay;
pub use panels::{centered_rect, key_hint, panel, progress_bar, ACCENT, MUTED};
