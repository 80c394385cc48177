//! Cross-crate scenarios.

mod persistence;
mod records;
mod routing;
mod session;
