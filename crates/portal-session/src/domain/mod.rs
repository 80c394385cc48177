//! Domain module for the session core
//!
//! Contains entities, value objects, events, errors, and invariants.

pub mod entities;
pub mod errors;
pub mod events;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use events::*;
pub use invariants::resolve_identity;
pub use value_objects::*;
