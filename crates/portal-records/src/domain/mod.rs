//! Domain module for student records
//!
//! Contains record rows, derived views, and errors.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
