//! Ports module for student records

pub mod outbound;

pub use outbound::RecordSource;
