//! Domain types and the ports the application layer depends on.

pub mod ports;
pub mod submission;
pub mod validation;
pub mod weather;
