//! Application layer containing the use-case orchestration.
//!
//! This module defines the `ContactService`, which validates incoming
//! submissions before they reach a `MessageStore`.

pub mod contact;
