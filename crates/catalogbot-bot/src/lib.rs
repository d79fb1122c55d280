//! Telegram front-end for the journal catalog.
//!
//! Configuration, logging, application state and the Telegram transport live
//! here; main.rs only wires them together, which keeps them testable.

pub mod config;
pub mod logging;
pub mod state;
pub mod telegram;
