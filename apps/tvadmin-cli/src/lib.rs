//! tvadmin CLI library
//!
//! Exposes the command implementations for the `tvadmin` binary and for
//! integration tests.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod output;
pub mod prompt;
