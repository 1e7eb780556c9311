//! Operator command implementations for the `dialer` binary.

pub mod commands;
pub mod config;
