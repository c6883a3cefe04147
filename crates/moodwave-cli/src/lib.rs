//! Moodwave CLI library.
//!
//! This crate provides the command implementations behind the `moodwave`
//! binary: parameter resolution, running both generators, and reporting.

pub mod commands;
pub mod logging;
