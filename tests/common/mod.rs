//! Shared test utilities for userdeck
//!
//! - Temp-dir storage and sample records
//! - A local HTTP stand-in for the seed endpoint
//! - TUI terminal testing helpers

#![allow(dead_code)]

pub mod fixtures;
pub mod terminal;
