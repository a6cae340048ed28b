//! Integration tests for userdeck
//!
//! These tests drive the store, wizard and UI together against a real
//! SQLite-backed storage in a temp directory.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod dashboard_render;
pub mod seed_bootstrap;
pub mod wizard_flow;
