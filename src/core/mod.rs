//! Core state shared by the terminal UI.
//!
//! - The user record store and its one-time seed bootstrap
//! - Toast notifications
//! - The persisted light/dark preference

pub mod seed;
mod theme_pref;
mod toasts;
mod user_store;

pub use seed::{HttpSeedSource, NoSeed, SeedError, SeedSource, DEFAULT_SEED_URL};
pub use theme_pref::{ThemeMode, ThemePreference};
pub use toasts::{Toast, ToastKind, Toasts, DEFAULT_TOAST_DURATION};
pub use user_store::{Bootstrap, StoreError, StoreStatus, UserStore, LOAD_ERROR_MESSAGE};
