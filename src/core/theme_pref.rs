//! Persisted light/dark preference

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::data::{keys, StateStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Current theme mode, written through to the `theme` key
pub struct ThemePreference {
    storage: Arc<dyn StateStorage>,
    mode: ThemeMode,
}

impl ThemePreference {
    /// Load the saved mode, falling back to `default` when none is stored
    pub fn load(storage: Arc<dyn StateStorage>, default: ThemeMode) -> Self {
        let mode = match storage.get(keys::THEME) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring saved theme");
                default
            }),
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved theme");
                default
            }
        };
        Self { storage, mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip between light and dark and persist the result
    pub fn toggle(&mut self) -> ThemeMode {
        self.set(self.mode.toggled());
        self.mode
    }

    pub fn set(&mut self, mode: ThemeMode) {
        self.mode = mode;
        if let Err(e) = self.storage.set(keys::THEME, mode.as_str()) {
            tracing::error!(error = %e, "Failed to save theme");
        }
    }
}

impl fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreference")
            .field("mode", &self.mode)
            .finish()
    }
}
