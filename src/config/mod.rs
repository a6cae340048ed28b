mod settings;

pub use settings::{Config, ConfigError, SeedConfig, ToastConfig, EXAMPLE_CONFIG};
