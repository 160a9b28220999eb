//! # State Module
//!
//! Read-only settings loaded once at startup. The mutable session state
//! lives inside `CartEngine`, which the command layer borrows per command.

mod config;

pub use config::{
    CatalogSettings, CheckoutConfig, ConfigError, ConfigResult, DisplaySettings, LoggingSettings,
    StorageSettings,
};
