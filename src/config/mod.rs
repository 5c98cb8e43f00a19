//! Configuration module — optional `.keyfob.toml` project settings.

pub mod settings;

pub use settings::Settings;
