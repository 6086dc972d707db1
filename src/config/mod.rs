//! Configuration file loading and resolution into engine settings.
mod loader;
mod settings;
pub mod types;

#[cfg(test)]
mod tests;

pub use loader::load_config;
pub use settings::EngineSettings;

#[cfg(test)]
pub(crate) use loader::load_config_file;
