//! Warmup floor-heating thermostats as climate entities.
//!
//! A [`WarmupClient`](integrations::warmup::WarmupClient) talks to the vendor
//! cloud; [`WarmupClimate`](integrations::warmup::WarmupClimate) adapts it to
//! the host's [`ClimateEntity`] interface.

pub mod config;
pub mod engine;
pub mod integrations;

pub use config::format_diagnostics;
pub use config::Config;
pub use config::ConfigError;
pub use config::Diagnostic;
pub use config::Diagnostics;
pub use config::LogLevel;
pub use config::WarmupConfig;
pub use engine::ClimateCommand;
pub use engine::ClimateEntity;
pub use engine::ClimateState;
pub use engine::Entity;
pub use engine::FromIntegrationMessage;
pub use engine::HvacMode;
pub use engine::PresetMode;
pub use integrations::warmup::setup_platform;
pub use integrations::warmup::SetupError;
