mod entity;
mod message;
pub mod state;

pub use entity::ClimateEntity;
pub use entity::Entity;
pub use message::ClimateCommand;
pub use message::FromIntegrationMessage;
pub use message::FromIntegrationReceiver;
pub use message::FromIntegrationSender;
pub use state::ClimateFeature;
pub use state::ClimateState;
pub use state::HvacMode;
pub use state::PresetMode;
pub use state::TemperatureUnit;
