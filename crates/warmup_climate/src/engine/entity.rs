use async_trait::async_trait;

use super::message::ClimateCommand;
use super::state::ClimateFeature;
use super::state::ClimateState;
use super::state::HvacMode;
use super::state::PresetMode;
use super::state::TemperatureUnit;

/// Base trait that all entities must implement
#[async_trait]
pub trait Entity: Send + Sync {
    /// Host-wide identifier, e.g. "climate.bathroom"
    fn entity_id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Return the platform type of this entity (e.g. "climate", "light")
    fn platform(&self) -> &'static str;

    /// Whether the host has to call `update()` on its schedule.
    /// Entities that push their own updates return false.
    fn should_poll(&self) -> bool {
        true
    }

    /// Refresh the entity's view of its device. Invoked by the host's poller.
    async fn update(&mut self);

    /// Serialize current state to JSON for host storage
    async fn state_json(&self) -> serde_json::Value;
}

/// A pollable climate device as seen by the host.
#[async_trait]
pub trait ClimateEntity: Entity {
    fn supported_features(&self) -> &'static [ClimateFeature];

    fn temperature_unit(&self) -> TemperatureUnit;

    async fn current_temperature(&self) -> f64;

    async fn target_temperature(&self) -> f64;

    async fn min_temp(&self) -> f64;

    async fn max_temp(&self) -> f64;

    fn hvac_mode(&self) -> HvacMode;

    fn hvac_modes(&self) -> &'static [HvacMode];

    /// Operating mode reported by the device as of the last poll
    fn current_hvac(&self) -> Option<HvacMode>;

    fn preset_mode(&self) -> PresetMode;

    fn preset_modes(&self) -> &'static [PresetMode];

    fn is_on(&self) -> bool;

    fn is_away_mode_on(&self) -> bool;

    async fn set_temperature(&mut self, temperature: Option<f64>);

    async fn set_hvac_mode(&mut self, hvac_mode: &str);

    async fn set_preset_mode(&mut self, preset_mode: &str);

    async fn turn_on(&mut self);

    async fn turn_off(&mut self);

    /// Dispatch a host command to the matching operation
    async fn handle_command(&mut self, command: ClimateCommand) {
        match command {
            ClimateCommand::SetTemperature { temperature } => {
                self.set_temperature(temperature).await
            }
            ClimateCommand::SetHvacMode { hvac_mode } => self.set_hvac_mode(&hvac_mode).await,
            ClimateCommand::SetPresetMode { preset_mode } => {
                self.set_preset_mode(&preset_mode).await
            }
            ClimateCommand::TurnOn => self.turn_on().await,
            ClimateCommand::TurnOff => self.turn_off().await,
        }
    }

    /// Collect every property into one snapshot.
    ///
    /// Temperatures are read through to the device on each call.
    async fn climate_state(&self) -> ClimateState {
        ClimateState {
            hvac_mode: self.hvac_mode(),
            current_hvac: self.current_hvac(),
            preset_mode: self.preset_mode(),
            is_on: self.is_on(),
            current_temperature: self.current_temperature().await,
            target_temperature: self.target_temperature().await,
            min_temp: self.min_temp().await,
            max_temp: self.max_temp().await,
            temperature_unit: self.temperature_unit(),
        }
    }
}
