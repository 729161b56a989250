use async_trait::async_trait;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::client::WarmupClient;
use super::run_mode::RunMode;
use crate::engine::ClimateEntity;
use crate::engine::ClimateFeature;
use crate::engine::Entity;
use crate::engine::FromIntegrationMessage;
use crate::engine::FromIntegrationSender;
use crate::engine::HvacMode;
use crate::engine::PresetMode;
use crate::engine::TemperatureUnit;

const SUPPORTED_FEATURES: &[ClimateFeature] =
    &[ClimateFeature::TargetTemperature, ClimateFeature::PresetMode];
const HVAC_MODES: &[HvacMode] = &[HvacMode::Heat, HvacMode::Off, HvacMode::Auto];
const PRESET_MODES: &[PresetMode] = &[PresetMode::Home, PresetMode::Away];

/// Climate entity backed by one Warmup room.
///
/// Temperatures are read through to the client on every query. Modes and
/// the on/away flags are held here, refreshed by `update()` and by commands.
pub struct WarmupClimate<C: WarmupClient> {
    entity_id: String,
    name: String,
    hvac_mode: HvacMode,
    current_hvac_mode: Option<HvacMode>,
    on: bool,
    away_mode: bool,
    /// Mode to restore when leaving away
    away_mode_last_state: HvacMode,
    device: C,
    to_engine: FromIntegrationSender,
}

impl<C: WarmupClient> WarmupClimate<C> {
    pub fn new(entity_id: String, name: String, device: C, to_engine: FromIntegrationSender) -> Self {
        info!("Setting up Warmup component {}", entity_id);
        Self {
            entity_id,
            name,
            hvac_mode: HvacMode::Auto,
            current_hvac_mode: None,
            on: true,
            away_mode: false,
            away_mode_last_state: HvacMode::Off,
            device,
            to_engine,
        }
    }

    #[cfg(test)]
    pub(crate) fn device(&self) -> &C {
        &self.device
    }

    #[cfg(test)]
    pub(crate) fn device_mut(&mut self) -> &mut C {
        &mut self.device
    }

    pub fn away_mode_last_state(&self) -> HvacMode {
        self.away_mode_last_state
    }

    /// Set the away flag without touching the device
    pub fn turn_away_mode_on(&mut self) {
        self.away_mode = true;
    }

    /// Clear the away flag without touching the device
    pub fn turn_away_mode_off(&mut self) {
        self.away_mode = false;
    }

    /// Switch to a known HVAC mode and tell the host to re-read us
    pub async fn apply_hvac_mode(&mut self, hvac_mode: HvacMode) {
        self.hvac_mode = hvac_mode;
        let result = match hvac_mode {
            HvacMode::Heat => self.device.set_temperature_to_manual().await,
            HvacMode::Auto => self.device.set_temperature_to_auto().await,
            HvacMode::Off => self.device.set_location_to_off().await,
        };
        if let Err(e) = result {
            error!(
                "[{}] Failed to set hvac mode {}: {}",
                self.entity_id, hvac_mode, e
            );
        }

        // Ensure the host picks up the current operation after changing the mode
        self.schedule_update_state().await;
    }

    async fn schedule_update_state(&self) {
        let msg = FromIntegrationMessage::EntityStateChanged {
            entity_id: self.entity_id.clone(),
        };
        if let Err(e) = self.to_engine.send(msg).await {
            warn!("Failed to send EntityStateChanged message: {}", e);
        }
    }
}

#[async_trait]
impl<C: WarmupClient> Entity for WarmupClimate<C> {
    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn platform(&self) -> &'static str {
        "climate"
    }

    /// Fetch new state data for this device.
    ///
    /// A failed room refresh is logged and the flags are recomputed from
    /// whatever the client still reports.
    async fn update(&mut self) {
        if !self.device.update_room().await {
            error!("[{}] Updating Warmup component failed", self.entity_id);
        }

        let run_mode = RunMode::from_reported(self.device.run_mode().await.as_str());
        if let RunMode::Other(ref mode) = run_mode {
            warn!("[{}] Unknown Warmup run mode: {}", self.entity_id, mode);
        }

        self.current_hvac_mode = run_mode.hvac_mode();
        self.away_mode = run_mode == RunMode::Away;
        self.on = run_mode != RunMode::Off;
    }

    async fn state_json(&self) -> serde_json::Value {
        let state = self.climate_state().await;
        serde_json::json!({
            "entity_id": self.entity_id,
            "name": self.name,
            "platform": self.platform(),
            "state": state,
        })
    }
}

#[async_trait]
impl<C: WarmupClient> ClimateEntity for WarmupClimate<C> {
    fn supported_features(&self) -> &'static [ClimateFeature] {
        SUPPORTED_FEATURES
    }

    fn temperature_unit(&self) -> TemperatureUnit {
        TemperatureUnit::Celsius
    }

    async fn current_temperature(&self) -> f64 {
        self.device.current_temperature().await
    }

    async fn target_temperature(&self) -> f64 {
        self.device.target_temperature().await
    }

    async fn min_temp(&self) -> f64 {
        self.device.target_temperature_low().await
    }

    async fn max_temp(&self) -> f64 {
        self.device.target_temperature_high().await
    }

    fn hvac_mode(&self) -> HvacMode {
        self.hvac_mode
    }

    fn hvac_modes(&self) -> &'static [HvacMode] {
        HVAC_MODES
    }

    fn current_hvac(&self) -> Option<HvacMode> {
        self.current_hvac_mode
    }

    fn preset_mode(&self) -> PresetMode {
        if self.away_mode {
            PresetMode::Away
        } else {
            PresetMode::Home
        }
    }

    fn preset_modes(&self) -> &'static [PresetMode] {
        PRESET_MODES
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn is_away_mode_on(&self) -> bool {
        self.away_mode
    }

    async fn set_temperature(&mut self, temperature: Option<f64>) {
        let Some(temperature) = temperature else {
            return;
        };
        if let Err(e) = self.device.set_new_temperature(temperature).await {
            error!(
                "[{}] Failed to set target temperature {}: {}",
                self.entity_id, temperature, e
            );
        }
    }

    async fn set_hvac_mode(&mut self, hvac_mode: &str) {
        match hvac_mode.parse::<HvacMode>() {
            Ok(mode) => self.apply_hvac_mode(mode).await,
            Err(_) => error!("[{}] Unrecognized hvac mode: {}", self.entity_id, hvac_mode),
        }
    }

    /// Away forces the device off and remembers the mode to go back to.
    async fn set_preset_mode(&mut self, preset_mode: &str) {
        if !self.on {
            return;
        }
        match preset_mode.parse::<PresetMode>() {
            Ok(PresetMode::Away) => {
                if !self.away_mode {
                    self.away_mode_last_state = self.hvac_mode;
                    self.away_mode = true;
                    self.apply_hvac_mode(HvacMode::Off).await;
                }
            }
            Ok(PresetMode::Home) => {
                if self.away_mode {
                    self.away_mode = false;
                    self.apply_hvac_mode(self.away_mode_last_state).await;
                }
            }
            Err(_) => error!("[{}] Unknown mode: {}", self.entity_id, preset_mode),
        }
        self.schedule_update_state().await;
    }

    /// Does not restore the previous mode; the device always goes to manual.
    async fn turn_on(&mut self) {
        self.on = true;
        if let Err(e) = self.device.set_temperature_to_manual().await {
            error!("[{}] Failed to turn on: {}", self.entity_id, e);
        }
    }

    async fn turn_off(&mut self) {
        self.on = false;
        if let Err(e) = self.device.set_location_to_off().await {
            error!("[{}] Failed to turn off: {}", self.entity_id, e);
        }
    }
}
