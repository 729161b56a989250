use std::error::Error;

use async_trait::async_trait;

use crate::config::WarmupConfig;

/// Operations on one Warmup room, as offered by a vendor cloud client.
///
/// Network access, authentication and the cloud protocol all live behind
/// this trait. This trait also allows for mocking the client for testing.
#[async_trait]
pub trait WarmupClient: Send + Sync {
    /// Whether the client finished its handshake and found the configured room
    fn setup_finished(&self) -> bool;

    /// Measured room temperature
    async fn current_temperature(&self) -> f64;

    /// Setpoint the device is heating to
    async fn target_temperature(&self) -> f64;

    /// Lowest accepted setpoint
    async fn target_temperature_low(&self) -> f64;

    /// Highest accepted setpoint
    async fn target_temperature_high(&self) -> f64;

    async fn set_new_temperature(&mut self, temperature: f64) -> Result<(), Box<dyn Error + Send>>;

    /// Switch the room to a fixed manual setpoint
    async fn set_temperature_to_manual(&mut self) -> Result<(), Box<dyn Error + Send>>;

    /// Switch the room to its scheduled program
    async fn set_temperature_to_auto(&mut self) -> Result<(), Box<dyn Error + Send>>;

    /// Switch the whole location off
    async fn set_location_to_off(&mut self) -> Result<(), Box<dyn Error + Send>>;

    /// Refresh the cached room state; false if the refresh failed
    async fn update_room(&mut self) -> bool;

    /// Run mode as reported by the device: "prog", "fixed", "off", "away", ...
    async fn run_mode(&self) -> String;
}

/// Builds a client for one configured device.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    type Client: WarmupClient;

    async fn connect(&self, config: &WarmupConfig) -> Result<Self::Client, Box<dyn Error + Send>>;
}

/// A call recorded by [`MockWarmupClient`]
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    SetNewTemperature(f64),
    SetTemperatureToManual,
    SetTemperatureToAuto,
    SetLocationToOff,
    UpdateRoom,
}

/// Mock Warmup client for testing
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MockWarmupClient {
    pub setup_finished: bool,
    pub run_mode: String,
    pub current_temperature: f64,
    pub target_temperature: f64,
    pub target_temperature_low: f64,
    pub target_temperature_high: f64,
    pub update_succeeds: bool,
    pub commands_fail: bool,
    pub calls: Vec<DeviceCall>,
}

#[cfg(test)]
impl Default for MockWarmupClient {
    fn default() -> Self {
        Self {
            setup_finished: true,
            run_mode: "prog".to_string(),
            current_temperature: 19.5,
            target_temperature: 21.0,
            target_temperature_low: 5.0,
            target_temperature_high: 30.0,
            update_succeeds: true,
            commands_fail: false,
            calls: Vec::new(),
        }
    }
}

#[cfg(test)]
impl MockWarmupClient {
    /// Create a new mock client reporting the "prog" run mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock client reporting the given run mode
    pub fn with_run_mode(run_mode: &str) -> Self {
        Self {
            run_mode: run_mode.to_string(),
            ..Self::default()
        }
    }

    fn record(&mut self, call: DeviceCall) -> Result<(), Box<dyn Error + Send>> {
        self.calls.push(call);
        if self.commands_fail {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Warmup cloud unreachable",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[async_trait]
impl WarmupClient for MockWarmupClient {
    fn setup_finished(&self) -> bool {
        self.setup_finished
    }

    async fn current_temperature(&self) -> f64 {
        self.current_temperature
    }

    async fn target_temperature(&self) -> f64 {
        self.target_temperature
    }

    async fn target_temperature_low(&self) -> f64 {
        self.target_temperature_low
    }

    async fn target_temperature_high(&self) -> f64 {
        self.target_temperature_high
    }

    async fn set_new_temperature(&mut self, temperature: f64) -> Result<(), Box<dyn Error + Send>> {
        self.record(DeviceCall::SetNewTemperature(temperature))?;
        self.target_temperature = temperature;
        Ok(())
    }

    async fn set_temperature_to_manual(&mut self) -> Result<(), Box<dyn Error + Send>> {
        self.record(DeviceCall::SetTemperatureToManual)
    }

    async fn set_temperature_to_auto(&mut self) -> Result<(), Box<dyn Error + Send>> {
        self.record(DeviceCall::SetTemperatureToAuto)
    }

    async fn set_location_to_off(&mut self) -> Result<(), Box<dyn Error + Send>> {
        self.record(DeviceCall::SetLocationToOff)
    }

    async fn update_room(&mut self) -> bool {
        self.calls.push(DeviceCall::UpdateRoom);
        self.update_succeeds
    }

    async fn run_mode(&self) -> String {
        self.run_mode.clone()
    }
}

/// Mock factory handing out clones of a template client
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockClientFactory {
    pub client: MockWarmupClient,
    pub connect_fails: bool,
}

#[cfg(test)]
#[async_trait]
impl ClientFactory for MockClientFactory {
    type Client = MockWarmupClient;

    async fn connect(
        &self,
        _config: &WarmupConfig,
    ) -> Result<MockWarmupClient, Box<dyn Error + Send>> {
        if self.connect_fails {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "invalid credentials",
            )));
        }
        Ok(self.client.clone())
    }
}
