//! Messages exchanged between integrations and the host.
//!
//! Split by direction:
//! - `FromIntegrationMessage`: signals from an integration to the host
//! - `ClimateCommand`: commands from the host to a climate entity

use tokio::sync::mpsc;

/// Sender for signals FROM integrations TO the host.
///
/// Bounded, so a host that stops draining applies backpressure.
pub type FromIntegrationSender = mpsc::Sender<FromIntegrationMessage>;
pub type FromIntegrationReceiver = mpsc::Receiver<FromIntegrationMessage>;

/// Messages FROM integrations TO the host
#[derive(Debug, Clone, PartialEq)]
pub enum FromIntegrationMessage {
    /// An entity was set up and should be added to the host
    EntityDiscovered {
        entity_id: String,
        integration_name: String,
    },

    /// An entity's state changed; the host should re-read and re-render it
    EntityStateChanged { entity_id: String },
}

/// Commands FROM the host TO a climate entity.
///
/// Mode values arrive as the host's strings and are validated by the entity.
#[derive(Debug, Clone, PartialEq)]
pub enum ClimateCommand {
    SetTemperature { temperature: Option<f64> },
    SetHvacMode { hvac_mode: String },
    SetPresetMode { preset_mode: String },
    TurnOn,
    TurnOff,
}
