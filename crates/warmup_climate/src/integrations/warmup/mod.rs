//! Warmup floor-heating thermostats, reached through the Warmup cloud.

mod client;
mod climate;
mod run_mode;

pub use client::ClientFactory;
pub use client::WarmupClient;
pub use climate::WarmupClimate;
pub use run_mode::RunMode;

use std::collections::HashSet;

use tracing::info;
use tracing::warn;

use crate::config::WarmupConfig;
use crate::engine::FromIntegrationMessage;
use crate::engine::FromIntegrationSender;

pub const INTEGRATION_NAME: &str = "warmup";

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The device could not be reached yet. The host should retry setup later.
    #[error("Warmup room '{room}' in location '{location}' is not ready: {reason}")]
    NotReady {
        location: String,
        room: String,
        reason: String,
    },
}

/// Set up the climate entity for one configured Warmup room.
///
/// Connects through `factory`, checks that the client finished its
/// handshake, and announces the new entity to the host. The entity id is
/// derived from the configured name and made unique against `existing_ids`.
pub async fn setup_platform<F: ClientFactory>(
    config: &WarmupConfig,
    factory: &F,
    existing_ids: &HashSet<String>,
    to_engine: FromIntegrationSender,
) -> Result<WarmupClimate<F::Client>, SetupError> {
    info!(
        "Setting up platform for Warmup room '{}' in '{}'",
        config.room, config.location
    );

    let not_ready = |reason: String| SetupError::NotReady {
        location: config.location.clone(),
        room: config.room.clone(),
        reason,
    };

    let device = match factory.connect(config).await {
        Ok(device) => device,
        Err(e) => {
            warn!("Failed to connect to Warmup cloud: {}", e);
            return Err(not_ready(e.to_string()));
        }
    };

    if !device.setup_finished() {
        return Err(not_ready("device setup did not finish".to_string()));
    }

    let entity_id = generate_entity_id(&config.name, existing_ids);
    let climate = WarmupClimate::new(
        entity_id.clone(),
        config.name.clone(),
        device,
        to_engine.clone(),
    );

    let msg = FromIntegrationMessage::EntityDiscovered {
        entity_id: entity_id.clone(),
        integration_name: INTEGRATION_NAME.to_string(),
    };
    if let Err(e) = to_engine.send(msg).await {
        warn!("Failed to send EntityDiscovered message: {}", e);
    } else {
        info!("Registered entity: {}", entity_id);
    }

    Ok(climate)
}

/// Entity id for a display name that doesn't collide with `existing_ids`.
///
/// Taken ids get a numeric suffix: "climate.warmup4ie", "climate.warmup4ie_2", ...
pub fn generate_entity_id(name: &str, existing_ids: &HashSet<String>) -> String {
    let base = entity_id_for(name);
    if !existing_ids.contains(&base) {
        return base;
    }

    (2..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !existing_ids.contains(candidate))
        .unwrap_or(base)
}

/// Entity id for a display name, e.g. "Bathroom Floor" -> "climate.bathroom_floor"
pub fn entity_id_for(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');

    if slug.is_empty() {
        format!("climate.{}", crate::config::DEFAULT_NAME)
    } else {
        format!("climate.{}", slug)
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::client::MockClientFactory;
    use super::client::MockWarmupClient;
    use super::*;
    use crate::engine::ClimateEntity;
    use crate::engine::Entity;
    use crate::engine::HvacMode;

    fn config(name: &str) -> WarmupConfig {
        WarmupConfig {
            name: name.to_string(),
            username: "me@example.com".to_string(),
            password: "hunter2".to_string(),
            location: "Home".to_string(),
            room: "Bathroom".to_string(),
            target_temp: 20.0,
        }
    }

    #[test]
    fn test_entity_id_for() {
        assert_eq!(entity_id_for("warmup4ie"), "climate.warmup4ie");
        assert_eq!(entity_id_for("Bathroom Floor"), "climate.bathroom_floor");
        assert_eq!(entity_id_for("  Kids' room #2 "), "climate.kids_room_2");
        assert_eq!(entity_id_for("!!!"), "climate.warmup4ie");
    }

    #[test]
    fn test_generate_entity_id_skips_taken_ids() {
        let mut taken = HashSet::new();
        assert_eq!(generate_entity_id("warmup4ie", &taken), "climate.warmup4ie");

        taken.insert("climate.warmup4ie".to_string());
        assert_eq!(generate_entity_id("warmup4ie", &taken), "climate.warmup4ie_2");

        taken.insert("climate.warmup4ie_2".to_string());
        assert_eq!(generate_entity_id("warmup4ie", &taken), "climate.warmup4ie_3");
        assert_eq!(generate_entity_id("Bathroom", &taken), "climate.bathroom");
    }

    #[tokio::test]
    async fn test_setup_unnamed_devices_get_distinct_ids() {
        let (tx, mut rx) = mpsc::channel(8);
        let factory = MockClientFactory::default();
        let mut upstairs = config("warmup4ie");
        upstairs.room = "Upstairs".to_string();
        let mut taken = HashSet::new();

        let first = setup_platform(&config("warmup4ie"), &factory, &taken, tx.clone())
            .await
            .unwrap();
        taken.insert(first.entity_id().to_string());
        let second = setup_platform(&upstairs, &factory, &taken, tx)
            .await
            .unwrap();

        assert_eq!(first.entity_id(), "climate.warmup4ie");
        assert_eq!(second.entity_id(), "climate.warmup4ie_2");
        rx.try_recv().unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            FromIntegrationMessage::EntityDiscovered {
                entity_id: "climate.warmup4ie_2".to_string(),
                integration_name: "warmup".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_setup_announces_entity() {
        let (tx, mut rx) = mpsc::channel(8);
        let factory = MockClientFactory::default();

        let climate = setup_platform(&config("Bathroom Floor"), &factory, &HashSet::new(), tx)
            .await
            .unwrap();

        assert_eq!(climate.entity_id(), "climate.bathroom_floor");
        assert_eq!(climate.name(), "Bathroom Floor");
        assert_eq!(
            rx.try_recv().unwrap(),
            FromIntegrationMessage::EntityDiscovered {
                entity_id: "climate.bathroom_floor".to_string(),
                integration_name: "warmup".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_setup_not_ready_when_handshake_unfinished() {
        let (tx, mut rx) = mpsc::channel(8);
        let factory = MockClientFactory {
            client: MockWarmupClient {
                setup_finished: false,
                ..MockWarmupClient::default()
            },
            connect_fails: false,
        };

        let err = setup_platform(&config("warmup4ie"), &factory, &HashSet::new(), tx)
            .await
            .err()
            .unwrap();

        assert!(matches!(err, SetupError::NotReady { ref room, .. } if room == "Bathroom"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_setup_not_ready_when_connect_fails() {
        let (tx, _rx) = mpsc::channel(8);
        let factory = MockClientFactory {
            connect_fails: true,
            ..MockClientFactory::default()
        };

        let err = setup_platform(&config("warmup4ie"), &factory, &HashSet::new(), tx)
            .await
            .err()
            .unwrap();

        assert!(err.to_string().contains("invalid credentials"));
    }

    #[tokio::test]
    async fn test_host_drives_boxed_entity() {
        let (tx, mut rx) = mpsc::channel(8);
        let factory = MockClientFactory {
            client: MockWarmupClient::with_run_mode("fixed"),
            connect_fails: false,
        };

        let climate = setup_platform(&config("Bathroom"), &factory, &HashSet::new(), tx)
            .await
            .unwrap();
        let mut entity: Box<dyn ClimateEntity> = Box::new(climate);
        rx.try_recv().unwrap();

        if entity.should_poll() {
            entity.update().await;
        }
        assert_eq!(entity.current_hvac(), Some(HvacMode::Heat));

        entity.set_hvac_mode("off").await;
        assert_eq!(
            rx.try_recv().unwrap(),
            FromIntegrationMessage::EntityStateChanged {
                entity_id: "climate.bathroom".to_string()
            }
        );

        let state = entity.climate_state().await;
        assert_eq!(state.hvac_mode, HvacMode::Off);
        assert_eq!(state.current_temperature, 19.5);
    }
}
