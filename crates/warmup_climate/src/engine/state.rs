use serde::Deserialize;
use serde::Serialize;
use strum::AsRefStr;
use strum::Display;
use strum::EnumString;

/// Requested operating mode of a climate entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HvacMode {
    /// Manual control at a fixed setpoint.
    Heat,
    /// Scheduled program control.
    Auto,
    Off,
}

/// User intent layered on top of the HVAC mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PresetMode {
    Home,
    Away,
}

/// Unit a climate entity reports temperatures in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum TemperatureUnit {
    #[serde(rename = "°C")]
    #[strum(serialize = "°C")]
    Celsius,
    #[serde(rename = "°F")]
    #[strum(serialize = "°F")]
    Fahrenheit,
}

/// Optional capabilities a climate entity advertises to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClimateFeature {
    TargetTemperature,
    PresetMode,
}

/// Snapshot of a climate entity as the host renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateState {
    pub hvac_mode: HvacMode,

    /// Mode derived from the device's reported run mode, if it maps to one.
    pub current_hvac: Option<HvacMode>,

    pub preset_mode: PresetMode,
    pub is_on: bool,
    pub current_temperature: f64,
    pub target_temperature: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub temperature_unit: TemperatureUnit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hvac_mode_strings() {
        assert_eq!("heat".parse::<HvacMode>().unwrap(), HvacMode::Heat);
        assert_eq!("auto".parse::<HvacMode>().unwrap(), HvacMode::Auto);
        assert_eq!("off".parse::<HvacMode>().unwrap(), HvacMode::Off);
        assert!("cool".parse::<HvacMode>().is_err());
        assert_eq!(HvacMode::Heat.to_string(), "heat");
    }

    #[test]
    fn test_preset_mode_strings() {
        assert_eq!("away".parse::<PresetMode>().unwrap(), PresetMode::Away);
        assert_eq!(PresetMode::Home.as_ref(), "home");
        assert!("eco".parse::<PresetMode>().is_err());
    }

    #[test]
    fn test_climate_state_json() {
        let state = ClimateState {
            hvac_mode: HvacMode::Heat,
            current_hvac: None,
            preset_mode: PresetMode::Home,
            is_on: true,
            current_temperature: 19.5,
            target_temperature: 21.0,
            min_temp: 5.0,
            max_temp: 30.0,
            temperature_unit: TemperatureUnit::Celsius,
        };

        let json = serde_json::to_string_pretty(&state).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "hvac_mode": "heat",
          "current_hvac": null,
          "preset_mode": "home",
          "is_on": true,
          "current_temperature": 19.5,
          "target_temperature": 21.0,
          "min_temp": 5.0,
          "max_temp": 30.0,
          "temperature_unit": "°C"
        }
        "#);
    }
}
