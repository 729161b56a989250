use strum::EnumString;

use crate::engine::HvacMode;

/// Run mode string reported by a Warmup device.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RunMode {
    /// Following the room's program
    Prog,
    /// Holding a manual setpoint
    Fixed,
    Off,
    Away,
    /// Anything the device reports that we don't know about
    #[strum(default)]
    Other(String),
}

impl RunMode {
    /// HVAC mode this run mode corresponds to.
    ///
    /// Away and unrecognized modes have no HVAC equivalent.
    pub fn hvac_mode(&self) -> Option<HvacMode> {
        match self {
            RunMode::Prog => Some(HvacMode::Auto),
            RunMode::Fixed => Some(HvacMode::Heat),
            RunMode::Off => Some(HvacMode::Off),
            RunMode::Away | RunMode::Other(_) => None,
        }
    }

    /// Parse a run mode string as reported by the device.
    ///
    /// Never fails: unrecognized strings are kept as [`RunMode::Other`].
    pub fn from_reported(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| RunMode::Other(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_run_modes() {
        assert_eq!(RunMode::from_reported("prog"), RunMode::Prog);
        assert_eq!(RunMode::from_reported("fixed"), RunMode::Fixed);
        assert_eq!(RunMode::from_reported("off"), RunMode::Off);
        assert_eq!(RunMode::from_reported("away"), RunMode::Away);
    }

    #[test]
    fn test_unknown_run_mode_is_kept() {
        assert_eq!(
            RunMode::from_reported("frost"),
            RunMode::Other("frost".to_string())
        );
        assert_eq!(RunMode::from_reported("frost").hvac_mode(), None);
    }

    #[test]
    fn test_hvac_mapping() {
        assert_eq!(RunMode::Prog.hvac_mode(), Some(HvacMode::Auto));
        assert_eq!(RunMode::Fixed.hvac_mode(), Some(HvacMode::Heat));
        assert_eq!(RunMode::Off.hvac_mode(), Some(HvacMode::Off));
        assert_eq!(RunMode::Away.hvac_mode(), None);
    }
}
