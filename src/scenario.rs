//! Scenario configuration.

use crate::vehicle::{VehicleAttributes, VEHICLE_ACCELERATION, VEHICLE_WIDTH};
use thiserror::Error;

/// The configuration of one independent simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    /// The clearance between consecutive vehicles at the start.
    pub initial_gap: f64,
    /// The clearance each vehicle needs before it may move.
    pub require_gap: f64,
    /// The ticks each vehicle waits once it may move.
    pub reaction_delay: u32,
}

/// An error in a scenario list.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scenario list is empty")]
    Empty,
    #[error("scenario {index} has invalid {field} {value}")]
    InvalidGap {
        index: usize,
        field: &'static str,
        value: f64,
    },
    #[error("could not read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse scenario file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Scenario {
    pub const fn new(initial_gap: f64, require_gap: f64, reaction_delay: u32) -> Self {
        Self {
            initial_gap,
            require_gap,
            reaction_delay,
        }
    }

    /// The attributes given to every vehicle of this scenario.
    pub fn vehicle_attributes(&self) -> VehicleAttributes {
        VehicleAttributes {
            width: VEHICLE_WIDTH,
            acceleration: VEHICLE_ACCELERATION,
            reaction_delay: self.reaction_delay,
            require_gap: self.require_gap,
        }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        for (field, value) in [
            ("initial_gap", self.initial_gap),
            ("require_gap", self.require_gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidGap {
                    index,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// The built-in scenarios: tight queues released one by one, and a spaced
/// queue that needs as much room as it started with.
pub const DEFAULT_SCENARIOS: [Scenario; 6] = [
    Scenario::new(10.0, 50.0, 3),
    Scenario::new(20.0, 50.0, 3),
    Scenario::new(30.0, 50.0, 3),
    Scenario::new(40.0, 50.0, 3),
    Scenario::new(49.0, 50.0, 3),
    Scenario::new(200.0, 200.0, 3),
];

/// Checks that a scenario list can be simulated.
pub fn validate(scenarios: &[Scenario]) -> Result<(), ConfigError> {
    if scenarios.is_empty() {
        return Err(ConfigError::Empty);
    }
    scenarios
        .iter()
        .enumerate()
        .try_for_each(|(index, scenario)| scenario.validate(index))
}

/// Parses and validates a JSON array of scenarios.
#[cfg(feature = "serde")]
pub fn from_json(json: &str) -> Result<Vec<Scenario>, ConfigError> {
    let scenarios: Vec<Scenario> = serde_json::from_str(json)?;
    validate(&scenarios)?;
    Ok(scenarios)
}

/// Loads and validates a JSON scenario file.
#[cfg(feature = "serde")]
pub fn load(path: &std::path::Path) -> Result<Vec<Scenario>, ConfigError> {
    let json = std::fs::read_to_string(path)?;
    let scenarios = from_json(&json)?;
    log::info!("loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&DEFAULT_SCENARIOS).is_ok());
    }

    #[test]
    fn rejects_bad_lists() {
        assert!(matches!(validate(&[]), Err(ConfigError::Empty)));
        let bad = [Scenario::new(10.0, 50.0, 3), Scenario::new(10.0, -1.0, 3)];
        match validate(&bad) {
            Err(ConfigError::InvalidGap { index, field, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "require_gap");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(validate(&[Scenario::new(f64::NAN, 0.0, 0)]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_json() {
        let json = r#"[{"initial_gap": 10, "require_gap": 50, "reaction_delay": 3}]"#;
        let scenarios = from_json(json).unwrap();
        assert_eq!(scenarios, [Scenario::new(10.0, 50.0, 3)]);
        assert!(matches!(from_json("[]"), Err(ConfigError::Empty)));
        assert!(matches!(from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_file() {
        let path = std::env::temp_dir().join(format!("scenarios-{}.json", std::process::id()));
        let json = r#"[
            {"initial_gap": 10, "require_gap": 50, "reaction_delay": 3},
            {"initial_gap": 200, "require_gap": 200, "reaction_delay": 0}
        ]"#;
        std::fs::write(&path, json).unwrap();
        let loaded = load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            loaded.unwrap(),
            [Scenario::new(10.0, 50.0, 3), Scenario::new(200.0, 200.0, 0)]
        );

        let missing = std::env::temp_dir().join("no-such-scenarios.json");
        assert!(matches!(load(&missing), Err(ConfigError::Io(_))));
    }
}
