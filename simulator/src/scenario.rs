//! Scripted input scenarios.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A scripted sequence of widget input events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Steps in the scenario.
    pub steps: Vec<ScenarioStep>,
}

/// A step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioStep {
    /// Type into the amount field.
    SetAmount { value: String },
    /// Select the source currency.
    SelectSource { currency: String },
    /// Select the target currency.
    SelectTarget { currency: String },
    /// Press the swap control.
    Swap,
    /// Press the manual refresh control.
    Refresh,
    /// Let time pass.
    Wait { millis: u64 },
}

impl Scenario {
    /// Load a built-in scenario by name.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name {
            "basic-conversion" => Ok(Self::basic_conversion()),
            "same-currency" => Ok(Self::same_currency()),
            "missing-rate" => Ok(Self::missing_rate()),
            "rapid-input" => Ok(Self::rapid_input()),
            "swap-roundtrip" => Ok(Self::swap_roundtrip()),
            _ => Err(anyhow::anyhow!("Unknown scenario: {}", name)),
        }
    }

    /// Load a scenario from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// One dollar to euros.
    fn basic_conversion() -> Self {
        Self {
            name: "basic-conversion".to_string(),
            description: "Convert 1 USD to EUR".to_string(),
            steps: vec![
                ScenarioStep::SelectSource {
                    currency: "USD".to_string(),
                },
                ScenarioStep::Wait { millis: 600 },
                ScenarioStep::SelectTarget {
                    currency: "EUR".to_string(),
                },
                ScenarioStep::Wait { millis: 600 },
                ScenarioStep::SetAmount {
                    value: "1".to_string(),
                },
                ScenarioStep::Wait { millis: 600 },
            ],
        }
    }

    /// Same-currency conversion bypasses the table.
    fn same_currency() -> Self {
        Self {
            name: "same-currency".to_string(),
            description: "100 JPY to JPY resolves at rate 1".to_string(),
            steps: vec![
                ScenarioStep::SelectSource {
                    currency: "JPY".to_string(),
                },
                ScenarioStep::SelectTarget {
                    currency: "JPY".to_string(),
                },
                ScenarioStep::SetAmount {
                    value: "100".to_string(),
                },
                ScenarioStep::Wait { millis: 600 },
            ],
        }
    }

    /// A pair with no table entry.
    fn missing_rate() -> Self {
        Self {
            name: "missing-rate".to_string(),
            description: "CHF has no table entries; the error banner shows".to_string(),
            steps: vec![
                ScenarioStep::SelectSource {
                    currency: "CHF".to_string(),
                },
                ScenarioStep::SelectTarget {
                    currency: "USD".to_string(),
                },
                ScenarioStep::SetAmount {
                    value: "5".to_string(),
                },
                ScenarioStep::Wait { millis: 600 },
            ],
        }
    }

    /// Keystrokes faster than the simulated latency; only the last-issued
    /// conversion may commit.
    fn rapid_input() -> Self {
        Self {
            name: "rapid-input".to_string(),
            description: "Rapid typing supersedes in-flight conversions".to_string(),
            steps: vec![
                ScenarioStep::SetAmount {
                    value: "1".to_string(),
                },
                ScenarioStep::Wait { millis: 100 },
                ScenarioStep::SetAmount {
                    value: "12".to_string(),
                },
                ScenarioStep::Wait { millis: 100 },
                ScenarioStep::SetAmount {
                    value: "123".to_string(),
                },
                ScenarioStep::Wait { millis: 800 },
            ],
        }
    }

    /// Swap twice, converting in between.
    fn swap_roundtrip() -> Self {
        Self {
            name: "swap-roundtrip".to_string(),
            description: "Swap and swap back restores the original pair".to_string(),
            steps: vec![
                ScenarioStep::SetAmount {
                    value: "10".to_string(),
                },
                ScenarioStep::Wait { millis: 600 },
                ScenarioStep::Swap,
                ScenarioStep::Wait { millis: 600 },
                ScenarioStep::Swap,
                ScenarioStep::Wait { millis: 600 },
                ScenarioStep::Refresh,
                ScenarioStep::Wait { millis: 600 },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_scenarios() {
        for name in [
            "basic-conversion",
            "same-currency",
            "missing-rate",
            "rapid-input",
            "swap-roundtrip",
        ] {
            let scenario = Scenario::load(name).unwrap();
            assert_eq!(scenario.name, name);
            assert!(!scenario.steps.is_empty());
        }
    }

    #[test]
    fn test_unknown_scenario() {
        assert!(Scenario::load("no-such-scenario").is_err());
    }

    #[test]
    fn test_scenario_json_roundtrip() {
        let scenario = Scenario::load("rapid-input").unwrap();

        let json = serde_json::to_string(&scenario).unwrap();
        let parsed: Scenario = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.name, scenario.name);
        assert_eq!(parsed.steps.len(), scenario.steps.len());
    }
}
