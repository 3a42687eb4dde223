//! TOML-based scenario configuration and preset definitions.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::energy::EnergyAmount;

/// Top-level scenario configuration parsed from TOML.
///
/// Load from TOML with [`ScenarioConfig::from_toml_file`] or use one of the
/// built-in presets ([`ScenarioConfig::from_preset`]).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and global parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Participants, in tick order.
    #[serde(default)]
    pub participants: Vec<ParticipantConfig>,
    /// Links, in transfer order.
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

/// Simulation timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of timesteps per simulated day (must be > 0).
    pub steps_per_day: usize,
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps_per_day: 24,
            days: 1,
            seed: 42,
        }
    }
}

/// One participant, selected by its `kind` key.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ParticipantConfig {
    /// Bidirectional storage.
    Buffer {
        name: String,
        capacity: EnergyAmount,
        /// Initial amount held.
        #[serde(default)]
        energy: EnergyAmount,
        /// Per-call input limit; unlimited when absent.
        #[serde(default)]
        max_input: Option<EnergyAmount>,
        /// Per-call output limit; unlimited when absent.
        #[serde(default)]
        max_output: Option<EnergyAmount>,
    },
    /// Output-only producer.
    Generator {
        name: String,
        rate: EnergyAmount,
        capacity: EnergyAmount,
        #[serde(default)]
        noise_std: f32,
        /// Daylight window start; requires `sunset_idx`.
        #[serde(default)]
        sunrise_idx: Option<usize>,
        /// Daylight window end (exclusive); requires `sunrise_idx`.
        #[serde(default)]
        sunset_idx: Option<usize>,
    },
    /// Input-only demand.
    Consumer {
        name: String,
        base: f32,
        #[serde(default)]
        amp: f32,
        #[serde(default)]
        phase_rad: f32,
        #[serde(default)]
        noise_std: f32,
        capacity: EnergyAmount,
    },
    /// Wire segment.
    Conduit {
        name: String,
        capacity: EnergyAmount,
        throughput: EnergyAmount,
    },
}

impl ParticipantConfig {
    /// Participant name, unique within a scenario.
    pub fn name(&self) -> &str {
        match self {
            Self::Buffer { name, .. }
            | Self::Generator { name, .. }
            | Self::Consumer { name, .. }
            | Self::Conduit { name, .. } => name,
        }
    }
}

/// A link between two named participants.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    pub source: String,
    pub destination: String,
    /// Maximum units requested per step (must be > 0).
    pub rate: EnergyAmount,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.steps_per_day"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn link(source: &str, destination: &str, rate: EnergyAmount) -> LinkConfig {
    LinkConfig {
        source: source.to_string(),
        destination: destination.to_string(),
        rate,
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: daylight generator feeding a battery
    /// through a wire, battery supplying a household.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            participants: vec![
                ParticipantConfig::Generator {
                    name: "solar".to_string(),
                    rate: 40,
                    capacity: 200,
                    noise_std: 0.05,
                    sunrise_idx: Some(6),
                    sunset_idx: Some(18),
                },
                ParticipantConfig::Conduit {
                    name: "line".to_string(),
                    capacity: 50,
                    throughput: 50,
                },
                ParticipantConfig::Buffer {
                    name: "battery".to_string(),
                    capacity: 500,
                    energy: 250,
                    max_input: Some(60),
                    max_output: Some(60),
                },
                ParticipantConfig::Consumer {
                    name: "house".to_string(),
                    base: 15.0,
                    amp: 5.0,
                    phase_rad: 1.2,
                    noise_std: 1.0,
                    capacity: 40,
                },
            ],
            links: vec![
                link("solar", "line", 50),
                link("line", "battery", 50),
                link("battery", "house", 40),
            ],
        }
    }

    /// Returns the storage-chain preset: constant producer, two buffers in
    /// series, steady demand.
    pub fn storage_chain() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            participants: vec![
                ParticipantConfig::Generator {
                    name: "turbine".to_string(),
                    rate: 25,
                    capacity: 50,
                    noise_std: 0.0,
                    sunrise_idx: None,
                    sunset_idx: None,
                },
                ParticipantConfig::Buffer {
                    name: "primary".to_string(),
                    capacity: 300,
                    energy: 0,
                    max_input: Some(30),
                    max_output: Some(30),
                },
                ParticipantConfig::Buffer {
                    name: "secondary".to_string(),
                    capacity: 100,
                    energy: 0,
                    max_input: Some(20),
                    max_output: Some(20),
                },
                ParticipantConfig::Consumer {
                    name: "factory".to_string(),
                    base: 18.0,
                    amp: 0.0,
                    phase_rad: 0.0,
                    noise_std: 0.0,
                    capacity: 20,
                },
            ],
            links: vec![
                link("turbine", "primary", 30),
                link("primary", "secondary", 20),
                link("secondary", "factory", 20),
            ],
        }
    }

    /// Returns the overload preset: undersized generation, heavy demand.
    pub fn overload() -> Self {
        Self {
            simulation: SimulationConfig {
                days: 2,
                ..SimulationConfig::default()
            },
            participants: vec![
                ParticipantConfig::Generator {
                    name: "solar".to_string(),
                    rate: 10,
                    capacity: 40,
                    noise_std: 0.1,
                    sunrise_idx: Some(6),
                    sunset_idx: Some(18),
                },
                ParticipantConfig::Buffer {
                    name: "battery".to_string(),
                    capacity: 100,
                    energy: 50,
                    max_input: None,
                    max_output: None,
                },
                ParticipantConfig::Consumer {
                    name: "district".to_string(),
                    base: 30.0,
                    amp: 10.0,
                    phase_rad: 0.0,
                    noise_std: 2.0,
                    capacity: 60,
                },
            ],
            links: vec![
                link("solar", "battery", 20),
                link("battery", "district", 60),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "storage_chain", "overload"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "storage_chain" => Ok(Self::storage_chain()),
            "overload" => Ok(Self::overload()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.steps_per_day == 0 {
            errors.push(ConfigError::new("simulation.steps_per_day", "must be > 0"));
        }
        if s.days == 0 {
            errors.push(ConfigError::new("simulation.days", "must be > 0"));
        } else if s.steps_per_day.checked_mul(s.days).is_none() {
            errors.push(ConfigError::new(
                "simulation.days",
                "steps_per_day * days must fit in usize",
            ));
        }
        if self.participants.is_empty() {
            errors.push(ConfigError::new(
                "participants",
                "must declare at least one participant",
            ));
        }

        let mut names = HashSet::new();
        for (i, p) in self.participants.iter().enumerate() {
            let at = |field: &str| format!("participants[{i}].{field}");
            if p.name().is_empty() {
                errors.push(ConfigError::new(at("name"), "must not be empty"));
            } else if !names.insert(p.name()) {
                errors.push(ConfigError::new(
                    at("name"),
                    format!("duplicate name \"{}\"", p.name()),
                ));
            }
            validate_participant(p, s.steps_per_day, &at, &mut errors);
        }

        for (i, l) in self.links.iter().enumerate() {
            let at = |field: &str| format!("links[{i}].{field}");
            if !names.contains(l.source.as_str()) {
                errors.push(ConfigError::new(
                    at("source"),
                    format!("unknown participant \"{}\"", l.source),
                ));
            }
            if !names.contains(l.destination.as_str()) {
                errors.push(ConfigError::new(
                    at("destination"),
                    format!("unknown participant \"{}\"", l.destination),
                ));
            }
            if l.source == l.destination {
                errors.push(ConfigError::new(
                    at("destination"),
                    "must differ from source",
                ));
            }
            if l.rate <= 0 {
                errors.push(ConfigError::new(at("rate"), "must be > 0"));
            }
        }

        errors
    }
}

fn validate_participant(
    p: &ParticipantConfig,
    steps_per_day: usize,
    at: &dyn Fn(&str) -> String,
    errors: &mut Vec<ConfigError>,
) {
    let mut non_negative = |field: &str, value: EnergyAmount| {
        if value < 0 {
            errors.push(ConfigError::new(at(field), "must be >= 0"));
        }
    };

    match p {
        ParticipantConfig::Buffer {
            capacity,
            energy,
            max_input,
            max_output,
            ..
        } => {
            non_negative("capacity", *capacity);
            non_negative("max_input", max_input.unwrap_or(0));
            non_negative("max_output", max_output.unwrap_or(0));
            if !(0..=(*capacity).max(0)).contains(energy) {
                errors.push(ConfigError::new(at("energy"), "must be in [0, capacity]"));
            }
        }
        ParticipantConfig::Generator {
            rate,
            capacity,
            noise_std,
            sunrise_idx,
            sunset_idx,
            ..
        } => {
            non_negative("rate", *rate);
            non_negative("capacity", *capacity);
            if *noise_std < 0.0 {
                errors.push(ConfigError::new(at("noise_std"), "must be >= 0"));
            }
            match (sunrise_idx, sunset_idx) {
                (Some(rise), Some(set)) => {
                    if rise >= set {
                        errors.push(ConfigError::new(at("sunrise_idx"), "must be < sunset_idx"));
                    }
                    if steps_per_day > 0 && *set > steps_per_day {
                        errors.push(ConfigError::new(
                            at("sunset_idx"),
                            "must be <= simulation.steps_per_day",
                        ));
                    }
                }
                (None, None) => {}
                _ => errors.push(ConfigError::new(
                    at("sunrise_idx"),
                    "sunrise_idx and sunset_idx must be given together",
                )),
            }
        }
        ParticipantConfig::Consumer {
            capacity,
            noise_std,
            ..
        } => {
            non_negative("capacity", *capacity);
            if *noise_std < 0.0 {
                errors.push(ConfigError::new(at("noise_std"), "must be >= 0"));
            }
        }
        ParticipantConfig::Conduit {
            capacity,
            throughput,
            ..
        } => {
            non_negative("capacity", *capacity);
            non_negative("throughput", *throughput);
        }
    }
}
