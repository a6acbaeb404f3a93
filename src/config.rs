//! TOML-based federate configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level federate configuration parsed from TOML.
///
/// All fields default to the reference scenario (a one-week run at
/// 60-second ticks). Load from TOML with
/// [`FederateConfig::from_toml_file`] or use a named preset.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FederateConfig {
    /// Simulation timing and global parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Battery pack constants, shared by all units.
    #[serde(default)]
    pub pack: PackConfig,
    /// Charger stand-in parameters for standalone runs.
    #[serde(default)]
    pub charger: ChargerConfig,
    /// Input/output channel bindings, one pair per battery unit.
    #[serde(default)]
    pub channels: ChannelConfig,
}

/// Simulation timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Tick duration in seconds (must be > 0).
    pub step_seconds: f64,
    /// Simulated horizon in hours (must be > 0).
    pub horizon_hours: f64,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_seconds: 60.0,
            horizon_hours: 24.0 * 7.0,
            seed: 1,
        }
    }
}

impl SimulationConfig {
    /// Simulated horizon in seconds.
    pub fn horizon_seconds(&self) -> f64 {
        self.horizon_hours * 3600.0
    }
}

/// Battery pack constants.
///
/// Identical across units in the reference scenario but kept per-run
/// configurable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackConfig {
    /// Series-connected cells per pack.
    pub cells_in_series: u32,
    /// Parallel cell strings per pack.
    pub cells_in_parallel: u32,
    /// Pack energy capacity (kWh).
    pub capacity_kwh: f64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            cells_in_series: 96,
            cells_in_parallel: 3,
            capacity_kwh: 62.0,
        }
    }
}

/// Charger stand-in parameters for standalone runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChargerConfig {
    /// Supply voltage during an active session (V).
    pub supply_voltage: f64,
    /// Minimum session dwell in ticks.
    pub dwell_ticks_min: u32,
    /// Maximum session dwell in ticks.
    pub dwell_ticks_max: u32,
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self {
            supply_voltage: 400.0,
            // 4h to 36h at one-minute ticks
            dwell_ticks_min: 240,
            dwell_ticks_max: 2160,
        }
    }
}

/// Input/output channel bindings.
///
/// The lists are ordered and index-aligned: `inputs[i]` carries unit
/// `i`'s applied voltage, `outputs[i]` its published current.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    /// Voltage input channel names, one per unit.
    pub inputs: Vec<String>,
    /// Current output channel names, one per unit.
    pub outputs: Vec<String>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        let inputs = (1..=5).map(|i| format!("EVCharger/EV{i}_voltage")).collect();
        let outputs = (1..=5).map(|i| format!("Battery/EV{i}_current")).collect();
        Self { inputs, outputs }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.step_seconds"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl FederateConfig {
    /// Returns the reference scenario: one week at 60-second ticks.
    pub fn preset_week() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            pack: PackConfig::default(),
            charger: ChargerConfig::default(),
            channels: ChannelConfig::default(),
        }
    }

    /// Returns a single-day variant of the reference scenario.
    pub fn preset_day() -> Self {
        Self {
            simulation: SimulationConfig {
                horizon_hours: 24.0,
                ..SimulationConfig::default()
            },
            ..Self::preset_week()
        }
    }

    /// Returns a one-hour smoke scenario with short charger sessions.
    pub fn preset_hour() -> Self {
        Self {
            simulation: SimulationConfig {
                horizon_hours: 1.0,
                ..SimulationConfig::default()
            },
            charger: ChargerConfig {
                dwell_ticks_min: 5,
                dwell_ticks_max: 20,
                ..ChargerConfig::default()
            },
            ..Self::preset_week()
        }
    }

    /// Loads a configuration by preset name.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "week" => Ok(Self::preset_week()),
            "day" => Ok(Self::preset_day()),
            "hour" => Ok(Self::preset_hour()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!("unknown preset \"{name}\" (expected week, day, or hour)"),
            }),
        }
    }

    /// Loads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML
    /// is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "file".to_string(),
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a TOML configuration string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains
    /// unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Number of battery units, one per input channel.
    pub fn units(&self) -> usize {
        self.channels.inputs.len()
    }

    /// Validates all constraints, returning every violation found.
    ///
    /// Any violation is fatal at startup, before the federate enters
    /// execution.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.step_seconds <= 0.0 {
            errors.push(ConfigError {
                field: "simulation.step_seconds".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if self.simulation.horizon_hours <= 0.0 {
            errors.push(ConfigError {
                field: "simulation.horizon_hours".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if self.pack.cells_in_series == 0 {
            errors.push(ConfigError {
                field: "pack.cells_in_series".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if self.pack.cells_in_parallel == 0 {
            errors.push(ConfigError {
                field: "pack.cells_in_parallel".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if self.pack.capacity_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "pack.capacity_kwh".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if self.charger.supply_voltage < 0.0 {
            errors.push(ConfigError {
                field: "charger.supply_voltage".to_string(),
                message: "must be >= 0".to_string(),
            });
        }
        if self.charger.dwell_ticks_min == 0 {
            errors.push(ConfigError {
                field: "charger.dwell_ticks_min".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if self.charger.dwell_ticks_max < self.charger.dwell_ticks_min {
            errors.push(ConfigError {
                field: "charger.dwell_ticks_max".to_string(),
                message: "must be >= charger.dwell_ticks_min".to_string(),
            });
        }
        if self.channels.inputs.is_empty() {
            errors.push(ConfigError {
                field: "channels.inputs".to_string(),
                message: "at least one input channel is required".to_string(),
            });
        }
        if self.channels.inputs.len() != self.channels.outputs.len() {
            errors.push(ConfigError {
                field: "channels.outputs".to_string(),
                message: format!(
                    "{} outputs for {} inputs; one output per battery unit is required",
                    self.channels.outputs.len(),
                    self.channels.inputs.len()
                ),
            });
        }

        errors
    }
}
