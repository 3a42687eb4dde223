//! Core simulation types: configuration, links, and per-step records.

use std::fmt;

use crate::energy::EnergyAmount;

/// Centralized simulation configuration.
///
/// # Examples
///
/// ```
/// use fl_energy::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(24, 1, 42);
/// assert_eq!(cfg.dt_hours, 1.0);
/// assert_eq!(cfg.total_steps(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation steps per day.
    pub steps_per_day: usize,
    /// Number of days to simulate.
    pub days: usize,
    /// Duration of one timestep in hours, derived as `24.0 / steps_per_day`.
    pub dt_hours: f32,
    /// Master random seed for reproducibility.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a new simulation configuration.
    ///
    /// # Arguments
    ///
    /// * `steps_per_day` - Number of timesteps per simulated day (must be > 0)
    /// * `days` - Number of days to simulate (must be > 0)
    /// * `seed` - Master random seed
    ///
    /// # Panics
    ///
    /// Panics if `steps_per_day` or `days` is zero, or if their product
    /// does not fit in `usize`.
    pub fn new(steps_per_day: usize, days: usize, seed: u64) -> Self {
        assert!(steps_per_day > 0, "steps_per_day must be > 0");
        assert!(days > 0, "days must be > 0");
        assert!(
            steps_per_day.checked_mul(days).is_some(),
            "steps_per_day * days overflows usize"
        );
        Self {
            steps_per_day,
            days,
            dt_hours: 24.0 / steps_per_day as f32,
            seed,
        }
    }

    /// Total number of simulation steps across all days.
    ///
    /// # Panics
    ///
    /// Panics if the fields were changed after construction so that
    /// `steps_per_day * days` overflows.
    pub fn total_steps(&self) -> usize {
        match self.steps_per_day.checked_mul(self.days) {
            Some(total) => total,
            None => panic!("steps_per_day * days overflows usize"),
        }
    }
}

/// A directed pairing the grid transfers across once per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Index of the participant energy is taken from.
    pub source: usize,
    /// Index of the participant energy is given to.
    pub destination: usize,
    /// Maximum units requested per step.
    pub rate: EnergyAmount,
}

/// Complete record of one simulation timestep.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Timestep index.
    pub timestep: usize,
    /// Simulation time in hours.
    pub time_hr: f32,
    /// Energy created by generators this step.
    pub generated: EnergyAmount,
    /// Energy used up by consumers this step.
    pub consumed: EnergyAmount,
    /// Demand consumers could not cover this step.
    pub unmet: EnergyAmount,
    /// Sum of all link transfers this step.
    pub transferred: EnergyAmount,
    /// Energy held across all participants after the step.
    pub stored: EnergyAmount,
    /// Units moved by each link, in declaration order.
    pub link_moved: Vec<EnergyAmount>,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>3} ({:>5.1}h) | gen={:>6}  used={:>6}  unmet={:>5} | moved={:>6}  stored={:>7}",
            self.timestep,
            self.time_hr,
            self.generated,
            self.consumed,
            self.unmet,
            self.transferred,
            self.stored,
        )
    }
}
