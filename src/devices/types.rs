//! Common types and traits for simulated participants.

use std::fmt;

use rand::{Rng, rngs::StdRng};

use crate::energy::{Energy, EnergyAmount};

/// Contextual information passed to devices on every tick.
/// # Fields
/// * `timestep` - Current simulation timestep
/// * `steps_per_day` - Number of timesteps in one simulated day
pub struct DeviceContext {
    pub timestep: usize,
    pub steps_per_day: usize,
}

impl DeviceContext {
    /// Creates a new DeviceContext for the given timestep.
    pub fn new(timestep: usize, steps_per_day: usize) -> Self {
        Self {
            timestep,
            steps_per_day: steps_per_day.max(1),
        }
    }

    /// Timestep index within the current day.
    pub fn step_of_day(&self) -> usize {
        self.timestep % self.steps_per_day
    }
}

/// Per-tick behaviour of a simulated participant.
///
/// Producing and consuming energy happens here; moving energy between
/// participants only happens through [`crate::energy::transfer`].
pub trait Device {
    /// Advances internal state by one timestep.
    ///
    /// # Arguments
    ///
    /// * `context` - Current timestep and day length
    fn tick(&mut self, context: &DeviceContext);

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;

    /// Energy created by the most recent tick.
    fn last_generated(&self) -> EnergyAmount {
        0
    }

    /// Energy destroyed (used up) by the most recent tick.
    fn last_consumed(&self) -> EnergyAmount {
        0
    }

    /// Demand the most recent tick could not satisfy.
    fn last_unmet(&self) -> EnergyAmount {
        0
    }
}

/// A device that also takes part in energy transfers.
///
/// Blanket-implemented; this is what the grid stores as a trait object.
pub trait Participant: Energy + Device + fmt::Debug {}

impl<T: Energy + Device + fmt::Debug> Participant for T {}

/// Utility function to generate Gaussian noise using Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
///
/// # Returns
///
/// Random value from a Gaussian distribution with mean 0 and specified standard deviation
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f32) -> f32 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f32 = rng.random::<f32>().clamp(1e-6, 1.0);
    let u2: f32 = rng.random::<f32>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
    z0 * std_dev
}

/// Half-sine daylight fraction for step-of-day `t` in `[sunrise, sunset)`.
///
/// Returns 0.0 outside the window and peaks at 1.0 at its midpoint.
pub fn daylight_frac(t: usize, sunrise_idx: usize, sunset_idx: usize) -> f32 {
    if t < sunrise_idx || t >= sunset_idx {
        return 0.0;
    }
    let span = (sunset_idx - sunrise_idx) as f32;
    let x = (t - sunrise_idx) as f32 + 0.5;
    (std::f32::consts::PI * x / span).sin().max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn noise_is_zero_without_std_dev() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(gaussian_noise(&mut rng, 0.0), 0.0);
        assert_eq!(gaussian_noise(&mut rng, -1.0), 0.0);
    }

    #[test]
    fn noise_is_seed_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(gaussian_noise(&mut a, 0.3), gaussian_noise(&mut b, 0.3));
        }
    }

    #[test]
    fn daylight_is_zero_outside_window() {
        assert_eq!(daylight_frac(5, 6, 18), 0.0);
        assert_eq!(daylight_frac(18, 6, 18), 0.0);
        assert!(daylight_frac(12, 6, 18) > 0.9);
    }

    #[test]
    fn step_of_day_wraps() {
        let ctx = DeviceContext::new(30, 24);
        assert_eq!(ctx.step_of_day(), 6);
        let degenerate = DeviceContext::new(3, 0);
        assert_eq!(degenerate.step_of_day(), 0);
    }
}
