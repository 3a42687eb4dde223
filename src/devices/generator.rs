use crate::devices::types::{Device, DeviceContext, daylight_frac, gaussian_noise};
use crate::energy::{Energy, EnergyAmount, clamp_request};
use rand::{SeedableRng, rngs::StdRng};

/// An output-only participant that produces energy into its own buffer.
///
/// Each tick the generator adds `rate` units scaled by an optional daylight
/// window (half-sine between sunrise and sunset) and multiplicative Gaussian
/// noise. Production beyond free capacity is lost. Energy leaves only through
/// output calls; the generator never accepts input.
#[derive(Debug, Clone)]
pub struct Generator {
    /// Nominal production per tick at full output.
    pub rate: EnergyAmount,

    /// Maximum units buffered awaiting output.
    pub capacity: EnergyAmount,

    /// Standard deviation of the multiplicative noise (0.05 = +/-5%).
    pub noise_std: f32,

    /// Step-of-day production window `[sunrise, sunset)`, if any.
    pub daylight: Option<(usize, usize)>,

    energy: EnergyAmount,
    last_generated: EnergyAmount,
    rng: StdRng,
}

impl Generator {
    /// Creates a generator that produces around the clock.
    ///
    /// # Arguments
    ///
    /// * `rate` - Nominal production per tick (negative clamps to 0)
    /// * `capacity` - Output buffer size (must be >= 0)
    /// * `noise_std` - Noise standard deviation (negative clamps to 0)
    /// * `seed` - Random seed for reproducible noise
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is negative.
    pub fn new(rate: EnergyAmount, capacity: EnergyAmount, noise_std: f32, seed: u64) -> Self {
        assert!(capacity >= 0, "capacity must be >= 0");
        Self {
            rate: rate.max(0),
            capacity,
            noise_std: noise_std.max(0.0),
            daylight: None,
            energy: 0,
            last_generated: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Restricts production to the `[sunrise_idx, sunset_idx)` window of each day.
    ///
    /// # Panics
    ///
    /// Panics if `sunrise_idx >= sunset_idx`.
    pub fn with_daylight(mut self, sunrise_idx: usize, sunset_idx: usize) -> Self {
        assert!(sunrise_idx < sunset_idx, "sunrise must precede sunset");
        self.daylight = Some((sunrise_idx, sunset_idx));
        self
    }

    fn output_fraction(&self, context: &DeviceContext) -> f32 {
        match self.daylight {
            Some((sunrise, sunset)) => daylight_frac(context.step_of_day(), sunrise, sunset),
            None => 1.0,
        }
    }
}

impl Energy for Generator {
    fn can_input_energy(&self) -> bool {
        false
    }

    fn can_output_energy(&self) -> bool {
        self.energy > 0
    }

    fn input_energy(&mut self, _amount: EnergyAmount, _simulate: bool) -> EnergyAmount {
        0
    }

    fn output_energy(&mut self, amount: EnergyAmount, simulate: bool) -> EnergyAmount {
        let released = clamp_request(amount, self.energy);
        if !simulate {
            self.energy -= released;
        }
        released
    }

    fn energy(&self) -> EnergyAmount {
        self.energy
    }

    fn energy_capacity(&self) -> EnergyAmount {
        self.capacity
    }

    fn set_energy(&mut self, amount: EnergyAmount) {
        self.energy = amount;
    }
}

impl Device for Generator {
    /// Produces this tick's energy into the output buffer.
    fn tick(&mut self, context: &DeviceContext) {
        let frac = self.output_fraction(context);
        if frac <= 0.0 || self.rate == 0 {
            self.last_generated = 0;
            return;
        }

        let noise_mult = 1.0 + f64::from(gaussian_noise(&mut self.rng, self.noise_std));
        let produced =
            (self.rate as f64 * f64::from(frac) * noise_mult).round().max(0.0) as EnergyAmount;
        self.last_generated = clamp_request(produced, self.capacity - self.energy);
        self.energy += self.last_generated;
    }

    fn device_type(&self) -> &'static str {
        "Generator"
    }

    fn last_generated(&self) -> EnergyAmount {
        self.last_generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(t: usize) -> DeviceContext {
        DeviceContext::new(t, 24)
    }

    #[test]
    fn test_new_generator() {
        let generator = Generator::new(40, 100, 0.05, 42);
        assert_eq!(generator.rate, 40);
        assert_eq!(generator.energy_capacity(), 100);
        assert_eq!(generator.energy(), 0);
        assert!(generator.daylight.is_none());
    }

    #[test]
    fn test_negative_parameters_clamped() {
        let generator = Generator::new(-5, 10, -0.1, 42);
        assert_eq!(generator.rate, 0);
        assert_eq!(generator.noise_std, 0.0);
    }

    #[test]
    #[should_panic]
    fn test_sunset_before_sunrise_panics() {
        let _ = Generator::new(10, 10, 0.0, 42).with_daylight(18, 6);
    }

    #[test]
    fn test_never_accepts_input() {
        let mut generator = Generator::new(10, 100, 0.0, 42);
        assert!(!generator.can_input_energy());
        assert_eq!(generator.input_energy(50, false), 0);
        assert_eq!(generator.energy(), 0);
    }

    #[test]
    fn test_tick_produces_rate_without_noise() {
        let mut generator = Generator::new(30, 100, 0.0, 42);
        generator.tick(&ctx(0));
        assert_eq!(generator.last_generated(), 30);
        assert_eq!(generator.energy(), 30);
        assert!(generator.can_output_energy());
    }

    #[test]
    fn test_large_rate_produced_exactly() {
        // Above 2^24, so not representable in f32.
        let rate = 16_777_217;
        let mut generator = Generator::new(rate, EnergyAmount::MAX, 0.0, 42);
        generator.tick(&ctx(0));
        assert_eq!(generator.last_generated(), rate);
        assert_eq!(generator.energy(), rate);
    }

    #[test]
    fn test_production_capped_by_capacity() {
        let mut generator = Generator::new(30, 50, 0.0, 42);
        generator.tick(&ctx(0));
        generator.tick(&ctx(1));
        assert_eq!(generator.last_generated(), 20);
        assert_eq!(generator.energy(), 50);
        generator.tick(&ctx(2));
        assert_eq!(generator.last_generated(), 0);
    }

    #[test]
    fn test_no_generation_at_night() {
        let mut generator = Generator::new(50, 1000, 0.0, 42).with_daylight(6, 18);
        for t in [0, 5, 18, 23, 24 + 3] {
            generator.tick(&ctx(t));
            assert_eq!(generator.last_generated(), 0);
        }
        generator.tick(&ctx(12));
        assert!(generator.last_generated() > 45);
    }

    #[test]
    fn test_output_drains_buffer() {
        let mut generator = Generator::new(30, 100, 0.0, 42);
        generator.tick(&ctx(0));
        assert_eq!(generator.output_energy(100, true), 30);
        assert_eq!(generator.output_energy(100, false), 30);
        assert_eq!(generator.energy(), 0);
        assert!(!generator.can_output_energy());
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let mut g1 = Generator::new(40, 10_000, 0.2, 42);
        let mut g2 = Generator::new(40, 10_000, 0.2, 42);
        for t in 0..24 {
            g1.tick(&ctx(t));
            g2.tick(&ctx(t));
            assert_eq!(g1.last_generated(), g2.last_generated());
        }
    }

    #[test]
    fn test_noise_never_produces_negative() {
        let mut generator = Generator::new(5, 10_000, 3.0, 7);
        for t in 0..200 {
            generator.tick(&ctx(t));
            assert!(generator.last_generated() >= 0);
        }
    }
}
