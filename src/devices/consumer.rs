use crate::devices::types::{Device, DeviceContext, gaussian_noise};
use crate::energy::{Energy, EnergyAmount, clamp_request};
use rand::{SeedableRng, rngs::StdRng};

/// An input-only participant that uses up energy following a daily pattern.
///
/// `Consumer` buffers delivered energy in an internal store and, every tick,
/// draws its demand from that store. Demand follows a sinusoidal daily profile
/// with configurable baseline, amplitude, phase, and Gaussian noise. Demand the
/// store cannot cover is recorded as unmet, not carried over.
///
/// # Examples
///
/// ```
/// use fl_energy::devices::{Consumer, Device, DeviceContext};
/// use fl_energy::energy::Energy;
///
/// let mut consumer = Consumer::new(20.0, 0.0, 0.0, 0.0, 100, 42);
/// consumer.input_energy(15, false);
/// consumer.tick(&DeviceContext::new(0, 24));
///
/// assert_eq!(consumer.last_consumed(), 15);
/// assert_eq!(consumer.last_unmet(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Consumer {
    /// Baseline demand per tick.
    pub base: f32,

    /// Amplitude of the sinusoidal daily variation.
    pub amp: f32,

    /// Phase offset of the sinusoidal pattern in radians.
    pub phase_rad: f32,

    /// Standard deviation of the additive Gaussian noise.
    pub noise_std: f32,

    /// Maximum units buffered ahead of demand.
    pub capacity: EnergyAmount,

    energy: EnergyAmount,
    last_consumed: EnergyAmount,
    last_unmet: EnergyAmount,
    rng: StdRng,
}

impl Consumer {
    /// Creates a new consumer with the specified demand profile.
    ///
    /// # Arguments
    ///
    /// * `base` - Baseline demand per tick
    /// * `amp` - Amplitude of the daily sinusoidal variation
    /// * `phase_rad` - Phase offset in radians
    /// * `noise_std` - Standard deviation of Gaussian noise (negative clamps to 0)
    /// * `capacity` - Internal buffer size (must be >= 0)
    /// * `seed` - Random seed for reproducible noise
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is negative.
    pub fn new(
        base: f32,
        amp: f32,
        phase_rad: f32,
        noise_std: f32,
        capacity: EnergyAmount,
        seed: u64,
    ) -> Self {
        assert!(capacity >= 0, "capacity must be >= 0");
        Self {
            base,
            amp,
            phase_rad,
            noise_std: noise_std.max(0.0),
            capacity,
            energy: 0,
            last_consumed: 0,
            last_unmet: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Samples the demand for the given tick. Never negative.
    fn demand(&mut self, context: &DeviceContext) -> EnergyAmount {
        let day_pos = context.step_of_day() as f32 / context.steps_per_day as f32;
        let angle = 2.0 * std::f32::consts::PI * day_pos + self.phase_rad;
        let noise = gaussian_noise(&mut self.rng, self.noise_std);

        let units = self.base + self.amp * angle.sin() + noise;
        units.round().max(0.0) as EnergyAmount
    }
}

impl Energy for Consumer {
    fn can_input_energy(&self) -> bool {
        self.energy < self.capacity
    }

    fn can_output_energy(&self) -> bool {
        false
    }

    fn input_energy(&mut self, amount: EnergyAmount, simulate: bool) -> EnergyAmount {
        let accepted = clamp_request(amount, self.capacity - self.energy);
        if !simulate {
            self.energy += accepted;
        }
        accepted
    }

    fn output_energy(&mut self, _amount: EnergyAmount, _simulate: bool) -> EnergyAmount {
        0
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

impl Device for Consumer {
    /// Draws this tick's demand from the internal store.
    fn tick(&mut self, context: &DeviceContext) {
        let demand = self.demand(context);
        self.last_consumed = clamp_request(demand, self.energy);
        self.last_unmet = demand - self.last_consumed;
        self.energy -= self.last_consumed;
    }

    fn device_type(&self) -> &'static str {
        "Consumer"
    }

    fn last_consumed(&self) -> EnergyAmount {
        self.last_consumed
    }

    fn last_unmet(&self) -> EnergyAmount {
        self.last_unmet
    }
}
