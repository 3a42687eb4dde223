use crate::devices::types::{Device, DeviceContext};
use crate::energy::{Energy, EnergyAmount, clamp_request};

/// A storage buffer that accepts and releases energy in both directions.
///
/// `Buffer` holds up to `capacity` units and limits how much a single
/// input or output call may move with `max_input` / `max_output`. It has no
/// per-tick behaviour of its own; energy only arrives or leaves via transfers.
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Maximum units held.
    pub capacity: EnergyAmount,

    /// Maximum units accepted by one input call.
    pub max_input: EnergyAmount,

    /// Maximum units released by one output call.
    pub max_output: EnergyAmount,

    energy: EnergyAmount,
}

impl Buffer {
    /// Creates a buffer without per-call rate limits.
    ///
    /// # Panics
    ///
    /// Panics if capacity is negative or `energy` is outside `0..=capacity`.
    pub fn new(capacity: EnergyAmount, energy: EnergyAmount) -> Self {
        Self::with_rates(capacity, energy, EnergyAmount::MAX, EnergyAmount::MAX)
    }

    /// Creates a buffer with per-call input and output limits.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum units held (must be >= 0)
    /// * `energy` - Initial units held (0..=capacity)
    /// * `max_input` - Per-call input limit (must be >= 0)
    /// * `max_output` - Per-call output limit (must be >= 0)
    ///
    /// # Panics
    ///
    /// Panics if any argument is negative or `energy` exceeds `capacity`.
    pub fn with_rates(
        capacity: EnergyAmount,
        energy: EnergyAmount,
        max_input: EnergyAmount,
        max_output: EnergyAmount,
    ) -> Self {
        assert!(capacity >= 0, "capacity must be >= 0");
        assert!((0..=capacity).contains(&energy), "energy must be in 0..=capacity");
        assert!(max_input >= 0 && max_output >= 0, "rates must be >= 0");

        Self {
            capacity,
            max_input,
            max_output,
            energy,
        }
    }

    fn room(&self) -> EnergyAmount {
        self.capacity - self.energy
    }
}

impl Energy for Buffer {
    fn can_input_energy(&self) -> bool {
        self.max_input > 0 && self.room() > 0
    }

    fn can_output_energy(&self) -> bool {
        self.max_output > 0 && self.energy > 0
    }

    fn input_energy(&mut self, amount: EnergyAmount, simulate: bool) -> EnergyAmount {
        let accepted = clamp_request(amount, self.room().min(self.max_input));
        if !simulate {
            self.energy += accepted;
        }
        accepted
    }

    fn output_energy(&mut self, amount: EnergyAmount, simulate: bool) -> EnergyAmount {
        let released = clamp_request(amount, self.energy.min(self.max_output));
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

impl Device for Buffer {
    fn tick(&mut self, _context: &DeviceContext) {}

    fn device_type(&self) -> &'static str {
        "Buffer"
    }
}
