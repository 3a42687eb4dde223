use crate::devices::types::{Device, DeviceContext};
use crate::energy::{Energy, EnergyAmount, clamp_request};

/// A wire segment that relays energy with a per-tick throughput budget.
///
/// A conduit holds a small amount in transit (`capacity`) and lets at most
/// `throughput` units in and `throughput` units out between two ticks. The
/// budgets are refilled on every tick, so several links can share a conduit
/// without together exceeding its rating.
#[derive(Debug, Clone)]
pub struct Conduit {
    /// Units that may be in transit at once.
    pub capacity: EnergyAmount,

    /// Units that may enter, and separately leave, per tick.
    pub throughput: EnergyAmount,

    energy: EnergyAmount,
    inbound_left: EnergyAmount,
    outbound_left: EnergyAmount,
}

impl Conduit {
    /// Creates an empty conduit.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `throughput` is negative.
    pub fn new(capacity: EnergyAmount, throughput: EnergyAmount) -> Self {
        assert!(capacity >= 0, "capacity must be >= 0");
        assert!(throughput >= 0, "throughput must be >= 0");
        Self {
            capacity,
            throughput,
            energy: 0,
            inbound_left: throughput,
            outbound_left: throughput,
        }
    }

    /// Units that may still enter before the next tick.
    pub fn inbound_left(&self) -> EnergyAmount {
        self.inbound_left
    }

    /// Units that may still leave before the next tick.
    pub fn outbound_left(&self) -> EnergyAmount {
        self.outbound_left
    }
}

impl Energy for Conduit {
    fn can_input_energy(&self) -> bool {
        self.inbound_left > 0 && self.energy < self.capacity
    }

    fn can_output_energy(&self) -> bool {
        self.outbound_left > 0 && self.energy > 0
    }

    fn input_energy(&mut self, amount: EnergyAmount, simulate: bool) -> EnergyAmount {
        let room = self.capacity - self.energy;
        let accepted = clamp_request(amount, room.min(self.inbound_left));
        if !simulate {
            self.energy += accepted;
            self.inbound_left -= accepted;
        }
        accepted
    }

    fn output_energy(&mut self, amount: EnergyAmount, simulate: bool) -> EnergyAmount {
        let released = clamp_request(amount, self.energy.min(self.outbound_left));
        if !simulate {
            self.energy -= released;
            self.outbound_left -= released;
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

impl Device for Conduit {
    /// Refills both throughput budgets.
    fn tick(&mut self, _context: &DeviceContext) {
        self.inbound_left = self.throughput;
        self.outbound_left = self.throughput;
    }

    fn device_type(&self) -> &'static str {
        "Conduit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn test_negative_throughput_panics() {
        Conduit::new(10, -1);
    }

    #[test]
    fn test_input_limited_by_throughput_across_calls() {
        let mut conduit = Conduit::new(100, 15);
        assert_eq!(conduit.input_energy(10, false), 10);
        assert_eq!(conduit.input_energy(10, false), 5);
        assert!(!conduit.can_input_energy());
        assert_eq!(conduit.energy(), 15);
    }

    #[test]
    fn test_input_limited_by_capacity() {
        let mut conduit = Conduit::new(8, 50);
        assert_eq!(conduit.input_energy(20, false), 8);
        assert!(!conduit.can_input_energy());
    }

    #[test]
    fn test_output_budget_independent_of_input() {
        let mut conduit = Conduit::new(100, 10);
        conduit.input_energy(10, false);
        assert_eq!(conduit.output_energy(4, false), 4);
        assert_eq!(conduit.output_energy(100, true), 6);
        assert_eq!(conduit.outbound_left(), 6);
        assert_eq!(conduit.inbound_left(), 0);
    }

    #[test]
    fn test_tick_refills_budgets() {
        let mut conduit = Conduit::new(100, 10);
        conduit.input_energy(10, false);
        conduit.output_energy(10, false);
        assert!(!conduit.can_input_energy());
        conduit.tick(&DeviceContext::new(1, 24));
        assert_eq!(conduit.inbound_left(), 10);
        assert_eq!(conduit.outbound_left(), 10);
        assert!(conduit.can_input_energy());
    }

    #[test]
    fn test_simulate_leaves_budget_untouched() {
        let mut conduit = Conduit::new(100, 10);
        assert_eq!(conduit.input_energy(7, true), 7);
        assert_eq!(conduit.input_energy(7, true), 7);
        assert_eq!(conduit.inbound_left(), 10);
        assert_eq!(conduit.energy(), 0);
    }
}
