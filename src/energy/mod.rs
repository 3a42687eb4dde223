//! Energy participant contract and the two-phase transfer built on it.
//!
//! Every energy-holding entity (storage, generator, consumer, wire) implements
//! [`Energy`]. Derived behaviour ([`EnergyExt`], [`transfer`]) is layered on top
//! so any conforming type gets it without sharing state or a base type.
//!
//! # Access discipline
//!
//! The contract assumes single-threaded, serialised access: between a
//! simulate-mode probe and the matching commit-mode call, nothing else may
//! mutate either participant. Callers (schedulers, grids) uphold this; the
//! contract itself does no locking.

mod transfer;

pub use transfer::transfer;

/// Unit-less energy quantity.
///
/// Signed so that zero and negative requests can be passed and clamped to a
/// no-op instead of being unrepresentable.
pub type EnergyAmount = i64;

/// Capability contract for anything that holds a bounded amount of energy.
///
/// # Invariants implementers uphold
///
/// - `0 <= energy() <= energy_capacity()` after every call.
/// - A simulate-mode call never mutates state, and repeating it with the same
///   amount against unchanged state returns the same value.
/// - A commit-mode call returns exactly what a simulate-mode call with the same
///   amount would have returned, and moves `energy()` by that amount.
/// - A request for `amount <= 0` returns 0 and never mutates.
pub trait Energy {
    /// Returns `true` if this participant currently accepts any energy.
    fn can_input_energy(&self) -> bool;

    /// Returns `true` if this participant can currently give any energy away.
    fn can_output_energy(&self) -> bool;

    /// Deposits up to `amount` units and returns how much was (or, when
    /// `simulate` is set, would be) accepted.
    fn input_energy(&mut self, amount: EnergyAmount, simulate: bool) -> EnergyAmount;

    /// Withdraws up to `amount` units and returns how much was (or, when
    /// `simulate` is set, would be) released.
    fn output_energy(&mut self, amount: EnergyAmount, simulate: bool) -> EnergyAmount;

    /// Amount currently held.
    fn energy(&self) -> EnergyAmount;

    /// Maximum amount this participant can hold.
    fn energy_capacity(&self) -> EnergyAmount;

    /// Overwrites the held amount when restoring saved state.
    ///
    /// Not part of the transfer protocol: bypasses capability checks and
    /// does not clamp to capacity. Participants without restore support keep
    /// the default no-op.
    fn set_energy(&mut self, _amount: EnergyAmount) {}
}

/// Derived predicates and transfer helpers available on every [`Energy`].
pub trait EnergyExt: Energy {
    /// Returns `true` when nothing is held.
    fn has_no_energy(&self) -> bool {
        self.energy() == 0
    }

    /// Returns `true` when the held amount equals capacity.
    fn has_full_energy(&self) -> bool {
        self.energy() == self.energy_capacity()
    }

    /// Moves up to `amount` units from `self` into `destination`.
    ///
    /// See [`transfer`].
    fn transfer_to<D>(&mut self, destination: &mut D, amount: EnergyAmount) -> EnergyAmount
    where
        D: Energy + ?Sized,
    {
        transfer(self, destination, amount)
    }
}

impl<T: Energy + ?Sized> EnergyExt for T {}

/// Clamps a request against what is actually available.
///
/// Returns 0 for non-positive requests, otherwise `amount` bounded by
/// `available` (itself floored at 0). Participants use this to implement the
/// input/output truncation rules consistently in both modes.
pub fn clamp_request(amount: EnergyAmount, available: EnergyAmount) -> EnergyAmount {
    if amount <= 0 {
        return 0;
    }
    amount.min(available.max(0))
}
