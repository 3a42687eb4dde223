//! Bounded energy transfer between heterogeneous participants.

pub mod config;
pub mod devices;
/// Participant contract and two-phase transfer.
pub mod energy;
/// CSV export of step results.
pub mod io {
    pub mod export;
}
pub mod person;
pub mod scenario;
/// Tick-driven grid, run summary, and snapshots.
pub mod sim;
