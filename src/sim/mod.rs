/// Simulation clock for timestep management.
pub mod clock;
pub mod engine;
/// Post-hoc run summary.
pub mod kpi;
/// Scalar save/restore of energy levels.
pub mod snapshot;
pub mod types;
