//! Concrete energy participants used by the simulated grid.

/// Bidirectional storage buffer.
pub mod buffer;
/// Wire segment with a per-tick throughput budget.
pub mod conduit;
/// Demand-driven, input-only sink.
pub mod consumer;
/// Output-only producer with optional daylight window.
pub mod generator;
pub mod types;

// Re-export the main types for convenience
pub use buffer::Buffer;
pub use conduit::Conduit;
pub use consumer::Consumer;
pub use generator::Generator;
pub use types::Device;
pub use types::DeviceContext;
pub use types::Participant;
