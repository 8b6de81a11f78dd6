//! Research Source Adapters

mod simulated;

pub use simulated::SimulatedResearchSource;
