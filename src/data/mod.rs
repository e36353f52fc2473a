//! Sample-data propagation across the nodes of a circuit.

pub mod model;
pub mod propagator;

pub use model::SampleDataDocument;
pub use propagator::{
    CollectOptions, apply_lookup_response, collect_sample_data, context_for_pin,
    refresh_lookups, refresh_pin_sample_data,
};
