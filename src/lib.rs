//! Loose value coercion and map-to-record population.

/// Runtime values, primitive coercions, and the structural mapper.
pub mod conv;
