//! Junction Simulation Library
//!
//! Derives intersection topology and timed signal phases from authored
//! intersection layouts, for consumption by a microscopic traffic simulator.

pub mod junction;
