//! Common utilities module
//!
//! This module contains the error type and random sources shared across the
//! sensor simulator.

pub mod error;
pub mod random;

pub use error::{Result, SensorError};
pub use random::{EntropyRandom, RandomSource, SeededRandom};
