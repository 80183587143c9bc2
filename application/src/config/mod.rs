//! Application-level configuration.
//!
//! - [`GenerationParams`]: batch size, duplication policy and output target

pub mod generation_params;

pub use generation_params::GenerationParams;
