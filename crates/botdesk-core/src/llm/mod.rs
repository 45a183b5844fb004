//! Generation provider abstraction.

pub mod provider;

pub use provider::GenerationProvider;
