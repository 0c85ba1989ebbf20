//! Test utilities
//!
//! Manual mock implementations of the ports and test fixtures.
//!
//! Mocks record what they were asked to do so tests can assert on the
//! exact sequence of fetches, sends and timer registrations.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
