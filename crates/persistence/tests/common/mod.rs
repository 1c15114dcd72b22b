//! Test infrastructure for the catalog slice tests.

pub mod fixtures;

pub use fixtures::*;
