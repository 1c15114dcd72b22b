//! Storage backends.
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`memory`] | Ordered in-memory tables, optionally seeded from JSON |

pub mod memory;
