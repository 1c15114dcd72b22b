//! Response formatting for the catalog REST API.
//!
//! - [`envelope`] - `{data, timestamp}` success envelopes and the slice body
//!
//! Error bodies live in [`crate::error`].

pub mod envelope;

pub use envelope::{ApiResponse, SliceApiResponse, SliceBody};
