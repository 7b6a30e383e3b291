//! Detection-message formats for seismic processing.
//!
//! Each record maps a fixed set of JSON keys onto typed fields, keeps track of
//! which optional fields are present, and reports validation problems as
//! human-readable messages.

pub mod formats;
pub mod prelude;

pub use formats::Beam;
pub use prelude::{FormatError, FormatResult, Validate};
