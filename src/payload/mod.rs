//! Bidirectional mapping between the flat setup form and the wire config.
//!
//! `build` goes form → wire (annual/hourly units in, weekly units out);
//! `receive` goes wire → form. Both are pure and total over well-formed
//! input; keeping malformed state out is the validation pass's job.

pub mod build;
pub mod receive;

pub use build::build;
pub use receive::{receive_live, receive_setup};

/// Display precision for currency and rate fields coming off the wire.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
