pub mod categories;
pub mod client;
pub mod form;
pub mod live;
pub mod payload;
pub mod units;
pub mod validate;
pub mod wire;

pub use form::SetupForm;
pub use validate::{validate, ValidationReport};
pub use wire::WireConfig;
