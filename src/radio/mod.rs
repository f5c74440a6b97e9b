//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod rf24;
pub use rf24::{RadioDevice, RadioError};

mod config;
pub use config::{PipeConfig, RadioConfig};
