pub mod error;
pub mod migrations;
pub mod ports;

pub use error::ApplicationResult;
