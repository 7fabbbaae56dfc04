//! Error types for the Barracuda sensor check.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a check in the UNKNOWN state.
#[derive(Error, Debug)]
pub enum Error {
    /// No hostname or address was supplied.
    #[error("Not all required arguments given")]
    MissingTarget,

    /// The SNMP client could not be run or exited unsuccessfully.
    #[error("SNMP walk of {oid} failed: {reason}")]
    Transport { oid: String, reason: String },

    /// The name, type and value walks did not line up.
    #[error(
        "Malformed SNMP response: {names} names, {types} types, {values} values"
    )]
    MalformedResponse {
        names: usize,
        types: usize,
        values: usize,
    },

    /// A temperature sensor reported a non-numeric value.
    #[error("Invalid value for sensor {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}
