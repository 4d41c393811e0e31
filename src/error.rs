#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Interval token is null")]
    NullInput,
    #[error("Failed to parse interval segment {segment:?} as a number")]
    Format { segment: String },
    #[error("Interval matching took longer than {millis}ms")]
    Timeout { millis: u64 },
    #[error("Negative time span {token:?} is not supported")]
    Negative { token: String },
    #[error("Interval does not fit into a duration")]
    Overflow,
    #[error("Unrecognized interval unit {unit:?}")]
    UnrecognizedUnit { unit: String },
    #[error("Writing intervals is not supported")]
    Unsupported,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Cannot convert from {from}")]
    Unsupported { from: &'static str },
    #[error("No converter registered for {target}")]
    NotRegistered { target: &'static str },
    #[error("Converter produced a value of an unexpected type, expected {expected}")]
    UnexpectedType { expected: &'static str },
}
