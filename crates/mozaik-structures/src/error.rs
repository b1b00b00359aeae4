// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

/// Common error type for Mozaik operations.
///
/// Provides structured error handling for parameter validation, stimulus rendering,
/// analysis data structure construction and the I/O around them.
///
/// # Examples
/// ```
/// use mozaik_structures::MozaikError;
///
/// fn validate_duration(duration: f64) -> Result<(), MozaikError> {
///     if duration <= 0.0 {
///         return Err(MozaikError::BadParameters("Frame duration must be > 0".into()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_duration(0.0).is_err());
/// assert!(validate_duration(7.0).is_ok());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MozaikError {
    /// Invalid parameters provided to a function
    #[error("Bad Parameters: {0}")]
    BadParameters(String),

    /// The supplied parameter tree does not have the declared keys
    #[error("Invalid parameters for {owner}.{section} Required: {required:?}. Supplied: {supplied:?}")]
    InvalidParameterKeys {
        owner: String,
        section: String,
        required: Vec<String>,
        supplied: Vec<String>,
    },

    /// A supplied parameter has a different kind than declared
    #[error("Invalid parameters for {owner}. Type mismatch: {expected} != {found}, for {key}")]
    ParameterTypeMismatch {
        owner: String,
        key: String,
        expected: String,
        found: String,
    },

    /// A rendered frame falls outside the permitted luminance range
    #[error("{0}")]
    FrameOutOfRange(String),

    /// A stimulus id string could not be parsed
    #[error("Invalid stimulus id '{0}'")]
    InvalidStimulusId(String),

    /// A value of a periodic quantity lies outside <0, period)
    #[error("{kind} with period {period}: {value} does not belong to <0,{period}) range!")]
    OutOfPeriod {
        kind: &'static str,
        period: f64,
        value: f64,
    },

    /// Two quantities that must share units do not
    #[error("Units mismatch: {0} != {1}")]
    UnitsMismatch(String, String),

    /// Two collections that must be parallel have different lengths
    #[error("Length mismatch: {what} ({left} != {right})")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or write an image
    #[error("Image Error: {0}")]
    ImageError(String),

    /// Failed to serialize or deserialize data structures
    #[error("Serialization Error: {0}")]
    SerializationError(String),

    /// Internal error indicating a bug (please report)
    #[error("Internal Error, please raise an issue: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for MozaikError {
    fn from(err: serde_json::Error) -> Self {
        MozaikError::SerializationError(err.to_string())
    }
}

/// Result type for Mozaik operations
pub type MozaikResult<T> = Result<T, MozaikError>;
