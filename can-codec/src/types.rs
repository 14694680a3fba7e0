//! Core types for the CAN codec library
//!
//! Error kinds reported by the codec operations and the byte order of a
//! signal. Descriptor types live in [`crate::descriptor`].

use serde::Serialize;
use std::fmt;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// `EINVAL` as defined by Linux.
pub const EINVAL: i32 = 22;

/// Errors that can occur while packing, unpacking or initialising a frame
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// Buffer shorter than the frame, or a record that does not match the
    /// frame's signal list.
    #[error("Invalid argument for frame '{frame}': {reason}")]
    InvalidArgument { frame: &'static str, reason: String },

    /// `init` was handed no record to initialise.
    #[error("Missing record for frame '{0}'")]
    MissingRecord(&'static str),

    /// A descriptor violates the catalog invariants.
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),
}

impl CodecError {
    pub(crate) fn invalid_argument(frame: &'static str, reason: impl Into<String>) -> Self {
        CodecError::InvalidArgument {
            frame,
            reason: reason.into(),
        }
    }

    /// Negative errno-style status code.
    ///
    /// `-EINVAL` for invalid arguments and descriptors, `-1` for a missing
    /// record.
    pub fn code(&self) -> i32 {
        match self {
            CodecError::InvalidArgument { .. } | CodecError::InvalidDescriptor(_) => -EINVAL,
            CodecError::MissingRecord(_) => -1,
        }
    }
}

/// Bit numbering convention of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Little-endian (Intel format), start bit is the LSB
    LittleEndian,
    /// Big-endian (Motorola format), start bit is the MSB
    BigEndian,
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::LittleEndian => write!(f, "little_endian"),
            ByteOrder::BigEndian => write!(f, "big_endian"),
        }
    }
}
