//! CAN Codec Library
//!
//! Packs typed signal records into fixed-length CAN payloads and unpacks
//! payloads back into records, driven by compiled-in frame and signal
//! descriptors.
//!
//! # Architecture
//!
//! - Descriptors are immutable static tables, one catalog module per bus
//!   definition
//! - One bit-layout routine handles both byte orders for packing and
//!   unpacking
//! - `pack`, `unpack`, `is_in_range` and `init` are pure, re-entrant and
//!   never allocate
//!
//! The library does NOT:
//! - Parse catalog definition files or generate catalog code
//! - Talk to a CAN bus
//! - Reject out-of-range values while packing (see `is_in_range`)
//!
//! # Example Usage
//!
//! ```
//! use can_codec::catalog::motohawk::ExampleMessage;
//! use can_codec::FrameRecord;
//!
//! let mut msg = ExampleMessage::default();
//! msg.init().unwrap();
//! msg.enable = 1;
//! msg.average_radius = 18;
//! msg.temperature = -586;
//!
//! let mut buffer = [0u8; 8];
//! let written = msg.pack(&mut buffer).unwrap();
//! assert_eq!(&buffer[..written], &[0xA5, 0xB6, 0xC0, 0, 0, 0, 0, 0]);
//!
//! let decoded = ExampleMessage::from_bytes(&buffer).unwrap();
//! assert_eq!(decoded, msg);
//! assert!(decoded.is_in_range());
//! ```

// Public modules
pub mod bits;
pub mod catalog;
pub mod codec;
pub mod descriptor;
pub mod record;
pub mod types;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use codec::{init, is_in_range, pack, unpack};
pub use descriptor::{FrameDescriptor, SignalDescriptor};
pub use record::{FrameRecord, RawSignals};
pub use types::{ByteOrder, CodecError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
