//! Frame and signal descriptors
//!
//! Descriptors are plain immutable data, declared as `const`/`static` tables
//! in the catalog modules. Nothing in here allocates except validation error
//! messages.

use crate::bits;
use crate::types::{ByteOrder, CodecError, Result};
use serde::Serialize;

/// Largest payload of a classic CAN frame
pub const MAX_CLASSIC_LENGTH: usize = 8;

/// Highest standard (11-bit) frame id
pub const MAX_STANDARD_ID: u32 = 0x7FF;

/// Highest extended (29-bit) frame id
pub const MAX_EXTENDED_ID: u32 = 0x1FFF_FFFF;

/// Slack, in raw steps, absorbing float error when bounds are converted.
const RAW_BOUND_TOLERANCE: f64 = 1e-6;

/// A CAN frame layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameDescriptor {
    /// CAN message ID
    pub frame_id: u32,
    /// Serialized size in bytes
    pub length: usize,
    /// True if the id is a 29-bit extended id
    pub is_extended: bool,
    /// Frame name
    pub name: &'static str,
    /// Send period in milliseconds, when the catalog defines one
    pub cycle_time_ms: Option<u32>,
    /// Signals in declaration order; record slots follow this order
    pub signals: &'static [SignalDescriptor],
}

/// A bit-level signal inside a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalDescriptor {
    /// Signal name, also the record field name
    pub name: &'static str,
    /// Start bit in the frame (LSB for little-endian, MSB for big-endian)
    pub start_bit: u16,
    /// Length in bits (1..=64)
    pub bit_length: u8,
    pub byte_order: ByteOrder,
    /// Raw value is two's complement
    pub is_signed: bool,
    /// physical = raw * scale + offset
    pub scale: f64,
    pub offset: f64,
    /// Inclusive physical bounds; both zero means unbounded
    pub minimum: f64,
    pub maximum: f64,
    /// Physical value written by `init`
    pub default_value: f64,
    /// Engineering unit (e.g., "km/h", "degK")
    pub unit: Option<&'static str>,
    /// Value table (raw value -> label)
    pub choices: &'static [(i64, &'static str)],
}

impl SignalDescriptor {
    /// Number of leading frame bytes this signal touches.
    pub fn required_bytes(&self) -> usize {
        bits::required_bytes(self.start_bit, self.bit_length, self.byte_order)
    }

    /// True if the descriptor carries a `[minimum, maximum]` check.
    pub fn is_bounded(&self) -> bool {
        !(self.minimum == 0.0 && self.maximum == 0.0)
    }

    /// Raw record value as a float, honouring signedness.
    fn raw_as_f64(&self, raw: u64) -> f64 {
        if self.is_signed {
            raw as i64 as f64
        } else {
            raw as f64
        }
    }

    /// Raw record value widened so signed and unsigned compare correctly.
    fn raw_as_i128(&self, raw: u64) -> i128 {
        if self.is_signed {
            raw as i64 as i128
        } else {
            raw as i128
        }
    }

    /// Convert a raw value to its physical value.
    pub fn decode(&self, raw: u64) -> f64 {
        self.raw_as_f64(raw) * self.scale + self.offset
    }

    /// Convert a physical value to the raw value stored in a record.
    ///
    /// Rounds to the nearest integer. Signed results are sign-extended to 64
    /// bits; negative unsigned results saturate to 0.
    pub fn encode(&self, physical: f64) -> u64 {
        let raw = ((physical - self.offset) / self.scale).round();
        if self.is_signed {
            raw as i64 as u64
        } else {
            raw as u64
        }
    }

    /// Raw value of the configured default.
    pub fn default_raw(&self) -> u64 {
        self.encode(self.default_value)
    }

    /// Raw values whose physical value lies within `[minimum, maximum]`.
    ///
    /// The lower bound rounds up and the upper bound rounds down, with a
    /// small tolerance so a bound sitting on a raw step is kept.
    fn raw_bounds(&self) -> (i128, i128) {
        let a = (self.minimum - self.offset) / self.scale;
        let b = (self.maximum - self.offset) / self.scale;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        (
            (lo - RAW_BOUND_TOLERANCE).ceil() as i128,
            (hi + RAW_BOUND_TOLERANCE).floor() as i128,
        )
    }

    /// Check a raw value against the signal's bounds.
    ///
    /// Unbounded signals always pass. Otherwise the physical value
    /// `raw * scale + offset` must lie within `[minimum, maximum]`, inclusive.
    pub fn is_in_range(&self, raw: u64) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let (lo, hi) = self.raw_bounds();
        (lo..=hi).contains(&self.raw_as_i128(raw))
    }

    /// Label for a raw value from the signal's value table.
    pub fn choice(&self, raw: u64) -> Option<&'static str> {
        let raw = self.raw_as_i128(raw);
        self.choices
            .iter()
            .find(|(value, _)| *value as i128 == raw)
            .map(|(_, label)| *label)
    }

    fn validate(&self, frame: &FrameDescriptor) -> Result<()> {
        if self.bit_length == 0 || self.bit_length > 64 {
            return Err(CodecError::InvalidDescriptor(format!(
                "{}.{}: bit length {} outside 1..=64",
                frame.name, self.name, self.bit_length
            )));
        }
        if self.scale == 0.0 || !self.scale.is_finite() {
            return Err(CodecError::InvalidDescriptor(format!(
                "{}.{}: scale must be finite and non-zero",
                frame.name, self.name
            )));
        }
        if self.is_bounded() && self.minimum > self.maximum {
            return Err(CodecError::InvalidDescriptor(format!(
                "{}.{}: minimum {} above maximum {}",
                frame.name, self.name, self.minimum, self.maximum
            )));
        }
        let required = self.required_bytes();
        if required > frame.length {
            return Err(CodecError::InvalidDescriptor(format!(
                "{}.{}: needs {} bytes but frame is {} bytes",
                frame.name, self.name, required, frame.length
            )));
        }
        Ok(())
    }
}

impl FrameDescriptor {
    /// Find a signal by name.
    pub fn signal(&self, name: &str) -> Option<&'static SignalDescriptor> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Position of a signal in the record.
    pub fn signal_index(&self, name: &str) -> Option<usize> {
        self.signals.iter().position(|s| s.name == name)
    }

    /// Check the schema invariants of this frame.
    ///
    /// Length fits a classic frame, the id fits its id space, every signal is
    /// well formed and inside the frame, names are unique and no two signals
    /// share a bit.
    pub fn validate(&self) -> Result<()> {
        if self.length > MAX_CLASSIC_LENGTH {
            return Err(CodecError::InvalidDescriptor(format!(
                "{}: length {} exceeds {} bytes",
                self.name, self.length, MAX_CLASSIC_LENGTH
            )));
        }

        let max_id = if self.is_extended {
            MAX_EXTENDED_ID
        } else {
            MAX_STANDARD_ID
        };
        if self.frame_id > max_id {
            return Err(CodecError::InvalidDescriptor(format!(
                "{}: frame id 0x{:X} outside the {} id space",
                self.name,
                self.frame_id,
                if self.is_extended { "29-bit" } else { "11-bit" }
            )));
        }

        let mut occupied = [0u8; MAX_CLASSIC_LENGTH];
        for (index, signal) in self.signals.iter().enumerate() {
            signal.validate(self)?;

            if self.signals[..index].iter().any(|s| s.name == signal.name) {
                return Err(CodecError::InvalidDescriptor(format!(
                    "{}: duplicate signal name '{}'",
                    self.name, signal.name
                )));
            }

            for span in bits::spans(signal.start_bit, signal.bit_length, signal.byte_order) {
                let bits = span.mask() << span.bit_offset;
                if occupied[span.byte_index] & bits != 0 {
                    return Err(CodecError::InvalidDescriptor(format!(
                        "{}.{}: overlaps another signal in byte {}",
                        self.name, signal.name, span.byte_index
                    )));
                }
                occupied[span.byte_index] |= bits;
            }
        }

        Ok(())
    }
}
