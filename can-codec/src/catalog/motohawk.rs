//! `motohawk` catalog: one engine-control frame with three big-endian signals
//!
//! `Temperature` is a signed 12-bit field that straddles three bytes and
//! shares byte 0 with `Enable` and `AverageRadius`.

use super::Catalog;
use crate::descriptor::{FrameDescriptor, SignalDescriptor};
use crate::record::{FrameRecord, RawSignals};
use crate::types::ByteOrder;

// Frame ids.
pub const EXAMPLE_MESSAGE_FRAME_ID: u32 = 0x1F0;

// Frame lengths in bytes.
pub const EXAMPLE_MESSAGE_LENGTH: usize = 8;

// Extended or standard frame types.
pub const EXAMPLE_MESSAGE_IS_EXTENDED: bool = false;

// Frame names.
pub const EXAMPLE_MESSAGE_NAME: &str = "ExampleMessage";

// Signal choice values.
pub const EXAMPLE_MESSAGE_ENABLE_DISABLED_CHOICE: u8 = 0;
pub const EXAMPLE_MESSAGE_ENABLE_ENABLED_CHOICE: u8 = 1;

pub const EXAMPLE_MESSAGE: FrameDescriptor = FrameDescriptor {
    frame_id: EXAMPLE_MESSAGE_FRAME_ID,
    length: EXAMPLE_MESSAGE_LENGTH,
    is_extended: EXAMPLE_MESSAGE_IS_EXTENDED,
    name: EXAMPLE_MESSAGE_NAME,
    cycle_time_ms: None,
    signals: &[
        SignalDescriptor {
            name: "Enable",
            start_bit: 7,
            bit_length: 1,
            byte_order: ByteOrder::BigEndian,
            is_signed: false,
            scale: 1.0,
            offset: 0.0,
            minimum: 0.0,
            maximum: 0.0,
            default_value: 0.0,
            unit: Some("-"),
            choices: &[(0, "Disabled"), (1, "Enabled")],
        },
        SignalDescriptor {
            name: "AverageRadius",
            start_bit: 6,
            bit_length: 6,
            byte_order: ByteOrder::BigEndian,
            is_signed: false,
            scale: 0.1,
            offset: 0.0,
            minimum: 0.0,
            maximum: 5.0,
            default_value: 0.0,
            unit: Some("m"),
            choices: &[],
        },
        SignalDescriptor {
            name: "Temperature",
            start_bit: 0,
            bit_length: 12,
            byte_order: ByteOrder::BigEndian,
            is_signed: true,
            scale: 0.01,
            offset: 250.0,
            minimum: 229.52,
            maximum: 270.47,
            default_value: 250.0,
            unit: Some("degK"),
            choices: &[],
        },
    ],
};

pub static CATALOG: Catalog = Catalog {
    name: "motohawk",
    frames: &[&EXAMPLE_MESSAGE],
};

/// Signals in message ExampleMessage.
///
/// All signal values are as on the CAN bus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExampleMessage {
    /// Range: 0..1 (0..1 -)
    pub enable: u8,
    /// Range: 0..50 (0..5 m), scale 0.1
    pub average_radius: u8,
    /// Range: -2048..2047 (229.52..270.47 degK), scale 0.01, offset 250
    pub temperature: i16,
}

impl RawSignals for ExampleMessage {
    fn signal_count(&self) -> usize {
        EXAMPLE_MESSAGE.signals.len()
    }

    fn raw(&self, index: usize) -> u64 {
        match index {
            0 => self.enable as u64,
            1 => self.average_radius as u64,
            2 => self.temperature as i64 as u64,
            _ => 0,
        }
    }

    fn set_raw(&mut self, index: usize, raw: u64) {
        match index {
            0 => self.enable = raw as u8,
            1 => self.average_radius = raw as u8,
            2 => self.temperature = raw as i64 as i16,
            _ => {}
        }
    }
}

impl FrameRecord for ExampleMessage {
    const FRAME: &'static FrameDescriptor = &EXAMPLE_MESSAGE;
}
