//! `no_signals` catalog: two frames without any real signal
//!
//! Both records carry a single `dummy` byte that no descriptor maps to, so
//! packing always yields zeroes and unpacking never touches the record.

use super::Catalog;
use crate::descriptor::FrameDescriptor;
use crate::record::{FrameRecord, RawSignals};

// Frame ids.
pub const MESSAGE1_FRAME_ID: u32 = 0x400;
pub const MESSAGE2_FRAME_ID: u32 = 0x401;

// Frame lengths in bytes.
pub const MESSAGE1_LENGTH: usize = 5;
pub const MESSAGE2_LENGTH: usize = 0;

// Extended or standard frame types.
pub const MESSAGE1_IS_EXTENDED: bool = false;
pub const MESSAGE2_IS_EXTENDED: bool = false;

// Frame names.
pub const MESSAGE1_NAME: &str = "Message1";
pub const MESSAGE2_NAME: &str = "Message2";

pub const MESSAGE1: FrameDescriptor = FrameDescriptor {
    frame_id: MESSAGE1_FRAME_ID,
    length: MESSAGE1_LENGTH,
    is_extended: MESSAGE1_IS_EXTENDED,
    name: MESSAGE1_NAME,
    cycle_time_ms: None,
    signals: &[],
};

pub const MESSAGE2: FrameDescriptor = FrameDescriptor {
    frame_id: MESSAGE2_FRAME_ID,
    length: MESSAGE2_LENGTH,
    is_extended: MESSAGE2_IS_EXTENDED,
    name: MESSAGE2_NAME,
    cycle_time_ms: None,
    signals: &[],
};

pub static CATALOG: Catalog = Catalog {
    name: "no_signals",
    frames: &[&MESSAGE1, &MESSAGE2],
};

/// Signals in message Message1.
///
/// All signal values are as on the CAN bus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Message1 {
    /// Dummy signal in empty message.
    pub dummy: u8,
}

/// Signals in message Message2.
///
/// All signal values are as on the CAN bus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Message2 {
    /// Dummy signal in empty message.
    pub dummy: u8,
}

impl RawSignals for Message1 {
    fn signal_count(&self) -> usize {
        0
    }

    fn raw(&self, _index: usize) -> u64 {
        0
    }

    fn set_raw(&mut self, _index: usize, _raw: u64) {}
}

impl FrameRecord for Message1 {
    const FRAME: &'static FrameDescriptor = &MESSAGE1;
}

impl RawSignals for Message2 {
    fn signal_count(&self) -> usize {
        0
    }

    fn raw(&self, _index: usize) -> u64 {
        0
    }

    fn set_raw(&mut self, _index: usize, _raw: u64) {}
}

impl FrameRecord for Message2 {
    const FRAME: &'static FrameDescriptor = &MESSAGE2;
}
