//! Records: the caller-owned values of one frame
//!
//! The codec reads and writes records through [`RawSignals`], one slot per
//! signal in descriptor order. Typed per-frame structs implement
//! [`FrameRecord`] and get the four operations as methods; raw `u64` slices
//! implement [`RawSignals`] for callers that work from descriptors alone.

use crate::codec;
use crate::descriptor::FrameDescriptor;
use crate::types::Result;

/// Slot access used by the codec engine.
///
/// Values are raw bus values as `u64` bit patterns: signed slots are
/// sign-extended, unsigned slots zero-extended.
pub trait RawSignals {
    /// Number of signal slots the record provides.
    fn signal_count(&self) -> usize;

    /// Raw value of the slot at `index`.
    fn raw(&self, index: usize) -> u64;

    /// Store a raw value into the slot at `index`.
    ///
    /// Implementations narrow the value to the slot's field type.
    fn set_raw(&mut self, index: usize, raw: u64);
}

impl RawSignals for [u64] {
    fn signal_count(&self) -> usize {
        self.len()
    }

    fn raw(&self, index: usize) -> u64 {
        self[index]
    }

    fn set_raw(&mut self, index: usize, raw: u64) {
        self[index] = raw;
    }
}

/// A typed record bound to one frame.
pub trait FrameRecord: RawSignals + Default {
    /// Layout of the frame this record belongs to.
    const FRAME: &'static FrameDescriptor;

    /// Pack into `dst`, returning the number of bytes written.
    fn pack(&self, dst: &mut [u8]) -> Result<usize> {
        codec::pack(Self::FRAME, dst, self)
    }

    /// Unpack `src` into this record.
    fn unpack(&mut self, src: &[u8]) -> Result<()> {
        codec::unpack(Self::FRAME, self, src)
    }

    /// Build a fresh record from `src`.
    fn from_bytes(src: &[u8]) -> Result<Self> {
        let mut record = Self::default();
        record.unpack(src)?;
        Ok(record)
    }

    /// True if every bounded signal is within its range.
    fn is_in_range(&self) -> bool {
        codec::is_in_range(Self::FRAME, self)
    }

    /// Reset every field, then apply the catalog defaults.
    fn init(&mut self) -> Result<()> {
        *self = Self::default();
        codec::init(Self::FRAME, self)
    }
}
