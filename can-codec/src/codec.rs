//! Codec engine
//!
//! The four operations over a [`FrameDescriptor`] and a caller-owned record.
//! They are pure: no allocation, no shared state, no I/O besides log
//! records. `pack` and `unpack` never look at signal ranges; range policy is
//! the separate [`is_in_range`] predicate.

use crate::bits;
use crate::descriptor::FrameDescriptor;
use crate::record::RawSignals;
use crate::types::{CodecError, Result};

/// Pack a record into `dst`.
///
/// Zeroes the first `frame.length` bytes of `dst`, then writes every signal's
/// raw value masked to its width. Bytes past `frame.length` are not touched.
///
/// # Returns
/// * `Ok(frame.length)` on success
/// * `Err(CodecError::InvalidArgument)` if `dst` is shorter than the frame or
///   `src` lacks a slot for some signal; `dst` is left unmodified
pub fn pack<S>(frame: &FrameDescriptor, dst: &mut [u8], src: &S) -> Result<usize>
where
    S: RawSignals + ?Sized,
{
    check_buffer(frame, dst.len())?;
    check_record(frame, src.signal_count())?;
    check_layout(frame)?;

    let data = &mut dst[..frame.length];
    data.fill(0);
    for (index, signal) in frame.signals.iter().enumerate() {
        bits::insert(
            data,
            signal.start_bit,
            signal.bit_length,
            signal.byte_order,
            src.raw(index),
        );
    }

    log::trace!("Packed {} (0x{:X}): {:02X?}", frame.name, frame.frame_id, data);
    Ok(frame.length)
}

/// Unpack `src` into a record.
///
/// Extracts every signal, sign-extending signed ones. Record fields that no
/// signal maps to keep their value.
///
/// # Returns
/// * `Ok(())` on success
/// * `Err(CodecError::InvalidArgument)` if `src` is shorter than the frame or
///   `dst` lacks a slot for some signal; `dst` is left unmodified
pub fn unpack<S>(frame: &FrameDescriptor, dst: &mut S, src: &[u8]) -> Result<()>
where
    S: RawSignals + ?Sized,
{
    check_buffer(frame, src.len())?;
    check_record(frame, dst.signal_count())?;
    check_layout(frame)?;

    let data = &src[..frame.length];
    for (index, signal) in frame.signals.iter().enumerate() {
        let raw = bits::extract(data, signal.start_bit, signal.bit_length, signal.byte_order);
        let raw = if signal.is_signed {
            bits::sign_extend(raw, signal.bit_length) as u64
        } else {
            raw
        };
        dst.set_raw(index, raw);
    }

    log::trace!("Unpacked {} (0x{:X}): {:02X?}", frame.name, frame.frame_id, data);
    Ok(())
}

/// True if every bounded signal of the record is within its range.
///
/// Never fails. A record without a slot for every signal is reported as
/// not in range.
pub fn is_in_range<S>(frame: &FrameDescriptor, record: &S) -> bool
where
    S: RawSignals + ?Sized,
{
    if record.signal_count() < frame.signals.len() {
        log::debug!(
            "Range check on {} with {} of {} signal slots",
            frame.name,
            record.signal_count(),
            frame.signals.len()
        );
        return false;
    }

    frame
        .signals
        .iter()
        .enumerate()
        .all(|(index, signal)| signal.is_in_range(record.raw(index)))
}

/// Set every signal of the record to its default raw value.
///
/// # Returns
/// * `Ok(())` on success
/// * `Err(CodecError::MissingRecord)` if the record has no slot for some
///   signal; nothing is written
pub fn init<S>(frame: &FrameDescriptor, record: &mut S) -> Result<()>
where
    S: RawSignals + ?Sized,
{
    if record.signal_count() < frame.signals.len() {
        log::debug!("Init of {} without a record", frame.name);
        return Err(CodecError::MissingRecord(frame.name));
    }

    for (index, signal) in frame.signals.iter().enumerate() {
        record.set_raw(index, signal.default_raw());
    }
    Ok(())
}

fn check_buffer(frame: &FrameDescriptor, len: usize) -> Result<()> {
    if len < frame.length {
        log::debug!(
            "Buffer of {} bytes too short for {} ({} bytes)",
            len,
            frame.name,
            frame.length
        );
        return Err(CodecError::invalid_argument(
            frame.name,
            format!("buffer of {} bytes, frame needs {}", len, frame.length),
        ));
    }
    Ok(())
}

fn check_record(frame: &FrameDescriptor, slots: usize) -> Result<()> {
    if slots < frame.signals.len() {
        return Err(CodecError::invalid_argument(
            frame.name,
            format!("record has {} slots, frame has {} signals", slots, frame.signals.len()),
        ));
    }
    Ok(())
}

/// Every signal must stay inside the frame before any byte is touched.
fn check_layout(frame: &FrameDescriptor) -> Result<()> {
    for signal in frame.signals {
        if signal.bit_length > 64 || signal.required_bytes() > frame.length {
            log::warn!(
                "Signal '{}' does not fit in {} ({} bytes)",
                signal.name,
                frame.name,
                frame.length
            );
            return Err(CodecError::invalid_argument(
                frame.name,
                format!("signal '{}' does not fit in the frame", signal.name),
            ));
        }
    }
    Ok(())
}
