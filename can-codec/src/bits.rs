//! Bit layout engine
//!
//! Maps a signal's `start_bit`, width and byte order onto the frame bytes.
//! One routine serves both directions: [`spans`] walks the field one byte at
//! a time and both [`extract`] and [`insert`] consume the same walk, so they
//! are inverses by construction.
//!
//! Bit `n` of a frame is bit `n % 8` (LSB = 0) of byte `n / 8` for both byte
//! orders. They differ in where the field starts and which way it grows:
//! - Little-endian (Intel): `start_bit` is the LSB of the value, the field
//!   grows upward within a byte and continues at bit 0 of the next byte.
//! - Big-endian (Motorola): `start_bit` is the MSB of the value, the field
//!   grows downward within a byte and continues at bit 7 of the next byte.

use crate::types::ByteOrder;
use std::cmp;

/// One contiguous run of bits within a single byte of the frame.
///
/// Take `num_bits` bits starting at `bit_offset` in `data[byte_index]` and
/// place them at `value_shift` in the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSpan {
    pub byte_index: usize,
    /// Lowest bit position within the byte (0..=7).
    pub bit_offset: u8,
    /// How many consecutive bits in this span (1..=8).
    pub num_bits: u8,
    /// Where these bits land in the raw value, LSB-relative.
    pub value_shift: u8,
}

impl BitSpan {
    /// Mask of the span's bits, aligned to bit 0.
    pub fn mask(&self) -> u8 {
        ((1u16 << self.num_bits) - 1) as u8
    }
}

/// Iterator over the [`BitSpan`]s of one signal, lowest byte first.
///
/// Produces at most 9 spans for a 64-bit field and never allocates.
#[derive(Debug, Clone)]
pub struct BitSpans {
    byte_order: ByteOrder,
    byte_index: usize,
    bit_index: u8,
    remaining: u8,
    value_shift: u8,
}

/// Walk the bytes covered by a `bit_length`-wide field at `start_bit`.
pub fn spans(start_bit: u16, bit_length: u8, byte_order: ByteOrder) -> BitSpans {
    BitSpans {
        byte_order,
        byte_index: (start_bit / 8) as usize,
        bit_index: (start_bit % 8) as u8,
        remaining: bit_length,
        value_shift: 0,
    }
}

impl Iterator for BitSpans {
    type Item = BitSpan;

    fn next(&mut self) -> Option<BitSpan> {
        if self.remaining == 0 {
            return None;
        }

        let span = match self.byte_order {
            ByteOrder::BigEndian => {
                // First span carries the MSBs of the value.
                let num_bits = cmp::min(self.bit_index + 1, self.remaining);
                self.remaining -= num_bits;
                let span = BitSpan {
                    byte_index: self.byte_index,
                    bit_offset: self.bit_index + 1 - num_bits,
                    num_bits,
                    value_shift: self.remaining,
                };
                self.bit_index = 7;
                span
            }
            ByteOrder::LittleEndian => {
                // First span carries the LSBs of the value.
                let num_bits = cmp::min(8 - self.bit_index, self.remaining);
                let span = BitSpan {
                    byte_index: self.byte_index,
                    bit_offset: self.bit_index,
                    num_bits,
                    value_shift: self.value_shift,
                };
                self.value_shift += num_bits;
                self.remaining -= num_bits;
                self.bit_index = 0;
                span
            }
        };

        self.byte_index += 1;
        Some(span)
    }
}

/// Number of leading frame bytes a field needs: one past the last byte it
/// touches, or 0 for an empty field.
pub fn required_bytes(start_bit: u16, bit_length: u8, byte_order: ByteOrder) -> usize {
    spans(start_bit, bit_length, byte_order)
        .last()
        .map(|span| span.byte_index + 1)
        .unwrap_or(0)
}

/// Mask of the low `bit_length` bits of a raw value.
pub fn mask(bit_length: u8) -> u64 {
    if bit_length >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_length) - 1
    }
}

/// Extract the raw unsigned value of a field.
///
/// `data` must hold at least [`required_bytes`] bytes.
pub fn extract(data: &[u8], start_bit: u16, bit_length: u8, byte_order: ByteOrder) -> u64 {
    let mut result: u64 = 0;
    for span in spans(start_bit, bit_length, byte_order) {
        let bits = (data[span.byte_index] >> span.bit_offset) & span.mask();
        result |= (bits as u64) << span.value_shift;
    }
    result
}

/// Write the low `bit_length` bits of `raw` into a field.
///
/// Target bits are cleared before writing so that several signals can share
/// a byte; bits outside the field are left as they are. `data` must hold at
/// least [`required_bytes`] bytes.
pub fn insert(data: &mut [u8], start_bit: u16, bit_length: u8, byte_order: ByteOrder, raw: u64) {
    for span in spans(start_bit, bit_length, byte_order) {
        let mask = span.mask();
        let bits = ((raw >> span.value_shift) as u8) & mask;
        data[span.byte_index] &= !(mask << span.bit_offset);
        data[span.byte_index] |= bits << span.bit_offset;
    }
}

/// Sign-extend a value from N bits to 64 bits
///
/// If the value's MSB is 1, fill the upper bits with 1s.
pub fn sign_extend(value: u64, bit_length: u8) -> i64 {
    if bit_length == 0 {
        return 0;
    }
    if bit_length >= 64 {
        return value as i64;
    }

    let sign_bit = 1u64 << (bit_length - 1);
    if (value & sign_bit) != 0 {
        (value | !mask(bit_length)) as i64
    } else {
        (value & mask(bit_length)) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_little_endian_simple() {
        // 8 bits starting at bit 0 (byte 0)
        let data = [0xAB, 0xCD, 0xEF, 0x12];
        assert_eq!(extract(&data, 0, 8, ByteOrder::LittleEndian), 0xAB);
    }

    #[test]
    fn test_extract_little_endian_cross_byte() {
        // 16 bits starting at bit 0 (bytes 0-1)
        let data = [0xAB, 0xCD, 0xEF, 0x12];
        assert_eq!(extract(&data, 0, 16, ByteOrder::LittleEndian), 0xCDAB);
    }

    #[test]
    fn test_extract_little_endian_unaligned() {
        // 12 bits starting at bit 4: high nibble of byte 0, all of byte 1
        let data = [0xAB, 0xCD, 0xEF, 0x12];
        assert_eq!(extract(&data, 4, 12, ByteOrder::LittleEndian), 0xCDA);
    }

    #[test]
    fn test_extract_big_endian_simple() {
        // 8 bits with MSB at bit 7 (byte 0)
        let data = [0xAB, 0xCD, 0xEF, 0x12];
        assert_eq!(extract(&data, 7, 8, ByteOrder::BigEndian), 0xAB);
    }

    #[test]
    fn test_extract_big_endian_cross_byte() {
        // 16 bits with MSB at bit 7: byte 0 is the high byte
        let data = [0xAB, 0xCD, 0xEF, 0x12];
        assert_eq!(extract(&data, 7, 16, ByteOrder::BigEndian), 0xABCD);
    }

    #[test]
    fn test_big_endian_spans_motohawk_temperature() {
        // 12-bit field with MSB at bit 0: one bit of byte 0, all of byte 1,
        // top three bits of byte 2
        let spans: Vec<BitSpan> = spans(0, 12, ByteOrder::BigEndian).collect();
        assert_eq!(
            spans,
            vec![
                BitSpan { byte_index: 0, bit_offset: 0, num_bits: 1, value_shift: 11 },
                BitSpan { byte_index: 1, bit_offset: 0, num_bits: 8, value_shift: 3 },
                BitSpan { byte_index: 2, bit_offset: 5, num_bits: 3, value_shift: 0 },
            ]
        );
        assert_eq!(required_bytes(0, 12, ByteOrder::BigEndian), 3);
    }

    #[test]
    fn test_little_endian_spans_64bit() {
        let spans: Vec<BitSpan> = spans(0, 64, ByteOrder::LittleEndian).collect();
        assert_eq!(spans.len(), 8);
        assert!(spans.iter().all(|s| s.num_bits == 8 && s.bit_offset == 0));
        assert_eq!(spans[7].value_shift, 56);
    }

    #[test]
    fn test_insert_clears_existing_bits() {
        // 1-bit field at bit 7 of byte 0; packing 0 clears only that bit
        let mut data = [0xFFu8; 2];
        insert(&mut data, 7, 1, ByteOrder::BigEndian, 0);
        assert_eq!(data, [0x7F, 0xFF]);
    }

    #[test]
    fn test_insert_masks_wide_value() {
        let mut data = [0u8; 2];
        insert(&mut data, 2, 4, ByteOrder::LittleEndian, 0xFFFF);
        assert_eq!(data, [0b0011_1100, 0x00]);
    }

    #[test]
    fn test_required_bytes() {
        assert_eq!(required_bytes(0, 0, ByteOrder::LittleEndian), 0);
        assert_eq!(required_bytes(56, 8, ByteOrder::LittleEndian), 8);
        assert_eq!(required_bytes(60, 8, ByteOrder::LittleEndian), 9);
        assert_eq!(required_bytes(7, 64, ByteOrder::BigEndian), 8);
        assert_eq!(required_bytes(3, 64, ByteOrder::BigEndian), 9);
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(1), 1);
        assert_eq!(mask(12), 0xFFF);
        assert_eq!(mask(64), u64::MAX);
    }

    #[test]
    fn test_sign_extend_positive() {
        assert_eq!(sign_extend(0x7F, 8), 127);
    }

    #[test]
    fn test_sign_extend_negative() {
        assert_eq!(sign_extend(0xFF, 8), -1);
        assert_eq!(sign_extend(0x8000, 16), -32768);
        assert_eq!(sign_extend(0xDB6, 12), -586);
    }

    #[test]
    fn test_sign_extend_full_width() {
        assert_eq!(sign_extend(0x8000_0000_0000_0000, 64), i64::MIN);
        assert_eq!(sign_extend(1, 1), -1);
    }
}
