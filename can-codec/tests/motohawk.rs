// Reference frame with big-endian signals sharing bytes
use can_codec::catalog::motohawk::{self, ExampleMessage};
use can_codec::{codec, FrameRecord};

// Frame captured from a bus; byte 2 carries bits outside any signal
const CAPTURED: [u8; 8] = [0xA5, 0xB6, 0xD9, 0x00, 0x00, 0x00, 0x00, 0x00];

fn init_logger() {
    // Surfaces the codec's trace output with RUST_LOG=trace
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample() -> ExampleMessage {
    ExampleMessage {
        enable: 1,
        average_radius: 18,
        temperature: -586,
    }
}

#[test]
fn pack_golden_bytes() {
    init_logger();
    let mut buffer = [0u8; 8];
    assert_eq!(sample().pack(&mut buffer).unwrap(), 8);
    assert_eq!(buffer, [0xA5, 0xB6, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn unpack_captured_frame() {
    init_logger();
    let msg = ExampleMessage::from_bytes(&CAPTURED).unwrap();
    assert_eq!(msg, sample());

    let temperature = motohawk::EXAMPLE_MESSAGE.signal("Temperature").unwrap();
    let radius = motohawk::EXAMPLE_MESSAGE.signal("AverageRadius").unwrap();
    assert!((temperature.decode(msg.temperature as i64 as u64) - 244.14).abs() < 1e-9);
    assert!((radius.decode(msg.average_radius as u64) - 1.8).abs() < 1e-9);
}

#[test]
fn repack_clears_unmapped_bits() {
    let msg = ExampleMessage::from_bytes(&CAPTURED).unwrap();
    let mut buffer = [0xFFu8; 8];
    msg.pack(&mut buffer).unwrap();
    assert_eq!(buffer[2], 0xC0);
    assert_eq!(&buffer[3..], &[0u8; 5]);
}

#[test]
fn physical_values_encode_to_sample() {
    let frame = &motohawk::EXAMPLE_MESSAGE;
    let mut slots = [0u64; 3];
    for (signal, physical) in [("Enable", 1.0), ("AverageRadius", 1.8), ("Temperature", 244.14)] {
        let index = frame.signal_index(signal).unwrap();
        slots[index] = frame.signals[index].encode(physical);
    }

    let mut from_slots = [0u8; 8];
    let mut from_record = [0u8; 8];
    codec::pack(frame, &mut from_slots, &slots[..]).unwrap();
    sample().pack(&mut from_record).unwrap();
    assert_eq!(from_slots, from_record);
}

#[test]
fn init_applies_defaults() {
    let mut msg = sample();
    msg.init().unwrap();
    // Temperature defaults to 250 degK, which is raw 0
    assert_eq!(msg, ExampleMessage::default());
    msg.init().unwrap();
    assert_eq!(msg, ExampleMessage::default());
}

#[test]
fn range_check_is_separate_from_pack() {
    let mut msg = sample();
    assert!(msg.is_in_range());

    // 5.1 m is past the 5 m maximum but still fits in 6 bits
    msg.average_radius = 51;
    assert!(!msg.is_in_range());
    let mut buffer = [0u8; 8];
    assert_eq!(msg.pack(&mut buffer).unwrap(), 8);
    assert_eq!(ExampleMessage::from_bytes(&buffer).unwrap().average_radius, 51);

    msg.average_radius = 50;
    assert!(msg.is_in_range());
}

#[test]
fn temperature_bounds_are_exact() {
    let mut msg = sample();
    msg.temperature = -2048;
    assert!(msg.is_in_range());
    msg.temperature = 2047;
    assert!(msg.is_in_range());
}

#[test]
fn short_buffer_rejected() {
    let mut buffer = [0u8; 7];
    assert_eq!(sample().pack(&mut buffer).unwrap_err().code(), -22);
    let mut msg = ExampleMessage::default();
    assert!(msg.unpack(&CAPTURED[..7]).is_err());
    assert_eq!(msg, ExampleMessage::default());
}
