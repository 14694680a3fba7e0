//! Rendering of frames, catalogs and decoded signals (text or JSON)

use crate::config::{OutputConfig, OutputFormat};
use anyhow::Result;
use can_codec::{Catalog, FrameDescriptor, SignalDescriptor};
use serde::Serialize;
use std::fmt;

/// Raw value as shown to the user, honouring signedness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Signed(i64),
    Unsigned(u64),
}

impl RawValue {
    pub fn new(signal: &SignalDescriptor, raw: u64) -> Self {
        if signal.is_signed {
            RawValue::Signed(raw as i64)
        } else {
            RawValue::Unsigned(raw)
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Signed(v) => write!(f, "{}", v),
            RawValue::Unsigned(v) => write!(f, "{}", v),
        }
    }
}

/// One signal of a packed or unpacked frame
#[derive(Debug, Clone, Serialize)]
pub struct SignalReport {
    pub name: &'static str,
    pub raw: RawValue,
    pub physical: f64,
    pub unit: Option<&'static str>,
    pub choice: Option<&'static str>,
    pub in_range: bool,
}

/// A frame with its payload and every signal value
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub frame: &'static str,
    pub frame_id: u32,
    pub is_extended: bool,
    pub payload: String,
    pub signals: Vec<SignalReport>,
    pub in_range: bool,
}

impl FrameReport {
    pub fn new(
        frame: &'static FrameDescriptor,
        payload: &[u8],
        values: &[u64],
        uppercase_hex: bool,
    ) -> Self {
        let signals: Vec<SignalReport> = frame
            .signals
            .iter()
            .zip(values)
            .map(|(signal, raw)| SignalReport {
                name: signal.name,
                raw: RawValue::new(signal, *raw),
                physical: signal.decode(*raw),
                unit: signal.unit,
                choice: signal.choice(*raw),
                in_range: signal.is_in_range(*raw),
            })
            .collect();

        Self {
            frame: frame.name,
            frame_id: frame.frame_id,
            is_extended: frame.is_extended,
            payload: format_payload(payload, uppercase_hex),
            in_range: signals.iter().all(|s| s.in_range),
            signals,
        }
    }
}

/// Hex payload without separators.
pub fn format_payload(payload: &[u8], uppercase: bool) -> String {
    if uppercase {
        hex::encode_upper(payload)
    } else {
        hex::encode(payload)
    }
}

/// Decode a hex payload, ignoring whitespace and an optional `0x` prefix.
pub fn parse_payload(text: &str) -> Result<Vec<u8>> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);
    Ok(hex::decode(digits)?)
}

pub fn render_frame(report: &FrameReport, output: &OutputConfig) -> Result<String> {
    if output.format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut text = format!(
        "{} (0x{:X}{}) {}\n",
        report.frame,
        report.frame_id,
        if report.is_extended { ", extended" } else { "" },
        if report.payload.is_empty() { "<empty>" } else { report.payload.as_str() }
    );
    for signal in &report.signals {
        text.push_str(&format!(
            "  {:<20} raw={:<12} physical={}{}{}{}\n",
            signal.name,
            signal.raw.to_string(),
            signal.physical,
            signal.unit.map(|u| format!(" {}", u)).unwrap_or_default(),
            signal.choice.map(|c| format!(" ({})", c)).unwrap_or_default(),
            if signal.in_range { "" } else { "  OUT OF RANGE" },
        ));
    }
    text.push_str(&format!(
        "  in range: {}",
        if report.in_range { "yes" } else { "no" }
    ));
    Ok(text)
}

pub fn render_catalog(catalog: &Catalog, output: &OutputConfig) -> Result<String> {
    if output.format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(catalog)?);
    }

    let mut text = format!(
        "{}: {} frames, {} signals\n",
        catalog.name,
        catalog.frames.len(),
        catalog.num_signals()
    );
    for frame in catalog.frames {
        text.push_str(&format!(
            "  0x{:03X} {:<20} {} bytes{}{}\n",
            frame.frame_id,
            frame.name,
            frame.length,
            if frame.is_extended { ", extended" } else { "" },
            frame
                .cycle_time_ms
                .map(|ms| format!(", every {} ms", ms))
                .unwrap_or_default(),
        ));
        for signal in frame.signals {
            text.push_str(&format!(
                "      {:<20} start={:<3} len={:<2} {} {} scale={} offset={}\n",
                signal.name,
                signal.start_bit,
                signal.bit_length,
                signal.byte_order,
                if signal.is_signed { "signed" } else { "unsigned" },
                signal.scale,
                signal.offset,
            ));
        }
    }
    Ok(text.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use can_codec::catalog::{motohawk, no_signals};

    fn report() -> FrameReport {
        FrameReport::new(
            &motohawk::EXAMPLE_MESSAGE,
            &[0xA5, 0xB6, 0xC0, 0, 0, 0, 0, 0],
            &[1, 18, -586i64 as u64],
            true,
        )
    }

    #[test]
    fn test_frame_report() {
        let report = report();
        assert_eq!(report.payload, "A5B6C00000000000");
        assert!(report.in_range);
        assert_eq!(report.signals[0].choice, Some("Enabled"));
        assert_eq!(report.signals[2].raw, RawValue::Signed(-586));
        assert!((report.signals[2].physical - 244.14).abs() < 1e-9);
    }

    #[test]
    fn test_render_frame_text() {
        let text = render_frame(&report(), &OutputConfig::default()).unwrap();
        assert!(text.starts_with("ExampleMessage (0x1F0) A5B6C00000000000"));
        assert!(text.contains("(Enabled)"));
        assert!(text.ends_with("in range: yes"));
    }

    #[test]
    fn test_render_frame_json() {
        let output = OutputConfig {
            format: OutputFormat::Json,
            ..OutputConfig::default()
        };
        let json = render_frame(&report(), &output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["frame_id"], 0x1F0);
        assert_eq!(value["signals"][2]["raw"], -586);
        assert_eq!(value["signals"][1]["unit"], "m");
    }

    #[test]
    fn test_render_catalog() {
        let text = render_catalog(&no_signals::CATALOG, &OutputConfig::default()).unwrap();
        assert!(text.starts_with("no_signals: 2 frames, 0 signals"));
        assert!(text.contains("0x400 Message1"));

        let output = OutputConfig {
            format: OutputFormat::Json,
            ..OutputConfig::default()
        };
        let json = render_catalog(&motohawk::CATALOG, &output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["frames"][0]["signals"][2]["byte_order"], "big_endian");
    }

    #[test]
    fn test_payload_hex() {
        assert_eq!(format_payload(&[0xAB, 0x01], false), "ab01");
        assert_eq!(parse_payload("0xA5 B6 C0").unwrap(), vec![0xA5, 0xB6, 0xC0]);
        assert_eq!(parse_payload("").unwrap(), Vec::<u8>::new());
        assert!(parse_payload("A5B").is_err());
    }
}
