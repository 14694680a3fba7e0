//! Frame selection and signal value parsing for the command line

use anyhow::{anyhow, bail, Context, Result};
use can_codec::catalog::{self, Catalog};
use can_codec::{codec, FrameDescriptor, SignalDescriptor};

/// Look up a compiled-in catalog by name.
pub fn resolve_catalog(name: &str) -> Result<&'static Catalog> {
    catalog::find(name).ok_or_else(|| {
        let known: Vec<&str> = catalog::all().iter().map(|c| c.name).collect();
        anyhow!("unknown catalog '{}' (known: {})", name, known.join(", "))
    })
}

/// Parse a frame id written in decimal or `0x` hexadecimal.
pub fn parse_frame_id(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Find a frame by name, falling back to its id.
pub fn resolve_frame(catalog: &Catalog, selector: &str) -> Result<&'static FrameDescriptor> {
    if let Some(frame) = catalog.frame_by_name(selector) {
        return Ok(frame);
    }
    parse_frame_id(selector)
        .and_then(|id| catalog.frame_by_id(id))
        .ok_or_else(|| anyhow!("no frame '{}' in catalog '{}'", selector, catalog.name))
}

/// Split a `SIGNAL=VALUE` argument.
pub fn parse_assignment(text: &str) -> Result<(&str, &str)> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| anyhow!("expected SIGNAL=VALUE, got '{}'", text))?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        bail!("expected SIGNAL=VALUE, got '{}'", text);
    }
    Ok((name, value))
}

/// Parse a raw integer for a signal, decimal or `0x` hexadecimal.
///
/// Signed signals accept negative values and are stored sign-extended.
pub fn parse_raw(signal: &SignalDescriptor, text: &str) -> Result<u64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    }
    .with_context(|| format!("invalid raw value '{}' for signal '{}'", text, signal.name))?;

    if !negative {
        return Ok(magnitude);
    }
    if !signal.is_signed {
        bail!("signal '{}' is unsigned, got '{}'", signal.name, text);
    }
    if magnitude > i64::MIN.unsigned_abs() {
        bail!("raw value '{}' for signal '{}' overflows 64 bits", text, signal.name);
    }
    Ok((magnitude as i64).wrapping_neg() as u64)
}

/// Build the record slots of a frame: catalog defaults, then `--raw` and
/// `--set` overrides in that order.
pub fn build_values(
    frame: &FrameDescriptor,
    raw_assignments: &[String],
    physical_assignments: &[String],
) -> Result<Vec<u64>> {
    let mut values = vec![0u64; frame.signals.len()];
    codec::init(frame, values.as_mut_slice())?;

    for assignment in raw_assignments {
        let (name, text) = parse_assignment(assignment)?;
        let index = signal_index(frame, name)?;
        values[index] = parse_raw(&frame.signals[index], text)?;
    }

    for assignment in physical_assignments {
        let (name, text) = parse_assignment(assignment)?;
        let index = signal_index(frame, name)?;
        let signal = &frame.signals[index];
        let physical: f64 = match signal.choices.iter().find(|(_, label)| *label == text) {
            Some((raw, _)) => signal.decode(*raw as u64),
            None => text
                .parse()
                .with_context(|| format!("invalid value '{}' for signal '{}'", text, name))?,
        };
        values[index] = signal.encode(physical);
        log::debug!("{}.{} = {} -> raw {}", frame.name, name, physical, values[index]);
    }

    Ok(values)
}

fn signal_index(frame: &FrameDescriptor, name: &str) -> Result<usize> {
    frame
        .signal_index(name)
        .ok_or_else(|| anyhow!("unknown signal '{}' in frame '{}'", name, frame.name))
}
