//! Compiled-in message catalogs
//!
//! Each submodule is one catalog: frame constants, descriptor tables and the
//! typed record of every frame.

pub mod motohawk;
pub mod no_signals;

use crate::descriptor::FrameDescriptor;
use crate::types::{CodecError, Result};
use serde::Serialize;

/// A named set of frame descriptors
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Catalog {
    pub name: &'static str,
    pub frames: &'static [&'static FrameDescriptor],
}

impl Catalog {
    /// Find a frame by CAN id.
    pub fn frame_by_id(&self, frame_id: u32) -> Option<&'static FrameDescriptor> {
        self.frames.iter().copied().find(|f| f.frame_id == frame_id)
    }

    /// Find a frame by name.
    pub fn frame_by_name(&self, name: &str) -> Option<&'static FrameDescriptor> {
        self.frames.iter().copied().find(|f| f.name == name)
    }

    /// Total number of signals across all frames.
    pub fn num_signals(&self) -> usize {
        self.frames.iter().map(|f| f.signals.len()).sum()
    }

    /// Validate every frame, plus unique frame ids and names.
    pub fn validate(&self) -> Result<()> {
        for (index, frame) in self.frames.iter().enumerate() {
            frame.validate()?;

            let earlier = &self.frames[..index];
            if earlier.iter().any(|f| f.frame_id == frame.frame_id) {
                return Err(CodecError::InvalidDescriptor(format!(
                    "{}: duplicate frame id 0x{:X}",
                    self.name, frame.frame_id
                )));
            }
            if earlier.iter().any(|f| f.name == frame.name) {
                return Err(CodecError::InvalidDescriptor(format!(
                    "{}: duplicate frame name '{}'",
                    self.name, frame.name
                )));
            }
        }

        log::debug!(
            "Catalog '{}' valid: {} frames, {} signals",
            self.name,
            self.frames.len(),
            self.num_signals()
        );
        Ok(())
    }
}

static CATALOGS: [&Catalog; 2] = [&no_signals::CATALOG, &motohawk::CATALOG];

/// All compiled-in catalogs.
pub fn all() -> &'static [&'static Catalog] {
    &CATALOGS
}

/// Find a compiled-in catalog by name.
pub fn find(name: &str) -> Option<&'static Catalog> {
    all().iter().copied().find(|c| c.name == name)
}
