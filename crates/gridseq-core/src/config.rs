//! Sequencer configuration, loadable from TOML

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridseqError, Result};
use crate::resolution::{DEFAULT_RESOLUTION_INDEX, ResolutionEntry, ResolutionTable};
use crate::scale::ScaleMode;

/// Largest accepted control range (16-bit controllers)
pub const MAX_UPPER_BOUND: u32 = 1 << 16;
/// Largest accepted fast multiplier
pub const MAX_FAST_FACTOR: u32 = 1024;

/// Relative encoder policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Number of distinct control values (128 for 7-bit MIDI)
    pub upper_bound: u32,
    /// Speed multiplier while the fast modifier is held
    pub fast_factor: u32,
    /// Ticks needed for one step of browsing movement
    pub scroll_rate: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            upper_bound: 128,
            fast_factor: 4,
            scroll_rate: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Pitch rows in the grid
    pub rows: u32,
    /// Steps shown on one page
    pub page_size: u32,
    /// Initially selected resolution
    pub resolution_index: usize,
    /// Velocity for notes created by toggling (0.0 to 1.0)
    pub default_velocity: f64,
    /// Used when formatting note lengths
    pub quarters_per_measure: u32,
    /// Scale the rows are laid out in
    pub scale: ScaleMode,
    /// MIDI note of the bottom row
    pub root_note: u8,
    pub encoder: EncoderConfig,
    /// Custom resolution table; the standard 1/4 .. 1/32t table when absent
    pub resolutions: Option<Vec<ResolutionEntry>>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            page_size: 16,
            resolution_index: DEFAULT_RESOLUTION_INDEX,
            default_velocity: 100.0 / 127.0,
            quarters_per_measure: 4,
            scale: ScaleMode::default(),
            root_note: 48,
            encoder: EncoderConfig::default(),
            resolutions: None,
        }
    }
}

impl SequencerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn resolution_table(&self) -> Result<ResolutionTable> {
        match &self.resolutions {
            Some(entries) => ResolutionTable::new(entries.clone()),
            None => Ok(ResolutionTable::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(GridseqError::InvalidRowCount);
        }
        if self.page_size == 0 {
            return Err(GridseqError::InvalidPageSize);
        }
        if !(2..=MAX_UPPER_BOUND).contains(&self.encoder.upper_bound) {
            return Err(GridseqError::InvalidConfig(format!(
                "encoder upper bound must be within 2..={}, got {}",
                MAX_UPPER_BOUND, self.encoder.upper_bound
            )));
        }
        if !(1..=MAX_FAST_FACTOR).contains(&self.encoder.fast_factor) {
            return Err(GridseqError::InvalidConfig(format!(
                "fast factor must be within 1..={}, got {}",
                MAX_FAST_FACTOR, self.encoder.fast_factor
            )));
        }
        if self.encoder.scroll_rate == 0 {
            return Err(GridseqError::InvalidConfig("scroll rate must be positive".into()));
        }
        if self.quarters_per_measure == 0 {
            return Err(GridseqError::InvalidConfig(
                "quarters per measure must be positive".into(),
            ));
        }
        if self.root_note > 127 {
            return Err(GridseqError::InvalidConfig(format!(
                "root note {} above 127",
                self.root_note
            )));
        }
        if !(0.0..=1.0).contains(&self.default_velocity) {
            return Err(GridseqError::InvalidConfig(format!(
                "default velocity {} outside 0..1",
                self.default_velocity
            )));
        }

        let table = self.resolution_table()?;
        if self.resolution_index >= table.count() {
            return Err(GridseqError::ResolutionOutOfRange {
                index: self.resolution_index,
                count: table.count(),
            });
        }
        Ok(())
    }
}
