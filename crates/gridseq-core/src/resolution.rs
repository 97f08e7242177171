//! Quantization resolutions for the step grid
//!
//! Values are note lengths in beats (quarter notes). The table is fixed
//! after construction and shared read-only by the grid and page navigator.

use serde::{Deserialize, Serialize};

use crate::error::{GridseqError, Result};

/// Timeline ticks per beat. Note positions are stored in ticks so that a
/// resolution change never moves existing notes.
pub const TICKS_PER_BEAT: u32 = 480;

/// Index of the 1/16 resolution in the default table
pub const DEFAULT_RESOLUTION_INDEX: usize = 4;

/// Longest accepted step length in beats (16 bars of 4/4)
pub const MAX_RESOLUTION_BEATS: f64 = 64.0;

/// Convert a length in beats to whole ticks (rounded)
pub fn beats_to_ticks(beats: f64) -> u64 {
    (beats * TICKS_PER_BEAT as f64).round().max(0.0) as u64
}

/// Convert ticks back to beats
pub fn ticks_to_beats(ticks: u64) -> f64 {
    ticks as f64 / TICKS_PER_BEAT as f64
}

/// A named quantization value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionEntry {
    /// Display name (e.g. "1/16")
    pub name: String,
    /// Step length in beats
    pub value: f64,
}

impl ResolutionEntry {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value }
    }

    /// Step length in ticks
    pub fn ticks(&self) -> u64 {
        beats_to_ticks(self.value)
    }
}

/// Ordered, immutable table of quantization values
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionTable {
    entries: Vec<ResolutionEntry>,
}

impl Default for ResolutionTable {
    fn default() -> Self {
        Self {
            entries: vec![
                ResolutionEntry::new("1/4", 1.0),
                ResolutionEntry::new("1/4t", 2.0 / 3.0),
                ResolutionEntry::new("1/8", 0.5),
                ResolutionEntry::new("1/8t", 1.0 / 3.0),
                ResolutionEntry::new("1/16", 0.25),
                ResolutionEntry::new("1/16t", 1.0 / 6.0),
                ResolutionEntry::new("1/32", 0.125),
                ResolutionEntry::new("1/32t", 1.0 / 12.0),
            ],
        }
    }
}

impl ResolutionTable {
    /// Build a custom table. Every value must be at least one tick and at
    /// most `MAX_RESOLUTION_BEATS` long.
    pub fn new(entries: Vec<ResolutionEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(GridseqError::EmptyResolutionTable);
        }
        if let Some(bad) = entries
            .iter()
            .find(|e| !e.value.is_finite() || e.value > MAX_RESOLUTION_BEATS || e.ticks() == 0)
        {
            return Err(GridseqError::InvalidResolution(bad.value));
        }
        Ok(Self { entries })
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&ResolutionEntry> {
        self.entries.get(index)
    }

    /// Step length in beats for the given index
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.value)
    }

    /// Index whose value is closest to `duration`. Ties resolve to the coarser entry.
    pub fn nearest_index(&self, duration: f64) -> usize {
        self.entries
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.value - duration).abs().total_cmp(&(b.value - duration).abs())
            })
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolutionEntry> {
        self.entries.iter()
    }
}
