//! Text formatting for parameter readouts

use crate::resolution::{TICKS_PER_BEAT, beats_to_ticks};

const TICKS_PER_SIXTEENTH: u64 = TICKS_PER_BEAT as u64 / 4;

/// "80.0%" for 0.8
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// One-decimal semitone readout
pub fn format_semitones(value: f64) -> String {
    format!("{:.1}", value)
}

/// Length as `measures.beats.sixteenths:ticks`, all zero-based
pub fn format_measures(quarters_per_measure: u32, beats: f64) -> String {
    let ticks = beats_to_ticks(beats);
    let measure_ticks = quarters_per_measure.max(1) as u64 * TICKS_PER_BEAT as u64;

    let measures = ticks / measure_ticks;
    let rest = ticks % measure_ticks;
    let quarters = rest / TICKS_PER_BEAT as u64;
    let rest = rest % TICKS_PER_BEAT as u64;
    let sixteenths = rest / TICKS_PER_SIXTEENTH;
    let rest = rest % TICKS_PER_SIXTEENTH;

    format!("{}.{}.{}:{:03}", measures, quarters, sixteenths, rest)
}
