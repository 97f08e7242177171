//! Note data stored in the step grid

use serde::{Deserialize, Serialize};

use crate::resolution::TICKS_PER_BEAT;

/// Shortest allowed note duration in beats (one tick)
pub const MIN_DURATION: f64 = 1.0 / TICKS_PER_BEAT as f64;

/// Duration change per decoded encoder speed unit (a 1/32 note)
pub const DURATION_INCREMENT: f64 = 0.125;

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepState {
    /// No note starts or sounds here
    #[default]
    Off,
    /// A note started on an earlier step is still sounding
    Continue,
    /// A note starts here
    Start,
}

/// The continuous expressive parameters of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteParameter {
    Velocity,
    ReleaseVelocity,
    Pressure,
    Timbre,
    Pan,
    Transpose,
}

impl NoteParameter {
    pub const ALL: [NoteParameter; 6] = [
        Self::Velocity,
        Self::ReleaseVelocity,
        Self::Pressure,
        Self::Timbre,
        Self::Pan,
        Self::Transpose,
    ];

    /// Native value range (inclusive)
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Velocity | Self::ReleaseVelocity | Self::Pressure => (0.0, 1.0),
            Self::Timbre | Self::Pan => (-1.0, 1.0),
            Self::Transpose => (-24.0, 24.0),
        }
    }

    pub fn min(self) -> f64 {
        self.range().0
    }

    pub fn max(self) -> f64 {
        self.range().1
    }

    pub fn is_bipolar(self) -> bool {
        self.min() < 0.0
    }

    /// Value reported when no note exists: 0 for unipolar fields, the range
    /// midpoint for bipolar ones
    pub fn default_value(self) -> f64 {
        let (min, max) = self.range();
        if self.is_bipolar() { (min + max) / 2.0 } else { min }
    }

    /// Change applied per decoded encoder speed unit
    pub fn increment(self) -> f64 {
        match self {
            Self::Velocity | Self::ReleaseVelocity | Self::Pressure => 1.0 / 127.0,
            Self::Timbre | Self::Pan => 2.0 / 127.0,
            // Tenth of a semitone, matching the one-decimal pitch readout
            Self::Transpose => 0.1,
        }
    }

    /// Clamp into range. NaN falls back to the default value.
    pub fn clamp(self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default_value();
        }
        let (min, max) = self.range();
        value.clamp(min, max)
    }

    /// Map a native value onto 0..1 for display
    pub fn to_display(self, value: f64) -> f64 {
        let (min, max) = self.range();
        (self.clamp(value) - min) / (max - min)
    }

    /// Inverse of [`Self::to_display`]
    pub fn from_display(self, display: f64) -> f64 {
        let (min, max) = self.range();
        self.clamp(min + display.clamp(0.0, 1.0) * (max - min))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Velocity => "Velocity",
            Self::ReleaseVelocity => "R-Velocity",
            Self::Pressure => "Pressure",
            Self::Timbre => "Timbre",
            Self::Pan => "Pan",
            Self::Transpose => "Pitch",
        }
    }
}

/// Clamp a duration to the allowed minimum. Non-finite input becomes the minimum.
pub fn clamp_duration(duration: f64) -> f64 {
    if !duration.is_finite() {
        return MIN_DURATION;
    }
    duration.max(MIN_DURATION)
}

/// A note starting at a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Velocity (0.0 to 1.0)
    pub velocity: f64,
    /// Release velocity (0.0 to 1.0)
    pub release_velocity: f64,
    /// Pressure (0.0 to 1.0)
    pub pressure: f64,
    /// Timbre (-1.0 to 1.0)
    pub timbre: f64,
    /// Pan (-1.0 left, 0.0 center, 1.0 right)
    pub pan: f64,
    /// Transposition in semitones (-24.0 to 24.0)
    pub transpose: f64,
    /// Length in beats, independent of the grid resolution
    pub duration: f64,
}

impl Note {
    pub fn new(velocity: f64, duration: f64) -> Self {
        Self {
            velocity: NoteParameter::Velocity.clamp(velocity),
            release_velocity: NoteParameter::ReleaseVelocity.default_value(),
            pressure: NoteParameter::Pressure.default_value(),
            timbre: NoteParameter::Timbre.default_value(),
            pan: NoteParameter::Pan.default_value(),
            transpose: NoteParameter::Transpose.default_value(),
            duration: clamp_duration(duration),
        }
    }

    pub fn get(&self, param: NoteParameter) -> f64 {
        match param {
            NoteParameter::Velocity => self.velocity,
            NoteParameter::ReleaseVelocity => self.release_velocity,
            NoteParameter::Pressure => self.pressure,
            NoteParameter::Timbre => self.timbre,
            NoteParameter::Pan => self.pan,
            NoteParameter::Transpose => self.transpose,
        }
    }

    /// Set a parameter, clamped to its range
    pub fn set(&mut self, param: NoteParameter, value: f64) {
        let value = param.clamp(value);
        match param {
            NoteParameter::Velocity => self.velocity = value,
            NoteParameter::ReleaseVelocity => self.release_velocity = value,
            NoteParameter::Pressure => self.pressure = value,
            NoteParameter::Timbre => self.timbre = value,
            NoteParameter::Pan => self.pan = value,
            NoteParameter::Transpose => self.transpose = value,
        }
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = clamp_duration(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(NoteParameter::Velocity.default_value(), 0.0);
        assert_eq!(NoteParameter::Pressure.default_value(), 0.0);
        assert_eq!(NoteParameter::Timbre.default_value(), 0.0);
        assert_eq!(NoteParameter::Pan.default_value(), 0.0);
        assert_eq!(NoteParameter::Transpose.default_value(), 0.0);
    }

    #[test]
    fn test_display_mapping() {
        assert_eq!(NoteParameter::Velocity.to_display(0.8), 0.8);
        assert_eq!(NoteParameter::Pan.to_display(-1.0), 0.0);
        assert_eq!(NoteParameter::Pan.to_display(0.0), 0.5);
        assert_eq!(NoteParameter::Timbre.to_display(1.0), 1.0);
        assert_eq!(NoteParameter::Transpose.to_display(-24.0), 0.0);
        assert_eq!(NoteParameter::Transpose.to_display(12.0), 0.75);
        assert_eq!(NoteParameter::Transpose.from_display(0.75), 12.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(NoteParameter::Velocity.clamp(1.5), 1.0);
        assert_eq!(NoteParameter::Pan.clamp(-3.0), -1.0);
        assert_eq!(NoteParameter::Transpose.clamp(30.0), 24.0);
        assert_eq!(NoteParameter::Timbre.clamp(f64::NAN), 0.0);
    }

    #[test]
    fn test_note_setters_clamp() {
        let mut note = Note::new(2.0, -1.0);
        assert_eq!(note.velocity, 1.0);
        assert_eq!(note.duration, MIN_DURATION);

        note.set(NoteParameter::Transpose, -100.0);
        assert_eq!(note.get(NoteParameter::Transpose), -24.0);

        note.set_duration(f64::INFINITY);
        assert_eq!(note.duration, MIN_DURATION);
        note.set_duration(1.5);
        assert_eq!(note.duration, 1.5);
    }
}
