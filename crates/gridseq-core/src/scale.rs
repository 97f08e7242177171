//! Scales used to map grid rows to pitches

use serde::{Deserialize, Serialize};

/// Octave offset for displayed note names
pub const NOTE_OCTAVE_OFFSET: i32 = -3;

/// Note names for display
pub const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Scale/mode types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleMode {
    #[default]
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    HarmonicMinor,
    MelodicMinor,
    Pentatonic,
    Blues,
    Chromatic,
}

impl ScaleMode {
    /// Get scale intervals (semitones from root)
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Self::Major => &[0, 2, 4, 5, 7, 9, 11],
            Self::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Self::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Self::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Self::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Self::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Self::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Self::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Self::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            Self::Pentatonic => &[0, 2, 4, 7, 9],
            Self::Blues => &[0, 3, 5, 6, 7, 10],
            Self::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    /// Semitones spanned by `rows` scale degrees counted from the root
    pub fn scroll_offset(&self, rows: u32) -> u32 {
        let intervals = self.intervals();
        let len = intervals.len() as u32;
        rows / len * 12 + intervals[(rows % len) as usize] as u32 - intervals[0] as u32
    }

    /// MIDI note for a grid row, or `None` above note 127
    pub fn row_to_note(&self, root: u8, row: u32) -> Option<u8> {
        let note = root as u32 + self.scroll_offset(row);
        u8::try_from(note).ok().filter(|n| *n <= 127)
    }
}

/// Note name with octave, e.g. "C2" for 60 with `NOTE_OCTAVE_OFFSET`
pub fn note_name(note: u8, octave_offset: i32) -> String {
    let octave = (note / 12) as i32 + octave_offset;
    format!("{}{}", NOTE_NAMES[(note % 12) as usize], octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset() {
        // Eight rows of C major span an octave plus a second
        assert_eq!(ScaleMode::Major.scroll_offset(8), 14);
        assert_eq!(ScaleMode::Major.scroll_offset(7), 12);
        assert_eq!(ScaleMode::Major.scroll_offset(0), 0);
        assert_eq!(ScaleMode::Chromatic.scroll_offset(8), 8);
        assert_eq!(ScaleMode::Pentatonic.scroll_offset(6), 14);
    }

    #[test]
    fn test_row_to_note() {
        assert_eq!(ScaleMode::Major.row_to_note(60, 0), Some(60));
        assert_eq!(ScaleMode::Major.row_to_note(60, 2), Some(64));
        assert_eq!(ScaleMode::Chromatic.row_to_note(120, 8), None);
    }

    #[test]
    fn test_note_name() {
        assert_eq!(note_name(60, NOTE_OCTAVE_OFFSET), "C2");
        assert_eq!(note_name(60, -2), "C3");
        assert_eq!(note_name(61, -3), "C#2");
        assert_eq!(note_name(0, -2), "C-2");
    }
}
