//! Note grid: the authoritative note data of one clip
//!
//! Notes are keyed by row and absolute start tick, so changing the grid
//! resolution changes which step a note is addressed by but never moves it.
//! Continue states are derived on every query from the preceding Start notes
//! of the same row; nothing per continuing step is stored.

use std::collections::BTreeMap;

use crate::error::{GridseqError, Result};
use crate::note::{DURATION_INCREMENT, Note, NoteParameter, StepState};
use crate::resolution::{ResolutionEntry, ticks_to_beats};

/// Tolerance for comparing note ends against step starts in beats
const EPSILON: f64 = 1e-9;

macro_rules! parameter_accessors {
    ($($param:ident => $get:ident, $update:ident, $change:ident;)*) => {
        $(
            pub fn $get(&self, step: u32, row: u32) -> f64 {
                self.get(NoteParameter::$param, step, row)
            }

            pub fn $update(&mut self, step: u32, row: u32, value: f64) {
                self.update(NoteParameter::$param, step, row, value);
            }

            pub fn $change(&mut self, step: u32, row: u32, delta: i32) {
                self.change(NoteParameter::$param, step, row, delta);
            }
        )*
    };
}

#[derive(Debug, Clone)]
pub struct NoteGrid {
    /// (row, start tick) -> note
    notes: BTreeMap<(u32, u64), Note>,
    num_rows: u32,
    /// Length of one step in ticks
    step_ticks: u64,
}

impl NoteGrid {
    pub fn new(num_rows: u32, resolution: &ResolutionEntry) -> Result<Self> {
        if num_rows == 0 {
            return Err(GridseqError::InvalidRowCount);
        }
        let step_ticks = resolution.ticks();
        if step_ticks == 0 {
            return Err(GridseqError::InvalidResolution(resolution.value));
        }
        Ok(Self {
            notes: BTreeMap::new(),
            num_rows,
            step_ticks,
        })
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    /// Current step length in beats
    pub fn step_length(&self) -> f64 {
        ticks_to_beats(self.step_ticks)
    }

    /// Change the grid unit. Stored notes keep their position and duration.
    pub fn set_resolution(&mut self, resolution: &ResolutionEntry) {
        let ticks = resolution.ticks();
        if ticks == 0 {
            tracing::warn!("Ignoring zero-length resolution {}", resolution.name);
            return;
        }
        self.step_ticks = ticks;
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn key(&self, step: u32, row: u32) -> Option<(u32, u64)> {
        if row >= self.num_rows {
            return None;
        }
        Some((row, (step as u64).checked_mul(self.step_ticks)?))
    }

    /// The note starting exactly at this cell
    pub fn note(&self, step: u32, row: u32) -> Option<&Note> {
        self.key(step, row).and_then(|k| self.notes.get(&k))
    }

    fn note_mut(&mut self, step: u32, row: u32) -> Option<&mut Note> {
        let key = self.key(step, row)?;
        self.notes.get_mut(&key)
    }

    pub fn get_step(&self, step: u32, row: u32) -> StepState {
        let Some(key) = self.key(step, row) else {
            return StepState::Off;
        };
        if self.notes.contains_key(&key) {
            return StepState::Start;
        }

        let (row, tick) = key;
        let step_start = ticks_to_beats(tick);
        let sounding = self
            .notes
            .range((row, 0)..(row, tick))
            .any(|(&(_, start), note)| ticks_to_beats(start) + note.duration > step_start + EPSILON);

        if sounding { StepState::Continue } else { StepState::Off }
    }

    /// Create or replace the note starting at this cell
    pub fn set_step(&mut self, step: u32, row: u32, velocity: f64, duration: f64) {
        let Some(key) = self.key(step, row) else {
            tracing::trace!("set_step outside grid: step={} row={}", step, row);
            return;
        };
        let note = Note::new(velocity, duration);
        tracing::debug!(
            "Set step {} row {} velocity={:.3} duration={:.3}",
            step, row, note.velocity, note.duration
        );
        self.notes.insert(key, note);
    }

    /// Remove the note starting here, or create one lasting one step
    pub fn toggle_step(&mut self, step: u32, row: u32, velocity: f64) {
        let Some(key) = self.key(step, row) else {
            return;
        };
        if self.notes.remove(&key).is_some() {
            tracing::debug!("Toggle off step {} row {}", step, row);
            return;
        }
        let note = Note::new(velocity, self.step_length());
        tracing::debug!("Toggle on step {} row {}", step, row);
        self.notes.insert(key, note);
    }

    /// Remove the note starting exactly at this cell. Notes merely passing
    /// through are untouched.
    pub fn clear_step(&mut self, step: u32, row: u32) {
        let Some(key) = self.key(step, row) else {
            return;
        };
        if self.notes.remove(&key).is_some() {
            tracing::debug!("Cleared step {} row {}", step, row);
        }
    }

    pub fn clear_row(&mut self, row: u32) {
        let before = self.notes.len();
        self.notes.retain(|&(r, _), _| r != row);
        let removed = before - self.notes.len();
        if removed > 0 {
            tracing::debug!("Cleared {} notes from row {}", removed, row);
        }
    }

    /// Remove every note (used when the backing clip is replaced)
    pub fn clear(&mut self) {
        self.notes.clear();
    }

    // ========================================================================
    // Note parameters
    // ========================================================================

    /// Read a parameter of the note starting here, or its default if there is none
    pub fn get(&self, param: NoteParameter, step: u32, row: u32) -> f64 {
        self.note(step, row)
            .map_or_else(|| param.default_value(), |n| n.get(param))
    }

    /// Set an absolute value (clamped). No-op without a note.
    pub fn update(&mut self, param: NoteParameter, step: u32, row: u32, value: f64) {
        let Some(note) = self.note_mut(step, row) else {
            tracing::trace!("No note at step {} row {}, dropping {:?} update", step, row, param);
            return;
        };
        note.set(param, value);
    }

    /// Apply `delta` speed units of the parameter's increment (clamped).
    /// No-op without a note or for a zero delta.
    pub fn change(&mut self, param: NoteParameter, step: u32, row: u32, delta: i32) {
        if delta == 0 {
            return;
        }
        let Some(note) = self.note_mut(step, row) else {
            tracing::trace!("No note at step {} row {}, dropping {:?} change", step, row, param);
            return;
        };
        let value = note.get(param) + delta as f64 * param.increment();
        note.set(param, value);
    }

    parameter_accessors! {
        Velocity => get_step_velocity, update_step_velocity, change_step_velocity;
        ReleaseVelocity => get_step_release_velocity, update_step_release_velocity, change_step_release_velocity;
        Pressure => get_step_pressure, update_step_pressure, change_step_pressure;
        Timbre => get_step_timbre, update_step_timbre, change_step_timbre;
        Pan => get_step_pan, update_step_pan, change_step_pan;
        Transpose => get_step_transpose, update_step_transpose, change_step_transpose;
    }

    /// Duration in beats of the note starting here, 0 if there is none
    pub fn get_step_duration(&self, step: u32, row: u32) -> f64 {
        self.note(step, row).map_or(0.0, |n| n.duration)
    }

    pub fn update_step_duration(&mut self, step: u32, row: u32, duration: f64) {
        if let Some(note) = self.note_mut(step, row) {
            note.set_duration(duration);
        }
    }

    /// Lengthen or shorten by `delta` 1/32 notes
    pub fn change_step_duration(&mut self, step: u32, row: u32, delta: i32) {
        if delta == 0 {
            return;
        }
        if let Some(note) = self.note_mut(step, row) {
            note.set_duration(note.duration + delta as f64 * DURATION_INCREMENT);
        }
    }

    // ========================================================================
    // Row queries
    // ========================================================================

    pub fn has_row_data(&self, row: u32) -> bool {
        self.notes.range((row, 0)..=(row, u64::MAX)).next().is_some()
    }

    /// Lowest row holding a note, `None` for an empty grid
    pub fn lower_row_with_data(&self) -> Option<u32> {
        self.notes.first_key_value().map(|(&(row, _), _)| row)
    }

    /// Highest row holding a note, `None` for an empty grid
    pub fn upper_row_with_data(&self) -> Option<u32> {
        self.notes.last_key_value().map(|(&(row, _), _)| row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::ResolutionTable;

    fn grid() -> NoteGrid {
        let table = ResolutionTable::default();
        NoteGrid::new(8, table.get(4).unwrap()).unwrap()
    }

    #[test]
    fn test_set_step_spans_continue() {
        let mut grid = grid();
        grid.set_step(2, 3, 0.8, 0.5);
        assert_eq!(grid.get_step(2, 3), StepState::Start);
        assert_eq!(grid.get_step(3, 3), StepState::Continue);
        assert_eq!(grid.get_step(4, 3), StepState::Off);
        assert_eq!(grid.get_step(1, 3), StepState::Off);
        assert_eq!(grid.get_step(3, 2), StepState::Off);
        assert_eq!(grid.get_step_velocity(2, 3), 0.8);
    }

    #[test]
    fn test_change_velocity_clamps() {
        let mut grid = grid();
        grid.set_step(2, 3, 0.8, 0.5);
        grid.change_step_velocity(2, 3, 1);
        assert!((grid.get_step_velocity(2, 3) - (0.8 + 1.0 / 127.0)).abs() < 1e-12);
        grid.change_step_velocity(2, 3, 500);
        assert_eq!(grid.get_step_velocity(2, 3), 1.0);
        grid.change_step_velocity(2, 3, -1000);
        assert_eq!(grid.get_step_velocity(2, 3), 0.0);
    }

    #[test]
    fn test_clear_step_removes_continuation() {
        let mut grid = grid();
        grid.set_step(2, 3, 0.8, 0.5);
        grid.clear_step(2, 3);
        assert_eq!(grid.get_step(2, 3), StepState::Off);
        assert_eq!(grid.get_step(3, 3), StepState::Off);
    }

    #[test]
    fn test_clear_continue_cell_is_noop() {
        let mut grid = grid();
        grid.set_step(0, 1, 1.0, 1.0);
        grid.clear_step(2, 1);
        assert_eq!(grid.get_step(0, 1), StepState::Start);
        assert_eq!(grid.get_step(2, 1), StepState::Continue);
        grid.clear_step(2, 1);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_toggle_uses_step_length() {
        let mut grid = grid();
        grid.toggle_step(5, 0, 0.5);
        assert_eq!(grid.get_step(5, 0), StepState::Start);
        assert_eq!(grid.get_step_duration(5, 0), 0.25);
        assert_eq!(grid.get_step(6, 0), StepState::Off);
        grid.toggle_step(5, 0, 0.5);
        assert_eq!(grid.get_step(5, 0), StepState::Off);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_missing_note_reads_defaults_and_ignores_edits() {
        let mut grid = grid();
        assert_eq!(grid.get_step_velocity(0, 0), 0.0);
        assert_eq!(grid.get_step_pan(0, 0), 0.0);
        assert_eq!(grid.get_step_duration(0, 0), 0.0);
        grid.update_step_velocity(0, 0, 0.7);
        grid.change_step_timbre(0, 0, 3);
        grid.update_step_duration(0, 0, 2.0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_out_of_range_row() {
        let mut grid = grid();
        grid.set_step(0, 8, 1.0, 1.0);
        assert!(grid.is_empty());
        assert_eq!(grid.get_step(0, 8), StepState::Off);
        assert_eq!(grid.get_step(0, u32::MAX), StepState::Off);
    }

    #[test]
    fn test_clear_row() {
        let mut grid = grid();
        grid.set_step(0, 1, 1.0, 0.25);
        grid.set_step(4, 1, 1.0, 0.25);
        grid.set_step(4, 2, 1.0, 0.25);
        grid.clear_row(1);
        assert!(!grid.has_row_data(1));
        assert!(grid.has_row_data(2));
        grid.clear_row(1);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_rows_with_data() {
        let mut grid = grid();
        assert_eq!(grid.lower_row_with_data(), None);
        assert_eq!(grid.upper_row_with_data(), None);
        grid.set_step(3, 0, 1.0, 0.25);
        assert_eq!(grid.lower_row_with_data(), Some(0));
        assert_eq!(grid.upper_row_with_data(), Some(0));
        grid.set_step(0, 6, 1.0, 0.25);
        grid.set_step(9, 2, 1.0, 0.25);
        assert_eq!(grid.lower_row_with_data(), Some(0));
        assert_eq!(grid.upper_row_with_data(), Some(6));
    }

    #[test]
    fn test_duration_changes() {
        let mut grid = grid();
        grid.set_step(0, 0, 1.0, 0.25);
        grid.change_step_duration(0, 0, 2);
        assert_eq!(grid.get_step_duration(0, 0), 0.5);
        assert_eq!(grid.get_step(1, 0), StepState::Continue);
        grid.change_step_duration(0, 0, -10);
        assert_eq!(grid.get_step_duration(0, 0), crate::note::MIN_DURATION);
        assert_eq!(grid.get_step(1, 0), StepState::Off);
    }

    #[test]
    fn test_resolution_change_keeps_note_position() {
        let table = ResolutionTable::default();
        let mut grid = grid();
        grid.set_step(2, 0, 1.0, 0.5);

        // 1/8 grid: the note at beat 0.5 is now step 1
        grid.set_resolution(table.get(2).unwrap());
        assert_eq!(grid.get_step(1, 0), StepState::Start);
        assert_eq!(grid.get_step(2, 0), StepState::Off);
        assert_eq!(grid.get_step_duration(1, 0), 0.5);

        // 1/32 grid: step 4 starts, steps 5..=7 continue
        grid.set_resolution(table.get(6).unwrap());
        assert_eq!(grid.get_step(4, 0), StepState::Start);
        assert_eq!(grid.get_step(7, 0), StepState::Continue);
        assert_eq!(grid.get_step(8, 0), StepState::Off);
    }

    #[test]
    fn test_steps_past_tick_range_are_off() {
        let mut grid = NoteGrid::new(8, &ResolutionEntry::new("huge", 1e13)).unwrap();
        assert_eq!(grid.get_step(10_000, 0), StepState::Off);
        grid.set_step(10_000, 0, 1.0, 1.0);
        grid.toggle_step(u32::MAX, 0, 1.0);
        assert!(grid.is_empty());
        grid.set_step(1, 0, 1.0, 1.0);
        assert_eq!(grid.get_step(1, 0), StepState::Start);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut grid = grid();
        grid.set_step(0, 0, 0.5, 0.25);
        grid.change_step_pan(0, 0, 0);
        grid.change_step_duration(0, 0, 0);
        assert_eq!(grid.get_step_pan(0, 0), 0.0);
        assert_eq!(grid.get_step_duration(0, 0), 0.25);
    }
}
