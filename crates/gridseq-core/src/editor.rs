//! Note parameter editing from encoders and direct value input
//!
//! The editor never keeps a reference to the grid; every call borrows it.
//! Edits on cells without a note are dropped by the grid itself.

use serde::{Deserialize, Serialize};

use crate::config::SequencerConfig;
use crate::encoder::ValueChanger;
use crate::format::{format_measures, format_percentage, format_semitones};
use crate::grid::NoteGrid;
use crate::note::NoteParameter;
use crate::scale::{NOTE_OCTAVE_OFFSET, note_name};

/// What an encoder edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnobTarget {
    Duration,
    Parameter(NoteParameter),
}

impl KnobTarget {
    /// Knob layout of the note editing mode; knob 0 and knobs past 7 are unused
    pub fn from_knob_index(index: usize) -> Option<Self> {
        match index {
            1 => Some(Self::Duration),
            2 => Some(Self::Parameter(NoteParameter::Velocity)),
            3 => Some(Self::Parameter(NoteParameter::ReleaseVelocity)),
            4 => Some(Self::Parameter(NoteParameter::Pressure)),
            5 => Some(Self::Parameter(NoteParameter::Timbre)),
            6 => Some(Self::Parameter(NoteParameter::Pan)),
            7 => Some(Self::Parameter(NoteParameter::Transpose)),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Duration => "Length",
            Self::Parameter(param) => param.label(),
        }
    }
}

/// One column of the parameter readout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterCell {
    pub label: &'static str,
    pub text: String,
    /// Normalized 0..1 value, absent for the length column
    pub display: Option<f64>,
    /// Integer control value derived from `display`
    pub control: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct ParameterEditor {
    value_changer: ValueChanger,
    quarters_per_measure: u32,
    step: u32,
    row: u32,
}

impl ParameterEditor {
    pub fn new(config: &SequencerConfig) -> Self {
        Self {
            value_changer: ValueChanger::new(&config.encoder),
            quarters_per_measure: config.quarters_per_measure,
            step: 0,
            row: 0,
        }
    }

    pub fn value_changer(&self) -> &ValueChanger {
        &self.value_changer
    }

    /// Select the cell the knobs edit
    pub fn set_values(&mut self, step: u32, row: u32) {
        self.step = step;
        self.row = row;
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// Route a knob turn to the selected cell
    pub fn on_knob_value(&self, grid: &mut NoteGrid, index: usize, control: i32, fast: bool) {
        let Some(target) = KnobTarget::from_knob_index(index) else {
            return;
        };
        self.change(grid, target, self.step, self.row, control, fast);
    }

    /// Apply a raw relative control value
    pub fn change(
        &self,
        grid: &mut NoteGrid,
        target: KnobTarget,
        step: u32,
        row: u32,
        control: i32,
        fast: bool,
    ) {
        let speed = self.value_changer.decode(control, fast);
        if speed == 0 {
            return;
        }
        match target {
            KnobTarget::Duration => grid.change_step_duration(step, row, speed),
            KnobTarget::Parameter(param) => grid.change(param, step, row, speed),
        }
    }

    /// Set an absolute native value
    pub fn set(&self, grid: &mut NoteGrid, param: NoteParameter, step: u32, row: u32, value: f64) {
        grid.update(param, step, row, value);
    }

    /// Set from a normalized 0..1 display value
    pub fn set_display(
        &self,
        grid: &mut NoteGrid,
        param: NoteParameter,
        step: u32,
        row: u32,
        display: f64,
    ) {
        grid.update(param, step, row, param.from_display(display));
    }

    pub fn display_value(&self, grid: &NoteGrid, param: NoteParameter, step: u32, row: u32) -> f64 {
        param.to_display(grid.get(param, step, row))
    }

    pub fn control_value(&self, grid: &NoteGrid, param: NoteParameter, step: u32, row: u32) -> i32 {
        self.value_changer
            .normalized_to_control(self.display_value(grid, param, step, row))
    }

    /// Readout for the selected cell: length first, then every parameter
    pub fn cells(&self, grid: &NoteGrid) -> Vec<ParameterCell> {
        let (step, row) = (self.step, self.row);
        let length = grid.get_step_duration(step, row);

        let mut cells = vec![ParameterCell {
            label: KnobTarget::Duration.label(),
            text: format_measures(self.quarters_per_measure, length),
            display: None,
            control: None,
        }];

        cells.extend(NoteParameter::ALL.iter().map(|&param| {
            let value = grid.get(param, step, row);
            let text = match param {
                NoteParameter::Transpose => format_semitones(value),
                _ => format_percentage(value),
            };
            let display = param.to_display(value);
            ParameterCell {
                label: param.label(),
                text,
                display: Some(display),
                control: Some(self.value_changer.normalized_to_control(display)),
            }
        }));
        cells
    }

    /// Header lines: 1-based step and the note name of the edited row
    pub fn header(&self, note: u8) -> (String, String) {
        (
            format!("Step: {}", self.step + 1),
            format!("Note: {}", note_name(note, NOTE_OCTAVE_OFFSET)),
        )
    }
}
