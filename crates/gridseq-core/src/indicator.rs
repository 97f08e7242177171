//! Grid cell and resolution button indicators

use serde::{Deserialize, Serialize};

use crate::note::StepState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepColor {
    /// Playing step with a note starting or sounding
    HiliteContent,
    /// Playing step without content
    HiliteNoContent,
    /// Note start
    Content,
    /// Note continuation
    ContentCont,
    NoContent,
}

pub fn step_color(state: StepState, is_play_step: bool) -> StepColor {
    match (is_play_step, state) {
        (true, StepState::Off) => StepColor::HiliteNoContent,
        (true, _) => StepColor::HiliteContent,
        (false, StepState::Start) => StepColor::Content,
        (false, StepState::Continue) => StepColor::ContentCont,
        (false, StepState::Off) => StepColor::NoContent,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionColor {
    /// Sequencer inactive
    Off,
    Resolution,
    Selected,
}

pub fn resolution_color(active: bool, selected_index: usize, index: usize) -> ResolutionColor {
    if !active {
        return ResolutionColor::Off;
    }
    if index == selected_index {
        ResolutionColor::Selected
    } else {
        ResolutionColor::Resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_colors() {
        assert_eq!(step_color(StepState::Start, false), StepColor::Content);
        assert_eq!(step_color(StepState::Continue, false), StepColor::ContentCont);
        assert_eq!(step_color(StepState::Off, false), StepColor::NoContent);
        assert_eq!(step_color(StepState::Start, true), StepColor::HiliteContent);
        assert_eq!(step_color(StepState::Continue, true), StepColor::HiliteContent);
        assert_eq!(step_color(StepState::Off, true), StepColor::HiliteNoContent);
    }

    #[test]
    fn test_resolution_colors() {
        assert_eq!(resolution_color(false, 4, 4), ResolutionColor::Off);
        assert_eq!(resolution_color(true, 4, 4), ResolutionColor::Selected);
        assert_eq!(resolution_color(true, 4, 3), ResolutionColor::Resolution);
    }
}
