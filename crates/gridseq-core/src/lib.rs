//! gridseq-core: editing and paging state for a step note sequencer

pub mod browse;
pub mod config;
pub mod editor;
pub mod encoder;
mod error;
pub mod format;
pub mod grid;
pub mod indicator;
pub mod note;
pub mod page;
pub mod resolution;
pub mod scale;
mod sequencer;

pub use browse::{BrowseControl, ListCursor};
pub use config::{EncoderConfig, SequencerConfig};
pub use editor::{KnobTarget, ParameterCell, ParameterEditor};
pub use encoder::{MovementThrottle, ValueChanger};
pub use error::{GridseqError, Result};
pub use grid::NoteGrid;
pub use indicator::{ResolutionColor, StepColor, resolution_color, step_color};
pub use note::{MIN_DURATION, Note, NoteParameter, StepState};
pub use page::{PageColor, PageNavigator, page_color};
pub use resolution::{ResolutionEntry, ResolutionTable, TICKS_PER_BEAT};
pub use scale::{NOTE_OCTAVE_OFFSET, ScaleMode, note_name};
pub use sequencer::StepSequencer;
