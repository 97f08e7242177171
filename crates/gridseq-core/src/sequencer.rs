//! Step sequencer session for one clip
//!
//! Owns the note grid together with the page navigator and the selected
//! resolution so that a resolution change updates both in one call.

use crate::config::SequencerConfig;
use crate::editor::ParameterEditor;
use crate::error::{GridseqError, Result};
use crate::grid::NoteGrid;
use crate::indicator::{ResolutionColor, StepColor, resolution_color, step_color};
use crate::page::{PageColor, PageNavigator, page_color};
use crate::resolution::{ResolutionEntry, ResolutionTable};

#[derive(Debug, Clone)]
pub struct StepSequencer {
    config: SequencerConfig,
    resolutions: ResolutionTable,
    resolution_index: usize,
    /// Entry at `resolution_index`
    resolution: ResolutionEntry,
    grid: NoteGrid,
    navigator: PageNavigator,
    editor: ParameterEditor,
    /// Selected track can hold notes and the clip exists
    active: bool,
}

impl StepSequencer {
    pub fn new(config: SequencerConfig, clip_length: f64) -> Result<Self> {
        config.validate()?;
        let resolutions = config.resolution_table()?;
        let resolution_index = config.resolution_index;
        let resolution = resolutions
            .get(resolution_index)
            .cloned()
            .ok_or(GridseqError::ResolutionOutOfRange {
                index: resolution_index,
                count: resolutions.count(),
            })?;

        let grid = NoteGrid::new(config.rows, &resolution)?;
        let navigator = PageNavigator::new(config.page_size, &resolution, clip_length)?;
        let editor = ParameterEditor::new(&config);

        Ok(Self {
            config,
            resolutions,
            resolution_index,
            resolution,
            grid,
            navigator,
            editor,
            active: true,
        })
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn grid(&self) -> &NoteGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut NoteGrid {
        &mut self.grid
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    pub fn editor(&self) -> &ParameterEditor {
        &self.editor
    }

    pub fn resolutions(&self) -> &ResolutionTable {
        &self.resolutions
    }

    /// Replace the backing clip: empty grid, first page
    pub fn load_clip(&mut self, clip_length: f64) {
        self.grid.clear();
        self.navigator.reset(clip_length);
        self.editor.set_values(0, 0);
        tracing::debug!("Loaded clip of {} beats", clip_length);
    }

    pub fn set_clip_length(&mut self, clip_length: f64) {
        self.navigator.set_clip_length(clip_length);
    }

    /// Refresh activity from the host's track and clip state
    pub fn update_activity(&mut self, track_holds_notes: bool, clip_exists: bool) {
        self.active = track_holds_notes && clip_exists;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    pub fn resolution_index(&self) -> usize {
        self.resolution_index
    }

    pub fn resolution(&self) -> &ResolutionEntry {
        &self.resolution
    }

    /// Switch the grid unit for both editing and paging
    pub fn select_resolution(&mut self, index: usize) -> Result<&ResolutionEntry> {
        let Some(entry) = self.resolutions.get(index) else {
            tracing::warn!("Resolution index {} out of range", index);
            return Err(GridseqError::ResolutionOutOfRange {
                index,
                count: self.resolutions.count(),
            });
        };
        self.grid.set_resolution(entry);
        self.navigator.set_resolution(entry);
        self.resolution_index = index;
        self.resolution = entry.clone();
        tracing::debug!("Resolution set to {}", entry.name);
        Ok(&self.resolution)
    }

    /// Scene buttons select resolutions from the finest (top) to the
    /// coarsest. Returns the name to notify, or `None` when ignored.
    pub fn on_scene(&mut self, scene: usize) -> Option<String> {
        if !self.active {
            return None;
        }
        let index = self.resolutions.count().checked_sub(scene.checked_add(1)?)?;
        self.select_resolution(index).ok().map(|e| e.name.clone())
    }

    pub fn resolution_colors(&self) -> Vec<ResolutionColor> {
        (0..self.resolutions.count())
            .map(|i| resolution_color(self.active, self.resolution_index, i))
            .collect()
    }

    // ========================================================================
    // Paging
    // ========================================================================

    pub fn on_left(&mut self) {
        if self.active {
            self.navigator.page_backward();
        }
    }

    pub fn on_right(&mut self) {
        if self.active {
            self.navigator.page_forward();
        }
    }

    pub fn is_in_x_range(&self, step: u64) -> bool {
        self.navigator.is_in_current_page(step)
    }

    pub fn length_of_one_page(&self, display_steps: u32) -> u64 {
        self.navigator.page_length(display_steps)
    }

    /// Page indicator relative to the page being edited
    pub fn page_color(&self, loop_start: u64, loop_end: u64, play_step: Option<u64>, page: u64) -> PageColor {
        let play_page = play_step.map(|s| self.navigator.page_of_step(s));
        page_color(loop_start, loop_end, play_page, self.navigator.edit_page(), page)
    }

    /// Semitones between the first and the last displayed row
    pub fn scroll_offset(&self) -> u32 {
        self.config.scale.scroll_offset(self.config.rows)
    }

    /// MIDI note of a row in the configured scale, `None` above note 127
    pub fn row_note(&self, row: u32) -> Option<u8> {
        self.config.scale.row_to_note(self.config.root_note, row)
    }

    /// Absolute step of a visible column, `None` past the addressable range
    fn column_step(&self, column: u32) -> Option<u32> {
        u32::try_from(self.navigator.first_step() + column as u64).ok()
    }

    /// Cell colors of one row across the visible page
    pub fn row_colors(&self, row: u32, play_step: Option<u64>) -> Vec<StepColor> {
        (0..self.navigator.page_size())
            .map(|column| {
                let absolute = self.navigator.first_step() + column as u64;
                let state = self
                    .column_step(column)
                    .map(|step| self.grid.get_step(step, row))
                    .unwrap_or_default();
                step_color(state, play_step == Some(absolute))
            })
            .collect()
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Pad press on a visible cell
    pub fn on_grid_press(&mut self, column: u32, row: u32, velocity: Option<f64>) {
        if !self.active || column >= self.navigator.page_size() {
            return;
        }
        let Some(step) = self.column_step(column) else {
            return;
        };
        let velocity = velocity.unwrap_or(self.config.default_velocity);
        self.grid.toggle_step(step, row, velocity);
    }

    /// Choose the visible cell the parameter knobs edit
    pub fn select_note(&mut self, column: u32, row: u32) {
        if let Some(step) = self.column_step(column) {
            self.editor.set_values(step, row);
        }
    }

    pub fn on_knob_value(&mut self, index: usize, control: i32, fast: bool) {
        self.editor.on_knob_value(&mut self.grid, index, control, fast);
    }
}
