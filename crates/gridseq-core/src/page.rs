//! Page navigation over the step timeline
//!
//! A page is `page_size` consecutive steps. The step count comes from the
//! clip length and the current step length, so both are kept here as ticks
//! and the totals are recomputed whenever either changes.

use serde::{Deserialize, Serialize};

use crate::error::{GridseqError, Result};
use crate::resolution::{ResolutionEntry, beats_to_ticks, ticks_to_beats};

/// Indicator for a page button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageColor {
    /// Page holding the play position
    Active,
    /// Page selected for editing
    Selected,
    /// Page outside the loop range
    OutsideLoop,
    /// Any other page inside the loop range
    Page,
}

/// Indicator color for `page`. Play position wins over selection, selection
/// wins over loop membership. The loop range is `[loop_start, loop_end)`.
pub fn page_color(
    loop_start: u64,
    loop_end: u64,
    play_page: Option<u64>,
    selected_page: u64,
    page: u64,
) -> PageColor {
    if play_page == Some(page) {
        return PageColor::Active;
    }
    if page == selected_page {
        return PageColor::Selected;
    }
    if page < loop_start || page >= loop_end {
        return PageColor::OutsideLoop;
    }
    PageColor::Page
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageNavigator {
    page_size: u32,
    page: u64,
    clip_ticks: u64,
    step_ticks: u64,
}

impl PageNavigator {
    pub fn new(page_size: u32, resolution: &ResolutionEntry, clip_length: f64) -> Result<Self> {
        if page_size == 0 {
            return Err(GridseqError::InvalidPageSize);
        }
        let step_ticks = resolution.ticks();
        if step_ticks == 0 {
            return Err(GridseqError::InvalidResolution(resolution.value));
        }
        Ok(Self {
            page_size,
            page: 0,
            clip_ticks: beats_to_ticks(clip_length.max(0.0)),
            step_ticks,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Step length in beats
    pub fn step_length(&self) -> f64 {
        ticks_to_beats(self.step_ticks)
    }

    /// Clip length in beats
    pub fn clip_length(&self) -> f64 {
        ticks_to_beats(self.clip_ticks)
    }

    pub fn total_steps(&self) -> u64 {
        self.clip_ticks.div_ceil(self.step_ticks)
    }

    /// Number of pages, never less than one
    pub fn total_pages(&self) -> u64 {
        self.total_steps().div_ceil(self.page_size as u64).max(1)
    }

    /// Page currently shown for editing
    pub fn edit_page(&self) -> u64 {
        self.page
    }

    /// First absolute step of the current page
    pub fn first_step(&self) -> u64 {
        self.page * self.page_size as u64
    }

    pub fn page_of_step(&self, step: u64) -> u64 {
        step / self.page_size as u64
    }

    pub fn scroll_to_page(&mut self, page: u64) {
        let page = page.min(self.total_pages() - 1);
        if page != self.page {
            tracing::debug!("Scrolled to page {}", page);
        }
        self.page = page;
    }

    pub fn page_backward(&mut self) {
        if self.can_scroll_backwards() {
            self.scroll_to_page(self.page - 1);
        }
    }

    pub fn page_forward(&mut self) {
        if self.can_scroll_forwards() {
            self.scroll_to_page(self.page + 1);
        }
    }

    pub fn can_scroll_backwards(&self) -> bool {
        self.page > 0
    }

    pub fn can_scroll_forwards(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// Whether an absolute step index lies in the visible window
    pub fn is_in_current_page(&self, step: u64) -> bool {
        let start = self.first_step();
        step >= start && step < start + self.page_size as u64
    }

    /// Musical length in whole beats of `display_steps` cells at the current resolution
    pub fn page_length(&self, display_steps: u32) -> u64 {
        (display_steps as f64 * self.step_length()).floor() as u64
    }

    /// Point at a new clip and go back to the first page
    pub fn reset(&mut self, clip_length: f64) {
        self.clip_ticks = beats_to_ticks(clip_length.max(0.0));
        self.page = 0;
    }

    /// Update the clip length, keeping the page if it still exists
    pub fn set_clip_length(&mut self, clip_length: f64) {
        self.clip_ticks = beats_to_ticks(clip_length.max(0.0));
        self.scroll_to_page(self.page);
    }

    /// Switch resolution, keeping the page that contains the beat previously
    /// shown first
    pub fn set_resolution(&mut self, resolution: &ResolutionEntry) {
        let ticks = resolution.ticks();
        if ticks == 0 {
            return;
        }
        let first_tick = self.first_step().saturating_mul(self.step_ticks);
        self.step_ticks = ticks;
        let page_ticks = ticks.saturating_mul(self.page_size as u64);
        self.page = (first_tick / page_ticks).min(self.total_pages() - 1);
    }
}
