//! Throttled encoder navigation for browsing lists
//!
//! Browsing uses the same speed decoding as note editing but only lets every
//! `scroll_rate`-th tick through, so a fine encoder does not overshoot a list.
//! Note parameters never go through here.

use crate::config::EncoderConfig;
use crate::encoder::{MovementThrottle, ValueChanger};

/// Selection within a list of known length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListCursor {
    len: usize,
    selected: usize,
}

impl ListCursor {
    pub fn new(len: usize) -> Self {
        Self { len, selected: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Replace the list length, pulling the selection back inside it
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self, count: usize) {
        self.selected = self
            .selected
            .saturating_add(count)
            .min(self.len.saturating_sub(1));
    }

    pub fn select_previous(&mut self, count: usize) {
        self.selected = self.selected.saturating_sub(count);
    }

    /// Move by a signed speed
    pub fn step(&mut self, speed: i32) {
        let count = speed.unsigned_abs() as usize;
        if speed > 0 {
            self.select_next(count);
        } else {
            self.select_previous(count);
        }
    }
}

/// A row of touch-sensitive encoders used for browsing
#[derive(Debug, Clone)]
pub struct BrowseControl {
    value_changer: ValueChanger,
    throttle: MovementThrottle,
    touched: Vec<bool>,
}

impl BrowseControl {
    pub fn new(config: &EncoderConfig, knobs: usize) -> Self {
        Self {
            value_changer: ValueChanger::new(config),
            throttle: MovementThrottle::new(config.scroll_rate),
            touched: vec![false; knobs],
        }
    }

    pub fn is_touched(&self, index: usize) -> bool {
        self.touched.get(index).copied().unwrap_or(false)
    }

    /// Touch or release a knob. Only one knob may be touched at a time;
    /// touching a second one is ignored. Returns whether the change was taken.
    pub fn on_touch(&mut self, index: usize, touched: bool) -> bool {
        if index >= self.touched.len() {
            return false;
        }
        let other_touched = self
            .touched
            .iter()
            .enumerate()
            .any(|(i, &t)| t && i != index);
        if other_touched {
            return false;
        }
        self.touched[index] = touched;
        if !touched {
            self.throttle.reset();
        }
        true
    }

    /// Feed a raw control value. Returns the navigation speed once enough
    /// ticks of a touched knob have accumulated.
    pub fn on_value(&mut self, index: usize, control: i32, fast: bool) -> Option<i32> {
        if !self.is_touched(index) {
            return None;
        }
        if !self.throttle.tick() {
            return None;
        }
        let speed = self.value_changer.decode(control, fast);
        (speed != 0).then_some(speed)
    }

    /// Feed a raw control value and move `cursor` when a step is emitted
    pub fn navigate(&mut self, cursor: &mut ListCursor, index: usize, control: i32, fast: bool) -> bool {
        let Some(speed) = self.on_value(index, control, fast) else {
            return false;
        };
        tracing::trace!("Browse knob {} moved selection by {}", index, speed);
        cursor.step(speed);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_cursor_bounds() {
        let mut cursor = ListCursor::new(5);
        cursor.select_previous(3);
        assert_eq!(cursor.selected(), 0);
        cursor.select_next(3);
        assert_eq!(cursor.selected(), 3);
        cursor.select_next(10);
        assert_eq!(cursor.selected(), 4);
        cursor.step(-2);
        assert_eq!(cursor.selected(), 2);
        cursor.set_len(2);
        assert_eq!(cursor.selected(), 1);

        let mut empty = ListCursor::new(0);
        empty.select_next(1);
        assert_eq!(empty.selected(), 0);
    }

    #[test]
    fn test_untouched_knob_is_ignored() {
        let mut control = BrowseControl::new(&EncoderConfig::default(), 8);
        assert!((0..16).all(|_| control.on_value(0, 1, false).is_none()));
    }

    #[test]
    fn test_throttled_navigation() {
        let mut control = BrowseControl::new(&EncoderConfig::default(), 8);
        let mut cursor = ListCursor::new(100);
        assert!(control.on_touch(7, true));

        let moves = (0..16).filter(|_| control.navigate(&mut cursor, 7, 1, false)).count();
        assert_eq!(moves, 2);
        assert_eq!(cursor.selected(), 2);

        for _ in 0..8 {
            control.navigate(&mut cursor, 7, 1, true);
        }
        assert_eq!(cursor.selected(), 6);

        for _ in 0..8 {
            control.navigate(&mut cursor, 7, 127, false);
        }
        assert_eq!(cursor.selected(), 5);
    }

    #[test]
    fn test_exclusive_touch() {
        let mut control = BrowseControl::new(&EncoderConfig::default(), 8);
        assert!(control.on_touch(2, true));
        assert!(!control.on_touch(3, true));
        assert!(!control.is_touched(3));
        assert!(control.on_touch(2, false));
        assert!(control.on_touch(3, true));
        assert!(!control.on_touch(9, true));
    }

    #[test]
    fn test_release_resets_throttle() {
        let mut control = BrowseControl::new(&EncoderConfig::default(), 8);
        control.on_touch(0, true);
        for _ in 0..7 {
            assert!(control.on_value(0, 1, false).is_none());
        }
        control.on_touch(0, false);
        control.on_touch(0, true);
        assert!(control.on_value(0, 1, false).is_none());
    }
}
