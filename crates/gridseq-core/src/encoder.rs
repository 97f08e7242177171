//! Relative encoder decoding and movement throttling
//!
//! Raw control values use 7-bit two's complement: values below the midpoint
//! turn clockwise by that many units, values at or above it turn
//! counter-clockwise by `value - upper_bound`. Zero means no movement.

use crate::config::EncoderConfig;

/// Decodes relative control values into signed speeds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChanger {
    upper_bound: i32,
    fast_factor: i32,
}

impl Default for ValueChanger {
    fn default() -> Self {
        Self::new(&EncoderConfig::default())
    }
}

impl ValueChanger {
    pub fn new(config: &EncoderConfig) -> Self {
        Self {
            upper_bound: i32::try_from(config.upper_bound).unwrap_or(i32::MAX),
            fast_factor: i32::try_from(config.fast_factor).unwrap_or(i32::MAX),
        }
    }

    pub fn upper_bound(&self) -> i32 {
        self.upper_bound
    }

    /// Signed speed of a raw control value. Values outside the control range
    /// decode to 0.
    pub fn calc_knob_speed(&self, control: i32) -> i32 {
        if control <= 0 || control >= self.upper_bound {
            return 0;
        }
        if control < self.upper_bound / 2 {
            control
        } else {
            control - self.upper_bound
        }
    }

    /// Speed with the fast modifier applied
    pub fn decode(&self, control: i32, fast: bool) -> i32 {
        let speed = self.calc_knob_speed(control);
        if fast { speed.saturating_mul(self.fast_factor) } else { speed }
    }

    /// Integer control value for a normalized 0..1 value
    pub fn normalized_to_control(&self, value: f64) -> i32 {
        (value.clamp(0.0, 1.0) * (self.upper_bound - 1) as f64).round() as i32
    }

    /// Normalized 0..1 value of an integer control value
    pub fn control_to_normalized(&self, control: i32) -> f64 {
        control.clamp(0, self.upper_bound - 1) as f64 / (self.upper_bound - 1) as f64
    }
}

/// Slows a high-resolution encoder down for list navigation: only every
/// `rate`-th tick is let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementThrottle {
    counter: u32,
    rate: u32,
}

impl MovementThrottle {
    pub fn new(rate: u32) -> Self {
        Self { counter: 0, rate: rate.max(1) }
    }

    /// Count one tick. Returns true when the threshold is reached, which also
    /// resets the counter.
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter < self.rate {
            return false;
        }
        self.counter = 0;
        true
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    pub fn pending(&self) -> u32 {
        self.counter
    }
}
