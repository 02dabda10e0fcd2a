use core::fmt;

use serde::Deserialize;

pub const DEFAULT_PRESS_DELAY_MS: u64 = 200;
pub const DEFAULT_FLICK_MAX_MS: u64 = 300;
// Moving more than 10 px from the start point means pan, not tap.
pub const DEFAULT_MOVE_THRESHOLD_PX: f64 = 10.0;
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Hold time before a stationary touch is classified as a press.
    pub press_delay_ms: u64,
    /// A pan released sooner than this after contact start also emits `flick`.
    pub flick_max_ms: u64,
    pub move_threshold_px: f64,
    pub double_tap_window_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            press_delay_ms: DEFAULT_PRESS_DELAY_MS,
            flick_max_ms: DEFAULT_FLICK_MAX_MS,
            move_threshold_px: DEFAULT_MOVE_THRESHOLD_PX,
            double_tap_window_ms: DEFAULT_DOUBLE_TAP_WINDOW_MS,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.press_delay_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "press_delay_ms",
            });
        }
        if self.flick_max_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "flick_max_ms",
            });
        }
        if self.double_tap_window_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "double_tap_window_ms",
            });
        }
        if !self.move_threshold_px.is_finite() || self.move_threshold_px < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                value: self.move_threshold_px,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    ZeroDuration { field: &'static str },
    InvalidThreshold { value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDuration { field } => write!(f, "{field} must be greater than zero"),
            Self::InvalidThreshold { value } => write!(
                f,
                "move_threshold_px must be a finite, non-negative distance (got {value})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
