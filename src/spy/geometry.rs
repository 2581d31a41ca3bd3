//! Geometry and direction types used by the tracker

use super::SpyError;

/// Default share of the visible height used as the boundary while scrolling down
pub const DEFAULT_DOWN_THRESHOLD: f64 = 0.4;

/// Default share of the visible height used as the boundary while scrolling up
pub const DEFAULT_UP_THRESHOLD: f64 = 0.6;

/// Vertical extent of a section anchor, in rows relative to the visible window
///
/// Negative values mean the edge has scrolled above the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBounds {
    pub top: i32,
    pub bottom: i32,
}

impl SectionBounds {
    pub fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }

    /// Bounds of an anchor at document row `y` with the given height, seen
    /// from a window scrolled to `offset`
    pub fn at(y: u16, height: u16, offset: u16) -> Self {
        let top = i32::from(y) - i32::from(offset);
        Self {
            top,
            bottom: top + i32::from(height),
        }
    }
}

/// The visible window sections are judged against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusBand {
    pub top: i32,
    pub height: u16,
}

impl FocusBand {
    pub fn new(top: i32, height: u16) -> Self {
        Self { top, height }
    }

    /// Row sitting `ratio` of the way down the window
    pub fn line_at(&self, ratio: f64) -> f64 {
        f64::from(self.top) + ratio * f64::from(self.height)
    }
}

/// Direction of the latest scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    #[default]
    Down,
    Up,
}

impl ScrollDirection {
    /// Direction from `previous` to `current`; no movement counts as down
    pub fn between(previous: u16, current: u16) -> Self {
        if current >= previous {
            Self::Down
        } else {
            Self::Up
        }
    }
}

impl std::fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Down => "down",
            Self::Up => "up",
        })
    }
}

/// Direction-dependent activation boundaries
///
/// The gap between `down` and `up` is the hysteresis band: inside it the
/// active section stays put until the reader has clearly crossed over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    down: f64,
    up: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            down: DEFAULT_DOWN_THRESHOLD,
            up: DEFAULT_UP_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new(down: f64, up: f64) -> Result<Self, SpyError> {
        for value in [down, up] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SpyError::ThresholdOutOfRange(value));
            }
        }
        if down > up {
            return Err(SpyError::InvertedThresholds { down, up });
        }
        Ok(Self { down, up })
    }

    pub fn down(&self) -> f64 {
        self.down
    }

    pub fn up(&self) -> f64 {
        self.up
    }
}
