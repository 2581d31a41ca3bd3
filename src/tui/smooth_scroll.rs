//! Eased scrolling toward a target offset
//!
//! Each tick closes a fixed share of the remaining distance, so motion
//! starts fast and decelerates. Setting a new target mid-flight redirects
//! the motion from wherever it currently is.

/// Distance under which the animation snaps onto its target
const SNAP_DISTANCE: f64 = 0.4;

/// Offset animator
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Rendered position, in rows
    position: f64,
    target: u16,
    /// Share of the remaining distance covered per tick
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Animate toward `target` from the current position
    pub fn retarget(&mut self, target: u16) {
        self.target = target;
    }

    /// Move to `target` immediately
    pub fn jump_to(&mut self, target: u16) {
        self.target = target;
        self.position = f64::from(target);
    }

    /// Advance the animation by one frame
    pub fn tick(&mut self) {
        let target = f64::from(self.target);
        self.position += (target - self.position) * self.speed;
        if (target - self.position).abs() < SNAP_DISTANCE {
            self.position = target;
        }
    }

    /// Current offset, rounded to whole rows
    pub fn offset(&self) -> u16 {
        self.position.round().max(0.0) as u16
    }

    pub fn target(&self) -> u16 {
        self.target
    }

    /// True while the position has not reached the target
    pub fn is_animating(&self) -> bool {
        self.position != f64::from(self.target)
    }
}
