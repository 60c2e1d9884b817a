use std::time::Duration;

use crate::geometry::Offset;

const TOOLBAR_SPRING_STIFFNESS: f64 = 400.0;
const TOOLBAR_SPRING_DAMPING: f64 = 25.0;
const DEFAULT_TWEEN_DURATION: Duration = Duration::from_millis(300);
const SPRING_STEP: f64 = 1.0 / 1000.0;
const REST_DISTANCE: f64 = 0.01;
const REST_SPEED: f64 = 0.01;

/// How a dock commit travels to its destination. Only the destination is
/// binding; the curve is cosmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DockTransition {
    Immediate,
    Spring { stiffness: f64, damping: f64 },
    Tween { duration: Duration },
}

impl DockTransition {
    pub const fn toolbar_spring() -> Self {
        Self::Spring {
            stiffness: TOOLBAR_SPRING_STIFFNESS,
            damping: TOOLBAR_SPRING_DAMPING,
        }
    }

    pub const fn tween() -> Self {
        Self::Tween {
            duration: DEFAULT_TWEEN_DURATION,
        }
    }
}

/// Samples a transition frame by frame.
#[derive(Debug, Clone)]
pub struct MotionTrack {
    from: Offset,
    to: Offset,
    transition: DockTransition,
    position: Offset,
    velocity: Offset,
    elapsed: Duration,
    settled: bool,
}

impl MotionTrack {
    pub fn new(from: Offset, to: Offset, transition: DockTransition) -> Self {
        let mut track = Self {
            from,
            to,
            transition,
            position: from,
            velocity: Offset::zero(),
            elapsed: Duration::ZERO,
            settled: false,
        };
        if matches!(transition, DockTransition::Immediate) || from == to {
            track.settle();
        }
        track
    }

    pub fn destination(&self) -> Offset {
        self.to
    }

    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advances by `delta` and returns the new position. Once settled the
    /// position equals the destination exactly.
    pub fn advance(&mut self, delta: Duration) -> Offset {
        if self.settled {
            return self.position;
        }
        self.elapsed = self.elapsed.saturating_add(delta);

        match self.transition {
            DockTransition::Immediate => self.settle(),
            DockTransition::Tween { duration } => self.advance_tween(duration),
            DockTransition::Spring { stiffness, damping } => {
                self.advance_spring(delta.as_secs_f64(), stiffness, damping)
            }
        }
        self.position
    }

    fn advance_tween(&mut self, duration: Duration) {
        if duration.is_zero() || self.elapsed >= duration {
            self.settle();
            return;
        }
        let progress = ease_in_out(self.elapsed.as_secs_f64() / duration.as_secs_f64());
        self.position = Offset::new(
            lerp(self.from.x, self.to.x, progress),
            lerp(self.from.y, self.to.y, progress),
        );
    }

    fn advance_spring(&mut self, mut remaining: f64, stiffness: f64, damping: f64) {
        while remaining > 0.0 {
            let step = remaining.min(SPRING_STEP);
            remaining -= step;

            let accel_x = -stiffness * (self.position.x - self.to.x) - damping * self.velocity.x;
            let accel_y = -stiffness * (self.position.y - self.to.y) - damping * self.velocity.y;
            self.velocity = Offset::new(
                self.velocity.x + accel_x * step,
                self.velocity.y + accel_y * step,
            );
            self.position = Offset::new(
                self.position.x + self.velocity.x * step,
                self.position.y + self.velocity.y * step,
            );

            if self.at_rest() {
                self.settle();
                return;
            }
        }
    }

    fn at_rest(&self) -> bool {
        (self.position.x - self.to.x).abs() < REST_DISTANCE
            && (self.position.y - self.to.y).abs() < REST_DISTANCE
            && self.velocity.x.abs() < REST_SPEED
            && self.velocity.y.abs() < REST_SPEED
    }

    fn settle(&mut self) {
        self.position = self.to;
        self.velocity = Offset::zero();
        self.settled = true;
    }
}

fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}

fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
