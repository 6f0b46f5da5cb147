#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep stepper that walks actors toward their targets.

use std::time::Duration;

use maze_chase_core::{Direction, MovingObject, Position, CELL_SIZE};

/// Simulated time covered by a single tick, independent of the real tick interval.
pub const SIMULATION_STEP: Duration = Duration::from_millis(50);

/// Actor speed in pixels per simulated second.
pub const ACTOR_SPEED: f64 = 2.0 * CELL_SIZE as f64;

/// Time step and speed used to advance actors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    step: Duration,
    speed: f64,
}

impl Kinematics {
    /// Creates kinematics covering `step` of simulated time at `speed` pixels per second.
    #[must_use]
    pub const fn new(step: Duration, speed: f64) -> Self {
        Self { step, speed }
    }

    /// Simulated time covered by one tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Speed in pixels per simulated second.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Longest distance an actor may travel in one tick.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        self.speed * self.step.as_secs_f64()
    }
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::new(SIMULATION_STEP, ACTOR_SPEED)
    }
}

/// Moves `object` one tick toward its target along a single axis.
///
/// The horizontal axis is resolved first; the vertical axis only moves once the
/// truncated horizontal coordinate matches the target. The actor never
/// overshoots and turns to face the direction it moved in.
pub fn advance(object: &mut MovingObject, kinematics: Kinematics) {
    let position = object.position();
    let current = position.truncated();
    let target = object.target();
    let max_distance = kinematics.max_distance();

    if current.x() != target.x() {
        let distance = max_distance.min((f64::from(target.x()) - position.x()).abs());
        let (x, facing) = if current.x() > target.x() {
            (position.x() - distance, Direction::Left)
        } else {
            (position.x() + distance, Direction::Right)
        };
        object.set_position(Position::new(x, position.y()));
        object.face(facing);
    } else if current.y() != target.y() {
        let distance = max_distance.min((f64::from(target.y()) - position.y()).abs());
        let (y, facing) = if current.y() > target.y() {
            (position.y() - distance, Direction::Up)
        } else {
            (position.y() + distance, Direction::Down)
        };
        object.set_position(Position::new(position.x(), y));
        object.face(facing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kinematics_cover_four_pixels_per_tick() {
        let kinematics = Kinematics::default();
        assert!((kinematics.max_distance() - 4.0).abs() < 1e-9);
    }
}
