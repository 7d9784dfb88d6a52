#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Guard controller steering the patrol, distraction and panic behaviours.

use std::time::Duration;

use pranksters_core::{
    geometry::{direction_towards, distance},
    Command, GuardMode, GuardSnapshot, Tuning, Vec2,
};

/// Configuration parameters required to construct the guard controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    patrol_speed: f32,
    distraction_speed: f32,
    panic_speed: f32,
    waypoint_arrival_radius: f32,
    distraction_arrival_radius: f32,
}

impl Config {
    /// Creates a new configuration from explicit speeds and arrival radii.
    #[must_use]
    pub const fn new(
        patrol_speed: f32,
        distraction_speed: f32,
        panic_speed: f32,
        waypoint_arrival_radius: f32,
        distraction_arrival_radius: f32,
    ) -> Self {
        Self {
            patrol_speed,
            distraction_speed,
            panic_speed,
            waypoint_arrival_radius,
            distraction_arrival_radius,
        }
    }

    /// Extracts the guard parameters from the shared tuning.
    #[must_use]
    pub const fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.patrol_speed,
            tuning.distraction_speed,
            tuning.panic_speed,
            tuning.waypoint_arrival_radius,
            tuning.distraction_arrival_radius,
        )
    }
}

/// Pure system that steers the guard once per tick.
#[derive(Debug)]
pub struct Patrol {
    config: Config,
}

impl Patrol {
    /// Creates a new guard controller using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Emits the steering commands for the guard's current mode.
    ///
    /// `dt` is the length of the upcoming tick. Steering never asks for more
    /// speed than is needed to reach the target within that tick.
    pub fn handle(&self, guard: &GuardSnapshot, dt: Duration, out: &mut Vec<Command>) {
        match guard.mode {
            GuardMode::Patrol => self.patrol(guard, dt, out),
            GuardMode::Distracted => self.distracted(guard, dt, out),
            GuardMode::Panic => self.panic(guard, dt, out),
        }
    }

    fn patrol(&self, guard: &GuardSnapshot, dt: Duration, out: &mut Vec<Command>) {
        let Some(waypoint) = guard.current_waypoint() else {
            out.push(Command::SteerGuard {
                velocity: Vec2::ZERO,
            });
            return;
        };

        let target = if distance(guard.position, waypoint) < self.config.waypoint_arrival_radius {
            out.push(Command::AdvanceWaypoint);
            let next = (guard.path_index + 1) % guard.patrol_path.len();
            guard.patrol_path[next]
        } else {
            waypoint
        };

        out.push(Command::SteerGuard {
            velocity: steer(guard.position, target, self.config.patrol_speed, dt),
        });
    }

    fn distracted(&self, guard: &GuardSnapshot, dt: Duration, out: &mut Vec<Command>) {
        let Some(point) = guard.distraction_point else {
            return;
        };

        if distance(guard.position, point) < self.config.distraction_arrival_radius {
            out.push(Command::HoldGuard);
        } else {
            out.push(Command::SteerGuard {
                velocity: steer(guard.position, point, self.config.distraction_speed, dt),
            });
        }
    }

    fn panic(&self, guard: &GuardSnapshot, dt: Duration, out: &mut Vec<Command>) {
        let Some(flee_point) = guard.flee_point else {
            return;
        };

        let arrived = distance(guard.position, flee_point) <= self.config.waypoint_arrival_radius;
        let velocity = if !arrived {
            steer(guard.position, flee_point, self.config.panic_speed, dt)
        } else {
            Vec2::ZERO
        };
        out.push(Command::SteerGuard { velocity });
    }
}

/// Velocity that walks from `from` toward `to` at `speed` without overshooting in `dt`.
fn steer(from: Vec2, to: Vec2, speed: f32, dt: Duration) -> Vec2 {
    let Some(direction) = direction_towards(from, to) else {
        return Vec2::ZERO;
    };

    let seconds = dt.as_secs_f32();
    let capped = if seconds > 0.0 {
        speed.min(distance(from, to) / seconds)
    } else {
        speed
    };
    direction * capped
}
