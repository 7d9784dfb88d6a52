#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Vision cone derivation and the guard-versus-player detection test.
//!
//! The cone has no falloff and ignores occlusion: a point is seen when it is
//! strictly closer than the range and within the half-angle of the facing.

use pranksters_core::{
    geometry::shortest_angle_between_degrees, CharacterSnapshot, Command, GuardSnapshot, Outcome,
    Tuning, Vec2,
};

/// Slack applied to the angular comparison so an exact half-angle counts as inside.
const ANGLE_TOLERANCE_DEGREES: f64 = 1e-4;

/// Configuration parameters required to construct the vision system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    range: f32,
    half_angle_degrees: f32,
}

impl Config {
    /// Creates a new configuration from the cone range and half-angle in degrees.
    #[must_use]
    pub const fn new(range: f32, half_angle_degrees: f32) -> Self {
        Self {
            range,
            half_angle_degrees,
        }
    }

    /// Extracts the cone parameters from the shared tuning.
    #[must_use]
    pub const fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.vision_range, tuning.vision_half_angle_degrees)
    }

    /// Reach of the cone.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// Half of the cone's opening angle, in degrees.
    #[must_use]
    pub const fn half_angle_degrees(&self) -> f32 {
        self.half_angle_degrees
    }
}

/// Wedge-shaped region the guard can currently see.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisionCone {
    /// Tip of the wedge, the guard position.
    pub apex: Vec2,
    /// Reach of the wedge.
    pub radius: f32,
    /// Facing angle in radians.
    pub facing: f32,
    /// Angle in radians where the wedge starts.
    pub start_angle: f32,
    /// Angle in radians where the wedge ends.
    pub end_angle: f32,
}

impl VisionCone {
    /// Derives the cone from the guard's position and velocity.
    #[must_use]
    pub fn from_guard(guard: &GuardSnapshot, config: &Config) -> Self {
        let facing = guard.facing_angle();
        let half_angle = config.half_angle_degrees.to_radians();
        Self {
            apex: guard.position,
            radius: config.range,
            facing,
            start_angle: facing - half_angle,
            end_angle: facing + half_angle,
        }
    }

    /// Reports whether the point lies inside the cone.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let dx = f64::from(point.x) - f64::from(self.apex.x);
        let dy = f64::from(point.y) - f64::from(self.apex.y);
        let distance = dx.hypot(dy);
        if distance >= f64::from(self.radius) {
            return false;
        }

        let facing = f64::from(self.facing).to_degrees();
        let bearing = dy.atan2(dx).to_degrees();
        let half_angle = f64::from(self.end_angle - self.facing).to_degrees();
        shortest_angle_between_degrees(facing, bearing).abs()
            <= half_angle + ANGLE_TOLERANCE_DEGREES
    }
}

/// Reports whether the guard sees the player.
#[must_use]
pub fn check_detection(guard: &GuardSnapshot, player: &CharacterSnapshot, config: &Config) -> bool {
    VisionCone::from_guard(guard, config).contains(player.position)
}

/// Pure system that reports the active character once the guard sees them.
#[derive(Debug)]
pub struct Vision {
    config: Config,
}

impl Vision {
    /// Creates a new vision system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Cone the renderer should draw for the guard.
    #[must_use]
    pub fn cone(&self, guard: &GuardSnapshot) -> VisionCone {
        VisionCone::from_guard(guard, &self.config)
    }

    /// Emits `ReportDetection` when the running level's guard sees the player.
    pub fn handle(
        &self,
        outcome: Outcome,
        guard: &GuardSnapshot,
        player: &CharacterSnapshot,
        out: &mut Vec<Command>,
    ) {
        if outcome.is_terminal() {
            return;
        }

        if check_detection(guard, player, &self.config) {
            out.push(Command::ReportDetection);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pranksters_core::{Facing, GuardMode, Role};

    fn guard(velocity: Vec2) -> GuardSnapshot {
        GuardSnapshot {
            position: Vec2::new(180.0, 300.0),
            velocity,
            mode: GuardMode::Patrol,
            patrol_path: vec![Vec2::new(180.0, 300.0)],
            path_index: 0,
            distraction_point: None,
            distraction_pending: false,
            flee_point: None,
        }
    }

    fn player_at(position: Vec2) -> CharacterSnapshot {
        CharacterSnapshot {
            role: Role::A,
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            speed: 180.0,
            active: true,
        }
    }

    fn config() -> Config {
        Config::from_tuning(&Tuning::default())
    }

    #[test]
    fn cone_spans_the_half_angle_around_facing() {
        let cone = VisionCone::from_guard(&guard(Vec2::new(0.0, 60.0)), &config());
        assert_eq!(cone.apex, Vec2::new(180.0, 300.0));
        assert_eq!(cone.radius, 150.0);
        assert!((cone.start_angle - 60f32.to_radians()).abs() < 1e-6);
        assert!((cone.end_angle - 120f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn range_is_exclusive() {
        let guard = guard(Vec2::new(60.0, 0.0));
        assert!(check_detection(&guard, &player_at(Vec2::new(329.9, 300.0)), &config()));
        assert!(!check_detection(&guard, &player_at(Vec2::new(330.0, 300.0)), &config()));
    }

    #[test]
    fn stationary_guard_faces_positive_x() {
        let guard = guard(Vec2::ZERO);
        assert!(check_detection(&guard, &player_at(Vec2::new(250.0, 300.0)), &config()));
        assert!(!check_detection(&guard, &player_at(Vec2::new(110.0, 300.0)), &config()));
    }

    #[test]
    fn terminal_outcome_suppresses_reports() {
        let vision = Vision::new(config());
        let guard = guard(Vec2::new(60.0, 0.0));
        let player = player_at(Vec2::new(200.0, 300.0));
        let mut commands = Vec::new();

        vision.handle(Outcome::Lost, &guard, &player, &mut commands);
        assert!(commands.is_empty());

        vision.handle(Outcome::Running, &guard, &player, &mut commands);
        assert_eq!(commands, vec![Command::ReportDetection]);
    }
}
