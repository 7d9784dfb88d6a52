use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every gameplay constant consumed by the world and the pure systems.
///
/// The default values reproduce the reference game. Adapters may deserialize
/// overrides from a configuration file; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Width of the playable area in world units.
    pub play_area_width: f32,
    /// Height of the playable area in world units.
    pub play_area_height: f32,
    /// Movement speed of character A in units per second.
    pub speed_a: f32,
    /// Movement speed of character B in units per second.
    pub speed_b: f32,
    /// Pointer drags closer than this to the active character are ignored.
    pub pointer_dead_zone: f32,
    /// Pointer drags must lie strictly below this y coordinate.
    pub pointer_band_min_y: f32,
    /// Pointer drags must lie strictly above this y coordinate.
    pub pointer_band_max_y: f32,
    /// Guard speed while patrolling.
    pub patrol_speed: f32,
    /// Guard speed while walking to a distraction.
    pub distraction_speed: f32,
    /// Guard speed while fleeing an alarm.
    pub panic_speed: f32,
    /// Distance at which a patrol waypoint or the flee point counts as reached.
    pub waypoint_arrival_radius: f32,
    /// Distance at which the distraction point counts as reached.
    pub distraction_arrival_radius: f32,
    /// Time the guard lingers at a distraction, in milliseconds.
    pub distraction_duration_ms: u64,
    /// Reach of the guard's vision cone.
    pub vision_range: f32,
    /// Half of the vision cone's opening angle, in degrees.
    pub vision_half_angle_degrees: f32,
    /// Period of the cosmetic alarm pulse, in milliseconds.
    pub alarm_pulse_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            play_area_width: 360.0,
            play_area_height: 640.0,
            speed_a: 180.0,
            speed_b: 120.0,
            pointer_dead_zone: 20.0,
            pointer_band_min_y: 50.0,
            pointer_band_max_y: 550.0,
            patrol_speed: 60.0,
            distraction_speed: 120.0,
            panic_speed: 150.0,
            waypoint_arrival_radius: 5.0,
            distraction_arrival_radius: 10.0,
            distraction_duration_ms: 3_000,
            vision_range: 150.0,
            vision_half_angle_degrees: 30.0,
            alarm_pulse_ms: 500,
        }
    }
}

impl Tuning {
    /// Size of the playable area.
    #[must_use]
    pub fn play_area(&self) -> Vec2 {
        Vec2::new(self.play_area_width, self.play_area_height)
    }

    /// Time the guard lingers at a distraction.
    #[must_use]
    pub fn distraction_duration(&self) -> Duration {
        Duration::from_millis(self.distraction_duration_ms)
    }

    /// Period of the cosmetic alarm pulse.
    #[must_use]
    pub fn alarm_pulse(&self) -> Duration {
        Duration::from_millis(self.alarm_pulse_ms)
    }

    /// Checks that every value lies in a range the simulation can use.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("play_area_width", self.play_area_width),
            ("play_area_height", self.play_area_height),
            ("speed_a", self.speed_a),
            ("speed_b", self.speed_b),
            ("patrol_speed", self.patrol_speed),
            ("distraction_speed", self.distraction_speed),
            ("panic_speed", self.panic_speed),
            ("waypoint_arrival_radius", self.waypoint_arrival_radius),
            ("distraction_arrival_radius", self.distraction_arrival_radius),
            ("vision_range", self.vision_range),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if !(self.pointer_dead_zone.is_finite() && self.pointer_dead_zone >= 0.0) {
            return Err(TuningError::NotPositive {
                field: "pointer_dead_zone",
                value: self.pointer_dead_zone,
            });
        }

        if self.pointer_band_min_y >= self.pointer_band_max_y {
            return Err(TuningError::EmptyPointerBand {
                min: self.pointer_band_min_y,
                max: self.pointer_band_max_y,
            });
        }

        if self.distraction_duration_ms == 0 {
            return Err(TuningError::ZeroDuration {
                field: "distraction_duration_ms",
            });
        }
        if self.alarm_pulse_ms == 0 {
            return Err(TuningError::ZeroDuration {
                field: "alarm_pulse_ms",
            });
        }

        let half_angle = self.vision_half_angle_degrees;
        if !(half_angle > 0.0 && half_angle < 180.0) {
            return Err(TuningError::HalfAngleOutOfRange { degrees: half_angle });
        }

        Ok(())
    }
}

/// Reasons a [`Tuning`] value is rejected by [`Tuning::validate`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TuningError {
    /// A speed, radius or dimension was zero, negative or not finite.
    #[error("{field} must be a positive finite number (received {value})")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f32,
    },
    /// A timer period was zero.
    #[error("{field} must be at least one millisecond")]
    ZeroDuration {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The pointer band does not span any vertical range.
    #[error("pointer band {min}..{max} is empty")]
    EmptyPointerBand {
        /// Lower bound of the band.
        min: f32,
        /// Upper bound of the band.
        max: f32,
    },
    /// The vision half-angle does not describe a usable cone.
    #[error("vision half-angle must lie strictly between 0 and 180 degrees (received {degrees})")]
    HalfAngleOutOfRange {
        /// Half-angle that failed validation.
        degrees: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_speed() {
        let tuning = Tuning {
            patrol_speed: 0.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive {
                field: "patrol_speed",
                ..
            })
        ));
    }

    #[test]
    fn rejects_inverted_pointer_band() {
        let tuning = Tuning {
            pointer_band_min_y: 600.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::EmptyPointerBand { .. })
        ));
    }

    #[test]
    fn rejects_wide_open_cone() {
        let tuning = Tuning {
            vision_half_angle_degrees: 180.0,
            ..Tuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::HalfAngleOutOfRange { degrees: 180.0 })
        );
    }

    #[test]
    fn durations_are_exposed_in_milliseconds() {
        let tuning = Tuning::default();
        assert_eq!(tuning.distraction_duration(), Duration::from_secs(3));
        assert_eq!(tuning.alarm_pulse(), Duration::from_millis(500));
        assert_eq!(tuning.play_area(), Vec2::new(360.0, 640.0));
    }
}
