#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Dual-character controller that turns sampled input into world commands.

use pranksters_core::{CharacterSnapshot, Command, InputSnapshot, Tuning, Vec2};

/// Configuration parameters required to construct the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pointer_dead_zone: f32,
    pointer_band_min_y: f32,
    pointer_band_max_y: f32,
}

impl Config {
    /// Creates a new configuration from the pointer dead zone and vertical band.
    #[must_use]
    pub const fn new(
        pointer_dead_zone: f32,
        pointer_band_min_y: f32,
        pointer_band_max_y: f32,
    ) -> Self {
        Self {
            pointer_dead_zone,
            pointer_band_min_y,
            pointer_band_max_y,
        }
    }

    /// Extracts the controller parameters from the shared tuning.
    #[must_use]
    pub const fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.pointer_dead_zone,
            tuning.pointer_band_min_y,
            tuning.pointer_band_max_y,
        )
    }

    fn pointer_in_band(&self, y: f32) -> bool {
        y > self.pointer_band_min_y && y < self.pointer_band_max_y
    }
}

/// Pure system that maps input onto the active character.
#[derive(Debug)]
pub struct Controller {
    config: Config,
}

impl Controller {
    /// Creates a new controller using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Emits the discrete commands triggered by button edges.
    ///
    /// A swap is emitted before an action so that pressing both on the same
    /// tick acts with the newly selected character.
    pub fn handle_buttons(&self, input: &InputSnapshot, out: &mut Vec<Command>) {
        if input.swap_pressed {
            out.push(Command::SwitchActive);
        }
        if input.action_pressed {
            out.push(Command::RequestAction);
        }
    }

    /// Emits the velocity command for the active character.
    pub fn handle(
        &self,
        input: &InputSnapshot,
        player: &CharacterSnapshot,
        out: &mut Vec<Command>,
    ) {
        out.push(Command::SetActiveVelocity {
            velocity: self.resolve_movement(input, player),
        });
    }

    /// Resolves the velocity requested by the current input.
    ///
    /// Keys drive each axis independently at full speed, so diagonals are
    /// faster than straight lines. A held pointer inside the vertical band and
    /// outside the dead zone overrides the keys.
    #[must_use]
    pub fn resolve_movement(&self, input: &InputSnapshot, player: &CharacterSnapshot) -> Vec2 {
        let speed = player.speed;
        let keys = input.keys;
        let mut velocity = Vec2::ZERO;

        if keys.left {
            velocity.x = -speed;
        } else if keys.right {
            velocity.x = speed;
        }
        if keys.up {
            velocity.y = -speed;
        } else if keys.down {
            velocity.y = speed;
        }

        if let Some(pointer) = input.pointer {
            if pointer.pressed && self.config.pointer_in_band(pointer.position.y) {
                let delta = pointer.position - player.position;
                let distance = delta.length();
                if distance > self.config.pointer_dead_zone {
                    velocity = delta / distance * speed;
                }
            }
        }

        velocity
    }
}
