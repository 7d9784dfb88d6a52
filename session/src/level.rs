use std::time::Duration;

use pranksters_core::{
    AudioCue, AudioFeedback, Command, Event, InputSnapshot, LevelId, Outcome, Tuning,
};
use pranksters_system_controller::{self as controller, Controller};
use pranksters_system_objectives::Objectives;
use pranksters_system_patrol::{self as patrol, Patrol};
use pranksters_system_vision::{self as vision, Vision, VisionCone};
use pranksters_world::{self as world, query, World};
use tracing::{debug, info, trace};

/// Scene manager the session reports terminal transitions to.
pub trait LevelHost {
    /// Rebuilds the current level from scratch.
    fn restart_current_level(&mut self);

    /// Loads the provided level.
    fn advance_to_level(&mut self, level: LevelId);

    /// The final level was won.
    fn complete_campaign(&mut self);
}

/// Request recorded by [`HostRequests`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostRequest {
    /// Restart the current level.
    Restart,
    /// Load the level.
    Advance(LevelId),
    /// Show the campaign victory screen.
    Complete,
}

/// Level host that queues requests so the owner can act on them after the tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostRequests {
    requests: Vec<HostRequest>,
}

impl HostRequests {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the queued requests in the order they were made.
    pub fn drain(&mut self) -> impl Iterator<Item = HostRequest> + '_ {
        self.requests.drain(..)
    }

    /// Reports whether no request is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl LevelHost for HostRequests {
    fn restart_current_level(&mut self) {
        self.requests.push(HostRequest::Restart);
    }

    fn advance_to_level(&mut self, level: LevelId) {
        self.requests.push(HostRequest::Advance(level));
    }

    fn complete_campaign(&mut self) {
        self.requests.push(HostRequest::Complete);
    }
}

/// One attempt at one level together with the systems that drive it.
#[derive(Debug)]
pub struct LevelSession {
    world: World,
    controller: Controller,
    patrol: Patrol,
    vision: Vision,
    objectives: Objectives,
    events: Vec<Event>,
    commands: Vec<Command>,
    pointer_held: bool,
}

impl LevelSession {
    /// Builds a fresh attempt of the level.
    #[must_use]
    pub fn new(level: LevelId, tuning: &Tuning) -> Self {
        Self::from_world(World::new(level, tuning), tuning)
    }

    /// Builds a fresh attempt whose cosmetic randomness is seeded explicitly.
    #[must_use]
    pub fn with_seed(level: LevelId, tuning: &Tuning, seed: u64) -> Self {
        Self::from_world(World::with_seed(level, tuning, seed), tuning)
    }

    fn from_world(world: World, tuning: &Tuning) -> Self {
        let level = query::level(&world);
        Self {
            world,
            controller: Controller::new(controller::Config::from_tuning(tuning)),
            patrol: Patrol::new(patrol::Config::from_tuning(tuning)),
            vision: Vision::new(vision::Config::from_tuning(tuning)),
            objectives: Objectives::new(level),
            events: Vec::new(),
            commands: Vec::new(),
            pointer_held: false,
        }
    }

    /// Level being played.
    #[must_use]
    pub fn level(&self) -> LevelId {
        query::level(&self.world)
    }

    /// Outcome of the attempt.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        query::outcome(&self.world)
    }

    /// Read-only access to the level world for presentation.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Vision cone of the guard as it currently stands.
    #[must_use]
    pub fn vision_cone(&self) -> VisionCone {
        self.vision.cone(&query::guard(&self.world))
    }

    /// Events produced by the most recent [`LevelSession::step`].
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    /// Runs one simulation tick.
    ///
    /// Input is resolved first, then the guard is steered, the world advances,
    /// the guard looks for the active character and finally the objective is
    /// evaluated. Terminal transitions and the restart button are reported to
    /// `host`; cues are sent to `audio`. Once busted, the action button or a
    /// fresh pointer press also restarts the level.
    pub fn step(
        &mut self,
        dt: Duration,
        input: &InputSnapshot,
        audio: &mut dyn AudioFeedback,
        host: &mut dyn LevelHost,
    ) -> &[Event] {
        self.events.clear();

        let pointer_down = input.pointer.is_some_and(|pointer| pointer.pressed);
        let tapped = pointer_down && !self.pointer_held;
        self.pointer_held = pointer_down;

        let busted = self.outcome() == Outcome::Lost;
        if input.restart_pressed || (busted && (input.action_pressed || tapped)) {
            info!(level = ?self.level(), "restart requested");
            audio.play(AudioCue::Select);
            host.restart_current_level();
            return &self.events;
        }

        self.controller.handle_buttons(input, &mut self.commands);
        self.flush();

        let view = query::level_view(&self.world);
        self.objectives.handle(&self.events, &view, &mut self.commands);
        self.flush();

        let player = query::player(&self.world);
        self.controller.handle(input, &player, &mut self.commands);
        self.flush();

        self.patrol
            .handle(&query::guard(&self.world), dt, &mut self.commands);
        self.flush();

        self.commands.push(Command::Tick { dt });
        self.flush();

        self.vision.handle(
            query::outcome(&self.world),
            &query::guard(&self.world),
            &query::player(&self.world),
            &mut self.commands,
        );
        self.flush();

        self.objectives
            .evaluate(&query::level_view(&self.world), &mut self.commands);
        self.flush();

        self.announce(audio, host);
        &self.events
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn announce(&self, audio: &mut dyn AudioFeedback, host: &mut dyn LevelHost) {
        let level = self.level();
        for event in &self.events {
            match event {
                Event::ActiveSwitched { active } => {
                    debug!(?active, "switched character");
                    audio.play(AudioCue::Select);
                }
                Event::ActionRequested { role, position } => {
                    trace!(?role, x = position.x, y = position.y, "ability used");
                    audio.play(AudioCue::Action);
                }
                Event::DistractionStarted { point } => {
                    debug!(x = point.x, y = point.y, "guard distracted");
                }
                Event::DistractionExpired => debug!("guard resumed patrol"),
                Event::PropTampered { prop } => debug!(prop = prop.get(), "prop tampered"),
                Event::AlarmRaised { flee_point } => {
                    debug!(x = flee_point.x, y = flee_point.y, "fire alarm raised");
                }
                Event::Busted {
                    role,
                    guard_position,
                } => {
                    info!(
                        ?level,
                        ?role,
                        guard_x = guard_position.x,
                        guard_y = guard_position.y,
                        "busted"
                    );
                    audio.play(AudioCue::Bust);
                }
                Event::LevelWon { next, delay, .. } => {
                    info!(?level, ?next, delay_ms = delay.as_millis() as u64, "level won");
                    audio.play(AudioCue::Win);
                }
                Event::LevelTransitionDue { next } => match next {
                    Some(next) => {
                        info!(from = ?level, to = ?next, "advancing");
                        host.advance_to_level(*next);
                    }
                    None => {
                        info!("campaign complete");
                        host.complete_campaign();
                    }
                },
                Event::TimeAdvanced { .. }
                | Event::DistractionArmed { .. }
                | Event::WaypointReached { .. }
                | Event::PropPushed { .. }
                | Event::PropHalted { .. }
                | Event::AlarmPulse { .. } => {}
            }
        }
    }
}
