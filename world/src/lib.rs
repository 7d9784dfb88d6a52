#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for Office Pranksters.
//!
//! A [`World`] holds one attempt at one level. Restarting or advancing builds a
//! fresh world; the old one, together with its scheduled timers, is dropped.

mod levels;
mod scheduler;

use std::time::Duration;

use pranksters_core::{
    Command, Event, Facing, GuardMode, LevelId, LevelLayout, Outcome, PropId, PropKind, Role,
    Tuning, Vec2, WELCOME_BANNER,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use self::scheduler::{Job, Scheduler, TimerId};

const ALARM_FLASH_SEED: u64 = 0x5eed_0f_f1ce_a1a4;

/// Represents the state of a single level attempt.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: Tuning,
    level: LevelId,
    outcome: Outcome,
    active: Role,
    characters: [Character; 2],
    guard: Guard,
    props: Vec<Prop>,
    layout: LevelLayout,
    alarm_raised: bool,
    alarm_flash: bool,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a fresh attempt of the level with the default alarm seed.
    #[must_use]
    pub fn new(level: LevelId, tuning: &Tuning) -> Self {
        Self::with_seed(level, tuning, ALARM_FLASH_SEED ^ u64::from(level.number()))
    }

    /// Creates a fresh attempt of the level whose cosmetic randomness is seeded explicitly.
    #[must_use]
    pub fn with_seed(level: LevelId, tuning: &Tuning, seed: u64) -> Self {
        let setup = levels::setup(level);
        let characters = [
            Character::new(Role::A, setup.role_a_start, tuning.speed_a),
            Character::new(Role::B, setup.role_b_start, tuning.speed_b),
        ];
        let props = setup
            .props
            .iter()
            .map(|seed| Prop {
                id: seed.id,
                kind: seed.kind,
                position: seed.position,
                velocity: Vec2::ZERO,
                half_extents: seed.half_extents,
                tampered: false,
                halt_timer: None,
            })
            .collect();

        Self {
            banner: WELCOME_BANNER,
            tuning: tuning.clone(),
            level,
            outcome: Outcome::Running,
            active: Role::A,
            characters,
            guard: Guard::new(setup.guard_start, setup.patrol_path),
            props,
            layout: setup.layout,
            alarm_raised: false,
            alarm_flash: false,
            scheduler: Scheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn is_running(&self) -> bool {
        self.outcome == Outcome::Running
    }

    fn character(&self, role: Role) -> &Character {
        &self.characters[role_index(role)]
    }

    fn character_mut(&mut self, role: Role) -> &mut Character {
        &mut self.characters[role_index(role)]
    }

    fn prop_mut(&mut self, id: PropId) -> Option<&mut Prop> {
        self.props.iter_mut().find(|prop| prop.id == id)
    }

    fn integrate(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        let bounds = self.tuning.play_area();

        for character in &mut self.characters {
            let next = character.position + character.velocity * seconds;
            character.position = next.clamp(Vec2::ZERO, bounds);
        }
        self.guard.position += self.guard.velocity * seconds;
        for prop in &mut self.props {
            prop.position += prop.velocity * seconds;
        }
    }

    fn run_job(&mut self, id: TimerId, job: Job, out_events: &mut Vec<Event>) {
        match job {
            Job::DistractionExpiry => {
                if self.guard.distraction_timer != Some(id) {
                    return;
                }
                self.guard.distraction_timer = None;
                self.guard.distraction_point = None;
                self.guard.mode = GuardMode::Patrol;
                out_events.push(Event::DistractionExpired);
            }
            Job::HaltProp(prop_id) => {
                if let Some(prop) = self.prop_mut(prop_id) {
                    if prop.halt_timer == Some(id) {
                        prop.halt_timer = None;
                        prop.velocity = Vec2::ZERO;
                        out_events.push(Event::PropHalted { prop: prop_id });
                    }
                }
            }
            Job::AlarmPulse => {
                self.alarm_flash = self.rng.gen_bool(0.5);
                out_events.push(Event::AlarmPulse {
                    flash: self.alarm_flash,
                });
            }
            Job::LevelTransition(next) => {
                out_events.push(Event::LevelTransitionDue { next });
            }
        }
    }

    fn cancel_distraction_timer(&mut self) {
        if let Some(timer) = self.guard.distraction_timer.take() {
            let _ = self.scheduler.cancel(timer);
        }
    }

    /// Stops everything that moves and drops timers that only matter while playing.
    fn freeze(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        for character in &mut self.characters {
            character.velocity = Vec2::ZERO;
        }
        self.guard.velocity = Vec2::ZERO;
        self.guard.distraction_timer = None;
        for prop in &mut self.props {
            prop.velocity = Vec2::ZERO;
            prop.halt_timer = None;
        }
        self.scheduler.retain(Job::survives_outcome);
    }
}

/// Executes the provided command against the world.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            if world.is_running() {
                world.integrate(dt);
                out_events.push(Event::TimeAdvanced { dt });
            }
            for (id, job) in world.scheduler.advance(dt) {
                world.run_job(id, job, out_events);
            }
        }
        Command::SwitchActive => {
            if !world.is_running() {
                return;
            }
            let previous = world.active;
            world.character_mut(previous).velocity = Vec2::ZERO;
            world.active = previous.other();
            out_events.push(Event::ActiveSwitched {
                active: world.active,
            });
        }
        Command::SetActiveVelocity { velocity } => {
            if !world.is_running() {
                return;
            }
            let active = world.active;
            let character = world.character_mut(active);
            character.velocity = velocity;
            if velocity.x < 0.0 {
                character.facing = Facing::Left;
            } else if velocity.x > 0.0 {
                character.facing = Facing::Right;
            }
        }
        Command::RequestAction => {
            if !world.is_running() {
                return;
            }
            let player = world.character(world.active);
            out_events.push(Event::ActionRequested {
                role: player.role,
                position: player.position,
            });
        }
        Command::SteerGuard { velocity } => {
            if world.is_running() {
                world.guard.velocity = velocity;
            }
        }
        Command::AdvanceWaypoint => {
            if !world.is_running() || world.guard.mode != GuardMode::Patrol {
                return;
            }
            let length = world.guard.patrol_path.len();
            if length == 0 {
                return;
            }
            let index = world.guard.path_index;
            let next = (index + 1) % length;
            world.guard.path_index = next;
            out_events.push(Event::WaypointReached { index, next });
        }
        Command::HoldGuard => {
            if !world.is_running() || world.guard.mode != GuardMode::Distracted {
                return;
            }
            world.guard.velocity = Vec2::ZERO;
            if world.guard.distraction_timer.is_none() {
                let expires_in = world.tuning.distraction_duration();
                let timer = world
                    .scheduler
                    .schedule_once(expires_in, Job::DistractionExpiry);
                world.guard.distraction_timer = Some(timer);
                out_events.push(Event::DistractionArmed { expires_in });
            }
        }
        Command::StartDistraction { point } => {
            if !world.is_running() || world.guard.mode == GuardMode::Panic {
                return;
            }
            world.cancel_distraction_timer();
            world.guard.mode = GuardMode::Distracted;
            world.guard.distraction_point = Some(point);
            out_events.push(Event::DistractionStarted { point });
        }
        Command::PushProp {
            prop,
            velocity,
            duration,
        } => {
            if !world.is_running() {
                return;
            }
            let Some(index) = world.props.iter().position(|candidate| candidate.id == prop) else {
                return;
            };
            if let Some(previous) = world.props[index].halt_timer.take() {
                let _ = world.scheduler.cancel(previous);
            }
            let timer = world.scheduler.schedule_once(duration, Job::HaltProp(prop));
            let target = &mut world.props[index];
            target.velocity = velocity;
            target.halt_timer = Some(timer);
            out_events.push(Event::PropPushed { prop, velocity });
        }
        Command::TamperProp { prop } => {
            if !world.is_running() {
                return;
            }
            if let Some(target) = world.prop_mut(prop) {
                if !target.tampered {
                    target.tampered = true;
                    out_events.push(Event::PropTampered { prop });
                }
            }
        }
        Command::PullLever => {
            if !world.is_running() || world.alarm_raised {
                return;
            }
            let LevelLayout::FireDrill { flee_point, .. } = world.layout else {
                return;
            };
            world.alarm_raised = true;
            world.cancel_distraction_timer();
            world.guard.distraction_point = None;
            world.guard.mode = GuardMode::Panic;
            world.guard.flee_point = Some(flee_point);
            let _ = world
                .scheduler
                .schedule_repeating(world.tuning.alarm_pulse(), Job::AlarmPulse);
            out_events.push(Event::AlarmRaised { flee_point });
        }
        Command::ReportDetection => {
            if !world.is_running() {
                return;
            }
            world.freeze(Outcome::Lost);
            out_events.push(Event::Busted {
                role: world.active,
                guard_position: world.guard.position,
            });
        }
        Command::DeclareVictory => {
            if !world.is_running() {
                return;
            }
            world.freeze(Outcome::Won);
            let level = world.level;
            let next = level.next();
            let delay = level.transition_delay();
            let _ = world
                .scheduler
                .schedule_once(delay, Job::LevelTransition(next));
            out_events.push(Event::LevelWon { level, next, delay });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{role_index, World};
    use pranksters_core::{
        CharacterSnapshot, GuardSnapshot, LevelId, LevelLayout, LevelView, Outcome, PropSnapshot,
        PropView, Role, Tuning,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Tuning the world was built with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Level the world simulates.
    #[must_use]
    pub fn level(world: &World) -> LevelId {
        world.level
    }

    /// Current outcome of the attempt.
    #[must_use]
    pub fn outcome(world: &World) -> Outcome {
        world.outcome
    }

    /// Role currently receiving input.
    #[must_use]
    pub fn active_role(world: &World) -> Role {
        world.active
    }

    /// Simulated time since the attempt started.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.scheduler.now()
    }

    /// Snapshot of the character playing the provided role.
    #[must_use]
    pub fn character(world: &World, role: Role) -> CharacterSnapshot {
        let character = &world.characters[role_index(role)];
        CharacterSnapshot {
            role: character.role,
            position: character.position,
            velocity: character.velocity,
            facing: character.facing,
            speed: character.speed,
            active: role == world.active,
        }
    }

    /// Snapshot of the active character.
    #[must_use]
    pub fn player(world: &World) -> CharacterSnapshot {
        character(world, world.active)
    }

    /// Snapshot of the guard.
    #[must_use]
    pub fn guard(world: &World) -> GuardSnapshot {
        let guard = &world.guard;
        GuardSnapshot {
            position: guard.position,
            velocity: guard.velocity,
            mode: guard.mode,
            patrol_path: guard.patrol_path.clone(),
            path_index: guard.path_index,
            distraction_point: guard.distraction_point,
            distraction_pending: guard
                .distraction_timer
                .is_some_and(|timer| world.scheduler.is_pending(timer)),
            flee_point: guard.flee_point,
        }
    }

    /// Captures a read-only view of the level's props.
    #[must_use]
    pub fn prop_view(world: &World) -> PropView {
        PropView::from_snapshots(
            world
                .props
                .iter()
                .map(|prop| PropSnapshot {
                    id: prop.id,
                    kind: prop.kind,
                    position: prop.position,
                    velocity: prop.velocity,
                    half_extents: prop.half_extents,
                    tampered: prop.tampered,
                })
                .collect(),
        )
    }

    /// Level-specific geometry.
    #[must_use]
    pub fn layout(world: &World) -> LevelLayout {
        world.layout
    }

    /// Reports whether the fire alarm has been pulled.
    #[must_use]
    pub fn alarm_raised(world: &World) -> bool {
        world.alarm_raised
    }

    /// Whether the most recent alarm pulse lit the screen.
    #[must_use]
    pub fn alarm_flash(world: &World) -> bool {
        world.alarm_flash
    }

    /// Complete snapshot used by the objective rules and presentation.
    #[must_use]
    pub fn level_view(world: &World) -> LevelView {
        LevelView {
            level: world.level,
            outcome: world.outcome,
            player: player(world),
            partner: character(world, world.active.other()),
            guard: guard(world),
            props: prop_view(world),
            layout: world.layout,
            alarm_raised: world.alarm_raised,
        }
    }
}

#[derive(Debug)]
struct Character {
    role: Role,
    position: Vec2,
    velocity: Vec2,
    facing: Facing,
    speed: f32,
}

impl Character {
    fn new(role: Role, position: Vec2, speed: f32) -> Self {
        Self {
            role,
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            speed,
        }
    }
}

#[derive(Debug)]
struct Guard {
    position: Vec2,
    velocity: Vec2,
    mode: GuardMode,
    patrol_path: Vec<Vec2>,
    path_index: usize,
    distraction_point: Option<Vec2>,
    distraction_timer: Option<TimerId>,
    flee_point: Option<Vec2>,
}

impl Guard {
    fn new(position: Vec2, patrol_path: Vec<Vec2>) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            mode: GuardMode::Patrol,
            patrol_path,
            path_index: 0,
            distraction_point: None,
            distraction_timer: None,
            flee_point: None,
        }
    }
}

#[derive(Debug)]
struct Prop {
    id: PropId,
    kind: PropKind,
    position: Vec2,
    velocity: Vec2,
    half_extents: Vec2,
    tampered: bool,
    halt_timer: Option<TimerId>,
}

const fn role_index(role: Role) -> usize {
    match role {
        Role::A => 0,
        Role::B => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(level: LevelId) -> World {
        World::new(level, &Tuning::default())
    }

    fn tick(world: &mut World, millis: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
        events
    }

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    #[test]
    fn fresh_world_starts_running_with_role_a() {
        let world = world(LevelId::DeskPrank);
        assert_eq!(query::outcome(&world), Outcome::Running);
        assert_eq!(query::active_role(&world), Role::A);
        assert_eq!(query::player(&world).position, Vec2::new(50.0, 500.0));
        assert_eq!(query::guard(&world).path_index, 0);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn switching_zeroes_previous_velocity_without_moving_it() {
        let mut world = world(LevelId::JelloTrap);
        let _ = run(
            &mut world,
            Command::SetActiveVelocity {
                velocity: Vec2::new(180.0, 0.0),
            },
        );
        let _ = tick(&mut world, 100);
        let before = query::character(&world, Role::A).position;

        let events = run(&mut world, Command::SwitchActive);

        assert_eq!(events, vec![Event::ActiveSwitched { active: Role::B }]);
        let previous = query::character(&world, Role::A);
        assert_eq!(previous.velocity, Vec2::ZERO);
        assert_eq!(previous.position, before);
        assert!(!previous.active);
    }

    #[test]
    fn characters_stay_inside_the_play_area() {
        let mut world = world(LevelId::DeskPrank);
        let _ = run(
            &mut world,
            Command::SetActiveVelocity {
                velocity: Vec2::new(-180.0, 180.0),
            },
        );
        let _ = tick(&mut world, 5_000);

        let player = query::player(&world);
        assert_eq!(player.position, Vec2::new(0.0, 640.0));
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn distraction_timer_arms_once_and_expires_after_duration() {
        let mut world = world(LevelId::DeskPrank);
        let point = Vec2::new(250.0, 205.0);
        assert_eq!(
            run(&mut world, Command::StartDistraction { point }),
            vec![Event::DistractionStarted { point }]
        );

        let armed = run(&mut world, Command::HoldGuard);
        assert_eq!(
            armed,
            vec![Event::DistractionArmed {
                expires_in: Duration::from_secs(3)
            }]
        );
        assert!(run(&mut world, Command::HoldGuard).is_empty());
        assert!(query::guard(&world).distraction_pending);

        assert!(!tick(&mut world, 2_999).contains(&Event::DistractionExpired));
        assert!(tick(&mut world, 1).contains(&Event::DistractionExpired));

        let guard = query::guard(&world);
        assert_eq!(guard.mode, GuardMode::Patrol);
        assert_eq!(guard.distraction_point, None);
        assert!(!guard.distraction_pending);
    }

    #[test]
    fn new_distraction_replaces_target_and_cancels_timer() {
        let mut world = world(LevelId::DeskPrank);
        let _ = run(
            &mut world,
            Command::StartDistraction {
                point: Vec2::new(250.0, 200.0),
            },
        );
        let _ = run(&mut world, Command::HoldGuard);
        let _ = tick(&mut world, 2_000);

        let replacement = Vec2::new(100.0, 100.0);
        let _ = run(&mut world, Command::StartDistraction { point: replacement });
        let guard = query::guard(&world);
        assert_eq!(guard.distraction_point, Some(replacement));
        assert!(!guard.distraction_pending);

        assert!(!tick(&mut world, 5_000).contains(&Event::DistractionExpired));
        assert_eq!(query::guard(&world).mode, GuardMode::Distracted);
    }

    #[test]
    fn push_decays_after_duration() {
        let mut world = world(LevelId::DeskPrank);
        let desk = PropId::new(0);
        let _ = run(
            &mut world,
            Command::PushProp {
                prop: desk,
                velocity: Vec2::new(150.0, 0.0),
                duration: Duration::from_millis(300),
            },
        );

        let _ = tick(&mut world, 200);
        let moving = query::prop_view(&world);
        assert_eq!(moving.get(desk).map(|prop| prop.velocity.x), Some(150.0));

        let events = tick(&mut world, 100);
        assert!(events.contains(&Event::PropHalted { prop: desk }));
        let halted = query::prop_view(&world);
        let snapshot = halted.get(desk).expect("desk exists");
        assert_eq!(snapshot.velocity, Vec2::ZERO);
        assert!((snapshot.position.x - 225.0).abs() < 1e-3);
    }

    #[test]
    fn tampering_is_idempotent() {
        let mut world = world(LevelId::JelloTrap);
        let jello = PropId::new(0);
        assert_eq!(
            run(&mut world, Command::TamperProp { prop: jello }),
            vec![Event::PropTampered { prop: jello }]
        );
        assert!(run(&mut world, Command::TamperProp { prop: jello }).is_empty());
        assert!(run(&mut world, Command::TamperProp { prop: PropId::new(9) }).is_empty());
    }

    #[test]
    fn lever_panics_guard_and_pulses_alarm() {
        let mut world = world(LevelId::FireDrill);
        let _ = run(
            &mut world,
            Command::StartDistraction {
                point: Vec2::new(200.0, 200.0),
            },
        );

        let events = run(&mut world, Command::PullLever);
        assert_eq!(
            events,
            vec![Event::AlarmRaised {
                flee_point: Vec2::new(50.0, 50.0)
            }]
        );
        assert!(run(&mut world, Command::PullLever).is_empty());

        let guard = query::guard(&world);
        assert_eq!(guard.mode, GuardMode::Panic);
        assert_eq!(guard.distraction_point, None);
        assert!(query::alarm_raised(&world));

        assert!(run(
            &mut world,
            Command::StartDistraction {
                point: Vec2::ZERO
            }
        )
        .is_empty());

        let pulses = tick(&mut world, 1_000)
            .into_iter()
            .filter(|event| matches!(event, Event::AlarmPulse { .. }))
            .count();
        assert_eq!(pulses, 2);
    }

    #[test]
    fn lever_is_ignored_outside_the_fire_drill() {
        let mut world = world(LevelId::DeskPrank);
        assert!(run(&mut world, Command::PullLever).is_empty());
        assert!(!query::alarm_raised(&world));
    }

    #[test]
    fn detection_freezes_the_level() {
        let mut world = world(LevelId::DeskPrank);
        let _ = run(
            &mut world,
            Command::SetActiveVelocity {
                velocity: Vec2::new(0.0, -180.0),
            },
        );
        let _ = run(
            &mut world,
            Command::SteerGuard {
                velocity: Vec2::new(-60.0, 0.0),
            },
        );

        let events = run(&mut world, Command::ReportDetection);
        assert!(matches!(events.as_slice(), [Event::Busted { role: Role::A, .. }]));
        assert_eq!(query::outcome(&world), Outcome::Lost);

        let before = query::level_view(&world);
        assert!(tick(&mut world, 1_000).is_empty());
        assert!(run(&mut world, Command::SwitchActive).is_empty());
        assert!(run(&mut world, Command::DeclareVictory).is_empty());
        assert!(run(&mut world, Command::RequestAction).is_empty());
        assert_eq!(query::level_view(&world), before);
    }

    #[test]
    fn victory_schedules_the_transition() {
        let mut world = world(LevelId::JelloTrap);
        let events = run(&mut world, Command::DeclareVictory);
        assert_eq!(
            events,
            vec![Event::LevelWon {
                level: LevelId::JelloTrap,
                next: Some(LevelId::FireDrill),
                delay: Duration::from_secs(3),
            }]
        );
        assert!(run(&mut world, Command::ReportDetection).is_empty());

        assert!(tick(&mut world, 2_999).is_empty());
        assert_eq!(
            tick(&mut world, 1),
            vec![Event::LevelTransitionDue {
                next: Some(LevelId::FireDrill)
            }]
        );
    }

    #[test]
    fn alarm_flashes_are_reproducible_per_seed() {
        let flashes = || {
            let mut world = World::with_seed(LevelId::FireDrill, &Tuning::default(), 7);
            let _ = run(&mut world, Command::PullLever);
            tick(&mut world, 10_000)
        };
        assert_eq!(flashes(), flashes());
    }
}
