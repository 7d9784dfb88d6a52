#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Office Pranksters engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative level world, and pure systems. Systems inspect immutable
//! snapshots and respond with [`Command`] batches, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what actually changed. Commands that do not apply to the current
//! state (for example anything issued after the level ended) produce no events.

pub mod geometry;
mod tuning;

use std::time::Duration;

pub use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use self::geometry::Rect;
pub use self::tuning::{Tuning, TuningError};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Office Pranksters: Retro Revenge";

/// Identity of one of the two player-controlled characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// The quick character whose ability creates distractions.
    A,
    /// The careful character whose ability performs the level's prank.
    B,
}

impl Role {
    /// Returns the other role.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// The five prank levels in campaign order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LevelId {
    /// Push a desk into the storage corner.
    DeskPrank,
    /// Bait the guard into a jello-filled stapler.
    JelloTrap,
    /// Pull the fire alarm and escape through the exit.
    FireDrill,
    /// Herd three desks into one zone.
    MegaDesk,
    /// Spike the coffee before the guard drinks it.
    FinalPrank,
}

impl LevelId {
    /// Every level in campaign order.
    pub const ALL: [LevelId; 5] = [
        Self::DeskPrank,
        Self::JelloTrap,
        Self::FireDrill,
        Self::MegaDesk,
        Self::FinalPrank,
    ];

    /// First level of the campaign.
    #[must_use]
    pub const fn first() -> Self {
        Self::DeskPrank
    }

    /// One-based level number shown to players.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::DeskPrank => 1,
            Self::JelloTrap => 2,
            Self::FireDrill => 3,
            Self::MegaDesk => 4,
            Self::FinalPrank => 5,
        }
    }

    /// Resolves a one-based level number.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::DeskPrank),
            2 => Some(Self::JelloTrap),
            3 => Some(Self::FireDrill),
            4 => Some(Self::MegaDesk),
            5 => Some(Self::FinalPrank),
            _ => None,
        }
    }

    /// Level that follows this one, or `None` after the final prank.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::DeskPrank => Some(Self::JelloTrap),
            Self::JelloTrap => Some(Self::FireDrill),
            Self::FireDrill => Some(Self::MegaDesk),
            Self::MegaDesk => Some(Self::FinalPrank),
            Self::FinalPrank => None,
        }
    }

    /// Title displayed in the heads-up display.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::DeskPrank => "LEVEL 1: DESK PRANK",
            Self::JelloTrap => "LEVEL 2: JELLO TRAP",
            Self::FireDrill => "LEVEL 3: FIRE DRILL",
            Self::MegaDesk => "LEVEL 4: MEGADESK",
            Self::FinalPrank => "LEVEL 5: FINAL PRANK",
        }
    }

    /// Delay between winning this level and moving on.
    #[must_use]
    pub const fn transition_delay(self) -> Duration {
        match self {
            Self::JelloTrap => Duration::from_millis(3_000),
            Self::FinalPrank => Duration::from_millis(4_000),
            Self::DeskPrank | Self::FireDrill | Self::MegaDesk => Duration::from_millis(2_000),
        }
    }
}

/// Behavioural state of the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardMode {
    /// Walking the cyclic patrol path.
    Patrol,
    /// Walking to, or lingering at, a distraction point.
    Distracted,
    /// Fleeing an alarm. Terminal for the rest of the level.
    Panic,
}

/// Outcome of a level attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The level is still being played.
    Running,
    /// The objective was completed.
    Won,
    /// The active character was spotted by the guard.
    Lost,
}

impl Outcome {
    /// Reports whether the outcome freezes the simulation.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Horizontal orientation used to mirror character sprites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Sprite drawn as authored.
    #[default]
    Right,
    /// Sprite mirrored horizontally.
    Left,
}

/// Animation state requested from the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Animation {
    /// Neutral standing pose.
    Idle,
    /// Looping walk cycle.
    Walking,
}

/// Identifier assigned to a level prop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropId(u32);

impl PropId {
    /// Creates a new prop identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of props placed in the levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropKind {
    /// A pushable desk.
    Desk,
    /// A stapler that can be hidden in jello.
    Jello,
    /// A coffee cup that can be spiked.
    Coffee,
}

/// Semantic audio cues triggered by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Menu selection or character switch.
    Select,
    /// A character used their ability.
    Action,
    /// A level was completed.
    Win,
    /// The guard spotted the active character.
    Bust,
    /// Background loop should start.
    AmbientLoopStart,
    /// Background loop should stop.
    AmbientLoopStop,
}

/// Fire-and-forget audio service injected by the application shell.
pub trait AudioFeedback {
    /// Plays the cue. Implementations must not block.
    fn play(&mut self, cue: AudioCue);
}

/// Current state of the four directional keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionalKeys {
    /// Up key held.
    pub up: bool,
    /// Down key held.
    pub down: bool,
    /// Left key held.
    pub left: bool,
    /// Right key held.
    pub right: bool,
}

/// Pointer position in world units together with its button state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Pointer location in world space.
    pub position: Vec2,
    /// Whether the primary button or touch is held.
    pub pressed: bool,
}

/// Read-only input sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Directional keys.
    pub keys: DirectionalKeys,
    /// Pointer, when the adapter has one.
    pub pointer: Option<PointerState>,
    /// Swap button pressed on this tick.
    pub swap_pressed: bool,
    /// Action button pressed on this tick.
    pub action_pressed: bool,
    /// Restart button pressed on this tick.
    pub restart_pressed: bool,
    /// Mute button pressed on this tick.
    pub mute_pressed: bool,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the level clock: integrates velocities and fires due timers.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Hands control to the inactive character.
    SwitchActive,
    /// Sets the velocity of the active character.
    SetActiveVelocity {
        /// Velocity in units per second.
        velocity: Vec2,
    },
    /// Asks the world to announce the active character's ability use.
    RequestAction,
    /// Sets the guard's velocity.
    SteerGuard {
        /// Velocity in units per second.
        velocity: Vec2,
    },
    /// Moves the guard's patrol cursor to the next waypoint.
    AdvanceWaypoint,
    /// Stops the guard at its distraction point and arms the expiry timer if none is pending.
    HoldGuard,
    /// Diverts the guard toward a point.
    StartDistraction {
        /// Point the guard walks to.
        point: Vec2,
    },
    /// Gives a prop a temporary velocity that decays back to rest.
    PushProp {
        /// Prop being pushed.
        prop: PropId,
        /// Velocity applied to the prop.
        velocity: Vec2,
        /// Time after which the prop stops.
        duration: Duration,
    },
    /// Marks a static prop as pranked.
    TamperProp {
        /// Prop being tampered with.
        prop: PropId,
    },
    /// Pulls the fire alarm lever.
    PullLever,
    /// Records that the guard spotted the active character.
    ReportDetection,
    /// Records that the level objective is complete.
    DeclareVictory,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the level clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Control moved to another character.
    ActiveSwitched {
        /// Role that is now active.
        active: Role,
    },
    /// The active character used their ability.
    ActionRequested {
        /// Role that acted.
        role: Role,
        /// Position of the acting character.
        position: Vec2,
    },
    /// The guard was diverted.
    DistractionStarted {
        /// Point the guard walks to.
        point: Vec2,
    },
    /// The guard reached the distraction and the expiry countdown started.
    DistractionArmed {
        /// Time until the guard resumes patrolling.
        expires_in: Duration,
    },
    /// The distraction ran out and the guard resumed patrolling.
    DistractionExpired,
    /// The guard reached a patrol waypoint.
    WaypointReached {
        /// Index of the waypoint that was reached.
        index: usize,
        /// Index of the waypoint the guard heads to next.
        next: usize,
    },
    /// A prop started sliding.
    PropPushed {
        /// Prop that moves.
        prop: PropId,
        /// Velocity applied.
        velocity: Vec2,
    },
    /// A pushed prop came to rest.
    PropHalted {
        /// Prop that stopped.
        prop: PropId,
    },
    /// A prop was pranked.
    PropTampered {
        /// Prop that was pranked.
        prop: PropId,
    },
    /// The fire alarm went off and the guard panicked.
    AlarmRaised {
        /// Point the guard flees to.
        flee_point: Vec2,
    },
    /// Cosmetic alarm beat.
    AlarmPulse {
        /// Whether the screen flashes on this beat.
        flash: bool,
    },
    /// The guard spotted the active character. Terminal.
    Busted {
        /// Role that was spotted.
        role: Role,
        /// Guard position at the moment of detection.
        guard_position: Vec2,
    },
    /// The objective was completed. Terminal.
    LevelWon {
        /// Level that was completed.
        level: LevelId,
        /// Level to load next, or `None` when the campaign is complete.
        next: Option<LevelId>,
        /// Delay before the transition fires.
        delay: Duration,
    },
    /// The post-victory delay elapsed.
    LevelTransitionDue {
        /// Level to load next, or `None` when the campaign is complete.
        next: Option<LevelId>,
    },
}

/// Immutable representation of a character used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterSnapshot {
    /// Identity of the character.
    pub role: Role,
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Current sprite orientation.
    pub facing: Facing,
    /// Fixed movement speed.
    pub speed: f32,
    /// Whether the character receives input.
    pub active: bool,
}

impl CharacterSnapshot {
    /// Animation that matches the character's velocity.
    #[must_use]
    pub fn animation(&self) -> Animation {
        if self.velocity == Vec2::ZERO {
            Animation::Idle
        } else {
            Animation::Walking
        }
    }
}

/// Immutable representation of the guard used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct GuardSnapshot {
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Behavioural mode.
    pub mode: GuardMode,
    /// Cyclic patrol waypoints.
    pub patrol_path: Vec<Vec2>,
    /// Index of the waypoint the guard is walking to.
    pub path_index: usize,
    /// Active distraction target, if any.
    pub distraction_point: Option<Vec2>,
    /// Whether the distraction expiry countdown is running.
    pub distraction_pending: bool,
    /// Flee destination once the guard panics.
    pub flee_point: Option<Vec2>,
}

impl GuardSnapshot {
    /// Waypoint the guard is currently walking toward.
    #[must_use]
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.patrol_path.get(self.path_index).copied()
    }

    /// Facing angle in radians derived from the velocity.
    #[must_use]
    pub fn facing_angle(&self) -> f32 {
        geometry::heading(self.velocity)
    }

    /// Horizontal sprite orientation derived from the velocity.
    #[must_use]
    pub fn facing(&self) -> Facing {
        if self.velocity.x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Immutable representation of a prop used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropSnapshot {
    /// Identifier of the prop.
    pub id: PropId,
    /// Kind of prop.
    pub kind: PropKind,
    /// Centre position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Half of the prop's width and height.
    pub half_extents: Vec2,
    /// Whether the prop has been pranked.
    pub tampered: bool,
}

impl PropSnapshot {
    /// Axis-aligned bounds of the prop.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_center_half_extents(self.position, self.half_extents)
    }
}

/// Read-only snapshot describing all props of the level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropView {
    snapshots: Vec<PropSnapshot>,
}

impl PropView {
    /// Creates a new prop view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PropSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured prop snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PropSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a single prop.
    #[must_use]
    pub fn get(&self, id: PropId) -> Option<&PropSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }
}

/// Fixed, level-specific geometry that the objective rules inspect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LevelLayout {
    /// Level 1.
    DeskPrank {
        /// The pushable desk.
        desk: PropId,
        /// Point the desk must reach.
        storage: Vec2,
    },
    /// Level 2.
    JelloTrap {
        /// The stapler to hide in jello.
        jello: PropId,
    },
    /// Level 3.
    FireDrill {
        /// Fire alarm lever position.
        lever: Vec2,
        /// Exit door position.
        exit: Vec2,
        /// Point the guard flees to once the alarm sounds.
        flee_point: Vec2,
    },
    /// Level 4.
    MegaDesk {
        /// The three pushable desks.
        desks: [PropId; 3],
        /// Zone every desk must overlap.
        zone: Rect,
    },
    /// Level 5.
    FinalPrank {
        /// The coffee to spike.
        coffee: PropId,
    },
}

/// Complete read-only snapshot of a level used by the objective rules.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelView {
    /// Level being played.
    pub level: LevelId,
    /// Current outcome.
    pub outcome: Outcome,
    /// The active character.
    pub player: CharacterSnapshot,
    /// The inactive character.
    pub partner: CharacterSnapshot,
    /// The guard.
    pub guard: GuardSnapshot,
    /// Every prop in the level.
    pub props: PropView,
    /// Level-specific geometry.
    pub layout: LevelLayout,
    /// Whether the fire alarm has been pulled.
    pub alarm_raised: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn level_numbers_round_trip() {
        for level in LevelId::ALL {
            assert_eq!(LevelId::from_number(level.number()), Some(level));
        }
        assert_eq!(LevelId::from_number(0), None);
        assert_eq!(LevelId::from_number(6), None);
    }

    #[test]
    fn campaign_order_ends_after_final_prank() {
        let mut visited = vec![LevelId::first()];
        while let Some(next) = visited.last().and_then(|level| level.next()) {
            visited.push(next);
        }
        assert_eq!(visited, LevelId::ALL.to_vec());
    }

    #[test]
    fn transition_delays_match_reference_levels() {
        assert_eq!(LevelId::DeskPrank.transition_delay(), Duration::from_secs(2));
        assert_eq!(LevelId::JelloTrap.transition_delay(), Duration::from_secs(3));
        assert_eq!(LevelId::FinalPrank.transition_delay(), Duration::from_secs(4));
    }

    #[test]
    fn roles_alternate() {
        assert_eq!(Role::A.other(), Role::B);
        assert_eq!(Role::B.other().other(), Role::B);
    }

    #[test]
    fn summary_types_round_trip_through_bincode() {
        assert_round_trip(&LevelId::FireDrill);
        assert_round_trip(&Outcome::Lost);
        assert_round_trip(&AudioCue::AmbientLoopStop);
    }

    #[test]
    fn guard_facing_follows_velocity() {
        let mut guard = GuardSnapshot {
            position: Vec2::ZERO,
            velocity: Vec2::new(-60.0, 0.0),
            mode: GuardMode::Patrol,
            patrol_path: vec![Vec2::ZERO],
            path_index: 0,
            distraction_point: None,
            distraction_pending: false,
            flee_point: None,
        };
        assert_eq!(guard.facing(), Facing::Left);
        guard.velocity = Vec2::ZERO;
        assert_eq!(guard.facing(), Facing::Right);
        assert_eq!(guard.facing_angle(), 0.0);
        assert_eq!(guard.current_waypoint(), Some(Vec2::ZERO));
    }

    #[test]
    fn idle_character_requests_idle_animation() {
        let character = CharacterSnapshot {
            role: Role::B,
            position: Vec2::new(100.0, 500.0),
            velocity: Vec2::ZERO,
            facing: Facing::Left,
            speed: 120.0,
            active: false,
        };
        assert_eq!(character.animation(), Animation::Idle);
    }

    #[test]
    fn prop_view_is_sorted_by_identifier() {
        let prop = |id: u32| PropSnapshot {
            id: PropId::new(id),
            kind: PropKind::Desk,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            half_extents: Vec2::splat(4.0),
            tampered: false,
        };
        let view = PropView::from_snapshots(vec![prop(2), prop(0), prop(1)]);
        let ids: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(view.get(PropId::new(1)).is_some());
        assert!(view.get(PropId::new(7)).is_none());
    }
}
