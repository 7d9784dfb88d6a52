#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level objective state machine.
//!
//! Each level is a [`LevelRules`] strategy deciding what the two characters'
//! abilities do and when the prank counts as complete. [`Objectives`] routes
//! ability requests to the strategy and declares victory once its predicate
//! holds. The world owns the resulting `running → won | lost` outcome.

mod levels;

use std::fmt::Debug;

use pranksters_core::{Command, Event, LevelId, LevelView, Role, Vec2};

pub use self::levels::{DeskPrank, FinalPrank, FireDrill, JelloTrap, MegaDesk};

/// Per-level behaviour plugged into the shared controller, patrol and vision systems.
pub trait LevelRules: Debug {
    /// Level these rules implement.
    fn level(&self) -> LevelId;

    /// Role A's ability. Diverts the guard to where the character stands.
    fn handle_primary(&self, _view: &LevelView, position: Vec2, out: &mut Vec<Command>) {
        out.push(Command::StartDistraction { point: position });
    }

    /// Role B's ability, which performs the level's prank.
    fn handle_secondary(&self, view: &LevelView, position: Vec2, out: &mut Vec<Command>);

    /// Reports whether the level's objective is met.
    fn evaluate_win(&self, view: &LevelView) -> bool;
}

/// Builds the rules for the provided level.
#[must_use]
pub fn rules_for(level: LevelId) -> Box<dyn LevelRules> {
    match level {
        LevelId::DeskPrank => Box::new(DeskPrank::default()),
        LevelId::JelloTrap => Box::new(JelloTrap::default()),
        LevelId::FireDrill => Box::new(FireDrill::default()),
        LevelId::MegaDesk => Box::new(MegaDesk::default()),
        LevelId::FinalPrank => Box::new(FinalPrank::default()),
    }
}

/// Pure system that applies the level's rules to world events and snapshots.
#[derive(Debug)]
pub struct Objectives {
    rules: Box<dyn LevelRules>,
}

impl Objectives {
    /// Creates the objective system for the provided level.
    #[must_use]
    pub fn new(level: LevelId) -> Self {
        Self::with_rules(rules_for(level))
    }

    /// Creates the objective system around custom rules.
    #[must_use]
    pub fn with_rules(rules: Box<dyn LevelRules>) -> Self {
        Self { rules }
    }

    /// Level the active rules implement.
    #[must_use]
    pub fn level(&self) -> LevelId {
        self.rules.level()
    }

    /// Translates ability requests into world commands.
    pub fn handle(&self, events: &[Event], view: &LevelView, out: &mut Vec<Command>) {
        if view.outcome.is_terminal() {
            return;
        }

        for event in events {
            if let Event::ActionRequested { role, position } = event {
                match role {
                    Role::A => self.rules.handle_primary(view, *position, out),
                    Role::B => self.rules.handle_secondary(view, *position, out),
                }
            }
        }
    }

    /// Emits `DeclareVictory` once the running level's predicate holds.
    pub fn evaluate(&self, view: &LevelView, out: &mut Vec<Command>) {
        if view.outcome.is_terminal() {
            return;
        }

        if self.rules.evaluate_win(view) {
            out.push(Command::DeclareVictory);
        }
    }
}
