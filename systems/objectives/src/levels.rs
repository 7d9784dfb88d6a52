use std::time::Duration;

use pranksters_core::{
    geometry::{direction_towards, distance},
    Command, LevelId, LevelLayout, LevelView, PropId, Vec2,
};

use crate::LevelRules;

/// Level 1: shove the desk into the storage corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeskPrank {
    /// Maximum distance between role B and the desk for a push.
    pub reach: f32,
    /// Speed the desk slides at.
    pub push_speed: f32,
    /// Time the desk slides before stopping.
    pub push_duration: Duration,
    /// Distance from the storage point at which the desk counts as stored.
    pub storage_radius: f32,
}

impl Default for DeskPrank {
    fn default() -> Self {
        Self {
            reach: 60.0,
            push_speed: 150.0,
            push_duration: Duration::from_millis(300),
            storage_radius: 40.0,
        }
    }
}

impl LevelRules for DeskPrank {
    fn level(&self) -> LevelId {
        LevelId::DeskPrank
    }

    fn handle_secondary(&self, view: &LevelView, position: Vec2, out: &mut Vec<Command>) {
        let LevelLayout::DeskPrank { desk, .. } = view.layout else {
            return;
        };
        push_if_within(
            view,
            desk,
            position,
            self.reach,
            self.push_speed,
            self.push_duration,
            out,
        );
    }

    fn evaluate_win(&self, view: &LevelView) -> bool {
        let LevelLayout::DeskPrank { desk, storage } = view.layout else {
            return false;
        };
        view.props
            .get(desk)
            .is_some_and(|desk| distance(desk.position, storage) < self.storage_radius)
    }
}

/// Level 2: hide the stapler in jello and lure the guard past it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JelloTrap {
    /// Maximum distance between role B and the stapler for the prank.
    pub reach: f32,
    /// Distance between the guard and the trap that springs it.
    pub trigger_radius: f32,
}

impl Default for JelloTrap {
    fn default() -> Self {
        Self {
            reach: 50.0,
            trigger_radius: 50.0,
        }
    }
}

impl LevelRules for JelloTrap {
    fn level(&self) -> LevelId {
        LevelId::JelloTrap
    }

    fn handle_secondary(&self, view: &LevelView, position: Vec2, out: &mut Vec<Command>) {
        let LevelLayout::JelloTrap { jello } = view.layout else {
            return;
        };
        tamper_if_within(view, jello, position, self.reach, out);
    }

    fn evaluate_win(&self, view: &LevelView) -> bool {
        let LevelLayout::JelloTrap { jello } = view.layout else {
            return false;
        };
        guard_reached_tampered(view, jello, self.trigger_radius)
    }
}

/// Level 3: pull the fire alarm and slip out while the guard panics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireDrill {
    /// Maximum distance between role B and the lever.
    pub lever_reach: f32,
    /// Distance from the exit at which the active character escapes.
    pub exit_radius: f32,
}

impl Default for FireDrill {
    fn default() -> Self {
        Self {
            lever_reach: 50.0,
            exit_radius: 50.0,
        }
    }
}

impl LevelRules for FireDrill {
    fn level(&self) -> LevelId {
        LevelId::FireDrill
    }

    fn handle_secondary(&self, view: &LevelView, position: Vec2, out: &mut Vec<Command>) {
        let LevelLayout::FireDrill { lever, .. } = view.layout else {
            return;
        };
        if !view.alarm_raised && distance(position, lever) < self.lever_reach {
            out.push(Command::PullLever);
        }
    }

    fn evaluate_win(&self, view: &LevelView) -> bool {
        let LevelLayout::FireDrill { exit, .. } = view.layout else {
            return false;
        };
        view.alarm_raised && distance(view.player.position, exit) < self.exit_radius
    }
}

/// Level 4: herd all three desks into the zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MegaDesk {
    /// Maximum distance between role B and a desk for it to be pushed.
    pub reach: f32,
    /// Speed the desks slide at.
    pub push_speed: f32,
    /// Time the desks slide before stopping.
    pub push_duration: Duration,
}

impl Default for MegaDesk {
    fn default() -> Self {
        Self {
            reach: 60.0,
            push_speed: 180.0,
            push_duration: Duration::from_millis(400),
        }
    }
}

impl LevelRules for MegaDesk {
    fn level(&self) -> LevelId {
        LevelId::MegaDesk
    }

    fn handle_secondary(&self, view: &LevelView, position: Vec2, out: &mut Vec<Command>) {
        let LevelLayout::MegaDesk { desks, .. } = view.layout else {
            return;
        };
        for desk in desks {
            push_if_within(
                view,
                desk,
                position,
                self.reach,
                self.push_speed,
                self.push_duration,
                out,
            );
        }
    }

    fn evaluate_win(&self, view: &LevelView) -> bool {
        let LevelLayout::MegaDesk { desks, zone } = view.layout else {
            return false;
        };
        desks.iter().all(|desk| {
            view.props
                .get(*desk)
                .is_some_and(|desk| desk.bounds().intersects(&zone))
        })
    }
}

/// Level 5: spike the coffee and wait for the guard to come for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FinalPrank {
    /// Maximum distance between role B and the cup.
    pub reach: f32,
    /// Distance between the guard and the cup that counts as drinking it.
    pub drink_radius: f32,
}

impl Default for FinalPrank {
    fn default() -> Self {
        Self {
            reach: 40.0,
            drink_radius: 20.0,
        }
    }
}

impl LevelRules for FinalPrank {
    fn level(&self) -> LevelId {
        LevelId::FinalPrank
    }

    fn handle_secondary(&self, view: &LevelView, position: Vec2, out: &mut Vec<Command>) {
        let LevelLayout::FinalPrank { coffee } = view.layout else {
            return;
        };
        tamper_if_within(view, coffee, position, self.reach, out);
    }

    fn evaluate_win(&self, view: &LevelView) -> bool {
        let LevelLayout::FinalPrank { coffee } = view.layout else {
            return false;
        };
        guard_reached_tampered(view, coffee, self.drink_radius)
    }
}

fn push_if_within(
    view: &LevelView,
    prop: PropId,
    position: Vec2,
    reach: f32,
    speed: f32,
    duration: Duration,
    out: &mut Vec<Command>,
) {
    let Some(snapshot) = view.props.get(prop) else {
        return;
    };
    if distance(position, snapshot.position) >= reach {
        return;
    }

    // Standing on the prop pushes it along +x, as atan2(0, 0) would.
    let direction = direction_towards(position, snapshot.position).unwrap_or(Vec2::X);
    out.push(Command::PushProp {
        prop,
        velocity: direction * speed,
        duration,
    });
}

fn tamper_if_within(
    view: &LevelView,
    prop: PropId,
    position: Vec2,
    reach: f32,
    out: &mut Vec<Command>,
) {
    let in_reach = view.props.get(prop).is_some_and(|snapshot| {
        !snapshot.tampered && distance(position, snapshot.position) < reach
    });
    if in_reach {
        out.push(Command::TamperProp { prop });
    }
}

fn guard_reached_tampered(view: &LevelView, prop: PropId, radius: f32) -> bool {
    view.props.get(prop).is_some_and(|snapshot| {
        snapshot.tampered && distance(view.guard.position, snapshot.position) < radius
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pranksters_core::{
        geometry::Rect, CharacterSnapshot, Facing, GuardMode, GuardSnapshot, Outcome, PropKind,
        PropSnapshot, PropView, Role,
    };

    fn character(role: Role, position: Vec2) -> CharacterSnapshot {
        CharacterSnapshot {
            role,
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            speed: 120.0,
            active: true,
        }
    }

    fn prop(id: u32, position: Vec2, tampered: bool) -> PropSnapshot {
        PropSnapshot {
            id: PropId::new(id),
            kind: PropKind::Desk,
            position,
            velocity: Vec2::ZERO,
            half_extents: Vec2::new(24.0, 16.0),
            tampered,
        }
    }

    fn view(level: LevelId, layout: LevelLayout, props: Vec<PropSnapshot>) -> LevelView {
        LevelView {
            level,
            outcome: Outcome::Running,
            player: character(Role::B, Vec2::new(100.0, 500.0)),
            partner: character(Role::A, Vec2::new(50.0, 500.0)),
            guard: GuardSnapshot {
                position: Vec2::new(250.0, 200.0),
                velocity: Vec2::ZERO,
                mode: GuardMode::Patrol,
                patrol_path: vec![Vec2::new(250.0, 200.0)],
                path_index: 0,
                distraction_point: None,
                distraction_pending: false,
                flee_point: None,
            },
            props: PropView::from_snapshots(props),
            layout,
            alarm_raised: false,
        }
    }

    fn desk_prank(desk_position: Vec2) -> LevelView {
        view(
            LevelId::DeskPrank,
            LevelLayout::DeskPrank {
                desk: PropId::new(0),
                storage: Vec2::new(300.0, 100.0),
            },
            vec![prop(0, desk_position, false)],
        )
    }

    #[test]
    fn desk_win_radius_is_exclusive() {
        let rules = DeskPrank::default();
        assert!(rules.evaluate_win(&desk_prank(Vec2::new(300.0, 140.0 - 1e-3))));
        assert!(!rules.evaluate_win(&desk_prank(Vec2::new(300.0, 140.0))));
        assert!(!rules.evaluate_win(&desk_prank(Vec2::new(300.0, 141.0))));
    }

    #[test]
    fn desk_is_pushed_away_from_the_player() {
        let rules = DeskPrank::default();
        let view = desk_prank(Vec2::new(180.0, 250.0));
        let mut commands = Vec::new();

        rules.handle_secondary(&view, Vec2::new(180.0, 300.0), &mut commands);
        assert_eq!(
            commands,
            vec![Command::PushProp {
                prop: PropId::new(0),
                velocity: Vec2::new(0.0, -150.0),
                duration: Duration::from_millis(300),
            }]
        );

        commands.clear();
        rules.handle_secondary(&view, Vec2::new(180.0, 310.0), &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn primary_ability_distracts_at_the_player() {
        let rules = DeskPrank::default();
        let mut commands = Vec::new();
        rules.handle_primary(&desk_prank(Vec2::ZERO), Vec2::new(42.0, 24.0), &mut commands);
        assert_eq!(
            commands,
            vec![Command::StartDistraction {
                point: Vec2::new(42.0, 24.0)
            }]
        );
    }

    #[test]
    fn megadesk_needs_every_desk_in_the_zone() {
        let layout = LevelLayout::MegaDesk {
            desks: [PropId::new(0), PropId::new(1), PropId::new(2)],
            zone: Rect::from_center_size(Vec2::new(180.0, 150.0), Vec2::new(200.0, 100.0)),
        };
        let rules = MegaDesk::default();
        let two = view(
            LevelId::MegaDesk,
            layout,
            vec![
                prop(0, Vec2::new(100.0, 150.0), false),
                prop(1, Vec2::new(260.0, 150.0), false),
                prop(2, Vec2::new(180.0, 350.0), false),
            ],
        );
        assert!(!rules.evaluate_win(&two));

        let three = view(
            LevelId::MegaDesk,
            layout,
            vec![
                prop(0, Vec2::new(100.0, 150.0), false),
                prop(1, Vec2::new(260.0, 150.0), false),
                prop(2, Vec2::new(180.0, 216.0), false),
            ],
        );
        assert!(rules.evaluate_win(&three));
    }

    #[test]
    fn megadesk_pushes_every_desk_in_reach() {
        let layout = LevelLayout::MegaDesk {
            desks: [PropId::new(0), PropId::new(1), PropId::new(2)],
            zone: Rect::from_center_size(Vec2::new(180.0, 150.0), Vec2::new(200.0, 100.0)),
        };
        let view = view(
            LevelId::MegaDesk,
            layout,
            vec![
                prop(0, Vec2::new(150.0, 300.0), false),
                prop(1, Vec2::new(210.0, 300.0), false),
                prop(2, Vec2::new(180.0, 400.0), false),
            ],
        );
        let mut commands = Vec::new();
        MegaDesk::default().handle_secondary(&view, Vec2::new(180.0, 300.0), &mut commands);
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn final_prank_requires_tamper_before_the_guard_arrives() {
        let layout = LevelLayout::FinalPrank {
            coffee: PropId::new(0),
        };
        let rules = FinalPrank::default();
        let mut untouched = view(
            LevelId::FinalPrank,
            layout,
            vec![prop(0, Vec2::new(180.0, 150.0), false)],
        );
        untouched.guard.position = Vec2::new(180.0, 150.0);
        assert!(!rules.evaluate_win(&untouched));

        let mut spiked = untouched.clone();
        spiked.props = PropView::from_snapshots(vec![prop(0, Vec2::new(180.0, 150.0), true)]);
        assert!(rules.evaluate_win(&spiked));

        spiked.guard.position = Vec2::new(200.0, 150.0);
        assert!(!rules.evaluate_win(&spiked));
    }

    #[test]
    fn fire_drill_lever_is_pulled_once() {
        let layout = LevelLayout::FireDrill {
            lever: Vec2::new(180.0, 100.0),
            exit: Vec2::new(330.0, 350.0),
            flee_point: Vec2::new(50.0, 50.0),
        };
        let rules = FireDrill::default();
        let mut view = view(LevelId::FireDrill, layout, Vec::new());

        let mut commands = Vec::new();
        rules.handle_secondary(&view, Vec2::new(180.0, 140.0), &mut commands);
        assert_eq!(commands, vec![Command::PullLever]);

        view.alarm_raised = true;
        commands.clear();
        rules.handle_secondary(&view, Vec2::new(180.0, 140.0), &mut commands);
        assert!(commands.is_empty());

        view.player.position = Vec2::new(300.0, 350.0);
        assert!(rules.evaluate_win(&view));
        view.alarm_raised = false;
        assert!(!rules.evaluate_win(&view));
    }

    #[test]
    fn fire_drill_exit_radius_is_exclusive() {
        let layout = LevelLayout::FireDrill {
            lever: Vec2::new(180.0, 100.0),
            exit: Vec2::new(330.0, 350.0),
            flee_point: Vec2::new(50.0, 50.0),
        };
        let rules = FireDrill::default();
        let mut view = view(LevelId::FireDrill, layout, Vec::new());
        view.alarm_raised = true;

        view.player.position = Vec2::new(280.0, 350.0);
        assert!(!rules.evaluate_win(&view));
        view.player.position = Vec2::new(279.0, 350.0);
        assert!(!rules.evaluate_win(&view));
        view.player.position = Vec2::new(280.5, 350.0);
        assert!(rules.evaluate_win(&view));
    }

    fn jello_trap(tampered: bool, guard: Vec2) -> LevelView {
        let mut view = view(
            LevelId::JelloTrap,
            LevelLayout::JelloTrap {
                jello: PropId::new(0),
            },
            vec![prop(0, Vec2::new(180.0, 150.0), tampered)],
        );
        view.guard.position = guard;
        view
    }

    #[test]
    fn jello_is_tampered_only_within_reach() {
        let rules = JelloTrap::default();
        let view = jello_trap(false, Vec2::new(50.0, 150.0));
        let mut commands = Vec::new();

        rules.handle_secondary(&view, Vec2::new(180.0, 199.9), &mut commands);
        assert_eq!(
            commands,
            vec![Command::TamperProp {
                prop: PropId::new(0)
            }]
        );

        commands.clear();
        rules.handle_secondary(&view, Vec2::new(180.0, 200.0), &mut commands);
        assert!(commands.is_empty());

        rules.handle_secondary(
            &jello_trap(true, Vec2::new(50.0, 150.0)),
            Vec2::new(180.0, 160.0),
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn guard_passing_untampered_jello_does_not_win() {
        let rules = JelloTrap::default();
        assert!(!rules.evaluate_win(&jello_trap(false, Vec2::new(180.0, 150.0))));
        assert!(!rules.evaluate_win(&jello_trap(false, Vec2::new(182.0, 150.0))));
    }

    #[test]
    fn guard_near_tampered_jello_wins() {
        let rules = JelloTrap::default();
        assert!(rules.evaluate_win(&jello_trap(true, Vec2::new(182.0, 150.0))));
        assert!(rules.evaluate_win(&jello_trap(true, Vec2::new(229.9, 150.0))));
    }

    #[test]
    fn jello_trigger_radius_is_exclusive() {
        let rules = JelloTrap::default();
        assert!(!rules.evaluate_win(&jello_trap(true, Vec2::new(230.0, 150.0))));
        assert!(!rules.evaluate_win(&jello_trap(true, Vec2::new(180.0, 100.0))));
        assert!(!rules.evaluate_win(&jello_trap(true, Vec2::new(300.0, 150.0))));
    }
}
