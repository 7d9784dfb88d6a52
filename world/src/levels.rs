//! Static layouts of the five prank levels.

use pranksters_core::{geometry::Rect, LevelId, LevelLayout, PropId, PropKind, Vec2};

const DESK_HALF_EXTENTS: Vec2 = Vec2::new(24.0, 16.0);
const JELLO_HALF_EXTENTS: Vec2 = Vec2::new(32.0, 32.0);
const COFFEE_HALF_EXTENTS: Vec2 = Vec2::new(10.0, 10.0);

/// Initial placement of a prop.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PropSeed {
    pub(crate) id: PropId,
    pub(crate) kind: PropKind,
    pub(crate) position: Vec2,
    pub(crate) half_extents: Vec2,
}

/// Everything the world needs to build a fresh attempt of a level.
#[derive(Clone, Debug)]
pub(crate) struct LevelSetup {
    pub(crate) guard_start: Vec2,
    pub(crate) patrol_path: Vec<Vec2>,
    pub(crate) role_a_start: Vec2,
    pub(crate) role_b_start: Vec2,
    pub(crate) props: Vec<PropSeed>,
    pub(crate) layout: LevelLayout,
}

pub(crate) fn setup(level: LevelId) -> LevelSetup {
    match level {
        LevelId::DeskPrank => {
            let desk = PropId::new(0);
            LevelSetup {
                guard_start: Vec2::new(250.0, 200.0),
                patrol_path: vec![
                    Vec2::new(250.0, 200.0),
                    Vec2::new(50.0, 200.0),
                    Vec2::new(50.0, 400.0),
                    Vec2::new(250.0, 400.0),
                ],
                role_a_start: Vec2::new(50.0, 500.0),
                role_b_start: Vec2::new(100.0, 500.0),
                props: vec![desk_seed(desk, Vec2::new(180.0, 250.0))],
                layout: LevelLayout::DeskPrank {
                    desk,
                    storage: Vec2::new(300.0, 100.0),
                },
            }
        }
        LevelId::JelloTrap => {
            let jello = PropId::new(0);
            LevelSetup {
                guard_start: Vec2::new(50.0, 150.0),
                patrol_path: vec![Vec2::new(50.0, 150.0), Vec2::new(310.0, 150.0)],
                role_a_start: Vec2::new(50.0, 500.0),
                role_b_start: Vec2::new(100.0, 500.0),
                props: vec![PropSeed {
                    id: jello,
                    kind: PropKind::Jello,
                    position: Vec2::new(180.0, 150.0),
                    half_extents: JELLO_HALF_EXTENTS,
                }],
                layout: LevelLayout::JelloTrap { jello },
            }
        }
        LevelId::FireDrill => LevelSetup {
            guard_start: Vec2::new(300.0, 350.0),
            patrol_path: vec![Vec2::new(300.0, 350.0), Vec2::new(300.0, 150.0)],
            role_a_start: Vec2::new(50.0, 500.0),
            role_b_start: Vec2::new(100.0, 500.0),
            props: Vec::new(),
            layout: LevelLayout::FireDrill {
                lever: Vec2::new(180.0, 100.0),
                exit: Vec2::new(330.0, 350.0),
                flee_point: Vec2::new(50.0, 50.0),
            },
        },
        LevelId::MegaDesk => {
            let desks = [PropId::new(0), PropId::new(1), PropId::new(2)];
            let positions = [
                Vec2::new(100.0, 150.0),
                Vec2::new(260.0, 150.0),
                Vec2::new(180.0, 350.0),
            ];
            LevelSetup {
                guard_start: Vec2::new(180.0, 450.0),
                patrol_path: vec![Vec2::new(50.0, 450.0), Vec2::new(310.0, 450.0)],
                role_a_start: Vec2::new(50.0, 550.0),
                role_b_start: Vec2::new(100.0, 550.0),
                props: desks
                    .iter()
                    .zip(positions)
                    .map(|(id, position)| desk_seed(*id, position))
                    .collect(),
                layout: LevelLayout::MegaDesk {
                    desks,
                    zone: Rect::from_center_size(Vec2::new(180.0, 150.0), Vec2::new(200.0, 100.0)),
                },
            }
        }
        LevelId::FinalPrank => {
            let coffee = PropId::new(0);
            LevelSetup {
                guard_start: Vec2::new(180.0, 150.0),
                patrol_path: vec![
                    Vec2::new(180.0, 150.0),
                    Vec2::new(100.0, 150.0),
                    Vec2::new(260.0, 150.0),
                ],
                role_a_start: Vec2::new(50.0, 550.0),
                role_b_start: Vec2::new(310.0, 550.0),
                props: vec![PropSeed {
                    id: coffee,
                    kind: PropKind::Coffee,
                    position: Vec2::new(180.0, 150.0),
                    half_extents: COFFEE_HALF_EXTENTS,
                }],
                layout: LevelLayout::FinalPrank { coffee },
            }
        }
    }
}

fn desk_seed(id: PropId, position: Vec2) -> PropSeed {
    PropSeed {
        id,
        kind: PropKind::Desk,
        position,
        half_extents: DESK_HALF_EXTENTS,
    }
}
