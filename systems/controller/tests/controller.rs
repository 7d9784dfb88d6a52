use std::time::Duration;

use pranksters_core::{
    Command, DirectionalKeys, Event, Facing, InputSnapshot, LevelId, Role, Tuning, Vec2,
};
use pranksters_system_controller::{Config, Controller};
use pranksters_world::{self as world, query, World};

fn step(world: &mut World, controller: &Controller, input: &InputSnapshot) -> Vec<Event> {
    let mut events = Vec::new();
    let mut commands = Vec::new();
    controller.handle_buttons(input, &mut commands);
    for command in commands.drain(..) {
        world::apply(world, command, &mut events);
    }

    let player = query::player(world);
    controller.handle(input, &player, &mut commands);
    commands.push(Command::Tick {
        dt: Duration::from_millis(100),
    });
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn active_character_moves_at_its_own_speed() {
    let tuning = Tuning::default();
    let mut world = World::new(LevelId::DeskPrank, &tuning);
    let controller = Controller::new(Config::from_tuning(&tuning));
    let right = InputSnapshot {
        keys: DirectionalKeys {
            right: true,
            ..DirectionalKeys::default()
        },
        ..InputSnapshot::default()
    };

    let _ = step(&mut world, &controller, &right);
    let a = query::character(&world, Role::A);
    assert!((a.position.x - 68.0).abs() < 1e-3);
    assert_eq!(a.facing, Facing::Right);

    let swap = InputSnapshot {
        swap_pressed: true,
        ..right
    };
    let events = step(&mut world, &controller, &swap);
    assert!(events.contains(&Event::ActiveSwitched { active: Role::B }));

    let b = query::character(&world, Role::B);
    assert!((b.position.x - 112.0).abs() < 1e-3);
    let a_after = query::character(&world, Role::A);
    assert_eq!(a_after.velocity, Vec2::ZERO);
    assert_eq!(a_after.position, a.position);
}

#[test]
fn action_reports_the_acting_role_and_position() {
    let tuning = Tuning::default();
    let mut world = World::new(LevelId::JelloTrap, &tuning);
    let controller = Controller::new(Config::from_tuning(&tuning));
    let input = InputSnapshot {
        swap_pressed: true,
        action_pressed: true,
        ..InputSnapshot::default()
    };

    let events = step(&mut world, &controller, &input);

    assert!(events.contains(&Event::ActionRequested {
        role: Role::B,
        position: Vec2::new(100.0, 500.0),
    }));
}
