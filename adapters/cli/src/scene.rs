//! Translates campaign state into rendering descriptors.

use glam::Vec2;
use pranksters_core::{AudioFeedback, GuardMode, LevelLayout, Outcome, Role, WELCOME_BANNER};
use pranksters_rendering::{
    CharacterPresentation, Color, ConePresentation, GuardPresentation, HudPresentation,
    MarkerPresentation, PropPresentation, Scene,
};
use pranksters_session::{Campaign, LevelSession, Stage};
use pranksters_world::{query, World};

const STORAGE_SIZE: Vec2 = Vec2::new(80.0, 80.0);
const LEVER_SIZE: Vec2 = Vec2::new(20.0, 30.0);
const EXIT_SIZE: Vec2 = Vec2::new(40.0, 60.0);

const STORAGE_COLOR: Color = Color::new(0.3, 0.3, 0.6, 0.6);
const LEVER_COLOR: Color = Color::new(0.85, 0.1, 0.1, 1.0);
const EXIT_COLOR: Color = Color::new(0.1, 0.6, 0.2, 1.0);
const ZONE_COLOR: Color = Color::new(0.3, 0.6, 0.3, 0.4);

/// Rebuilds the scene from the campaign's current stage.
pub(crate) fn populate_scene<A: AudioFeedback>(campaign: &Campaign<A>, scene: &mut Scene) {
    scene.clear();
    scene.hud.muted = campaign.audio().is_muted();

    match (campaign.stage(), campaign.session()) {
        (Stage::Playing(_), Some(session)) => populate_level(session, scene),
        (Stage::Victory, _) => {
            scene.hud.title = String::from(WELCOME_BANNER);
            scene.hud.banner = Some(String::from("ALL PRANKS COMPLETE!"));
            scene.hud.hint = Some(String::from("Press ACTION to play again"));
        }
        _ => {
            scene.hud.title = String::from(WELCOME_BANNER);
            scene.hud.hint = Some(String::from("Press ACTION to start"));
        }
    }
}

fn populate_level(session: &LevelSession, scene: &mut Scene) {
    let world = session.world();
    let level = query::level(world);
    let outcome = query::outcome(world);

    scene.markers = markers(world);
    let zone = match query::layout(world) {
        LevelLayout::MegaDesk { zone, .. } => Some(zone),
        _ => None,
    };
    scene.props = query::prop_view(world)
        .iter()
        .map(|prop| PropPresentation {
            kind: prop.kind,
            position: prop.position,
            size: prop.half_extents * 2.0,
            highlighted: prop.tampered
                || zone.is_some_and(|zone| prop.bounds().intersects(&zone)),
        })
        .collect();

    let guard = query::guard(world);
    let cone = session.vision_cone();
    scene.guard = Some(GuardPresentation {
        position: guard.position,
        facing: guard.facing(),
        cone: ConePresentation {
            apex: cone.apex,
            radius: cone.radius,
            start_angle: cone.start_angle,
            end_angle: cone.end_angle,
        },
        panicking: guard.mode == GuardMode::Panic,
    });

    scene.characters = [Role::A, Role::B]
        .into_iter()
        .map(|role| {
            let character = query::character(world, role);
            CharacterPresentation {
                role,
                position: character.position,
                facing: character.facing,
                animation: character.animation(),
                active: character.active,
            }
        })
        .collect();

    scene.alarm_flash = query::alarm_flash(world);
    scene.hud = HudPresentation {
        title: String::from(level.title()),
        active_role: (!outcome.is_terminal()).then(|| query::active_role(world)),
        muted: scene.hud.muted,
        banner: None,
        hint: None,
    };
    match outcome {
        Outcome::Running => {}
        Outcome::Lost => {
            scene.hud.banner = Some(String::from("BUSTED!"));
            scene.hud.hint = Some(String::from("Tap or press ACTION to try again"));
        }
        Outcome::Won => {
            scene.hud.banner = Some(String::from("PRANK COMPLETE!"));
        }
    }
}

fn markers(world: &World) -> Vec<MarkerPresentation> {
    let marker = |position: Vec2, size: Vec2, color: Color, label: &str| MarkerPresentation {
        position,
        size,
        color,
        label: Some(String::from(label)),
    };

    match query::layout(world) {
        LevelLayout::DeskPrank { storage, .. } => {
            vec![marker(storage, STORAGE_SIZE, STORAGE_COLOR, "STORAGE")]
        }
        LevelLayout::FireDrill { lever, exit, .. } => vec![
            marker(lever, LEVER_SIZE, LEVER_COLOR, "LEVER"),
            marker(exit, EXIT_SIZE, EXIT_COLOR, "EXIT"),
        ],
        LevelLayout::MegaDesk { zone, .. } => {
            vec![marker(zone.center(), zone.size(), ZONE_COLOR, "ZONE")]
        }
        LevelLayout::JelloTrap { .. } | LevelLayout::FinalPrank { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pranksters_core::{InputSnapshot, LevelId, Tuning};
    use pranksters_rendering::PlayAreaPresentation;
    use pranksters_session::CueLog;
    use std::time::Duration;

    fn empty_scene() -> Scene {
        let area = PlayAreaPresentation::new(360.0, 640.0, Color::from_rgb_u8(0x2d, 0x2d, 0x2d))
            .expect("valid play area");
        Scene::new(area)
    }

    #[test]
    fn menu_shows_only_the_banner() {
        let campaign = Campaign::new(Tuning::default(), CueLog::new());
        let mut scene = empty_scene();

        populate_scene(&campaign, &mut scene);

        assert_eq!(scene.hud.title, WELCOME_BANNER);
        assert!(scene.characters.is_empty());
        assert!(scene.guard.is_none());
    }

    #[test]
    fn fire_drill_draws_lever_exit_and_both_characters() {
        let mut campaign = Campaign::new(Tuning::default(), CueLog::new());
        campaign.start_at(LevelId::FireDrill);
        campaign.step(Duration::from_millis(16), &InputSnapshot::default());
        let mut scene = empty_scene();

        populate_scene(&campaign, &mut scene);

        assert_eq!(scene.hud.title, "LEVEL 3: FIRE DRILL");
        assert_eq!(scene.hud.active_role, Some(Role::A));
        assert_eq!(scene.markers.len(), 2);
        assert_eq!(scene.characters.len(), 2);
        assert!(scene.characters[0].active);
        assert!(!scene.characters[1].active);
        let guard = scene.guard.expect("guard drawn");
        assert_eq!(guard.cone.apex, guard.position);
        assert!(!guard.panicking);
    }

    #[test]
    fn desk_prank_draws_storage_and_desk() {
        let mut campaign = Campaign::new(Tuning::default(), CueLog::new());
        campaign.start_at(LevelId::DeskPrank);
        let mut scene = empty_scene();

        populate_scene(&campaign, &mut scene);

        assert_eq!(scene.markers.len(), 1);
        assert_eq!(scene.markers[0].size, STORAGE_SIZE);
        assert_eq!(scene.props.len(), 1);
        assert_eq!(scene.props[0].size, Vec2::new(48.0, 32.0));
        assert!(!scene.props[0].highlighted);
    }

    #[test]
    fn megadesk_highlights_desks_inside_the_zone() {
        let mut campaign = Campaign::new(Tuning::default(), CueLog::new());
        campaign.start_at(LevelId::MegaDesk);
        let mut scene = empty_scene();

        populate_scene(&campaign, &mut scene);

        let highlighted: Vec<bool> = scene.props.iter().map(|prop| prop.highlighted).collect();
        assert_eq!(highlighted, vec![true, true, false]);
    }
}
