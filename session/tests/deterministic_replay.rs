use std::time::Duration;

use pranksters_core::{
    AudioCue, DirectionalKeys, Event, InputSnapshot, LevelId, LevelView, PointerState, Tuning,
    Vec2,
};
use pranksters_session::{CueLog, HostRequest, HostRequests, LevelSession};
use pranksters_world::query;

#[test]
fn deterministic_replay_produces_identical_logs() {
    let first = replay(scripted_inputs());
    let second = replay(scripted_inputs());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(
        first
            .events
            .iter()
            .any(|event| matches!(event, Event::AlarmPulse { .. })),
        "script should raise the alarm"
    );
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<Event>,
    cues: Vec<AudioCue>,
    requests: Vec<HostRequest>,
    view: LevelView,
}

fn replay(inputs: Vec<InputSnapshot>) -> ReplayOutcome {
    let mut session = LevelSession::new(LevelId::FireDrill, &Tuning::default());
    let mut audio = CueLog::new();
    let mut host = HostRequests::new();
    let mut events = Vec::new();

    for input in inputs {
        events.extend(
            session
                .step(Duration::from_millis(16), &input, &mut audio, &mut host)
                .iter()
                .cloned(),
        );
    }

    ReplayOutcome {
        events,
        cues: audio.cues().to_vec(),
        requests: host.drain().collect(),
        view: query::level_view(session.world()),
    }
}

fn scripted_inputs() -> Vec<InputSnapshot> {
    let mut inputs = Vec::new();
    let hold = |inputs: &mut Vec<InputSnapshot>, input: InputSnapshot, frames: usize| {
        inputs.extend(std::iter::repeat(input).take(frames));
    };

    hold(
        &mut inputs,
        InputSnapshot {
            keys: DirectionalKeys {
                down: true,
                left: true,
                ..DirectionalKeys::default()
            },
            ..InputSnapshot::default()
        },
        30,
    );
    hold(
        &mut inputs,
        InputSnapshot {
            swap_pressed: true,
            ..InputSnapshot::default()
        },
        1,
    );
    hold(
        &mut inputs,
        InputSnapshot {
            pointer: Some(PointerState {
                position: Vec2::new(140.0, 100.0),
                pressed: true,
            }),
            ..InputSnapshot::default()
        },
        240,
    );
    hold(
        &mut inputs,
        InputSnapshot {
            action_pressed: true,
            ..InputSnapshot::default()
        },
        1,
    );
    hold(&mut inputs, InputSnapshot::default(), 120);
    inputs
}
