//! Runs the campaign without a window and summarises the result.

use std::{collections::BTreeMap, fmt, time::Duration};

use pranksters_core::{AudioCue, AudioFeedback, InputSnapshot, LevelId, Outcome, Tuning};
use pranksters_session::{Campaign, Stage};
use serde::Serialize;

/// Parameters of a headless run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HeadlessRun {
    pub(crate) level: LevelId,
    pub(crate) frames: u32,
    pub(crate) frame: Duration,
    pub(crate) seed: Option<u64>,
}

/// Counts cues instead of playing them.
#[derive(Debug, Default)]
struct CueCounter {
    counts: BTreeMap<String, u32>,
}

impl AudioFeedback for CueCounter {
    fn play(&mut self, cue: AudioCue) {
        *self.counts.entry(format!("{cue:?}")).or_default() += 1;
    }
}

/// Machine-readable result of a headless run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) stage: String,
    pub(crate) level: Option<u8>,
    pub(crate) title: Option<String>,
    pub(crate) outcome: Option<String>,
    pub(crate) attempts: u32,
    pub(crate) frames: u32,
    pub(crate) simulated_ms: u128,
    pub(crate) events: usize,
    pub(crate) cues: BTreeMap<String, u32>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.title, &self.outcome) {
            (Some(title), Some(outcome)) => write!(f, "{title}: {outcome}")?,
            _ => write!(f, "{}", self.stage)?,
        }
        write!(
            f,
            " after {} frames ({} ms, {} attempts, {} events)",
            self.frames, self.simulated_ms, self.attempts, self.events
        )
    }
}

/// Steps the campaign with idle input for the configured number of frames.
pub(crate) fn run_headless(tuning: Tuning, run: HeadlessRun) -> RunSummary {
    let mut campaign = Campaign::new(tuning, CueCounter::default());
    if let Some(seed) = run.seed {
        campaign = campaign.with_seed(seed);
    }
    campaign.start_at(run.level);

    let idle = InputSnapshot::default();
    let mut events = 0;
    for _ in 0..run.frames {
        campaign.step(run.frame, &idle);
        events += campaign
            .session()
            .map_or(0, |session| session.last_events().len());
    }

    summarise(&campaign, run, events)
}

fn summarise(campaign: &Campaign<CueCounter>, run: HeadlessRun, events: usize) -> RunSummary {
    let session = campaign.session();
    let stage = match campaign.stage() {
        Stage::Menu => "menu",
        Stage::Playing(_) => "playing",
        Stage::Victory => "victory",
    };
    let outcome = session.map(|session| match session.outcome() {
        Outcome::Running => String::from("running"),
        Outcome::Won => String::from("won"),
        Outcome::Lost => String::from("lost"),
    });

    RunSummary {
        stage: String::from(stage),
        level: session.map(|session| session.level().number()),
        title: session.map(|session| String::from(session.level().title())),
        outcome,
        attempts: campaign.attempts(),
        frames: run.frames,
        simulated_ms: run.frame.as_millis() * u128::from(run.frames),
        events,
        cues: campaign.audio().inner().counts.clone(),
    }
}
