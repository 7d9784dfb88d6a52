use std::time::Duration;

use pranksters_core::{AudioCue, AudioFeedback, InputSnapshot, LevelId, Tuning};
use tracing::info;

use crate::{GatedAudio, HostRequest, HostRequests, LevelSession};

/// Screen the campaign currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Title screen waiting for the start button.
    Menu,
    /// A level is being played.
    Playing(LevelId),
    /// All five pranks were pulled off.
    Victory,
}

/// Campaign progression from the title screen through the five levels.
///
/// The action button doubles as the menu and victory screen button.
#[derive(Debug)]
pub struct Campaign<A> {
    tuning: Tuning,
    stage: Stage,
    session: Option<LevelSession>,
    audio: GatedAudio<A>,
    requests: HostRequests,
    attempts: u32,
    seed: Option<u64>,
}

impl<A: AudioFeedback> Campaign<A> {
    /// Opens the title screen and starts the ambient loop.
    #[must_use]
    pub fn new(tuning: Tuning, audio: A) -> Self {
        let mut audio = GatedAudio::new(audio);
        audio.play(AudioCue::AmbientLoopStart);
        Self {
            tuning,
            stage: Stage::Menu,
            session: None,
            audio,
            requests: HostRequests::new(),
            attempts: 0,
            seed: None,
        }
    }

    /// Seeds every level attempt's cosmetic randomness with `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Skips the title screen and starts the provided level.
    pub fn start_at(&mut self, level: LevelId) {
        self.load(level);
    }

    /// Screen currently shown.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Level attempt in progress, if any.
    #[must_use]
    pub fn session(&self) -> Option<&LevelSession> {
        self.session.as_ref()
    }

    /// Number of level attempts started so far, restarts included.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Audio service with its mute switch.
    #[must_use]
    pub const fn audio(&self) -> &GatedAudio<A> {
        &self.audio
    }

    /// Advances the campaign by one tick.
    pub fn step(&mut self, dt: Duration, input: &InputSnapshot) {
        if input.mute_pressed {
            let muted = self.audio.toggle_mute();
            info!(muted, "audio toggled");
        }

        match self.stage {
            Stage::Menu => {
                if input.action_pressed {
                    self.audio.play(AudioCue::Select);
                    self.load(LevelId::first());
                }
            }
            Stage::Victory => {
                if input.action_pressed {
                    self.audio.play(AudioCue::Select);
                    self.stage = Stage::Menu;
                }
            }
            Stage::Playing(_) => {
                if let Some(session) = self.session.as_mut() {
                    let _ = session.step(dt, input, &mut self.audio, &mut self.requests);
                }
                self.resolve_requests();
            }
        }
    }

    fn resolve_requests(&mut self) {
        let requests: Vec<HostRequest> = self.requests.drain().collect();
        for request in requests {
            match request {
                HostRequest::Restart => {
                    if let Stage::Playing(level) = self.stage {
                        self.load(level);
                    }
                }
                HostRequest::Advance(level) => self.load(level),
                HostRequest::Complete => {
                    info!(attempts = self.attempts, "all pranks complete");
                    self.session = None;
                    self.stage = Stage::Victory;
                }
            }
        }
    }

    fn load(&mut self, level: LevelId) {
        self.attempts = self.attempts.saturating_add(1);
        info!(?level, attempt = self.attempts, title = level.title(), "loading level");
        self.session = Some(match self.seed {
            Some(seed) => LevelSession::with_seed(level, &self.tuning, seed),
            None => LevelSession::new(level, &self.tuning),
        });
        self.stage = Stage::Playing(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CueLog, LevelHost};

    #[test]
    fn completing_the_campaign_shows_victory_then_menu() {
        let mut campaign = Campaign::new(Tuning::default(), CueLog::new());
        campaign.start_at(LevelId::FinalPrank);

        campaign.requests.complete_campaign();
        campaign.resolve_requests();
        assert_eq!(campaign.stage(), Stage::Victory);
        assert!(campaign.session().is_none());

        campaign.step(Duration::from_millis(16), &InputSnapshot::default());
        assert_eq!(campaign.stage(), Stage::Victory);

        let play_again = InputSnapshot {
            action_pressed: true,
            ..InputSnapshot::default()
        };
        campaign.step(Duration::from_millis(16), &play_again);
        assert_eq!(campaign.stage(), Stage::Menu);
    }

    #[test]
    fn advance_request_loads_the_next_level() {
        let mut campaign = Campaign::new(Tuning::default(), CueLog::new());
        campaign.start_at(LevelId::DeskPrank);

        campaign.requests.advance_to_level(LevelId::JelloTrap);
        campaign.resolve_requests();

        assert_eq!(campaign.stage(), Stage::Playing(LevelId::JelloTrap));
        assert_eq!(campaign.attempts(), 2);
    }
}
