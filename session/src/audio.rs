use pranksters_core::{AudioCue, AudioFeedback};

/// Mute switch wrapped around the shell's audio service.
///
/// While muted every cue is swallowed. Toggling the switch stops or restarts
/// the ambient loop on the wrapped service.
#[derive(Debug, Default)]
pub struct GatedAudio<A> {
    inner: A,
    muted: bool,
}

impl<A: AudioFeedback> GatedAudio<A> {
    /// Wraps an audio service, starting unmuted.
    #[must_use]
    pub const fn new(inner: A) -> Self {
        Self {
            inner,
            muted: false,
        }
    }

    /// Reports whether cues are currently swallowed.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flips the mute switch and returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.inner.play(AudioCue::AmbientLoopStop);
        } else {
            self.inner.play(AudioCue::AmbientLoopStart);
        }
        self.muted
    }

    /// Wrapped audio service.
    #[must_use]
    pub const fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwraps the audio service.
    #[must_use]
    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: AudioFeedback> AudioFeedback for GatedAudio<A> {
    fn play(&mut self, cue: AudioCue) {
        if !self.muted {
            self.inner.play(cue);
        }
    }
}

/// Audio service that records cues instead of playing them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CueLog {
    cues: Vec<AudioCue>,
}

impl CueLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues recorded so far, oldest first.
    #[must_use]
    pub fn cues(&self) -> &[AudioCue] {
        &self.cues
    }

    /// Number of times the cue was recorded.
    #[must_use]
    pub fn count(&self, cue: AudioCue) -> usize {
        self.cues.iter().filter(|recorded| **recorded == cue).count()
    }
}

impl AudioFeedback for CueLog {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}
