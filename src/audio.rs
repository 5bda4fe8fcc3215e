//! Audio cues
//!
//! Procedurally generated tones - no external files needed! The tone table is
//! plain data; `AudioManager` plays it through Web Audio oscillators in the
//! browser and only logs natively.

/// Named sound cues the scene can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Fruit knocked loose
    Tap,
    /// Fruit hit the ground
    Bounce,
    /// Reserved for a falling whistle; nothing requests it yet
    Fall,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A single synthesized tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    pub waveform: Waveform,
    /// Seconds
    pub duration: f64,
    /// Peak gain before master volume
    pub gain: f32,
}

impl SoundCue {
    pub fn tone(&self) -> Tone {
        match self {
            SoundCue::Tap => Tone {
                frequency: 600.0,
                waveform: Waveform::Sine,
                duration: 0.1,
                gain: 0.3,
            },
            SoundCue::Bounce => Tone {
                frequency: 150.0,
                waveform: Waveform::Triangle,
                duration: 0.15,
                gain: 0.4,
            },
            SoundCue::Fall => Tone {
                frequency: 300.0,
                waveform: Waveform::Sawtooth,
                duration: 0.3,
                gain: 0.2,
            },
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use native::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundCue, Tone, Waveform};

    impl From<Waveform> for OscillatorType {
        fn from(waveform: Waveform) -> Self {
            match waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a cue
        pub fn play(&self, cue: SoundCue) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            log::trace!("Playing {:?}", cue);
            self.play_tone(ctx, cue.tone());
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short blip with an exponential fade
        fn play_tone(&self, ctx: &AudioContext, tone: Tone) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.frequency, tone.waveform.into())
            else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(self.volume * tone.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + tone.duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::SoundCue;

    /// Native stand-in: no audio device, cues are logged
    pub struct AudioManager {
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            Self {
                volume: volume.clamp(0.0, 1.0),
            }
        }

        pub fn resume(&self) {}

        pub fn play(&self, cue: SoundCue) {
            if self.volume > 0.0 {
                let tone = cue.tone();
                log::trace!(
                    "{:?}: {} Hz {:?} for {}s",
                    cue,
                    tone.frequency,
                    tone.waveform,
                    tone.duration
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tones_are_short_and_audible() {
        for cue in [SoundCue::Tap, SoundCue::Bounce, SoundCue::Fall] {
            let tone = cue.tone();
            assert!(tone.frequency > 20.0 && tone.frequency < 20_000.0);
            assert!(tone.duration > 0.0 && tone.duration <= 0.5);
            assert!(tone.gain > 0.0 && tone.gain <= 1.0);
        }
    }

    #[test]
    fn test_bounce_is_lower_than_tap() {
        assert!(SoundCue::Bounce.tone().frequency < SoundCue::Tap.tone().frequency);
    }
}
