//! Sound effects
//!
//! Every effect is a short list of oscillator tones synthesized with the Web
//! Audio API, so there are no asset files. The event mapping and tone tables
//! are plain data; only `AudioManager` needs a browser.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Shoot,
    Explosion,
    Coin,
    PowerUp,
    LevelUp,
    LifeLost,
    GameOver,
}

impl SoundEffect {
    /// Effect for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired { .. } => Some(SoundEffect::Shoot),
            GameEvent::EnemyDestroyed => Some(SoundEffect::Explosion),
            GameEvent::CoinCollected { .. } => Some(SoundEffect::Coin),
            GameEvent::PowerUpActivated(_) => Some(SoundEffect::PowerUp),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::LifeLost { .. } => Some(SoundEffect::LifeLost),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::ScoreAwarded { .. } | GameEvent::PowerUpExpired(_) => None,
        }
    }

    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::Shoot => SHOOT,
            SoundEffect::Explosion => EXPLOSION,
            SoundEffect::Coin => COIN,
            SoundEffect::PowerUp => POWER_UP,
            SoundEffect::LevelUp => LEVEL_UP,
            SoundEffect::LifeLost => LIFE_LOST,
            SoundEffect::GameOver => GAME_OVER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator: starts at `freq`, glides to `end_freq`, fades out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub end_freq: f32,
    pub wave: Wave,
    /// Peak gain before master volume
    pub gain: f32,
    /// Seconds after the effect starts
    pub delay: f64,
    pub length: f64,
}

const fn tone(freq: f32, end_freq: f32, wave: Wave, gain: f32, delay: f64, length: f64) -> Tone {
    Tone {
        freq,
        end_freq,
        wave,
        gain,
        delay,
        length,
    }
}

const SHOOT: &[Tone] = &[tone(880.0, 440.0, Wave::Square, 0.15, 0.0, 0.08)];

const EXPLOSION: &[Tone] = &[
    tone(100.0, 30.0, Wave::Sawtooth, 0.5, 0.0, 0.4),
    tone(1500.0, 1500.0, Wave::Square, 0.2, 0.0, 0.1),
];

const COIN: &[Tone] = &[
    tone(988.0, 988.0, Wave::Sine, 0.25, 0.0, 0.08),
    tone(1319.0, 1319.0, Wave::Sine, 0.25, 0.06, 0.15),
];

const POWER_UP: &[Tone] = &[
    tone(300.0, 900.0, Wave::Triangle, 0.3, 0.0, 0.3),
    tone(600.0, 1800.0, Wave::Sine, 0.15, 0.05, 0.25),
];

const LEVEL_UP: &[Tone] = &[
    tone(400.0, 400.0, Wave::Triangle, 0.3, 0.0, 0.4),
    tone(500.0, 500.0, Wave::Triangle, 0.3, 0.1, 0.4),
    tone(600.0, 600.0, Wave::Triangle, 0.3, 0.2, 0.4),
    tone(800.0, 800.0, Wave::Triangle, 0.3, 0.3, 0.4),
];

const LIFE_LOST: &[Tone] = &[
    tone(150.0, 60.0, Wave::Sine, 0.6, 0.0, 0.25),
    tone(300.0, 80.0, Wave::Square, 0.2, 0.0, 0.2),
];

const GAME_OVER: &[Tone] = &[
    tone(400.0, 400.0, Wave::Sine, 0.3, 0.0, 0.3),
    tone(350.0, 350.0, Wave::Sine, 0.3, 0.2, 0.3),
    tone(300.0, 300.0, Wave::Sine, 0.3, 0.4, 0.3),
    tone(200.0, 200.0, Wave::Sine, 0.3, 0.6, 0.3),
];

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::{SoundEffect, Tone, Wave};
    use crate::sim::GameEvent;

    /// Gain the fade-out ramps down to (exponential ramps can't reach 0)
    const SILENCE: f32 = 0.01;
    const MASTER_VOLUME: f32 = 0.8;

    /// Plays effects through one shared `AudioContext`
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext, audio disabled");
            }
            Self {
                ctx,
                muted: false,
            }
        }

        /// Follows the player's sound-effects setting
        pub fn set_enabled(&mut self, enabled: bool) {
            self.muted = !enabled;
        }

        /// Play whatever a frame's events call for
        pub fn play_events(&self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(SoundEffect::for_event) {
                self.play(effect);
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.muted {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                self.play_tone(ctx, tone);
            }
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;
            osc.set_type(match tone.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
                Wave::Triangle => OscillatorType::Triangle,
            });
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let start = ctx.current_time() + tone.delay;
            let end = start + tone.length;
            gain.gain()
                .set_value_at_time(tone.gain * MASTER_VOLUME, start)
                .ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(SILENCE, end)
                .ok()?;
            osc.frequency().set_value_at_time(tone.freq, start).ok()?;
            if tone.end_freq != tone.freq {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.end_freq, end)
                    .ok()?;
            }

            osc.start_with_when(start).ok()?;
            osc.stop_with_when(end + 0.05).ok()?;
            Some(())
        }
    }
}
