//! Sound effects and haptic feedback
//!
//! Sounds are synthesized with a single oscillator and a decaying gain
//! envelope, so no audio files are shipped. Haptics ride along with playback
//! through [`HapticAudio`], which wraps any [`SoundPlayer`].

use std::cell::Cell;
use std::rc::Rc;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Game started
    Move,
    /// Food eaten
    Eat,
    /// Hit a wall, obstacle or own body
    Crash,
    /// Level advanced
    LevelUp,
}

/// Oscillator wave shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Synth parameters for one effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    /// Hz
    pub freq: f32,
    /// Seconds
    pub duration: f64,
    /// Starting gain, ramps down to 0.01
    pub gain: f32,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Move => "move",
            SoundEffect::Eat => "eat",
            SoundEffect::Crash => "crash",
            SoundEffect::LevelUp => "levelup",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "move" => Some(SoundEffect::Move),
            "eat" => Some(SoundEffect::Eat),
            "crash" => Some(SoundEffect::Crash),
            "levelup" => Some(SoundEffect::LevelUp),
            _ => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::Move => Tone {
                wave: Waveform::Sine,
                freq: 200.0,
                duration: 0.1,
                gain: 0.1,
            },
            SoundEffect::Eat => Tone {
                wave: Waveform::Square,
                freq: 440.0,
                duration: 0.1,
                gain: 0.1,
            },
            SoundEffect::Crash => Tone {
                wave: Waveform::Sawtooth,
                freq: 100.0,
                duration: 0.3,
                gain: 0.2,
            },
            SoundEffect::LevelUp => Tone {
                wave: Waveform::Triangle,
                freq: 600.0,
                duration: 0.5,
                gain: 0.1,
            },
        }
    }

    /// Vibration length in ms that accompanies this effect
    pub fn haptic_ms(&self) -> Option<u32> {
        match self {
            SoundEffect::Move => None,
            SoundEffect::Eat => Some(15),
            SoundEffect::Crash => Some(200),
            SoundEffect::LevelUp => Some(50),
        }
    }
}

/// Fire-and-forget sound playback
pub trait SoundPlayer {
    fn play(&self, effect: SoundEffect);
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;

    fn toggle_mute(&mut self) {
        let muted = self.is_muted();
        self.set_muted(!muted);
    }
}

/// Device vibration
pub trait Haptics {
    fn vibrate(&self, ms: u32);
}

/// Player with no output device (native builds, headless runs)
#[derive(Debug, Default)]
pub struct SilentPlayer {
    muted: bool,
}

impl SilentPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoundPlayer for SilentPlayer {
    fn play(&self, effect: SoundEffect) {
        if !self.muted {
            log::debug!("Sound: {}", effect.as_str());
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Wraps a player so each effect also triggers a matching vibration
pub struct HapticAudio<P, H> {
    inner: P,
    haptics: H,
    enabled: Rc<Cell<bool>>,
}

impl<P: SoundPlayer, H: Haptics> HapticAudio<P, H> {
    pub fn new(inner: P, haptics: H, enabled: bool) -> Self {
        Self {
            inner,
            haptics,
            enabled: Rc::new(Cell::new(enabled)),
        }
    }

    /// Shared switch for haptics; flip it from settings UI after boxing
    pub fn enabled_handle(&self) -> Rc<Cell<bool>> {
        self.enabled.clone()
    }
}

impl<P: SoundPlayer, H: Haptics> SoundPlayer for HapticAudio<P, H> {
    fn play(&self, effect: SoundEffect) {
        self.inner.play(effect);
        if self.enabled.get() {
            if let Some(ms) = effect.haptic_ms() {
                self.haptics.vibrate(ms);
            }
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.inner.set_muted(muted);
    }

    fn is_muted(&self) -> bool {
        self.inner.is_muted()
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{NavigatorHaptics, WebAudioPlayer};

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Haptics, SoundEffect, SoundPlayer, Tone, Waveform};

    /// Web Audio API player
    pub struct WebAudioPlayer {
        ctx: Option<AudioContext>,
        muted: bool,
    }

    impl Default for WebAudioPlayer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudioPlayer {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, muted: false }
        }

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

        fn play_tone(&self, ctx: &AudioContext, tone: Tone) {
            let osc_type = match tone.wave {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(tone.freq, t).ok();
            gain.gain().set_value_at_time(tone.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + tone.duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }

    impl SoundPlayer for WebAudioPlayer {
        fn play(&self, effect: SoundEffect) {
            if self.muted {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            self.play_tone(ctx, effect.tone());
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            if let Some(ctx) = &self.ctx {
                let _ = if muted { ctx.suspend() } else { ctx.resume() };
            }
        }

        fn is_muted(&self) -> bool {
            self.muted
        }
    }

    /// `navigator.vibrate` where supported
    #[derive(Debug, Default)]
    pub struct NavigatorHaptics;

    impl Haptics for NavigatorHaptics {
        fn vibrate(&self, ms: u32) {
            if let Some(window) = web_sys::window() {
                let _ = window.navigator().vibrate_with_duration(ms);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        played: Rc<RefCell<Vec<SoundEffect>>>,
        muted: bool,
    }

    impl SoundPlayer for Recorder {
        fn play(&self, effect: SoundEffect) {
            self.played.borrow_mut().push(effect);
        }
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
        fn is_muted(&self) -> bool {
            self.muted
        }
    }

    #[derive(Default, Clone)]
    struct Buzz(Rc<RefCell<Vec<u32>>>);

    impl Haptics for Buzz {
        fn vibrate(&self, ms: u32) {
            self.0.borrow_mut().push(ms);
        }
    }

    #[test]
    fn test_haptic_audio_delegates_and_vibrates() {
        let recorder = Recorder::default();
        let played = recorder.played.clone();
        let buzz = Buzz::default();
        let audio = HapticAudio::new(recorder, buzz.clone(), true);

        for effect in [
            SoundEffect::Move,
            SoundEffect::Eat,
            SoundEffect::Crash,
            SoundEffect::LevelUp,
        ] {
            audio.play(effect);
        }

        assert_eq!(played.borrow().len(), 4);
        assert_eq!(*buzz.0.borrow(), vec![15, 200, 50]);
    }

    #[test]
    fn test_haptics_switch() {
        let buzz = Buzz::default();
        let audio = HapticAudio::new(Recorder::default(), buzz.clone(), false);
        audio.play(SoundEffect::Crash);
        assert!(buzz.0.borrow().is_empty());

        audio.enabled_handle().set(true);
        audio.play(SoundEffect::Crash);
        assert_eq!(*buzz.0.borrow(), vec![200]);
    }

    #[test]
    fn test_toggle_mute_passes_through() {
        let mut audio = HapticAudio::new(Recorder::default(), Buzz::default(), true);
        assert!(!audio.is_muted());
        audio.toggle_mute();
        assert!(audio.is_muted());
    }

    #[test]
    fn test_effect_names() {
        for name in ["move", "eat", "crash", "levelup"] {
            assert_eq!(SoundEffect::from_name(name).unwrap().as_str(), name);
        }
        assert_eq!(SoundEffect::from_name("boom"), None);
        assert_eq!(SoundEffect::Crash.tone().wave, Waveform::Sawtooth);
    }
}
