//! Audio system
//!
//! The game only hands out named one-shot triggers plus the engine drone's
//! inputs (boost flag and tilt). On wasm32 these become Web Audio graphs,
//! synthesized on the fly. Native builds have no output device; the manager
//! records what would have played and tracks the smoothed levels.

use crate::settings::Settings;
use crate::sim::{GameEvent, RandomSource};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Entity passed the craft
    Score,
    /// Boost star collected
    Boost,
    /// Run ended
    Crash,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Score => SoundEffect::Score,
            GameEvent::Boost => SoundEffect::Boost,
            GameEvent::Crash => SoundEffect::Crash,
        }
    }
}

/// Master gain approaches its target with this time constant (seconds)
pub const VOLUME_TIME_CONSTANT: f64 = 0.05;
/// Engine pitch approaches its target with this time constant (seconds)
pub const ENGINE_TIME_CONSTANT: f64 = 0.1;

/// Length of the crash noise burst (seconds)
pub const CRASH_NOISE_SECS: f64 = 0.5;

/// White noise in [-1, 1) for the crash buffer
pub fn noise_samples(len: usize, rng: &mut dyn RandomSource) -> Vec<f32> {
    (0..len).map(|_| rng.range(-1.0, 1.0)).collect()
}

/// Engine drone pitch: an octave up while boosting, bent by tilt
pub fn engine_frequency(boosting: bool, tilt: f32) -> f32 {
    let base = if boosting { 110.0 } else { 55.0 };
    base + tilt * 0.5
}

/// First-order approach toward a target, like `AudioParam.setTargetAtTime`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed {
    pub current: f32,
    pub target: f32,
    time_constant: f64,
}

impl Smoothed {
    pub fn new(value: f32, time_constant: f64) -> Self {
        Self {
            current: value,
            target: value,
            time_constant,
        }
    }

    pub fn advance(&mut self, dt_secs: f64) {
        if dt_secs <= 0.0 {
            return;
        }
        let k = 1.0 - (-dt_secs / self.time_constant).exp();
        self.current += (self.target - self.current) * k as f32;
    }
}

#[cfg(target_arch = "wasm32")]
use crate::sim::unseeded_rng;
#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, BiquadFilterType, GainNode, OscillatorNode, OscillatorType};

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master: Option<GainNode>,
    engine: Option<OscillatorNode>,
    muted: bool,
    volume: f32,
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    /// The audio graph is built on the first `resume` (browsers require a
    /// user gesture before a context may start)
    pub fn new(settings: &Settings) -> Self {
        Self {
            ctx: None,
            master: None,
            engine: None,
            muted: settings.muted,
            volume: settings.effective_volume(),
        }
    }

    /// Create the context and drone if needed, and wake a suspended context
    pub fn resume(&mut self) {
        if self.ctx.is_none() {
            self.build_graph();
        }
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    fn build_graph(&mut self) {
        let Ok(ctx) = AudioContext::new() else {
            log::warn!("Failed to create AudioContext - audio disabled");
            return;
        };

        let Ok(master) = ctx.create_gain() else { return };
        master.gain().set_value(self.volume);
        if master.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }

        // Ambient engine drone: triangle through a low-pass
        let engine = (|| {
            let osc = ctx.create_oscillator().ok()?;
            let filter = ctx.create_biquad_filter().ok()?;
            let gain = ctx.create_gain().ok()?;
            osc.set_type(OscillatorType::Triangle);
            osc.frequency()
                .set_value_at_time(engine_frequency(false, 0.0), ctx.current_time())
                .ok()?;
            filter.set_type(BiquadFilterType::Lowpass);
            filter.frequency().set_value_at_time(200.0, ctx.current_time()).ok()?;
            gain.gain().set_value(0.4);
            osc.connect_with_audio_node(&filter).ok()?;
            filter.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&master).ok()?;
            osc.start().ok()?;
            Some(osc)
        })();
        if engine.is_none() {
            log::warn!("Engine drone unavailable");
        }

        self.engine = engine;
        self.master = Some(master);
        self.ctx = Some(ctx);
    }

    /// Apply volume/mute with a smoothed transition
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.muted = settings.muted;
        self.volume = settings.effective_volume();
        if let (Some(ctx), Some(master)) = (&self.ctx, &self.master) {
            master
                .gain()
                .set_target_at_time(self.volume, ctx.current_time(), VOLUME_TIME_CONSTANT)
                .ok();
        }
    }

    /// Retune the drone for the current boost state and tilt
    pub fn update_engine(&mut self, boosting: bool, tilt: f32) {
        if let (Some(ctx), Some(engine)) = (&self.ctx, &self.engine) {
            engine
                .frequency()
                .set_target_at_time(
                    engine_frequency(boosting, tilt),
                    ctx.current_time(),
                    ENGINE_TIME_CONSTANT,
                )
                .ok();
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let (Some(ctx), Some(master)) = (&self.ctx, &self.master) else {
            return;
        };

        match effect {
            SoundEffect::Score => play_beep(ctx, master, false),
            SoundEffect::Boost => play_beep(ctx, master, true),
            SoundEffect::Crash => play_crash(ctx, master),
        }
    }
}

/// Create an oscillator routed through its own gain into `out`
#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    out: &GainNode,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(out).ok()?;

    Some((osc, gain))
}

/// Score blip, or a brighter rising chirp for a boost
#[cfg(target_arch = "wasm32")]
fn play_beep(ctx: &AudioContext, out: &GainNode, boost: bool) {
    let (freq, osc_type) = if boost {
        (1320.0, OscillatorType::Square)
    } else {
        (880.0, OscillatorType::Sine)
    };
    let Some((osc, gain)) = create_osc(ctx, out, freq, osc_type) else {
        return;
    };
    let t = ctx.current_time();
    let decay = if boost { 0.3 } else { 0.15 };

    if boost {
        osc.frequency()
            .exponential_ramp_to_value_at_time(1760.0, t + 0.1)
            .ok();
    }
    gain.gain().set_value_at_time(0.0, t).ok();
    gain.gain().linear_ramp_to_value_at_time(0.2, t + 0.01).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.001, t + decay)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + decay + 0.05).ok();
}

/// Crash - a burst of white noise swept down through a closing low-pass
#[cfg(target_arch = "wasm32")]
fn play_crash(ctx: &AudioContext, out: &GainNode) {
    let t = ctx.current_time();
    let rate = ctx.sample_rate();
    let len = (rate as f64 * CRASH_NOISE_SECS) as usize;
    let samples = noise_samples(len, &mut unseeded_rng());

    let Ok(buffer) = ctx.create_buffer(1, len as u32, rate) else {
        return;
    };
    if buffer.copy_to_channel(&samples, 0).is_err() {
        return;
    }
    let Ok(noise) = ctx.create_buffer_source() else {
        return;
    };
    noise.set_buffer(Some(&buffer));

    let Ok(filter) = ctx.create_biquad_filter() else {
        return;
    };
    filter.set_type(BiquadFilterType::Lowpass);
    filter.frequency().set_value_at_time(1000.0, t).ok();
    filter
        .frequency()
        .exponential_ramp_to_value_at_time(100.0, t + 0.4)
        .ok();

    let Ok(gain) = ctx.create_gain() else {
        return;
    };
    gain.gain().set_value_at_time(0.5, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.001, t + CRASH_NOISE_SECS)
        .ok();

    let wired = noise.connect_with_audio_node(&filter).is_ok()
        && filter.connect_with_audio_node(&gain).is_ok()
        && gain.connect_with_audio_node(out).is_ok();
    if wired {
        noise.start().ok();
    }
}

/// Audio manager for native builds: no device, just bookkeeping
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct AudioManager {
    master: Smoothed,
    engine_hz: Smoothed,
    muted: bool,
    played: Vec<SoundEffect>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            master: Smoothed::new(settings.effective_volume(), VOLUME_TIME_CONSTANT),
            engine_hz: Smoothed::new(engine_frequency(false, 0.0), ENGINE_TIME_CONSTANT),
            muted: settings.muted,
            played: Vec::new(),
        }
    }

    pub fn resume(&mut self) {}

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.muted = settings.muted;
        self.master.target = settings.effective_volume();
    }

    pub fn update_engine(&mut self, boosting: bool, tilt: f32) {
        self.engine_hz.target = engine_frequency(boosting, tilt);
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        log::trace!("sfx {:?}", effect);
        self.played.push(effect);
    }

    /// Let smoothed levels settle for `dt_secs` of wall time
    pub fn advance(&mut self, dt_secs: f64) {
        self.master.advance(dt_secs);
        self.engine_hz.advance(dt_secs);
    }

    pub fn master_gain(&self) -> f32 {
        self.master.current
    }

    pub fn engine_hz(&self) -> f32 {
        self.engine_hz.current
    }

    /// Effects played since the last call, oldest first
    pub fn take_played(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.played)
    }
}
