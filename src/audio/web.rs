//! Audio playback using Web Audio API
//!
//! Samples come from `synth`; this side only owns buffers and nodes.
//! Failures are logged and swallowed, the game never waits on audio.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsValue;
use web_sys::{AudioBuffer, AudioBufferSourceNode, AudioContext, GainNode};

use super::synth;
use super::{AudioCue, MusicGate};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Rendered buffers, built on first use
struct Buffers {
    music: AudioBuffer,
    coin: AudioBuffer,
    crash: AudioBuffer,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_gain: Option<GainNode>,
    music_gain: Option<GainNode>,
    buffers: Option<Buffers>,
    music_source: Option<AudioBufferSourceNode>,
    gate: MusicGate,
    seed: u64,
}

impl AudioManager {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        let sfx_gain = ctx.as_ref().and_then(|c| make_gain(c, settings.sfx_gain()));
        let music_gain = ctx
            .as_ref()
            .and_then(|c| make_gain(c, settings.music_gain()));
        Self {
            ctx,
            sfx_gain,
            music_gain,
            buffers: None,
            music_source: None,
            gate: MusicGate::default(),
            seed,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx
            && ctx.state() == web_sys::AudioContextState::Suspended
        {
            let _ = ctx.resume();
        }
    }

    /// React to a simulation event
    pub fn handle(&mut self, event: GameEvent) {
        match AudioCue::from(event) {
            AudioCue::CoinSound => self.play_sfx(|b| &b.coin),
            AudioCue::CrashSound => self.play_sfx(|b| &b.crash),
            AudioCue::MusicOn => self.start_music(),
            AudioCue::MusicOff => self.stop_music(),
        }
    }

    fn ensure_buffers(&mut self) -> Option<&Buffers> {
        if self.buffers.is_none() {
            let ctx = self.ctx.as_ref()?;
            match render_buffers(ctx, self.seed) {
                Ok(buffers) => self.buffers = Some(buffers),
                Err(e) => {
                    log::warn!("Failed to render audio buffers: {:?}", e);
                    return None;
                }
            }
        }
        self.buffers.as_ref()
    }

    fn play_sfx(&mut self, pick: impl Fn(&Buffers) -> &AudioBuffer) {
        self.resume();
        let Some(buffer) = self.ensure_buffers().map(|b| pick(b).clone()) else {
            return;
        };
        let (Some(ctx), Some(gain)) = (&self.ctx, &self.sfx_gain) else {
            return;
        };
        if let Err(e) = play_buffer(ctx, gain, &buffer, false) {
            log::warn!("Sound effect failed: {:?}", e);
        }
    }

    fn start_music(&mut self) {
        if !self.gate.start() {
            return;
        }
        self.resume();
        let Some(buffer) = self.ensure_buffers().map(|b| b.music.clone()) else {
            self.gate.stop();
            return;
        };
        let (Some(ctx), Some(gain)) = (&self.ctx, &self.music_gain) else {
            self.gate.stop();
            return;
        };
        match play_buffer(ctx, gain, &buffer, true) {
            Ok(source) => self.music_source = Some(source),
            Err(e) => {
                log::warn!("Background music failed: {:?}", e);
                self.gate.stop();
            }
        }
    }

    fn stop_music(&mut self) {
        if !self.gate.stop() {
            return;
        }
        if let Some(source) = self.music_source.take()
            && let Err(e) = source.stop()
        {
            log::warn!("Failed to stop music: {:?}", e);
        }
    }
}

fn make_gain(ctx: &AudioContext, value: f32) -> Option<GainNode> {
    let gain = ctx.create_gain().ok()?;
    gain.gain().set_value(value);
    gain.connect_with_audio_node(&ctx.destination()).ok()?;
    Some(gain)
}

fn to_buffer(ctx: &AudioContext, channels: &mut [Vec<f32>]) -> Result<AudioBuffer, JsValue> {
    let length = channels.first().map_or(0, Vec::len) as u32;
    let buffer = ctx.create_buffer(channels.len() as u32, length, ctx.sample_rate())?;
    for (ch, samples) in channels.iter_mut().enumerate() {
        buffer.copy_to_channel(samples, ch as i32)?;
    }
    Ok(buffer)
}

fn render_buffers(ctx: &AudioContext, seed: u64) -> Result<Buffers, JsValue> {
    let rate = ctx.sample_rate() as u32;
    let mut rng = Pcg32::seed_from_u64(seed);

    let [left, right] = synth::generate_music_samples(rate, &mut rng);
    let music = to_buffer(ctx, &mut [left, right])?;
    let coin = to_buffer(ctx, &mut [synth::generate_coin_samples(rate)])?;
    let crash = to_buffer(ctx, &mut [synth::generate_crash_samples(rate, &mut rng)])?;

    log::info!("Audio buffers rendered at {} Hz", rate);
    Ok(Buffers { music, coin, crash })
}

fn play_buffer(
    ctx: &AudioContext,
    gain: &GainNode,
    buffer: &AudioBuffer,
    looping: bool,
) -> Result<AudioBufferSourceNode, JsValue> {
    let source = ctx.create_buffer_source()?;
    source.set_buffer(Some(buffer));
    source.set_loop(looping);
    source.connect_with_audio_node(gain)?;
    source.start()?;
    Ok(source)
}
