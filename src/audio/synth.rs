//! Procedural sample generation
//!
//! Every sound is rendered up front into plain `f32` buffers. Nothing here
//! touches the Web Audio API, so it runs (and is tested) natively.

use std::f32::consts::TAU;

use rand::Rng;

/// Background loop length (s)
pub const MUSIC_SECONDS: f32 = 8.0;
/// Mix level of the whole music loop
pub const MUSIC_VOLUME: f32 = 0.3;
pub const COIN_SECONDS: f32 = 0.3;
pub const CRASH_SECONDS: f32 = 1.0;

/// A melody note inside the 8 s loop
struct Note {
    freq: f32,
    start: f32,
    duration: f32,
}

const MELODY: [Note; 7] = [
    Note { freq: 659.25, start: 0.0, duration: 0.5 }, // E5
    Note { freq: 659.25, start: 0.6, duration: 0.5 }, // E5
    Note { freq: 659.25, start: 1.2, duration: 0.5 }, // E5
    Note { freq: 523.25, start: 1.8, duration: 0.3 }, // C5
    Note { freq: 659.25, start: 2.1, duration: 0.5 }, // E5
    Note { freq: 783.99, start: 2.7, duration: 0.8 }, // G5
    Note { freq: 392.00, start: 3.8, duration: 0.8 }, // G4
];

const BASS_ROOT: f32 = 130.81; // C3
/// Root, fifth, third, second: one step per half second
const BASS_STEPS: [f32; 4] = [1.0, 1.5, 1.25, 1.125];

fn sample_count(sample_rate: u32, seconds: f32) -> usize {
    (sample_rate as f32 * seconds) as usize
}

/// Uniform noise in [-0.5, 0.5)
fn noise<R: Rng>(rng: &mut R) -> f32 {
    rng.random::<f32>() - 0.5
}

fn melody(t: f32) -> f32 {
    let cycle = t % MUSIC_SECONDS;
    MELODY
        .iter()
        .filter(|n| cycle >= n.start && cycle < n.start + n.duration)
        .map(|n| {
            let envelope = (1.0 - (cycle - n.start) / n.duration).max(0.0);
            (TAU * n.freq * t).sin() * envelope * 0.3
        })
        .sum()
}

fn bass(t: f32) -> f32 {
    let step = (((t % 2.0) / 0.5) as usize).min(BASS_STEPS.len() - 1);
    (TAU * BASS_ROOT * BASS_STEPS[step] * t).sin() * 0.2
}

/// Kick on every beat, snare on the off-beat
fn percussion<R: Rng>(t: f32, rng: &mut R) -> f32 {
    let beat = t % 1.0;
    if beat < 0.1 {
        noise(rng) * 0.5 * (-beat * 20.0).exp()
    } else if beat > 0.5 && beat < 0.6 {
        noise(rng) * 0.3 * (-(beat - 0.5) * 30.0).exp()
    } else {
        0.0
    }
}

/// Stereo music loop; channels differ only in their percussion noise
pub fn generate_music_samples<R: Rng>(sample_rate: u32, rng: &mut R) -> [Vec<f32>; 2] {
    let count = sample_count(sample_rate, MUSIC_SECONDS);
    let render = |rng: &mut R| {
        (0..count)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (melody(t) + bass(t) + percussion(t, rng)) * MUSIC_VOLUME
            })
            .collect::<Vec<f32>>()
    };
    let left = render(rng);
    let right = render(rng);
    [left, right]
}

/// Rising chirp
pub fn generate_coin_samples(sample_rate: u32) -> Vec<f32> {
    (0..sample_count(sample_rate, COIN_SECONDS))
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let freq = 800.0 + t * 400.0;
            (TAU * freq * t).sin() * (-t * 8.0).exp() * 0.5
        })
        .collect()
}

/// Noise burst over a 60 Hz rumble
pub fn generate_crash_samples<R: Rng>(sample_rate: u32, rng: &mut R) -> Vec<f32> {
    (0..sample_count(sample_rate, CRASH_SECONDS))
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let hiss = noise(rng) * 2.0;
            let rumble = (TAU * 60.0 * t).sin();
            (hiss * 0.7 + rumble * 0.3) * (-t * 3.0).exp() * 0.6
        })
        .collect()
}
