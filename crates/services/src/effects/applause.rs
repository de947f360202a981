use rand::Rng;

use crate::audio::AudioClip;

pub const APPLAUSE_SAMPLE_RATE: u32 = 44_100;

const NOISE_SECS: f32 = 2.0;
const NOISE_DECAY_SECS: f32 = 0.5;
const BURSTS: usize = 5;
const BURST_OFFSET_SECS: f32 = 0.05;
const BURST_GAIN_START: f32 = 0.15;
const BURST_GAIN_END: f32 = 0.01;
const BURST_RAMP_SECS: f32 = 0.8;

/// Procedural applause: decaying white noise layered as staggered bursts.
pub fn synthesize_applause<R: Rng + ?Sized>(rng: &mut R, sample_rate: u32) -> AudioClip {
    #[allow(clippy::cast_precision_loss)]
    let rate = sample_rate as f32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let noise_len = (NOISE_SECS * rate) as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let offset = (BURST_OFFSET_SECS * rate) as usize;

    let noise: Vec<f32> = (0..noise_len)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / rate;
            (rng.random::<f32>() * 2.0 - 1.0) * (-t / NOISE_DECAY_SECS).exp()
        })
        .collect();

    let mut mix = vec![0.0_f32; noise_len + offset * (BURSTS - 1)];
    for burst in 0..BURSTS {
        let start = burst * offset;
        for (i, sample) in noise.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / rate;
            mix[start + i] += sample * burst_gain(t);
        }
    }
    for sample in &mut mix {
        *sample = sample.clamp(-1.0, 1.0);
    }

    AudioClip::new(mix, sample_rate)
}

/// Exponential ramp from the start gain to the end gain, then held.
fn burst_gain(t: f32) -> f32 {
    let progress = (t / BURST_RAMP_SECS).min(1.0);
    BURST_GAIN_START * (BURST_GAIN_END / BURST_GAIN_START).powf(progress)
}
