//! Pure pitch vibrato — single modulated delay line, always fully wet.
//!
//! Distinct from [`crate::MultiVibrato`], which layers ten near-imperceptible
//! units to emulate tape wow/flutter. `Vibrato` is a single-unit, musically
//! audible pitch vibrato with direct Rate and Depth controls, in the spirit
//! of a Uni-Vibe-style pedal rather than a tape machine.
//!
//! ```text
//! Input → delay line, length modulated by LFO → Output (100% wet)
//! ```

use sonido_core::{Effect, FixedDelayLine, Lfo, LfoWaveform, ParamDescriptor, ParamId};

/// Base delay (samples) the LFO modulates around, giving headroom on both
/// sides so the read pointer never has to chase a negative delay.
const BASE_DELAY: f32 = 256.0;

/// Pure pitch vibrato effect.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Rate | 0.1–10.0 Hz | 5.0 |
/// | 1 | Depth | 0.0–1.0 | 0.5 |
///
/// # Example
///
/// ```rust
/// use sonido_effects::Vibrato;
/// use sonido_core::Effect;
///
/// let mut vib = Vibrato::new(48000.0);
/// vib.set_rate_hz(6.0);
/// vib.set_depth(0.7);
/// let output = vib.process(0.3);
/// ```
pub struct Vibrato {
    lfo: Lfo,
    lfo_r: Lfo,
    depth: f32,
    delay: FixedDelayLine<1024>,
    delay_r: FixedDelayLine<1024>,
}

impl Vibrato {
    /// Create a new vibrato effect.
    pub fn new(sample_rate: f32) -> Self {
        let mut lfo = Lfo::new(sample_rate, 5.0);
        lfo.set_waveform(LfoWaveform::Sine);
        let mut lfo_r = Lfo::new(sample_rate, 5.0);
        lfo_r.set_waveform(LfoWaveform::Sine);

        Self {
            lfo,
            lfo_r,
            depth: 0.5,
            delay: FixedDelayLine::new(),
            delay_r: FixedDelayLine::new(),
        }
    }

    /// Set LFO rate in Hz. Range 0.1 to 10.0.
    pub fn set_rate_hz(&mut self, hz: f32) {
        let hz = hz.clamp(0.1, 10.0);
        self.lfo.set_frequency(hz);
        self.lfo_r.set_frequency(hz);
    }

    /// Get LFO rate in Hz.
    pub fn rate_hz(&self) -> f32 {
        self.lfo.frequency()
    }

    /// Set depth. Range 0.0 to 1.0 (1.0 sweeps +/- 200 samples around base delay).
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 1.0);
    }

    /// Get current depth.
    pub fn depth(&self) -> f32 {
        self.depth
    }
}

impl Effect for Vibrato {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let lfo_val = self.lfo.advance();
        let delay_samples = BASE_DELAY + lfo_val * self.depth * 200.0;
        self.delay.read_write(input, delay_samples)
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let lfo_val = self.lfo.advance();
        let lfo_val_r = self.lfo_r.advance();
        let dl = BASE_DELAY + lfo_val * self.depth * 200.0;
        let dr = BASE_DELAY + lfo_val_r * self.depth * 200.0;
        (
            self.delay.read_write(left, dl),
            self.delay_r.read_write(right, dr),
        )
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.lfo.set_sample_rate(sample_rate);
        self.lfo_r.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.lfo.reset();
        self.lfo_r.reset();
        self.delay.clear();
        self.delay_r.clear();
    }

    fn is_true_stereo(&self) -> bool {
        true
    }

    fn latency_samples(&self) -> usize {
        BASE_DELAY as usize
    }
}

sonido_core::impl_params! {
    Vibrato, this {
        [0] sonido_core::ParamDescriptor::rate_hz(0.1, 10.0, 5.0)
                .with_id(ParamId(2200), "vibrato_rate"),
            get: this.rate_hz(),
            set: |v| this.set_rate_hz(v);

        [1] ParamDescriptor::depth()
                .with_id(ParamId(2201), "vibrato_depth"),
            get: this.depth,
            set: |v| this.set_depth(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonido_core::ParameterInfo;

    #[test]
    fn always_finite() {
        let mut vib = Vibrato::new(48000.0);
        vib.set_depth(1.0);
        for _ in 0..2000 {
            let y = vib.process(0.4);
            assert!(y.is_finite());
        }
    }

    #[test]
    fn param_count_is_two() {
        let vib = Vibrato::new(48000.0);
        assert_eq!(vib.param_count(), 2);
    }

    #[test]
    fn zero_depth_is_near_static_delay() {
        let mut vib = Vibrato::new(48000.0);
        vib.set_depth(0.0);
        vib.reset();
        for _ in 0..512 {
            vib.process(1.0);
        }
        let out = vib.process(1.0);
        assert!((out - 1.0).abs() < 0.01);
    }

    #[test]
    fn reports_true_stereo() {
        let vib = Vibrato::new(48000.0);
        assert!(vib.is_true_stereo());
    }
}
