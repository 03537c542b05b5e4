//! Soft-clipping overdrive — asymmetric tube-style gain stage.
//!
//! A lower-gain, warmer cousin of [`crate::Distortion`]'s `SoftClip` mode:
//! fixed asymmetric soft clipping (odd + even harmonics) with a single tone
//! control, tuned for the "pushed tube amp" territory rather than fuzz or
//! high-gain distortion.
//!
//! ```text
//! Input → Drive (gain) → Asymmetric ADAA clip → Tone (low-pass tilt) → Level
//! ```

use sonido_core::{
    Adaa1, Effect, OnePole, ParamDescriptor, ParamId, ParamUnit, SmoothedParam,
    asymmetric_clip, asymmetric_clip_ad, db_to_linear, gain, linear_to_db, soft_limit,
};

type AdaaProc = Adaa1<fn(f32) -> f32, fn(f32) -> f32>;

/// Soft-clipping overdrive effect.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Drive | 0.0–30.0 dB | 10.0 |
/// | 1 | Tone | 800.0–12000.0 Hz | 6000.0 |
/// | 2 | Output | −20.0–20.0 dB | 0.0 |
///
/// # Example
///
/// ```rust
/// use sonido_effects::Overdrive;
/// use sonido_core::Effect;
///
/// let mut od = Overdrive::new(48000.0);
/// od.set_drive_db(18.0);
/// let output = od.process(0.2);
/// ```
pub struct Overdrive {
    drive: SmoothedParam,
    output_level: SmoothedParam,
    tone_hz: f32,
    sample_rate: f32,
    adaa: AdaaProc,
    adaa_r: AdaaProc,
    tone_filter: OnePole,
    tone_filter_r: OnePole,
}

impl Overdrive {
    /// Create a new overdrive effect.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            drive: SmoothedParam::fast(db_to_linear(10.0), sample_rate),
            output_level: gain::output_level_param(sample_rate),
            tone_hz: 6000.0,
            sample_rate,
            adaa: Adaa1::new(
                asymmetric_clip as fn(f32) -> f32,
                asymmetric_clip_ad as fn(f32) -> f32,
            ),
            adaa_r: Adaa1::new(
                asymmetric_clip as fn(f32) -> f32,
                asymmetric_clip_ad as fn(f32) -> f32,
            ),
            tone_filter: OnePole::new(sample_rate, 6000.0),
            tone_filter_r: OnePole::new(sample_rate, 6000.0),
        }
    }

    /// Set drive in dB. Range 0.0 to 30.0.
    pub fn set_drive_db(&mut self, db: f32) {
        self.drive.set_target(db_to_linear(db.clamp(0.0, 30.0)));
    }

    /// Get drive in dB.
    pub fn drive_db(&self) -> f32 {
        linear_to_db(self.drive.target())
    }

    /// Set tone low-pass corner in Hz. Range 800.0 to 12000.0.
    pub fn set_tone_hz(&mut self, hz: f32) {
        self.tone_hz = hz.clamp(800.0, 12000.0);
        self.tone_filter.set_frequency(self.tone_hz);
        self.tone_filter_r.set_frequency(self.tone_hz);
    }

    /// Get tone corner frequency in Hz.
    pub fn tone_hz(&self) -> f32 {
        self.tone_hz
    }
}

impl Effect for Overdrive {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let drive = self.drive.advance();
        let level = self.output_level.advance();
        let shaped = self.adaa.process(input * drive);
        let toned = self.tone_filter.process(shaped);
        soft_limit(toned, 1.0) * level
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let drive = self.drive.advance();
        let level = self.output_level.advance();
        let l = soft_limit(self.tone_filter.process(self.adaa.process(left * drive)), 1.0) * level;
        let r = soft_limit(
            self.tone_filter_r.process(self.adaa_r.process(right * drive)),
            1.0,
        ) * level;
        (l, r)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.drive.set_sample_rate(sample_rate);
        self.output_level.set_sample_rate(sample_rate);
        self.tone_filter.set_sample_rate(sample_rate);
        self.tone_filter_r.set_sample_rate(sample_rate);
        self.tone_filter.set_frequency(self.tone_hz);
        self.tone_filter_r.set_frequency(self.tone_hz);
    }

    fn reset(&mut self) {
        self.drive.snap_to_target();
        self.output_level.snap_to_target();
        self.adaa.reset();
        self.adaa_r.reset();
        self.tone_filter.reset();
        self.tone_filter_r.reset();
    }
}

sonido_core::impl_params! {
    Overdrive, this {
        [0] ParamDescriptor::gain_db("Drive", "Drive", 0.0, 30.0, 10.0)
                .with_id(ParamId(1800), "od_drive"),
            get: this.drive_db(),
            set: |v| this.set_drive_db(v);

        [1] ParamDescriptor::custom("Tone", "Tone", 800.0, 12000.0, 6000.0)
                .with_unit(ParamUnit::Hertz)
                .with_step(10.0)
                .with_id(ParamId(1801), "od_tone")
                .with_scale(sonido_core::ParamScale::Logarithmic),
            get: this.tone_hz,
            set: |v| this.set_tone_hz(v);

        [2] sonido_core::gain::output_param_descriptor()
                .with_id(ParamId(1802), "od_output"),
            get: sonido_core::gain::output_level_db(&this.output_level),
            set: |v| sonido_core::gain::set_output_level_db(&mut this.output_level, v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonido_core::ParameterInfo;

    #[test]
    fn bounded_output() {
        let mut od = Overdrive::new(48000.0);
        od.set_drive_db(25.0);
        od.reset();
        for _ in 0..500 {
            let y = od.process(0.8);
            assert!(y.is_finite() && y.abs() < 2.0);
        }
    }

    #[test]
    fn param_count_is_three() {
        let od = Overdrive::new(48000.0);
        assert_eq!(od.param_count(), 3);
    }

    #[test]
    fn tone_clamping() {
        let mut od = Overdrive::new(48000.0);
        od.set_tone_hz(50000.0);
        assert_eq!(od.tone_hz(), 12000.0);
    }

    #[test]
    fn stereo_finite() {
        let mut od = Overdrive::new(48000.0);
        od.set_drive_db(20.0);
        od.reset();
        for _ in 0..200 {
            let (l, r) = od.process_stereo(0.3, -0.3);
            assert!(l.is_finite() && r.is_finite());
        }
    }
}
