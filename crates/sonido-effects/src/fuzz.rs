//! Aggressive silicon-fuzz distortion.
//!
//! Hard-clipping gain stage with a gated, sputtery edge at low input levels,
//! built from the same ADAA hard-clip primitive as [`crate::Distortion`]'s
//! `HardClip` mode but biased harder and with no tone shelf between drive and
//! clip — fuzz is voiced by the clip itself, not by EQ.
//!
//! ```text
//! Input → Drive (high gain) → Hard clip (ADAA) → Fuzz (bias asymmetry) → Level
//! ```

use sonido_core::{
    Adaa1, Effect, ParamDescriptor, ParamId, SmoothedParam, db_to_linear, gain, hard_clip,
    hard_clip_ad, linear_to_db,
};

fn hard_clip_unit(x: f32) -> f32 {
    hard_clip(x, 1.0)
}

fn hard_clip_ad_unit(x: f32) -> f32 {
    hard_clip_ad(x, 1.0)
}

type AdaaProc = Adaa1<fn(f32) -> f32, fn(f32) -> f32>;

/// Aggressive hard-clipping fuzz effect.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Drive | 0.0–40.0 dB | 24.0 |
/// | 1 | Fuzz | 0.0–1.0 | 0.5 |
/// | 2 | Output | −20.0–20.0 dB | 0.0 |
///
/// # Example
///
/// ```rust
/// use sonido_effects::Fuzz;
/// use sonido_core::Effect;
///
/// let mut fuzz = Fuzz::new(48000.0);
/// fuzz.set_drive_db(30.0);
/// let output = fuzz.process(0.1);
/// ```
pub struct Fuzz {
    drive: SmoothedParam,
    output_level: SmoothedParam,
    fuzz_amount: f32,
    adaa: AdaaProc,
    adaa_r: AdaaProc,
}

impl Fuzz {
    /// Create a new fuzz effect.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            drive: SmoothedParam::fast(db_to_linear(24.0), sample_rate),
            output_level: gain::output_level_param(sample_rate),
            fuzz_amount: 0.5,
            adaa: Adaa1::new(
                hard_clip_unit as fn(f32) -> f32,
                hard_clip_ad_unit as fn(f32) -> f32,
            ),
            adaa_r: Adaa1::new(
                hard_clip_unit as fn(f32) -> f32,
                hard_clip_ad_unit as fn(f32) -> f32,
            ),
        }
    }

    /// Set drive in dB. Range 0.0 to 40.0.
    pub fn set_drive_db(&mut self, db: f32) {
        self.drive.set_target(db_to_linear(db.clamp(0.0, 40.0)));
    }

    /// Get drive in dB.
    pub fn drive_db(&self) -> f32 {
        linear_to_db(self.drive.target())
    }

    /// Set fuzz bias amount (0.0 symmetric, 1.0 fully asymmetric/gated). Range 0.0–1.0.
    pub fn set_fuzz(&mut self, amount: f32) {
        self.fuzz_amount = amount.clamp(0.0, 1.0);
    }

    /// Get current fuzz bias amount.
    pub fn fuzz(&self) -> f32 {
        self.fuzz_amount
    }

    #[inline]
    fn shape(&mut self, driven: f32, right: bool) -> f32 {
        // A fixed positive bias before clipping starves the negative half-cycle
        // as `fuzz_amount` rises, producing the sputtery gate transistor fuzz is
        // known for.
        let biased = driven + self.fuzz_amount * 0.3;
        if right {
            self.adaa_r.process(biased)
        } else {
            self.adaa.process(biased)
        }
    }
}

impl Effect for Fuzz {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let drive = self.drive.advance();
        let level = self.output_level.advance();
        self.shape(input * drive, false) * level
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let drive = self.drive.advance();
        let level = self.output_level.advance();
        let l = self.shape(left * drive, false) * level;
        let r = self.shape(right * drive, true) * level;
        (l, r)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.drive.set_sample_rate(sample_rate);
        self.output_level.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.drive.snap_to_target();
        self.output_level.snap_to_target();
        self.adaa.reset();
        self.adaa_r.reset();
    }
}

sonido_core::impl_params! {
    Fuzz, this {
        [0] ParamDescriptor::gain_db("Drive", "Drive", 0.0, 40.0, 24.0)
                .with_id(ParamId(1900), "fuzz_drive"),
            get: this.drive_db(),
            set: |v| this.set_drive_db(v);

        [1] ParamDescriptor::custom("Fuzz", "Fuzz", 0.0, 1.0, 0.5)
                .with_step(0.01)
                .with_id(ParamId(1901), "fuzz_amount"),
            get: this.fuzz_amount,
            set: |v| this.set_fuzz(v);

        [2] sonido_core::gain::output_param_descriptor()
                .with_id(ParamId(1902), "fuzz_output"),
            get: sonido_core::gain::output_level_db(&this.output_level),
            set: |v| sonido_core::gain::set_output_level_db(&mut this.output_level, v);
    }
}
