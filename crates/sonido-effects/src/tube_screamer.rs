//! Mid-humped tube-style overdrive, in the classic "screamer" mold.
//!
//! Distinguishing feature versus [`crate::Overdrive`]: a fixed mid-frequency
//! boost ahead of the clipping stage concentrates the drive around the
//! guitar's fundamental range before a soft [`sonido_core::TubeTable`]
//! nonlinearity, then a post low-pass tames the top end the mid boost adds.
//!
//! ```text
//! Input → Mid boost (peaking) → Drive → TubeTable (12AX7) → Tone (low-pass) → Level
//! ```

use sonido_core::{
    Biquad, Effect, OnePole, ParamDescriptor, ParamId, ParamUnit, SmoothedParam, TubeTable,
    TUBE_PRESETS, db_to_linear, gain, linear_to_db, peaking_eq_coefficients, soft_limit,
};

/// Mid-hump center frequency (Hz), tuned to the classic ~720 Hz screamer peak.
const MID_HZ: f32 = 720.0;

/// Mid-hump Q.
const MID_Q: f32 = 0.8;

/// Mid-hump boost (dB) before clipping.
const MID_BOOST_DB: f32 = 9.0;

/// Grid-voltage swing the tube table is built over.
const TABLE_SWING_V: f32 = 4.0;

/// Mid-humped tube-style overdrive.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Drive | 0.0–30.0 dB | 14.0 |
/// | 1 | Tone | 1000.0–8000.0 Hz | 4000.0 |
/// | 2 | Output | −20.0–20.0 dB | 0.0 |
///
/// # Example
///
/// ```rust
/// use sonido_effects::TubeScreamer;
/// use sonido_core::Effect;
///
/// let mut ts = TubeScreamer::new(48000.0);
/// ts.set_drive_db(18.0);
/// let output = ts.process(0.2);
/// ```
pub struct TubeScreamer {
    drive: SmoothedParam,
    output_level: SmoothedParam,
    tone_hz: f32,
    sample_rate: f32,
    mid_filter: Biquad,
    mid_filter_r: Biquad,
    table: TubeTable,
    tone_filter: OnePole,
    tone_filter_r: OnePole,
}

impl TubeScreamer {
    /// Create a new tube screamer-style overdrive.
    pub fn new(sample_rate: f32) -> Self {
        let mut s = Self {
            drive: SmoothedParam::fast(db_to_linear(14.0), sample_rate),
            output_level: gain::output_level_param(sample_rate),
            tone_hz: 4000.0,
            sample_rate,
            mid_filter: Biquad::new(),
            mid_filter_r: Biquad::new(),
            table: TubeTable::build(&TUBE_PRESETS[2], TABLE_SWING_V, false, 1024),
            tone_filter: OnePole::new(sample_rate, 4000.0),
            tone_filter_r: OnePole::new(sample_rate, 4000.0),
        };
        s.update_mid_filter();
        s
    }

    /// Set drive in dB. Range 0.0 to 30.0.
    pub fn set_drive_db(&mut self, db: f32) {
        self.drive.set_target(db_to_linear(db.clamp(0.0, 30.0)));
    }

    /// Get drive in dB.
    pub fn drive_db(&self) -> f32 {
        linear_to_db(self.drive.target())
    }

    /// Set tone low-pass corner in Hz. Range 1000.0 to 8000.0.
    pub fn set_tone_hz(&mut self, hz: f32) {
        self.tone_hz = hz.clamp(1000.0, 8000.0);
        self.tone_filter.set_frequency(self.tone_hz);
        self.tone_filter_r.set_frequency(self.tone_hz);
    }

    /// Get tone corner frequency in Hz.
    pub fn tone_hz(&self) -> f32 {
        self.tone_hz
    }

    fn update_mid_filter(&mut self) {
        let (b0, b1, b2, a0, a1, a2) =
            peaking_eq_coefficients(MID_HZ, MID_Q, MID_BOOST_DB, self.sample_rate);
        self.mid_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.mid_filter_r.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    #[inline]
    fn clip_to_grid_voltage(&self, x: f32) -> f32 {
        // Map the driven sample onto the table's grid-voltage range around bias.
        let bias = TUBE_PRESETS[2].bias_v;
        bias + x * TABLE_SWING_V
    }
}

impl Effect for TubeScreamer {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let drive = self.drive.advance();
        let level = self.output_level.advance();
        let boosted = self.mid_filter.process(input) * drive;
        let shaped = self.table.process(self.clip_to_grid_voltage(boosted));
        let toned = self.tone_filter.process(shaped);
        soft_limit(toned, 1.0) * level
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let drive = self.drive.advance();
        let level = self.output_level.advance();

        let boosted_l = self.mid_filter.process(left) * drive;
        let shaped_l = self.table.process(self.clip_to_grid_voltage(boosted_l));
        let l = soft_limit(self.tone_filter.process(shaped_l), 1.0) * level;

        let boosted_r = self.mid_filter_r.process(right) * drive;
        let shaped_r = self.table.process(self.clip_to_grid_voltage(boosted_r));
        let r = soft_limit(self.tone_filter_r.process(shaped_r), 1.0) * level;

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
        self.update_mid_filter();
    }

    fn reset(&mut self) {
        self.drive.snap_to_target();
        self.output_level.snap_to_target();
        self.mid_filter.clear();
        self.mid_filter_r.clear();
        self.tone_filter.reset();
        self.tone_filter_r.reset();
    }
}

sonido_core::impl_params! {
    TubeScreamer, this {
        [0] ParamDescriptor::gain_db("Drive", "Drive", 0.0, 30.0, 14.0)
                .with_id(ParamId(2100), "ts_drive"),
            get: this.drive_db(),
            set: |v| this.set_drive_db(v);

        [1] ParamDescriptor::custom("Tone", "Tone", 1000.0, 8000.0, 4000.0)
                .with_unit(ParamUnit::Hertz)
                .with_step(10.0)
                .with_id(ParamId(2101), "ts_tone")
                .with_scale(sonido_core::ParamScale::Logarithmic),
            get: this.tone_hz,
            set: |v| this.set_tone_hz(v);

        [2] sonido_core::gain::output_param_descriptor()
                .with_id(ParamId(2102), "ts_output"),
            get: sonido_core::gain::output_level_db(&this.output_level),
            set: |v| sonido_core::gain::set_output_level_db(&mut this.output_level, v);
    }
}
