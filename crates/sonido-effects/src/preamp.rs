//! Clean-voiced preamp stage: the front end of the amp model.
//!
//! Where [`crate::Poweramp`] is the output stage (drive → tube → sag, no
//! tone shaping), `CleanPreamp` is everything upstream of it: a high-pass
//! trim to cut sub-bass mud, a triode [`sonido_core::TubeTable`] stage for
//! gentle input-stage saturation, a fixed-frequency 3-band tone stack
//! (Bass/Mid/Treble, same topology as [`crate::Eq3Band`]), and the same
//! envelope-driven supply sag model used in the power amp.
//!
//! ```text
//! Input → HPF → Drive → TubeTable (triode) → Bass/Mid/Treble → Sag → Output
//! ```

use sonido_core::{
    Biquad, DetectorMode, Effect, EnvelopeFollower, OnePole, ParamDescriptor, ParamId, ParamUnit,
    SmoothedParam, TUBE_PRESETS, TubeTable, db_to_linear, gain, high_shelf_coefficients,
    linear_to_db, low_shelf_coefficients, peaking_eq_coefficients,
};

/// High-pass trim corner frequency (Hz).
const HPF_HZ: f32 = 80.0;

/// Grid-voltage swing the tube table is built over.
const TABLE_SWING_V: f32 = 3.0;

/// Preamp tube preset: 12AX7, the classic high-gain preamp triode.
const PRESET_INDEX: usize = 2;

/// Bass shelf corner frequency (Hz).
const BASS_HZ: f32 = 100.0;

/// Mid peak center frequency (Hz).
const MID_HZ: f32 = 800.0;

/// Mid band Q.
const MID_Q: f32 = 0.7;

/// Treble shelf corner frequency (Hz).
const TREBLE_HZ: f32 = 3000.0;

/// Clean-voiced preamp: HPF, triode drive stage, 3-band tone stack, sag.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Gain | 0.0–30.0 dB | 0.0 |
/// | 1 | Bass | −12.0–12.0 dB | 0.0 |
/// | 2 | Mid | −12.0–12.0 dB | 0.0 |
/// | 3 | Treble | −12.0–12.0 dB | 0.0 |
/// | 4 | Sag | 0.0–1.0 | 0.15 |
/// | 5 | Output | −20.0–20.0 dB | 0.0 |
///
/// # Example
///
/// ```rust
/// use sonido_effects::CleanPreamp;
/// use sonido_core::Effect;
///
/// let mut preamp = CleanPreamp::new(48000.0);
/// preamp.set_gain_db(12.0);
/// preamp.set_bass_db(2.0);
/// let output = preamp.process(0.5);
/// ```
pub struct CleanPreamp {
    hpf: OnePole,
    hpf_r: OnePole,
    gain: SmoothedParam,
    output: SmoothedParam,
    table: TubeTable,
    bass_db: f32,
    mid_db: f32,
    treble_db: f32,
    bass_filter: Biquad,
    mid_filter: Biquad,
    treble_filter: Biquad,
    bass_filter_r: Biquad,
    mid_filter_r: Biquad,
    treble_filter_r: Biquad,
    sag: f32,
    envelope: EnvelopeFollower,
    envelope_r: EnvelopeFollower,
    sample_rate: f32,
}

impl Default for CleanPreamp {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl CleanPreamp {
    /// Create a new preamp stage.
    pub fn new(sample_rate: f32) -> Self {
        let mut envelope = EnvelopeFollower::with_times(sample_rate, 10.0, 250.0);
        envelope.set_mode(DetectorMode::Peak);
        let mut envelope_r = EnvelopeFollower::with_times(sample_rate, 10.0, 250.0);
        envelope_r.set_mode(DetectorMode::Peak);

        let mut s = Self {
            hpf: OnePole::with_mode(sample_rate, HPF_HZ, sonido_core::OnePoleMode::Highpass),
            hpf_r: OnePole::with_mode(sample_rate, HPF_HZ, sonido_core::OnePoleMode::Highpass),
            gain: SmoothedParam::standard(db_to_linear(0.0), sample_rate),
            output: gain::output_level_param(sample_rate),
            table: TubeTable::build(&TUBE_PRESETS[PRESET_INDEX], TABLE_SWING_V, false, 1024),
            bass_db: 0.0,
            mid_db: 0.0,
            treble_db: 0.0,
            bass_filter: Biquad::new(),
            mid_filter: Biquad::new(),
            treble_filter: Biquad::new(),
            bass_filter_r: Biquad::new(),
            mid_filter_r: Biquad::new(),
            treble_filter_r: Biquad::new(),
            sag: 0.15,
            envelope,
            envelope_r,
            sample_rate,
        };
        s.update_tone_stack();
        s
    }

    /// Set input gain in dB. Range 0.0 to 30.0.
    pub fn set_gain_db(&mut self, db: f32) {
        self.gain.set_target(db_to_linear(db.clamp(0.0, 30.0)));
    }

    /// Get input gain in dB.
    pub fn gain_db(&self) -> f32 {
        linear_to_db(self.gain.target())
    }

    /// Set output level in dB.
    pub fn set_output_db(&mut self, db: f32) {
        gain::set_output_level_db(&mut self.output, db);
    }

    /// Get output level in dB.
    pub fn output_db(&self) -> f32 {
        gain::output_level_db(&self.output)
    }

    /// Set bass gain in dB. Range −12.0 to +12.0.
    pub fn set_bass_db(&mut self, db: f32) {
        self.bass_db = db.clamp(-12.0, 12.0);
        self.update_tone_stack();
    }

    /// Get bass gain in dB.
    pub fn bass_db(&self) -> f32 {
        self.bass_db
    }

    /// Set mid gain in dB. Range −12.0 to +12.0.
    pub fn set_mid_db(&mut self, db: f32) {
        self.mid_db = db.clamp(-12.0, 12.0);
        self.update_tone_stack();
    }

    /// Get mid gain in dB.
    pub fn mid_db(&self) -> f32 {
        self.mid_db
    }

    /// Set treble gain in dB. Range −12.0 to +12.0.
    pub fn set_treble_db(&mut self, db: f32) {
        self.treble_db = db.clamp(-12.0, 12.0);
        self.update_tone_stack();
    }

    /// Get treble gain in dB.
    pub fn treble_db(&self) -> f32 {
        self.treble_db
    }

    /// Set sag amount. Range 0.0 (stiff) to 1.0 (heavy).
    pub fn set_sag(&mut self, amount: f32) {
        self.sag = amount.clamp(0.0, 1.0);
    }

    /// Get current sag amount.
    pub fn sag(&self) -> f32 {
        self.sag
    }

    fn update_tone_stack(&mut self) {
        let (b0, b1, b2, a0, a1, a2) =
            low_shelf_coefficients(BASS_HZ, 0.707, self.bass_db, self.sample_rate);
        self.bass_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.bass_filter_r.set_coefficients(b0, b1, b2, a0, a1, a2);

        let (b0, b1, b2, a0, a1, a2) =
            peaking_eq_coefficients(MID_HZ, MID_Q, self.mid_db, self.sample_rate);
        self.mid_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.mid_filter_r.set_coefficients(b0, b1, b2, a0, a1, a2);

        let (b0, b1, b2, a0, a1, a2) =
            high_shelf_coefficients(TREBLE_HZ, 0.707, self.treble_db, self.sample_rate);
        self.treble_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.treble_filter_r
            .set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    #[inline]
    fn sag_multiplier(&self, env_level: f32) -> f32 {
        1.0 - self.sag * env_level.min(1.0) * 0.5
    }
}

impl Effect for CleanPreamp {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let gain = self.gain.advance();
        let level = self.output.advance();
        let bias = TUBE_PRESETS[PRESET_INDEX].bias_v;

        let hp = self.hpf.process(input);
        let driven = hp * gain;
        let env = self.envelope.process(driven);
        let rail = self.sag_multiplier(env);

        let stage = self.table.process(bias + driven * rail * TABLE_SWING_V);
        let after_bass = self.bass_filter.process(stage);
        let after_mid = self.mid_filter.process(after_bass);
        self.treble_filter.process(after_mid) * level
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let gain = self.gain.advance();
        let level = self.output.advance();
        let bias = TUBE_PRESETS[PRESET_INDEX].bias_v;

        let hp_l = self.hpf.process(left);
        let driven_l = hp_l * gain;
        let env_l = self.envelope.process(driven_l);
        let rail_l = self.sag_multiplier(env_l);
        let stage_l = self
            .table
            .process(bias + driven_l * rail_l * TABLE_SWING_V);
        let l = self.treble_filter.process(
            self.mid_filter
                .process(self.bass_filter.process(stage_l)),
        ) * level;

        let hp_r = self.hpf_r.process(right);
        let driven_r = hp_r * gain;
        let env_r = self.envelope_r.process(driven_r);
        let rail_r = self.sag_multiplier(env_r);
        let stage_r = self
            .table
            .process(bias + driven_r * rail_r * TABLE_SWING_V);
        let r = self.treble_filter_r.process(
            self.mid_filter_r
                .process(self.bass_filter_r.process(stage_r)),
        ) * level;

        (l, r)
    }

    fn reset(&mut self) {
        self.hpf.reset();
        self.hpf_r.reset();
        self.gain.snap_to_target();
        self.output.snap_to_target();
        self.bass_filter.clear();
        self.mid_filter.clear();
        self.treble_filter.clear();
        self.bass_filter_r.clear();
        self.mid_filter_r.clear();
        self.treble_filter_r.clear();
        self.envelope.reset();
        self.envelope_r.reset();
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.hpf.set_sample_rate(sample_rate);
        self.hpf_r.set_sample_rate(sample_rate);
        self.gain.set_sample_rate(sample_rate);
        self.output.set_sample_rate(sample_rate);
        self.envelope.set_sample_rate(sample_rate);
        self.envelope_r.set_sample_rate(sample_rate);
        self.update_tone_stack();
    }

    fn latency_samples(&self) -> usize {
        0
    }
}

sonido_core::impl_params! {
    CleanPreamp, this {
        [0] ParamDescriptor::gain_db("Gain", "Gain", 0.0, 30.0, 0.0)
                .with_id(ParamId(100), "pre_gain"),
            get: this.gain_db(),
            set: |v| this.set_gain_db(v);

        [1] ParamDescriptor::custom("Bass", "Bass", -12.0, 12.0, 0.0)
                .with_unit(ParamUnit::Decibels)
                .with_step(0.5)
                .with_id(ParamId(101), "pre_bass"),
            get: this.bass_db,
            set: |v| this.set_bass_db(v);

        [2] ParamDescriptor::custom("Mid", "Mid", -12.0, 12.0, 0.0)
                .with_unit(ParamUnit::Decibels)
                .with_step(0.5)
                .with_id(ParamId(102), "pre_mid"),
            get: this.mid_db,
            set: |v| this.set_mid_db(v);

        [3] ParamDescriptor::custom("Treble", "Treble", -12.0, 12.0, 0.0)
                .with_unit(ParamUnit::Decibels)
                .with_step(0.5)
                .with_id(ParamId(103), "pre_treble"),
            get: this.treble_db,
            set: |v| this.set_treble_db(v);

        [4] ParamDescriptor::custom("Sag", "Sag", 0.0, 1.0, 0.15)
                .with_step(0.01)
                .with_id(ParamId(104), "pre_sag"),
            get: this.sag,
            set: |v| this.set_sag(v);

        [5] sonido_core::gain::output_param_descriptor()
                .with_id(ParamId(105), "pre_output"),
            get: this.output_db(),
            set: |v| this.set_output_db(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonido_core::ParameterInfo;

    #[test]
    fn test_preamp_unity_ish() {
        let mut preamp = CleanPreamp::new(48000.0);
        preamp.set_gain_db(0.0);
        preamp.reset();

        let mut out = 0.0;
        for _ in 0..500 {
            out = preamp.process(0.5);
        }
        assert!(out.is_finite());
    }

    #[test]
    fn test_preamp_gain_increases_output() {
        let mut low = CleanPreamp::new(48000.0);
        low.set_gain_db(0.0);
        low.reset();

        let mut high = CleanPreamp::new(48000.0);
        high.set_gain_db(20.0);
        high.reset();

        let mut a = 0.0;
        let mut b = 0.0;
        for _ in 0..500 {
            a = low.process(0.3).abs();
            b = high.process(0.3).abs();
        }
        assert!(b > a, "higher drive should not produce quieter sustained output: {a} vs {b}");
    }

    #[test]
    fn test_preamp_bounded_output() {
        let mut preamp = CleanPreamp::new(48000.0);
        preamp.set_gain_db(30.0);
        preamp.set_sag(1.0);
        preamp.reset();
        for _ in 0..1000 {
            let y = preamp.process(0.8);
            assert!(y.is_finite() && y.abs() < 2.0);
        }
    }

    #[test]
    fn test_preamp_zero_latency() {
        let preamp = CleanPreamp::new(48000.0);
        assert_eq!(preamp.latency_samples(), 0);
    }

    #[test]
    fn test_preamp_tone_stack_is_finite_under_extremes() {
        let mut preamp = CleanPreamp::new(48000.0);
        preamp.set_bass_db(12.0);
        preamp.set_mid_db(-12.0);
        preamp.set_treble_db(12.0);
        for _ in 0..500 {
            let out = preamp.process(0.4);
            assert!(out.is_finite());
        }
    }

    #[test]
    fn test_preamp_param_count_is_six() {
        let preamp = CleanPreamp::new(48000.0);
        assert_eq!(preamp.param_count(), 6);
    }

    #[test]
    fn test_preamp_smoothing() {
        let mut preamp = CleanPreamp::new(48000.0);
        preamp.set_gain_db(0.0);
        preamp.reset();

        preamp.set_gain_db(20.0);
        let first = preamp.process(0.5).abs();
        for _ in 0..1000 {
            preamp.process(0.5);
        }
        let settled = preamp.process(0.5).abs();
        assert!(settled >= first, "Smoothing should gradually increase level");
    }
}
