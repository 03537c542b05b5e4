//! Power-amp stage: tube nonlinearity plus supply sag, no tone shaping.
//!
//! Where [`crate::CleanPreamp`] is a headroom-limited clean gain stage, the
//! power amp pushes the signal through a [`sonido_core::TubeTable`] in
//! pentode mode and lets the rail "sag" under sustained loud passages —
//! the compression a real amp's power supply exhibits when pushed hard.
//! No tone stack: that lives upstream in the preamp.
//!
//! ```text
//! Input → Drive → TubeTable (pentode) → Sag (envelope-driven gain dip) → Output
//! ```

use sonido_core::{
    db_to_linear, gain, linear_to_db, DetectorMode, Effect, EnvelopeFollower, ParamDescriptor,
    ParamId, SmoothedParam, TubeTable, TUBE_PRESETS,
};

/// Grid-voltage swing the tube table is built over.
const TABLE_SWING_V: f32 = 6.0;

/// Power-amp tube preset: 6L6GC, the classic American pentode power tube.
const PRESET_INDEX: usize = 1;

/// Power-amp stage with tube nonlinearity and supply sag.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Drive | 0.0–30.0 dB | 12.0 |
/// | 1 | Sag | 0.0–1.0 | 0.4 |
/// | 2 | Output | −20.0–20.0 dB | 0.0 |
///
/// # Example
///
/// ```rust
/// use sonido_effects::Poweramp;
/// use sonido_core::Effect;
///
/// let mut pa = Poweramp::new(48000.0);
/// pa.set_drive_db(20.0);
/// pa.set_sag(0.6);
/// let output = pa.process(0.3);
/// ```
pub struct Poweramp {
    drive: SmoothedParam,
    output_level: SmoothedParam,
    sag: f32,
    table: TubeTable,
    envelope: EnvelopeFollower,
    envelope_r: EnvelopeFollower,
}

impl Poweramp {
    /// Create a new power-amp stage.
    pub fn new(sample_rate: f32) -> Self {
        let mut envelope = EnvelopeFollower::with_times(sample_rate, 10.0, 250.0);
        envelope.set_mode(DetectorMode::Peak);
        let mut envelope_r = EnvelopeFollower::with_times(sample_rate, 10.0, 250.0);
        envelope_r.set_mode(DetectorMode::Peak);

        Self {
            drive: SmoothedParam::fast(db_to_linear(12.0), sample_rate),
            output_level: gain::output_level_param(sample_rate),
            sag: 0.4,
            table: TubeTable::build(&TUBE_PRESETS[PRESET_INDEX], TABLE_SWING_V, true, 1024),
            envelope,
            envelope_r,
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

    /// Set sag amount. Range 0.0 (no sag, stiff supply) to 1.0 (heavy sag).
    pub fn set_sag(&mut self, amount: f32) {
        self.sag = amount.clamp(0.0, 1.0);
    }

    /// Get current sag amount.
    pub fn sag(&self) -> f32 {
        self.sag
    }

    #[inline]
    fn sag_multiplier(&self, env_level: f32) -> f32 {
        // Rail voltage dips as average output level rises; the dip scales
        // with the sag control.
        1.0 - self.sag * env_level.min(1.0) * 0.5
    }
}

impl Effect for Poweramp {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let drive = self.drive.advance();
        let level = self.output_level.advance();

        let driven = input * drive;
        let env = self.envelope.process(driven);
        let rail = self.sag_multiplier(env);

        let bias = TUBE_PRESETS[PRESET_INDEX].bias_v;
        let grid_v = bias + driven * rail * TABLE_SWING_V;
        self.table.process(grid_v) * level
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let drive = self.drive.advance();
        let level = self.output_level.advance();
        let bias = TUBE_PRESETS[PRESET_INDEX].bias_v;

        let driven_l = left * drive;
        let env_l = self.envelope.process(driven_l);
        let rail_l = self.sag_multiplier(env_l);
        let l = self
            .table
            .process(bias + driven_l * rail_l * TABLE_SWING_V)
            * level;

        let driven_r = right * drive;
        let env_r = self.envelope_r.process(driven_r);
        let rail_r = self.sag_multiplier(env_r);
        let r = self
            .table
            .process(bias + driven_r * rail_r * TABLE_SWING_V)
            * level;

        (l, r)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.drive.set_sample_rate(sample_rate);
        self.output_level.set_sample_rate(sample_rate);
        self.envelope.set_sample_rate(sample_rate);
        self.envelope_r.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.drive.snap_to_target();
        self.output_level.snap_to_target();
        self.envelope.reset();
        self.envelope_r.reset();
    }
}

sonido_core::impl_params! {
    Poweramp, this {
        [0] ParamDescriptor::gain_db("Drive", "Drive", 0.0, 30.0, 12.0)
                .with_id(ParamId(2300), "pa_drive"),
            get: this.drive_db(),
            set: |v| this.set_drive_db(v);

        [1] ParamDescriptor::custom("Sag", "Sag", 0.0, 1.0, 0.4)
                .with_step(0.01)
                .with_id(ParamId(2301), "pa_sag"),
            get: this.sag,
            set: |v| this.set_sag(v);

        [2] sonido_core::gain::output_param_descriptor()
                .with_id(ParamId(2302), "pa_output"),
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
        let mut pa = Poweramp::new(48000.0);
        pa.set_drive_db(28.0);
        pa.set_sag(1.0);
        pa.reset();
        for _ in 0..1000 {
            let y = pa.process(0.7);
            assert!(y.is_finite() && y.abs() < 2.0);
        }
    }

    #[test]
    fn param_count_is_three() {
        let pa = Poweramp::new(48000.0);
        assert_eq!(pa.param_count(), 3);
    }

    #[test]
    fn sag_reduces_sustained_level() {
        let mut no_sag = Poweramp::new(48000.0);
        no_sag.set_drive_db(20.0);
        no_sag.set_sag(0.0);
        no_sag.reset();

        let mut full_sag = Poweramp::new(48000.0);
        full_sag.set_drive_db(20.0);
        full_sag.set_sag(1.0);
        full_sag.reset();

        let mut a = 0.0;
        let mut b = 0.0;
        for _ in 0..2000 {
            a = no_sag.process(0.8).abs();
            b = full_sag.process(0.8).abs();
        }
        assert!(b <= a + 1e-4, "sag should not increase sustained level: {a} vs {b}");
    }
}
