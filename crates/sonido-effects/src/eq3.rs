//! Fixed-frequency 3-band tone stack.
//!
//! Unlike [`crate::ParametricEq`], whose three bands each have independent
//! frequency/gain/Q, `Eq3Band` is the classic guitar-pedal tone stack: Bass,
//! Mid, and Treble knobs at fixed center frequencies, gain-only.
//!
//! Signal flow:
//! ```text
//! Input → Bass (low shelf) → Mid (peaking) → Treble (high shelf) → Output
//! ```

use sonido_core::{
    Biquad, Effect, ParamDescriptor, ParamId, high_shelf_coefficients, low_shelf_coefficients,
    peaking_eq_coefficients,
};

/// Bass shelf corner frequency (Hz).
const BASS_HZ: f32 = 100.0;

/// Mid peak center frequency (Hz).
const MID_HZ: f32 = 800.0;

/// Mid band Q.
const MID_Q: f32 = 0.7;

/// Treble shelf corner frequency (Hz).
const TREBLE_HZ: f32 = 3000.0;

/// Fixed-frequency 3-band tone stack (Bass/Mid/Treble).
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Bass | −12.0–12.0 dB | 0.0 |
/// | 1 | Mid | −12.0–12.0 dB | 0.0 |
/// | 2 | Treble | −12.0–12.0 dB | 0.0 |
///
/// # Example
///
/// ```rust
/// use sonido_effects::Eq3Band;
/// use sonido_core::Effect;
///
/// let mut eq = Eq3Band::new(48000.0);
/// eq.set_bass_db(3.0);
/// eq.set_treble_db(-2.0);
/// let output = eq.process(0.4);
/// ```
pub struct Eq3Band {
    sample_rate: f32,
    bass_db: f32,
    mid_db: f32,
    treble_db: f32,
    bass_filter: Biquad,
    mid_filter: Biquad,
    treble_filter: Biquad,
}

impl Eq3Band {
    /// Create a new tone stack with all bands flat.
    pub fn new(sample_rate: f32) -> Self {
        let mut s = Self {
            sample_rate,
            bass_db: 0.0,
            mid_db: 0.0,
            treble_db: 0.0,
            bass_filter: Biquad::new(),
            mid_filter: Biquad::new(),
            treble_filter: Biquad::new(),
        };
        s.update_all();
        s
    }

    /// Set bass gain in dB. Range −12.0 to +12.0.
    pub fn set_bass_db(&mut self, db: f32) {
        self.bass_db = db.clamp(-12.0, 12.0);
        self.update_bass();
    }

    /// Get bass gain in dB.
    pub fn bass_db(&self) -> f32 {
        self.bass_db
    }

    /// Set mid gain in dB. Range −12.0 to +12.0.
    pub fn set_mid_db(&mut self, db: f32) {
        self.mid_db = db.clamp(-12.0, 12.0);
        self.update_mid();
    }

    /// Get mid gain in dB.
    pub fn mid_db(&self) -> f32 {
        self.mid_db
    }

    /// Set treble gain in dB. Range −12.0 to +12.0.
    pub fn set_treble_db(&mut self, db: f32) {
        self.treble_db = db.clamp(-12.0, 12.0);
        self.update_treble();
    }

    /// Get treble gain in dB.
    pub fn treble_db(&self) -> f32 {
        self.treble_db
    }

    fn update_bass(&mut self) {
        let (b0, b1, b2, a0, a1, a2) =
            low_shelf_coefficients(BASS_HZ, 0.707, self.bass_db, self.sample_rate);
        self.bass_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    fn update_mid(&mut self) {
        let (b0, b1, b2, a0, a1, a2) =
            peaking_eq_coefficients(MID_HZ, MID_Q, self.mid_db, self.sample_rate);
        self.mid_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    fn update_treble(&mut self) {
        let (b0, b1, b2, a0, a1, a2) =
            high_shelf_coefficients(TREBLE_HZ, 0.707, self.treble_db, self.sample_rate);
        self.treble_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    fn update_all(&mut self) {
        self.update_bass();
        self.update_mid();
        self.update_treble();
    }
}

impl Effect for Eq3Band {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let after_bass = self.bass_filter.process(input);
        let after_mid = self.mid_filter.process(after_bass);
        self.treble_filter.process(after_mid)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_all();
    }

    fn reset(&mut self) {
        self.bass_filter.clear();
        self.mid_filter.clear();
        self.treble_filter.clear();
    }
}

sonido_core::impl_params! {
    Eq3Band, this {
        [0] ParamDescriptor::custom("Bass", "Bass", -12.0, 12.0, 0.0)
                .with_unit(sonido_core::ParamUnit::Decibels)
                .with_step(0.5)
                .with_id(ParamId(1700), "eq3_bass"),
            get: this.bass_db,
            set: |v| this.set_bass_db(v);

        [1] ParamDescriptor::custom("Mid", "Mid", -12.0, 12.0, 0.0)
                .with_unit(sonido_core::ParamUnit::Decibels)
                .with_step(0.5)
                .with_id(ParamId(1701), "eq3_mid"),
            get: this.mid_db,
            set: |v| this.set_mid_db(v);

        [2] ParamDescriptor::custom("Treble", "Treble", -12.0, 12.0, 0.0)
                .with_unit(sonido_core::ParamUnit::Decibels)
                .with_step(0.5)
                .with_id(ParamId(1702), "eq3_treble"),
            get: this.treble_db,
            set: |v| this.set_treble_db(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonido_core::ParameterInfo;

    #[test]
    fn flat_eq_is_near_unity() {
        let mut eq = Eq3Band::new(48000.0);
        let mut out = 0.0;
        for _ in 0..500 {
            out = eq.process(1.0);
        }
        assert!((out - 1.0).abs() < 0.05, "got {out}");
    }

    #[test]
    fn bands_are_finite_under_extremes() {
        let mut eq = Eq3Band::new(48000.0);
        eq.set_bass_db(12.0);
        eq.set_mid_db(-12.0);
        eq.set_treble_db(12.0);
        for _ in 0..200 {
            let out = eq.process(0.7);
            assert!(out.is_finite());
        }
    }

    #[test]
    fn param_count_is_three() {
        let eq = Eq3Band::new(48000.0);
        assert_eq!(eq.param_count(), 3);
    }

    #[test]
    fn clamping() {
        let mut eq = Eq3Band::new(48000.0);
        eq.set_bass_db(50.0);
        assert_eq!(eq.bass_db(), 12.0);
        eq.set_treble_db(-50.0);
        assert_eq!(eq.treble_db(), -12.0);
    }
}
