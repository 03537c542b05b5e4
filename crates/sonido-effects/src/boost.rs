//! Clean boost — transparent gain stage with an optional bright EQ tilt.
//!
//! Grounded on [`crate::CleanPreamp`]'s headroom-limited gain stage, but
//! stripped to just the two controls a boost pedal actually has: how much
//! gain, and whether the top end is lifted going into the next stage.

use libm::tanhf;
use sonido_core::{
    Effect, ParamDescriptor, ParamId, ParamUnit, SmoothedParam, db_to_linear, high_shelf_coefficients,
    linear_to_db, Biquad,
};

/// Bright-switch shelf frequency (Hz).
const BRIGHT_HZ: f32 = 2000.0;

/// Bright-switch shelf gain when engaged (dB).
const BRIGHT_GAIN_DB: f32 = 6.0;

/// Clean boost pedal.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Gain | 0.0–20.0 dB | 6.0 |
/// | 1 | Bright | 0–1 (off/on) | 0 |
///
/// # Example
///
/// ```rust
/// use sonido_effects::Boost;
/// use sonido_core::Effect;
///
/// let mut boost = Boost::new(48000.0);
/// boost.set_gain_db(12.0);
/// boost.set_bright(true);
/// let output = boost.process(0.4);
/// ```
pub struct Boost {
    gain: SmoothedParam,
    bright: bool,
    bright_filter: Biquad,
    bright_filter_r: Biquad,
    sample_rate: f32,
}

impl Boost {
    /// Create a new clean boost effect.
    pub fn new(sample_rate: f32) -> Self {
        let mut s = Self {
            gain: SmoothedParam::standard(db_to_linear(6.0), sample_rate),
            bright: false,
            bright_filter: Biquad::new(),
            bright_filter_r: Biquad::new(),
            sample_rate,
        };
        s.update_bright_filter();
        s
    }

    /// Set gain in dB. Range 0.0 to 20.0.
    pub fn set_gain_db(&mut self, db: f32) {
        self.gain.set_target(db_to_linear(db.clamp(0.0, 20.0)));
    }

    /// Get gain in dB.
    pub fn gain_db(&self) -> f32 {
        linear_to_db(self.gain.target())
    }

    /// Enable or disable the bright shelf.
    pub fn set_bright(&mut self, bright: bool) {
        self.bright = bright;
        self.update_bright_filter();
    }

    /// Whether the bright shelf is engaged.
    pub fn bright(&self) -> bool {
        self.bright
    }

    fn update_bright_filter(&mut self) {
        let gain_db = if self.bright { BRIGHT_GAIN_DB } else { 0.0 };
        let (b0, b1, b2, a0, a1, a2) =
            high_shelf_coefficients(BRIGHT_HZ, 0.707, gain_db, self.sample_rate);
        self.bright_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.bright_filter_r
            .set_coefficients(b0, b1, b2, a0, a1, a2);
    }
}

impl Effect for Boost {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let gain = self.gain.advance();
        let driven = input * gain;
        let shaped = self.bright_filter.process(driven);
        // Soft-limit only engages well above unity; a clean boost stays
        // transparent across its normal gain range.
        if shaped.abs() > 1.0 {
            shaped.signum() * tanhf(shaped.abs())
        } else {
            shaped
        }
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let gain = self.gain.advance();
        let l = self.bright_filter.process(left * gain);
        let r = self.bright_filter_r.process(right * gain);
        let clip = |x: f32| {
            if x.abs() > 1.0 {
                x.signum() * tanhf(x.abs())
            } else {
                x
            }
        };
        (clip(l), clip(r))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.gain.set_sample_rate(sample_rate);
        self.update_bright_filter();
    }

    fn reset(&mut self) {
        self.gain.snap_to_target();
        self.bright_filter.clear();
        self.bright_filter_r.clear();
    }

    fn latency_samples(&self) -> usize {
        0
    }
}

sonido_core::impl_params! {
    Boost, this {
        [0] ParamDescriptor::gain_db("Gain", "Gain", 0.0, 20.0, 6.0)
                .with_id(ParamId(2000), "boost_gain"),
            get: this.gain_db(),
            set: |v| this.set_gain_db(v);

        [1] ParamDescriptor::custom("Bright", "Bright", 0.0, 1.0, 0.0)
                .with_unit(ParamUnit::None)
                .with_step(1.0)
                .with_id(ParamId(2001), "boost_bright")
                .with_flags(sonido_core::ParamFlags::AUTOMATABLE.union(sonido_core::ParamFlags::STEPPED)),
            get: if this.bright { 1.0 } else { 0.0 },
            set: |v| this.set_bright(v >= 0.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonido_core::ParameterInfo;

    #[test]
    fn unity_near_zero_gain() {
        let mut boost = Boost::new(48000.0);
        boost.set_gain_db(0.0);
        boost.reset();
        let out = boost.process(0.5);
        assert!((out - 0.5).abs() < 0.05);
    }

    #[test]
    fn param_count_is_two() {
        let boost = Boost::new(48000.0);
        assert_eq!(boost.param_count(), 2);
    }

    #[test]
    fn bright_engages_shelf() {
        let mut boost = Boost::new(48000.0);
        boost.set_bright(true);
        assert!(boost.bright());
        let out = boost.process(0.3);
        assert!(out.is_finite());
    }

    #[test]
    fn bounded_at_max_gain() {
        let mut boost = Boost::new(48000.0);
        boost.set_gain_db(20.0);
        boost.reset();
        for _ in 0..200 {
            let y = boost.process(0.9);
            assert!(y.is_finite() && y.abs() < 2.0);
        }
    }
}
