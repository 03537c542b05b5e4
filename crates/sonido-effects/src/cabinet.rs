//! Speaker cabinet emulation — three fixed biquads voicing a guitar cab.
//!
//! Grounded on [`crate::Stage`]'s cascaded-biquad idiom, but instead of an
//! LR4 crossover this chains three fixed-role filters that approximate the
//! frequency response of a miked speaker cabinet: a low-frequency resonance
//! peak (the cab's box/driver resonance), a mid presence peak, and a
//! high-frequency rolloff standing in for the speaker's natural treble
//! falloff and cone breakup damping.
//!
//! ```text
//! Input → LF resonance (peaking) → Mid presence (peaking) → HF rolloff (low-pass) → Output
//! ```

use sonido_core::{
    Biquad, Effect, ParamDescriptor, ParamId, lowpass_coefficients, peaking_eq_coefficients,
};

/// Per-cabinet-type fixed voicing: (lf_hz, lf_q, lf_db, mid_hz, mid_q, mid_db, hf_hz).
#[derive(Clone, Copy)]
struct CabinetVoicing {
    lf_hz: f32,
    lf_q: f32,
    lf_db: f32,
    mid_hz: f32,
    mid_q: f32,
    mid_db: f32,
    hf_hz: f32,
}

/// Cabinet type selecting a fixed set of filter voicings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CabinetType {
    /// 4x12, British-voiced: scooped mid, earlier HF rolloff.
    #[default]
    FourByTwelve = 0,
    /// 2x12, American-voiced: flatter mid, extended HF.
    TwoByTwelve = 1,
    /// 1x12 combo: pronounced box resonance, tight HF rolloff.
    OneByTwelve = 2,
}

impl CabinetType {
    fn from_index(v: f32) -> Self {
        match v as u8 {
            0 => Self::FourByTwelve,
            1 => Self::TwoByTwelve,
            _ => Self::OneByTwelve,
        }
    }

    fn to_index(self) -> f32 {
        self as u8 as f32
    }

    fn voicing(self) -> CabinetVoicing {
        match self {
            Self::FourByTwelve => CabinetVoicing {
                lf_hz: 110.0,
                lf_q: 1.2,
                lf_db: 3.0,
                mid_hz: 700.0,
                mid_q: 0.6,
                mid_db: -4.0,
                hf_hz: 4200.0,
            },
            Self::TwoByTwelve => CabinetVoicing {
                lf_hz: 95.0,
                lf_q: 1.0,
                lf_db: 2.0,
                mid_hz: 900.0,
                mid_q: 0.7,
                mid_db: 0.0,
                hf_hz: 5500.0,
            },
            Self::OneByTwelve => CabinetVoicing {
                lf_hz: 130.0,
                lf_q: 1.6,
                lf_db: 4.5,
                mid_hz: 1000.0,
                mid_q: 0.8,
                mid_db: 1.0,
                hf_hz: 3500.0,
            },
        }
    }
}

/// Speaker cabinet emulation.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Type | 0–2 (4x12/2x12/1x12) | 0 |
///
/// # Example
///
/// ```rust
/// use sonido_effects::{Cabinet, CabinetType};
/// use sonido_core::Effect;
///
/// let mut cab = Cabinet::new(48000.0);
/// cab.set_cabinet_type(CabinetType::OneByTwelve);
/// let output = cab.process(0.4);
/// ```
pub struct Cabinet {
    sample_rate: f32,
    cabinet_type: CabinetType,
    lf_filter: Biquad,
    lf_filter_r: Biquad,
    mid_filter: Biquad,
    mid_filter_r: Biquad,
    hf_filter: Biquad,
    hf_filter_r: Biquad,
}

impl Cabinet {
    /// Create a new cabinet emulation.
    pub fn new(sample_rate: f32) -> Self {
        let mut s = Self {
            sample_rate,
            cabinet_type: CabinetType::default(),
            lf_filter: Biquad::new(),
            lf_filter_r: Biquad::new(),
            mid_filter: Biquad::new(),
            mid_filter_r: Biquad::new(),
            hf_filter: Biquad::new(),
            hf_filter_r: Biquad::new(),
        };
        s.update_filters();
        s
    }

    /// Select the cabinet voicing.
    pub fn set_cabinet_type(&mut self, cabinet_type: CabinetType) {
        self.cabinet_type = cabinet_type;
        self.update_filters();
    }

    /// Current cabinet voicing.
    pub fn cabinet_type(&self) -> CabinetType {
        self.cabinet_type
    }

    fn update_filters(&mut self) {
        let v = self.cabinet_type.voicing();

        let (b0, b1, b2, a0, a1, a2) =
            peaking_eq_coefficients(v.lf_hz, v.lf_q, v.lf_db, self.sample_rate);
        self.lf_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.lf_filter_r.set_coefficients(b0, b1, b2, a0, a1, a2);

        let (b0, b1, b2, a0, a1, a2) =
            peaking_eq_coefficients(v.mid_hz, v.mid_q, v.mid_db, self.sample_rate);
        self.mid_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.mid_filter_r.set_coefficients(b0, b1, b2, a0, a1, a2);

        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(v.hf_hz, 0.707, self.sample_rate);
        self.hf_filter.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.hf_filter_r.set_coefficients(b0, b1, b2, a0, a1, a2);
    }
}

impl Effect for Cabinet {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let a = self.lf_filter.process(input);
        let b = self.mid_filter.process(a);
        self.hf_filter.process(b)
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let l = self.hf_filter.process(self.mid_filter.process(self.lf_filter.process(left)));
        let r = self
            .hf_filter_r
            .process(self.mid_filter_r.process(self.lf_filter_r.process(right)));
        (l, r)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_filters();
    }

    fn reset(&mut self) {
        self.lf_filter.clear();
        self.lf_filter_r.clear();
        self.mid_filter.clear();
        self.mid_filter_r.clear();
        self.hf_filter.clear();
        self.hf_filter_r.clear();
    }
}

sonido_core::impl_params! {
    Cabinet, this {
        [0] ParamDescriptor::custom("Type", "Type", 0.0, 2.0, 0.0)
                .with_step(1.0)
                .with_id(ParamId(2400), "cab_type")
                .with_flags(sonido_core::ParamFlags::AUTOMATABLE.union(sonido_core::ParamFlags::STEPPED))
                .with_step_labels(&["4x12", "2x12", "1x12"]),
            get: this.cabinet_type.to_index(),
            set: |v| this.set_cabinet_type(CabinetType::from_index(v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonido_core::ParameterInfo;

    #[test]
    fn param_count_is_one() {
        let cab = Cabinet::new(48000.0);
        assert_eq!(cab.param_count(), 1);
    }

    #[test]
    fn all_types_produce_finite_output() {
        for t in [CabinetType::FourByTwelve, CabinetType::TwoByTwelve, CabinetType::OneByTwelve] {
            let mut cab = Cabinet::new(48000.0);
            cab.set_cabinet_type(t);
            for _ in 0..500 {
                let y = cab.process(0.6);
                assert!(y.is_finite());
            }
        }
    }

    #[test]
    fn type_roundtrip() {
        let mut cab = Cabinet::new(48000.0);
        cab.set_cabinet_type(CabinetType::TwoByTwelve);
        assert_eq!(cab.cabinet_type(), CabinetType::TwoByTwelve);
    }

    #[test]
    fn dc_is_attenuated() {
        let mut cab = Cabinet::new(48000.0);
        let mut out = 0.0;
        for _ in 0..2000 {
            out = cab.process(1.0);
        }
        // Peaking/low-pass chain with no gain beyond the LF bump shouldn't
        // blow up a DC input.
        assert!(out.is_finite() && out.abs() < 4.0);
    }
}
