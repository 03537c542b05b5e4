//! Triode/pentode nonlinearity tables using Koren's vacuum tube model.
//!
//! Koren's equation approximates the plate current of a triode as a function
//! of grid-to-cathode voltage, producing the characteristic soft-knee,
//! even-harmonic-rich clipping associated with tube preamp and power-amp
//! stages. [`TubeTable`] precomputes the curve once per parameter set; the
//! audio path only ever does a table lookup.
//!
//! # Reference
//!
//! Norman Koren, "Improved Vacuum Tube Models for SPICE Simulations", 1996.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use libm::sqrtf;

/// A named tube type with Koren model parameters and typical plate/screen
/// voltages, as used by [`TUBE_PRESETS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TubeType {
    /// 6DJ8 / ECC88 — low-noise dual triode, common in hi-fi preamps.
    SixDJ8,
    /// 6L6GC — beam power tetrode, classic American amp power stage.
    SixL6GC,
    /// 12AX7 / ECC83 — high-gain dual triode, the standard preamp tube.
    TwelveAX7,
    /// 12AU7 / ECC82 — low-gain dual triode, used for buffer/phase-splitter stages.
    TwelveAU7,
    /// 6550 — high-power beam tetrode, common in high-headroom bass/guitar amps.
    SixFiveFifty,
    /// KT88 — high-power beam tetrode, hi-fi and high-headroom guitar amps.
    KT88,
}

/// Koren model parameters plus nominal operating voltages for one tube type.
#[derive(Debug, Clone, Copy)]
pub struct TubePreset {
    /// Which tube this preset models.
    pub tube: TubeType,
    /// Amplification factor (μ).
    pub mu: f32,
    /// Koren's "kg1" perveance-like coefficient.
    pub kg1: f32,
    /// Koren's knee-sharpness coefficient (k).
    pub k: f32,
    /// Koren's "x" exponent, folded into the `a` term below for the
    /// simplified triode form used here (a ≈ 1.4 tracks the classic curve).
    pub a: f32,
    /// Plate resistance (Rp), ohms — scales current to a comparable range.
    pub rp: f32,
    /// Typical grid bias voltage, used as the operating point for the table.
    pub bias_v: f32,
}

/// Koren model parameters for six common guitar/hi-fi tubes.
///
/// Indexed 0–5 in declaration order for the stable control-interface tube
/// preset table.
pub const TUBE_PRESETS: [TubePreset; 6] = [
    TubePreset {
        tube: TubeType::SixDJ8,
        mu: 33.0,
        kg1: 430.0,
        k: 1.0,
        a: 1.3,
        rp: 2640.0,
        bias_v: -1.3,
    },
    TubePreset {
        tube: TubeType::SixL6GC,
        mu: 8.7,
        kg1: 1460.0,
        k: 1.0,
        a: 1.35,
        rp: 1700.0,
        bias_v: -14.0,
    },
    TubePreset {
        tube: TubeType::TwelveAX7,
        mu: 100.0,
        kg1: 1060.0,
        k: 1.0,
        a: 1.4,
        rp: 62500.0,
        bias_v: -1.0,
    },
    TubePreset {
        tube: TubeType::TwelveAU7,
        mu: 17.0,
        kg1: 1180.0,
        k: 1.0,
        a: 1.3,
        rp: 7700.0,
        bias_v: -8.5,
    },
    TubePreset {
        tube: TubeType::SixFiveFifty,
        mu: 8.0,
        kg1: 1700.0,
        k: 1.0,
        a: 1.35,
        rp: 1270.0,
        bias_v: -16.5,
    },
    TubePreset {
        tube: TubeType::KT88,
        mu: 8.0,
        kg1: 1460.0,
        k: 1.0,
        a: 1.35,
        rp: 1500.0,
        bias_v: -14.5,
    },
];

/// Precomputed triode/pentode transfer curve over a grid-voltage range.
///
/// Maps grid-to-cathode voltage `v ∈ [v_min, v_max]` to plate current via
/// Koren's formula, then normalizes to a `[-1, 1]`-ish output range around
/// the preset's bias point so it can sit in an audio-rate waveshaping slot.
#[derive(Debug, Clone)]
pub struct TubeTable {
    table: Vec<f32>,
    v_min: f32,
    v_max: f32,
    pentode: bool,
}

impl TubeTable {
    /// Builds a table for `preset` over `[bias - swing, bias + swing]` volts.
    ///
    /// `pentode` multiplies the triode current by a simple `(1 + kg1_frac *
    /// vgs)` screen-current term, giving the flatter, more compressed curve
    /// associated with pentode/tetrode power stages; `false` gives the pure
    /// triode curve used for preamp gain stages.
    pub fn build(preset: &TubePreset, swing_v: f32, pentode: bool, size: usize) -> Self {
        let size = size.max(2);
        let v_min = preset.bias_v - swing_v;
        let v_max = preset.bias_v + swing_v;
        let mut raw = vec![0.0f32; size];
        for (i, slot) in raw.iter_mut().enumerate() {
            let v = v_min + (v_max - v_min) * (i as f32) / (size as f32 - 1.0);
            *slot = Self::koren_current(preset, v, pentode);
        }

        // Normalize so the bias point maps to 0 and the curve fits roughly
        // within [-1, 1], matching the convention of the other waveshapers.
        let bias_current = Self::koren_current(preset, preset.bias_v, pentode);
        let peak = raw
            .iter()
            .map(|c| (c - bias_current).abs())
            .fold(1e-6f32, f32::max);
        for slot in raw.iter_mut() {
            *slot = (*slot - bias_current) / peak;
        }

        Self {
            table: raw,
            v_min,
            v_max,
            pentode,
        }
    }

    /// Looks up `v` (clamped to the table's built range) with linear interpolation.
    #[inline]
    pub fn process(&self, v: f32) -> f32 {
        let clamped = v.clamp(self.v_min, self.v_max);
        let n = self.table.len();
        let pos = (clamped - self.v_min) / (self.v_max - self.v_min) * (n as f32 - 1.0);
        let idx = pos as usize;
        let frac = pos - idx as f32;
        if idx + 1 < n {
            self.table[idx] * (1.0 - frac) + self.table[idx + 1] * frac
        } else {
            self.table[n - 1]
        }
    }

    /// Whether this table was built with the pentode screen-current term.
    pub fn is_pentode(&self) -> bool {
        self.pentode
    }

    /// Koren's triode plate-current equation, optionally extended for pentode.
    ///
    /// `I = (mu+1)*vgs / (Rp + k*(mu+1)*(vgs + sqrt(vgs^2 + a)))`, floored at 0.
    fn koren_current(preset: &TubePreset, vgs: f32, pentode: bool) -> f32 {
        let e1 = (preset.mu + 1.0) * vgs;
        let denom = preset.rp
            + preset.k * (preset.mu + 1.0) * (vgs + sqrtf(vgs * vgs + preset.a));
        let triode_i = if denom.abs() < 1e-6 { 0.0 } else { e1 / denom };
        let triode_i = triode_i.max(0.0);
        if pentode {
            triode_i * (1.0 + vgs / preset.kg1)
        } else {
            triode_i
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_bounded_and_finite() {
        for preset in TUBE_PRESETS.iter() {
            let table = TubeTable::build(preset, 10.0, false, 1024);
            for i in 0..=20 {
                let v = table.v_min + (table.v_max - table.v_min) * i as f32 / 20.0;
                let y = table.process(v);
                assert!(y.is_finite(), "{:?} at {v}: {y}", preset.tube);
            }
        }
    }

    #[test]
    fn bias_point_is_near_zero() {
        let preset = &TUBE_PRESETS[2]; // 12AX7
        let table = TubeTable::build(preset, 5.0, false, 2048);
        let y = table.process(preset.bias_v);
        assert!(y.abs() < 0.05, "bias point should map near 0, got {y}");
    }

    #[test]
    fn pentode_table_differs_from_triode() {
        let preset = &TUBE_PRESETS[1]; // 6L6GC
        let triode = TubeTable::build(preset, 10.0, false, 512);
        let pentode = TubeTable::build(preset, 10.0, true, 512);
        let v = preset.bias_v + 5.0;
        assert!((triode.process(v) - pentode.process(v)).abs() > 1e-4);
    }

    #[test]
    fn six_presets_present() {
        assert_eq!(TUBE_PRESETS.len(), 6);
    }
}
