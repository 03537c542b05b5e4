//! Precomputed waveshaper lookup tables.
//!
//! Some nonlinearities (asymmetric curves with no closed-form antiderivative,
//! or curves driven by an external model) are cheaper to evaluate as a table
//! lookup with linear interpolation than as a per-sample transcendental call.
//! [`WaveshaperTable`] builds the table once at construction time; `process`
//! never allocates.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use libm::{fabsf, tanhf};

/// Selects the curve used to build a [`WaveshaperTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveshaperShape {
    /// Hard clip at ±1.
    Hard,
    /// `tanh(drive * x) / tanh(drive)`, normalized to unit gain at x=1.
    #[default]
    Tanh,
    /// `atan(drive * x) * 2 / pi`, normalized.
    Arctan,
    /// Logistic-sigmoid based soft clip, symmetric about the origin.
    Sigmoid,
    /// Cubic soft clip: `1.5x - 0.5x^3` below threshold, hard clip above.
    CubicSoft,
}

/// A read-only table mapping `x ∈ [-1, 1]` to a shaped output.
///
/// Built once (`build`), read many times (`process`) with linear
/// interpolation between adjacent entries.
#[derive(Debug, Clone)]
pub struct WaveshaperTable {
    table: Vec<f32>,
    shape: WaveshaperShape,
    drive: f32,
}

impl WaveshaperTable {
    /// Builds a new table with `size` entries (recommend 2048–8192) over
    /// `x ∈ [-1, 1]` for the given shape and drive amount.
    ///
    /// `drive` scales the input before shaping; higher drive pushes more of
    /// the curve's nonlinear region into the working range.
    pub fn build(shape: WaveshaperShape, drive: f32, size: usize) -> Self {
        let size = size.max(2);
        let drive = drive.max(0.01);
        let mut table = vec![0.0f32; size];
        for (i, slot) in table.iter_mut().enumerate() {
            let x = -1.0 + 2.0 * (i as f32) / (size as f32 - 1.0);
            *slot = Self::shape_fn(shape, drive, x);
        }
        Self { table, shape, drive }
    }

    /// Looks up `x` (clamped to `[-1, 1]`) with linear interpolation.
    #[inline]
    pub fn process(&self, x: f32) -> f32 {
        let clamped = x.clamp(-1.0, 1.0);
        let n = self.table.len();
        let pos = (clamped + 1.0) * 0.5 * (n as f32 - 1.0);
        let idx = pos as usize;
        let frac = pos - idx as f32;
        if idx + 1 < n {
            self.table[idx] * (1.0 - frac) + self.table[idx + 1] * frac
        } else {
            self.table[n - 1]
        }
    }

    /// The shape this table was built with.
    pub fn shape(&self) -> WaveshaperShape {
        self.shape
    }

    /// The drive amount this table was built with.
    pub fn drive(&self) -> f32 {
        self.drive
    }

    fn shape_fn(shape: WaveshaperShape, drive: f32, x: f32) -> f32 {
        match shape {
            WaveshaperShape::Hard => x.clamp(-1.0, 1.0),
            WaveshaperShape::Tanh => {
                let norm = tanhf(drive);
                if norm.abs() < 1e-9 {
                    x
                } else {
                    tanhf(drive * x) / norm
                }
            }
            WaveshaperShape::Arctan => {
                let norm = libm::atanf(drive);
                if norm.abs() < 1e-9 {
                    x
                } else {
                    libm::atanf(drive * x) / norm
                }
            }
            WaveshaperShape::Sigmoid => {
                let k = drive.max(0.01);
                let s = |v: f32| 2.0 / (1.0 + libm::expf(-k * v)) - 1.0;
                let norm = s(1.0);
                if fabsf(norm) < 1e-9 { x } else { s(x) / norm }
            }
            WaveshaperShape::CubicSoft => {
                let driven = (x * drive).clamp(-1.0, 1.0);
                if fabsf(driven) <= 1.0 {
                    1.5 * driven - 0.5 * driven * driven * driven
                } else {
                    driven.signum()
                }
            }
        }
    }
}
