//! Biquad (bi-quadratic) filter structure.
//!
//! Provides a generic second-order IIR filter that can be configured
//! for various filter types (low-pass, high-pass, band-pass, notch).
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas.

use core::f32::consts::PI;
use libm::{cosf, sinf};

/// Generic biquad filter coefficients and state.
///
/// Implements the Transposed Direct Form II biquad structure:
/// ```text
/// y[n]  = b0*x[n] + z1[n-1]
/// z1[n] = b1*x[n] - a1*y[n] + z2[n-1]
/// z2[n] = b2*x[n] - a2*y[n]
/// ```
///
/// TDF-II keeps only two state words (`z1`, `z2`) and is the standard
/// low-noise structure for cascaded/modulated biquads.
///
/// This is a building block for creating specific filter types.
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Feedforward coefficients
    b0: f32,
    b1: f32,
    b2: f32,

    /// Feedback coefficients
    a1: f32,
    a2: f32,

    /// Transposed Direct Form II state
    z1: f32,
    z2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    ///
    /// Initial state: `y[n] = x[n]` (no filtering)
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Sets the biquad coefficients.
    ///
    /// # Arguments
    ///
    /// * `b0, b1, b2` - Feedforward coefficients
    /// * `a0, a1, a2` - Feedback coefficients (a0 is typically 1.0)
    ///
    /// Note: This function normalizes by a0 internally.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        // Normalize by a0
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Processes a single sample through the biquad filter.
    ///
    /// Uses Transposed Direct Form II structure.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.z1;
        self.z1 = crate::math::flush_denormal(self.b1 * input - self.a1 * output + self.z2);
        self.z2 = crate::math::flush_denormal(self.b2 * input - self.a2 * output);
        output
    }

    /// Clears the filter state (delay lines).
    ///
    /// Useful for resetting the filter without changing coefficients.
    pub fn clear(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculates low-pass filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (typically 0.707 for Butterworth response)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn lowpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates high-pass filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (typically 0.707 for Butterworth response)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn highpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates band-pass filter coefficients using the RBJ cookbook formula.
///
/// This version has constant 0dB peak gain.
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `q` - Q factor (bandwidth = frequency / Q)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn bandpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = alpha;
    let b1 = 0.0;
    let b2 = -alpha;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates notch (band-reject) filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Notch frequency in Hz
/// * `q` - Q factor (notch width = frequency / Q)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn notch_coefficients(frequency: f32, q: f32, sample_rate: f32) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = 1.0;
    let b1 = -2.0 * cos_omega;
    let b2 = 1.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates peaking EQ filter coefficients using the RBJ cookbook formula.
///
/// A peaking EQ boosts or cuts around a center frequency with a specified bandwidth.
/// Used for parametric equalizers.
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `q` - Q factor (bandwidth = frequency / Q)
/// * `gain_db` - Gain in decibels (positive = boost, negative = cut)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn peaking_eq_coefficients(frequency: f32, q: f32, gain_db: f32, sample_rate: f32) -> (f32, f32, f32, f32, f32, f32) {
    use libm::powf;

    let a = powf(10.0, gain_db / 40.0); // sqrt(10^(dB/20))
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_omega;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha / a;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates low-shelf filter coefficients using the RBJ cookbook formula.
///
/// Boosts or cuts everything below `frequency` by `gain_db`, flat above it.
/// Used for bass tone controls and 3-band EQ low bands.
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn low_shelf_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    use libm::{powf, sqrtf};

    let a = powf(10.0, gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);
    let two_sqrt_a_alpha = 2.0 * sqrtf(a) * alpha;

    let b0 = a * ((a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha);
    let b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_omega);
    let b2 = a * ((a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha);
    let a0 = (a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha;
    let a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cos_omega);
    let a2 = (a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates high-shelf filter coefficients using the RBJ cookbook formula.
///
/// Boosts or cuts everything above `frequency` by `gain_db`, flat below it.
/// Used for treble tone controls and 3-band EQ high bands.
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn high_shelf_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    use libm::{powf, sqrtf};

    let a = powf(10.0, gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);
    let two_sqrt_a_alpha = 2.0 * sqrtf(a) * alpha;

    let b0 = a * ((a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha);
    let b1 = -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_omega);
    let b2 = a * ((a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha);
    let a0 = (a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha;
    let a1 = 2.0 * ((a - 1.0) - (a + 1.0) * cos_omega);
    let a2 = (a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha;

    (b0, b1, b2, a0, a1, a2)
}
