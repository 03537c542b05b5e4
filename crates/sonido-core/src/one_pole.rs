//! One-pole lowpass filter for tone controls and HF rolloff.
//!
//! A single-pole IIR lowpass with the difference equation:
//!
//! ```text
//! y[n] = x[n] + coeff * (y[n-1] - x[n])
//!      = (1 - coeff) * x[n] + coeff * y[n-1]
//! ```
//!
//! where `coeff = exp(-2π * freq / sample_rate)`.
//!
//! This is the simplest possible lowpass — 6 dB/octave rolloff, zero latency,
//! one multiply per sample. Used for tone controls, DC blocking feedback paths,
//! and high-frequency damping in delay/reverb algorithms.
//!
//! # Usage
//!
//! ```rust
//! use sonido_core::OnePole;
//!
//! let mut lp = OnePole::new(48000.0, 4000.0);
//! let filtered = lp.process(1.0);
//! assert!(filtered < 1.0); // attenuated above cutoff
//! ```
//!
//! # Reference
//!
//! Julius O. Smith III, "Introduction to Digital Filters with Audio Applications",
//! Section: One-Pole Filter.

use crate::flush_denormal;
use libm::expf;

/// Selects which response a [`OnePole`] filter implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnePoleMode {
    /// 6 dB/octave lowpass (default).
    #[default]
    Lowpass,
    /// 6 dB/octave highpass, complementary to the lowpass form.
    Highpass,
}

/// One-pole (6 dB/oct) lowpass or highpass filter.
///
/// # Parameters
///
/// - `freq`: Cutoff frequency in Hz (−3 dB point)
/// - `sample_rate`: Sample rate in Hz
///
/// # Invariants
///
/// - `coeff` is always in [0, 1) for stable operation
/// - `state` is flushed to zero when below 1e-20 (denormal protection)
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    prev_input: f32,
    coeff: f32,
    sample_rate: f32,
    freq: f32,
    mode: OnePoleMode,
}

impl OnePole {
    /// Create a new one-pole lowpass filter.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate in Hz
    /// * `freq_hz` - Cutoff frequency in Hz (20.0 to sample_rate/2)
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            prev_input: 0.0,
            coeff: 0.0,
            sample_rate,
            freq: freq_hz,
            mode: OnePoleMode::Lowpass,
        };
        filter.recalculate_coeff();
        filter
    }

    /// Create a one-pole filter in the given mode (lowpass or highpass).
    pub fn with_mode(sample_rate: f32, freq_hz: f32, mode: OnePoleMode) -> Self {
        let mut filter = Self::new(sample_rate, freq_hz);
        filter.mode = mode;
        filter
    }

    /// Switch between lowpass and highpass response.
    pub fn set_mode(&mut self, mode: OnePoleMode) {
        self.mode = mode;
    }

    /// Set the cutoff frequency and recalculate the coefficient.
    ///
    /// Range: 20.0 to `sample_rate / 2` Hz.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.freq = freq_hz;
        self.recalculate_coeff();
    }

    /// Process one sample through the filter.
    ///
    /// Returns the filtered output.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        match self.mode {
            // y[n] = x[n] + coeff * (y[n-1] - x[n])
            OnePoleMode::Lowpass => {
                self.state = flush_denormal(input + self.coeff * (self.state - input));
                self.state
            }
            // Complementary highpass: y[n] = g * (y[n-1] + x[n] - x[n-1]), g = (1+coeff)/2
            OnePoleMode::Highpass => {
                let g = (1.0 + self.coeff) * 0.5;
                let y = flush_denormal(g * (self.state + input - self.prev_input));
                self.prev_input = input;
                self.state = y;
                y
            }
        }
    }

    /// Reset filter state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
        self.prev_input = 0.0;
    }

    /// Update sample rate and recalculate the coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Recalculate the one-pole coefficient from frequency and sample rate.
    ///
    /// `coeff = exp(-2π * freq / sample_rate)`. Higher freq → lower coeff →
    /// less filtering. At freq = 0, coeff ≈ 1 (full filter). At Nyquist,
    /// coeff ≈ 0 (no filter).
    fn recalculate_coeff(&mut self) {
        self.coeff = expf(-core::f32::consts::TAU * self.freq / self.sample_rate);
    }
}
