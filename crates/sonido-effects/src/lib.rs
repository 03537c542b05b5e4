//! Sonido Effects - Audio effect implementations
//!
//! This crate provides production-ready audio effects built on sonido-core:
//!
//! - [`Distortion`] - Waveshaping distortion with multiple algorithms
//! - [`Compressor`] - Dynamics compressor with soft knee
//! - [`Chorus`] - Classic dual-voice chorus
//! - [`Delay`] - Tape-style feedback delay
//! - [`LowPassFilter`] - Biquad-based lowpass filter
//! - [`MultiVibrato`] - 10-unit tape wow/flutter simulation
//! - [`TapeSaturation`] - Tape warmth and HF rolloff
//! - [`CleanPreamp`] - High-headroom preamp stage
//! - [`Gate`] - Noise gate with hold and hysteresis
//! - [`Flanger`] - True-stereo flanger with feedback
//! - [`Phaser`] - Cascaded allpass phaser with tempo sync
//! - [`Reverb`] - Hadamard FDN algorithmic reverb
//! - [`Tremolo`] - Amplitude modulation
//! - [`Wah`] - Auto/manual envelope-following wah
//! - [`ParametricEq`] - 3-band parametric EQ
//! - [`Eq3Band`] - Fixed-frequency Bass/Mid/Treble tone stack
//! - [`Overdrive`] - Soft-clipping asymmetric overdrive
//! - [`Fuzz`] - Aggressive hard-clipping fuzz
//! - [`Boost`] - Clean boost with optional bright EQ
//! - [`TubeScreamer`] - Mid-humped tube-style overdrive
//! - [`Vibrato`] - Pure pitch vibrato
//! - [`Poweramp`] - Tube power-amp stage with supply sag
//! - [`Cabinet`] - Speaker cabinet emulation
//!
//! ## Example
//!
//! ```rust,ignore
//! use sonido_core::{Effect, EffectExt};
//! use sonido_effects::{Distortion, Chorus, Delay};
//!
//! let mut dist = Distortion::new(48000.0);
//! dist.set_drive_db(20.0);
//!
//! let chorus = Chorus::new(48000.0);
//! let delay = Delay::new(48000.0);
//!
//! // Chain effects together
//! let mut chain = dist.chain(chorus).chain(delay);
//! let output = chain.process(input);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod distortion;
pub mod compressor;
pub mod chorus;
pub mod delay;
pub mod filter;
pub mod multi_vibrato;
pub mod tape_saturation;
pub mod preamp;
pub mod gate;
pub mod flanger;
pub mod phaser;
pub mod reverb;
pub mod tremolo;
pub mod wah;
pub mod parametric_eq;
pub mod eq3;
pub mod overdrive;
pub mod fuzz;
pub mod boost;
pub mod tube_screamer;
pub mod vibrato;
pub mod poweramp;
pub mod cabinet;

// Re-export main types at crate root
pub use distortion::{Distortion, WaveShape};
pub use compressor::Compressor;
pub use chorus::Chorus;
pub use delay::Delay;
pub use filter::LowPassFilter;
pub use multi_vibrato::MultiVibrato;
pub use tape_saturation::TapeSaturation;
pub use preamp::CleanPreamp;
pub use gate::Gate;
pub use flanger::Flanger;
pub use phaser::Phaser;
pub use reverb::{Reverb, ReverbType};
pub use tremolo::{Tremolo, TremoloWaveform};
pub use wah::{Wah, WahMode};
pub use parametric_eq::ParametricEq;
pub use eq3::Eq3Band;
pub use overdrive::Overdrive;
pub use fuzz::Fuzz;
pub use boost::Boost;
pub use tube_screamer::TubeScreamer;
pub use vibrato::Vibrato;
pub use poweramp::Poweramp;
pub use cabinet::{Cabinet, CabinetType};
