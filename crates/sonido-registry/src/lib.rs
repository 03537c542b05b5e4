//! Effect registry and factory for sonido audio effects.
//!
//! This crate provides a centralized registry for discovering and instantiating
//! audio effects. It enables dynamic effect selection by name and provides
//! metadata for building user interfaces.
//!
//! # Features
//!
//! - **Effect Discovery**: List all available effects with metadata
//! - **Factory Pattern**: Create effects by name at runtime
//! - **Category System**: Effects organized by type (dynamics, distortion, etc.)
//! - **Parameter Info**: Access parameter descriptors for UI generation
//!
//! # Example
//!
//! ```rust
//! use sonido_registry::{EffectRegistry, EffectCategory};
//! use sonido_core::Effect;
//!
//! // Get the global registry
//! let registry = EffectRegistry::new();
//!
//! // List all effects
//! for effect in registry.all_effects() {
//!     println!("{}: {}", effect.name, effect.description);
//! }
//!
//! // Create an effect by name
//! if let Some(mut distortion) = registry.create("distortion", 48000.0) {
//!     let output = distortion.process(0.5);
//! }
//!
//! // Filter by category
//! for effect in registry.effects_in_category(EffectCategory::Modulation) {
//!     println!("Modulation effect: {}", effect.name);
//! }
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! sonido-registry = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};

use sonido_core::{Effect, ParamDescriptor, ParameterInfo};
use sonido_effects::{
    Boost, Cabinet, Chorus, CleanPreamp, Compressor, Delay, Distortion, Eq3Band, Flanger, Fuzz,
    Gate, LowPassFilter, MultiVibrato, Overdrive, ParametricEq, Phaser, Poweramp, Reverb,
    TapeSaturation, Tremolo, TubeScreamer, Vibrato, Wah,
};

#[cfg(feature = "std")]
pub mod chain;

/// Stable tag identifying one of the 20 mandated effect kinds.
///
/// Used by [`EffectChain::add`](chain::EffectChain::add) and anywhere a
/// persisted or serialized reference to an effect type is needed instead of
/// its string registry id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTag {
    /// Envelope-driven noise gate.
    NoiseGate,
    /// Soft-knee dynamics compressor.
    Compressor,
    /// Asymmetric soft-clipping overdrive.
    Overdrive,
    /// Waveshaping distortion with selectable clip shape.
    Distortion,
    /// Aggressive hard-clipping fuzz.
    Fuzz,
    /// Clean boost with optional bright EQ.
    Boost,
    /// Mid-humped tube-style overdrive.
    TubeScreamer,
    /// Dual-voice modulated-delay chorus.
    Chorus,
    /// Short modulated delay with feedback.
    Flanger,
    /// Cascaded allpass phaser.
    Phaser,
    /// Multiplicative amplitude modulation.
    Tremolo,
    /// Pure pitch vibrato.
    Vibrato,
    /// Feedback delay with damping.
    Delay,
    /// Algorithmic reverb.
    Reverb,
    /// Envelope-following auto/manual wah.
    Wah,
    /// Fixed-frequency 3-band tone stack.
    Eq3Band,
    /// Multi-band parametric equalizer.
    EqParametric,
    /// Tube preamp stage.
    Preamp,
    /// Tube power-amp stage with supply sag.
    Poweramp,
    /// Speaker cabinet emulation.
    Cabinet,
}

impl EffectTag {
    /// Registry id used to look up and construct this effect.
    pub const fn registry_id(self) -> &'static str {
        match self {
            Self::NoiseGate => "gate",
            Self::Compressor => "compressor",
            Self::Overdrive => "overdrive",
            Self::Distortion => "distortion",
            Self::Fuzz => "fuzz",
            Self::Boost => "boost",
            Self::TubeScreamer => "tube_screamer",
            Self::Chorus => "chorus",
            Self::Flanger => "flanger",
            Self::Phaser => "phaser",
            Self::Tremolo => "tremolo",
            Self::Vibrato => "vibrato",
            Self::Delay => "delay",
            Self::Reverb => "reverb",
            Self::Wah => "wah",
            Self::Eq3Band => "eq3",
            Self::EqParametric => "eq",
            Self::Preamp => "preamp",
            Self::Poweramp => "poweramp",
            Self::Cabinet => "cabinet",
        }
    }

    /// All 20 mandated effect tags, in no particular signal-flow order.
    pub const ALL: [EffectTag; 20] = [
        Self::NoiseGate,
        Self::Compressor,
        Self::Overdrive,
        Self::Distortion,
        Self::Fuzz,
        Self::Boost,
        Self::TubeScreamer,
        Self::Chorus,
        Self::Flanger,
        Self::Phaser,
        Self::Tremolo,
        Self::Vibrato,
        Self::Delay,
        Self::Reverb,
        Self::Wah,
        Self::Eq3Band,
        Self::EqParametric,
        Self::Preamp,
        Self::Poweramp,
        Self::Cabinet,
    ];
}

/// Category of audio effect for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    /// Dynamics processing (compressor, limiter, gate)
    Dynamics,
    /// Distortion and saturation effects
    Distortion,
    /// Modulation effects (chorus, flanger, phaser, vibrato)
    Modulation,
    /// Time-based effects (delay, reverb)
    TimeBased,
    /// Filter effects (lowpass, highpass, etc.)
    Filter,
    /// Utility effects (gain)
    Utility,
    /// Amp-stage simulation (preamp, power amp, cabinet)
    Amp,
}

impl EffectCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            EffectCategory::Dynamics => "Dynamics",
            EffectCategory::Distortion => "Distortion",
            EffectCategory::Modulation => "Modulation",
            EffectCategory::TimeBased => "Time-Based",
            EffectCategory::Filter => "Filter",
            EffectCategory::Utility => "Utility",
            EffectCategory::Amp => "Amp",
        }
    }

    /// Returns a description of the category.
    pub const fn description(&self) -> &'static str {
        match self {
            EffectCategory::Dynamics => {
                "Compressors, limiters, gates, and other dynamics processors"
            }
            EffectCategory::Distortion => {
                "Distortion, overdrive, saturation, and waveshaping effects"
            }
            EffectCategory::Modulation => {
                "Chorus, flanger, phaser, vibrato, and other modulation effects"
            }
            EffectCategory::TimeBased => "Delay, reverb, and other time-based effects",
            EffectCategory::Filter => "Lowpass, highpass, bandpass, and other filter effects",
            EffectCategory::Utility => "Gain stages and other utility processors",
            EffectCategory::Amp => "Preamp, power amp, and cabinet simulation stages",
        }
    }
}

/// Describes an effect in the registry.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    /// Unique identifier for the effect (lowercase, no spaces).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Short display name for compact UI (e.g. "DIST", "COMP").
    pub short_name: &'static str,
    /// Brief description of the effect.
    pub description: &'static str,
    /// Category for organization.
    pub category: EffectCategory,
    /// Number of parameters.
    pub param_count: usize,
}

/// Factory function type for creating effects.
type EffectFactory = fn(f32) -> Box<dyn EffectWithParams + Send>;

/// Internal entry in the registry.
struct RegistryEntry {
    descriptor: EffectDescriptor,
    factory: EffectFactory,
}

/// Registry of all available audio effects.
///
/// The registry provides a centralized way to discover and instantiate
/// audio effects by name. All built-in effects are automatically registered.
pub struct EffectRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRegistry {
    /// Create a new registry with all built-in effects registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(23),
        };
        registry.register_builtin_effects();
        registry
    }

    /// Register all built-in effects.
    fn register_builtin_effects(&mut self) {
        // Distortion
        self.register(
            EffectDescriptor {
                id: "distortion",
                name: "Distortion",
                short_name: "DIST",
                description: "Waveshaping distortion with multiple algorithms",
                category: EffectCategory::Distortion,
                param_count: 4,
            },
            |sr| Box::new(Distortion::new(sr)),
        );

        // Compressor
        self.register(
            EffectDescriptor {
                id: "compressor",
                name: "Compressor",
                short_name: "COMP",
                description: "Dynamics compressor with soft knee",
                category: EffectCategory::Dynamics,
                param_count: 6,
            },
            |sr| Box::new(Compressor::new(sr)),
        );

        // Chorus
        self.register(
            EffectDescriptor {
                id: "chorus",
                name: "Chorus",
                short_name: "CHOR",
                description: "Dual-voice modulated delay chorus",
                category: EffectCategory::Modulation,
                param_count: 4,
            },
            |sr| Box::new(Chorus::new(sr)),
        );

        // Flanger
        self.register(
            EffectDescriptor {
                id: "flanger",
                name: "Flanger",
                short_name: "FLNG",
                description: "Classic flanger with modulated short delay",
                category: EffectCategory::Modulation,
                param_count: 5,
            },
            |sr| Box::new(Flanger::new(sr)),
        );

        // Phaser
        self.register(
            EffectDescriptor {
                id: "phaser",
                name: "Phaser",
                short_name: "PHAS",
                description: "Multi-stage allpass phaser with LFO",
                category: EffectCategory::Modulation,
                param_count: 6,
            },
            |sr| Box::new(Phaser::new(sr)),
        );

        // Delay
        self.register(
            EffectDescriptor {
                id: "delay",
                name: "Delay",
                short_name: "DLY",
                description: "Tape-style feedback delay",
                category: EffectCategory::TimeBased,
                param_count: 5,
            },
            |sr| Box::new(Delay::new(sr)),
        );

        // LowPass Filter
        self.register(
            EffectDescriptor {
                id: "filter",
                name: "Low Pass Filter",
                short_name: "FILT",
                description: "Resonant biquad lowpass filter",
                category: EffectCategory::Filter,
                param_count: 3,
            },
            |sr| Box::new(LowPassFilter::new(sr)),
        );

        // MultiVibrato
        self.register(
            EffectDescriptor {
                id: "multivibrato",
                name: "Multi Vibrato",
                short_name: "MVIB",
                description: "10-unit tape wow/flutter simulation",
                category: EffectCategory::Modulation,
                param_count: 3,
            },
            |sr| Box::new(MultiVibrato::new(sr)),
        );

        // Tape Saturation
        self.register(
            EffectDescriptor {
                id: "tape",
                name: "Tape Saturation",
                short_name: "TAPE",
                description: "Analog tape warmth with HF rolloff",
                category: EffectCategory::Distortion,
                param_count: 5,
            },
            |sr| Box::new(TapeSaturation::new(sr)),
        );

        // Clean Preamp
        self.register(
            EffectDescriptor {
                id: "preamp",
                name: "Clean Preamp",
                short_name: "PRE",
                description: "High-headroom gain stage",
                category: EffectCategory::Amp,
                param_count: 3,
            },
            |sr| Box::new(CleanPreamp::new(sr)),
        );

        // Overdrive
        self.register(
            EffectDescriptor {
                id: "overdrive",
                name: "Overdrive",
                short_name: "OD",
                description: "Soft-clipping asymmetric overdrive",
                category: EffectCategory::Distortion,
                param_count: 3,
            },
            |sr| Box::new(Overdrive::new(sr)),
        );

        // Fuzz
        self.register(
            EffectDescriptor {
                id: "fuzz",
                name: "Fuzz",
                short_name: "FUZZ",
                description: "Aggressive hard-clipping fuzz with bias gating",
                category: EffectCategory::Distortion,
                param_count: 3,
            },
            |sr| Box::new(Fuzz::new(sr)),
        );

        // Boost
        self.register(
            EffectDescriptor {
                id: "boost",
                name: "Boost",
                short_name: "BOOST",
                description: "Clean boost with optional bright EQ",
                category: EffectCategory::Utility,
                param_count: 2,
            },
            |sr| Box::new(Boost::new(sr)),
        );

        // Tube Screamer
        self.register(
            EffectDescriptor {
                id: "tube_screamer",
                name: "Tube Screamer",
                short_name: "TS",
                description: "Mid-humped tube-style overdrive",
                category: EffectCategory::Distortion,
                param_count: 3,
            },
            |sr| Box::new(TubeScreamer::new(sr)),
        );

        // Vibrato
        self.register(
            EffectDescriptor {
                id: "vibrato",
                name: "Vibrato",
                short_name: "VIB",
                description: "Pure pitch vibrato, single voice, fully wet",
                category: EffectCategory::Modulation,
                param_count: 2,
            },
            |sr| Box::new(Vibrato::new(sr)),
        );

        // EQ3Band
        self.register(
            EffectDescriptor {
                id: "eq3",
                name: "3-Band EQ",
                short_name: "EQ3",
                description: "Fixed-frequency Bass/Mid/Treble tone stack",
                category: EffectCategory::Filter,
                param_count: 3,
            },
            |sr| Box::new(Eq3Band::new(sr)),
        );

        // Poweramp
        self.register(
            EffectDescriptor {
                id: "poweramp",
                name: "Power Amp",
                short_name: "PWR",
                description: "Tube power-amp stage with supply sag",
                category: EffectCategory::Amp,
                param_count: 3,
            },
            |sr| Box::new(Poweramp::new(sr)),
        );

        // Cabinet
        self.register(
            EffectDescriptor {
                id: "cabinet",
                name: "Cabinet",
                short_name: "CAB",
                description: "Speaker cabinet emulation",
                category: EffectCategory::Amp,
                param_count: 1,
            },
            |sr| Box::new(Cabinet::new(sr)),
        );

        // Reverb
        self.register(
            EffectDescriptor {
                id: "reverb",
                name: "Reverb",
                short_name: "VERB",
                description: "Freeverb-style algorithmic reverb",
                category: EffectCategory::TimeBased,
                param_count: 8,
            },
            |sr| Box::new(Reverb::new(sr)),
        );

        // Tremolo
        self.register(
            EffectDescriptor {
                id: "tremolo",
                name: "Tremolo",
                short_name: "TREM",
                description: "Amplitude modulation with multiple waveforms",
                category: EffectCategory::Modulation,
                param_count: 4,
            },
            |sr| Box::new(Tremolo::new(sr)),
        );

        // Gate
        self.register(
            EffectDescriptor {
                id: "gate",
                name: "Noise Gate",
                short_name: "GATE",
                description: "Noise gate with threshold and hold",
                category: EffectCategory::Dynamics,
                param_count: 5,
            },
            |sr| Box::new(Gate::new(sr)),
        );

        // Wah
        self.register(
            EffectDescriptor {
                id: "wah",
                name: "Wah",
                short_name: "WAH",
                description: "Auto-wah and manual wah with envelope follower",
                category: EffectCategory::Filter,
                param_count: 5,
            },
            |sr| Box::new(Wah::new(sr)),
        );

        // Parametric EQ
        self.register(
            EffectDescriptor {
                id: "eq",
                name: "Parametric EQ",
                short_name: "PEQ",
                description: "3-band parametric equalizer with frequency, gain, and Q",
                category: EffectCategory::Filter,
                param_count: 10,
            },
            |sr| Box::new(ParametricEq::new(sr)),
        );
    }

    /// Register an effect with the registry.
    fn register(&mut self, descriptor: EffectDescriptor, factory: EffectFactory) {
        self.entries.push(RegistryEntry {
            descriptor,
            factory,
        });
    }

    /// Returns descriptors for all registered effects.
    pub fn all_effects(&self) -> Vec<&EffectDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Returns descriptors for effects in a specific category.
    pub fn effects_in_category(&self, category: EffectCategory) -> Vec<&EffectDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.descriptor.category == category)
            .map(|e| &e.descriptor)
            .collect()
    }

    /// Get a descriptor by effect ID.
    pub fn get(&self, id: &str) -> Option<&EffectDescriptor> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| &e.descriptor)
    }

    /// Look up an effect descriptor by ID.
    ///
    /// Alias for [`get()`](Self::get) — provides semantically explicit access
    /// to the full descriptor including `short_name` and other metadata.
    pub fn descriptor(&self, id: &str) -> Option<&EffectDescriptor> {
        self.get(id)
    }

    /// Create an effect instance by ID.
    ///
    /// Returns `None` if the effect ID is not found. The returned effect
    /// supports both audio processing (via `Effect`) and parameter access
    /// (via `EffectWithParams`).
    pub fn create(&self, id: &str, sample_rate: f32) -> Option<Box<dyn EffectWithParams + Send>> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| (e.factory)(sample_rate))
    }

    /// Find a parameter index by name for a given effect type.
    ///
    /// Creates a temporary effect instance to scan parameter descriptors.
    /// Returns `None` if the effect type or parameter name is not found.
    pub fn param_index_by_name(&self, effect_id: &str, param_name: &str) -> Option<usize> {
        let effect = self.create(effect_id, 48000.0)?;
        let lower = param_name.to_lowercase();
        for i in 0..effect.effect_param_count() {
            if let Some(desc) = effect.effect_param_info(i)
                && (desc.name.to_lowercase() == lower || desc.short_name.to_lowercase() == lower)
            {
                return Some(i);
            }
        }
        None
    }

    /// Returns the number of registered effects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no effects are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Default effect chain in signal-flow order (gain stage → dynamics → EQ → modulation → time → reverb).
    ///
    /// Used by the GUI to initialize the effect chain. The ordering reflects
    /// standard guitar pedalboard convention.
    pub fn default_chain_ids(&self) -> &'static [&'static str] {
        &[
            "preamp",       // Amp — gain stage
            "distortion",   // Distortion
            "compressor",   // Dynamics
            "gate",         // Dynamics
            "eq",           // Filter — tone shaping
            "wah",          // Filter — sweep
            "chorus",       // Modulation
            "flanger",      // Modulation
            "phaser",       // Modulation
            "tremolo",      // Modulation
            "delay",        // Time-based
            "filter",       // Filter — synth-style
            "multivibrato", // Modulation
            "tape",         // Distortion — saturation
            "poweramp",     // Amp — power stage
            "cabinet",      // Amp — speaker simulation
            "reverb",       // Time-based — last
        ]
    }
}

/// Helper trait to get parameter info from a boxed effect.
///
/// Since `Box<dyn Effect>` doesn't automatically implement `ParameterInfo`,
/// this trait provides a way to access parameter information if the
/// underlying effect implements it.
pub trait EffectWithParams: Effect {
    /// Get the parameter count.
    fn effect_param_count(&self) -> usize;

    /// Get parameter info by index.
    fn effect_param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Get parameter value by index.
    fn effect_get_param(&self, index: usize) -> f32;

    /// Set parameter value by index.
    fn effect_set_param(&mut self, index: usize, value: f32);

    /// Format a parameter value as display text.
    ///
    /// Delegates to [`ParamDescriptor::format_value()`]. Returns `None`
    /// if the index is out of range.
    fn effect_format_value(&self, index: usize, value: f32) -> Option<String>;

    /// Parse display text back to a parameter value.
    ///
    /// Delegates to [`ParamDescriptor::parse_value()`]. Returns `None`
    /// if the index is out of range or parsing fails.
    fn effect_parse_value(&self, index: usize, text: &str) -> Option<f32>;
}

// Implement EffectWithParams for all types that implement both Effect and ParameterInfo
impl<T: Effect + ParameterInfo> EffectWithParams for T {
    fn effect_param_count(&self) -> usize {
        self.param_count()
    }

    fn effect_param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.param_info(index)
    }

    fn effect_get_param(&self, index: usize) -> f32 {
        self.get_param(index)
    }

    fn effect_set_param(&mut self, index: usize, value: f32) {
        self.set_param(index, value)
    }

    fn effect_format_value(&self, index: usize, value: f32) -> Option<String> {
        self.param_info(index).map(|desc| desc.format_value(value))
    }

    fn effect_parse_value(&self, index: usize, text: &str) -> Option<f32> {
        self.param_info(index)
            .and_then(|desc| desc.parse_value(text))
    }
}
