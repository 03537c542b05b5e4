//! Effect and preset validation.
//!
//! This module provides validation for effect types, parameter names, and parameter values.
//! It uses the sonido-registry to verify that effects exist and that parameters are within
//! their valid ranges.
//!
//! # Example
//!
//! ```rust
//! use sonido_config::{validate_effect, EffectValidator};
//!
//! // Validate that an effect type exists
//! validate_effect("distortion").expect("distortion should exist");
//!
//! // Use the validator for more complex validation
//! let validator = EffectValidator::new();
//! validator.validate_effect("reverb").expect("reverb should exist");
//! ```

use sonido_registry::EffectRegistry;
use std::collections::HashMap;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown effect type.
    #[error("unknown effect type: {0}")]
    UnknownEffect(String),

    /// Unknown parameter name.
    #[error("unknown parameter '{param}' for effect '{effect}'")]
    UnknownParameter {
        /// Name of the effect.
        effect: String,
        /// Name of the unrecognized parameter.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Effect parameter metadata for validation.
#[derive(Debug, Clone)]
pub struct ParamValidationInfo {
    /// Parameter name (lowercase, used for lookup).
    pub name: String,
    /// Parameter index in the effect.
    pub index: usize,
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
    /// Default value.
    pub default: f32,
}

/// Validator for effects and their parameters.
///
/// The validator caches parameter information from effects to allow
/// efficient repeated validation without creating new effect instances.
pub struct EffectValidator {
    registry: EffectRegistry,
    /// Cached parameter info for each effect type.
    /// Maps effect_id -> `Vec<ParamValidationInfo>`
    param_cache: HashMap<String, Vec<ParamValidationInfo>>,
}

impl Default for EffectValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectValidator {
    /// Create a new effect validator.
    pub fn new() -> Self {
        Self {
            registry: EffectRegistry::new(),
            param_cache: HashMap::new(),
        }
    }

    /// Get or create cached parameter info for an effect.
    fn get_params(&mut self, effect_id: &str) -> Option<&Vec<ParamValidationInfo>> {
        if !self.param_cache.contains_key(effect_id) {
            // Create an effect instance to get parameter info
            let _effect = self.registry.create(effect_id, 48000.0)?;

            // Cast to ParameterInfo to get params
            // We need to extract params from the boxed trait object
            let params = self.extract_params(effect_id);
            self.param_cache.insert(effect_id.to_string(), params);
        }
        self.param_cache.get(effect_id)
    }

    /// Extract parameter info for an effect type.
    fn extract_params(&self, effect_id: &str) -> Vec<ParamValidationInfo> {
        // Get parameter info based on effect type
        // Since we can't directly query ParameterInfo from Box<dyn Effect>,
        // we use known effect parameter mappings
        get_effect_params(effect_id)
    }

    /// Validate that an effect type exists.
    pub fn validate_effect(&self, effect_type: &str) -> ValidationResult<()> {
        if self.registry.get(effect_type).is_some() {
            Ok(())
        } else {
            Err(ValidationError::UnknownEffect(effect_type.to_string()))
        }
    }

    /// Validate a parameter name for an effect.
    pub fn validate_param_name(
        &mut self,
        effect_type: &str,
        param_name: &str,
    ) -> ValidationResult<()> {
        // First check effect exists
        self.validate_effect(effect_type)?;

        let params = self
            .get_params(effect_type)
            .ok_or_else(|| ValidationError::UnknownEffect(effect_type.to_string()))?;

        let normalized_name = normalize_param_name(param_name);
        if params.iter().any(|p| p.name == normalized_name) {
            Ok(())
        } else {
            Err(ValidationError::UnknownParameter {
                effect: effect_type.to_string(),
                param: param_name.to_string(),
            })
        }
    }

    /// Validate a parameter value for an effect.
    pub fn validate_param_value(
        &mut self,
        effect_type: &str,
        param_name: &str,
        value: f32,
    ) -> ValidationResult<()> {
        // First check effect exists
        self.validate_effect(effect_type)?;

        let params = self
            .get_params(effect_type)
            .ok_or_else(|| ValidationError::UnknownEffect(effect_type.to_string()))?;

        let normalized_name = normalize_param_name(param_name);
        let param = params
            .iter()
            .find(|p| p.name == normalized_name)
            .ok_or_else(|| ValidationError::UnknownParameter {
                effect: effect_type.to_string(),
                param: param_name.to_string(),
            })?;

        if value >= param.min && value <= param.max {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                param: param_name.to_string(),
                value,
                min: param.min,
                max: param.max,
            })
        }
    }

    /// Get all valid effect type IDs.
    pub fn effect_ids(&self) -> Vec<&str> {
        self.registry.all_effects().iter().map(|e| e.id).collect()
    }

    /// Get parameter info for an effect type.
    pub fn effect_params(&mut self, effect_type: &str) -> Option<Vec<ParamValidationInfo>> {
        self.get_params(effect_type).cloned()
    }

    /// Find a parameter index by name for an effect type.
    ///
    /// Returns `None` if the effect or parameter is not found.
    pub fn find_param_index(&mut self, effect_type: &str, param_name: &str) -> Option<usize> {
        let params = self.get_params(effect_type)?;
        let normalized_name = normalize_param_name(param_name);
        params
            .iter()
            .find(|p| p.name == normalized_name)
            .map(|p| p.index)
    }

    /// Get parameter info by name for an effect type.
    ///
    /// Returns `None` if the effect or parameter is not found.
    pub fn get_param_info(
        &mut self,
        effect_type: &str,
        param_name: &str,
    ) -> Option<ParamValidationInfo> {
        let params = self.get_params(effect_type)?;
        let normalized_name = normalize_param_name(param_name);
        params.iter().find(|p| p.name == normalized_name).cloned()
    }

    /// Parse a parameter value from string.
    ///
    /// Handles special formats like "20dB", "500Hz", "50%", etc.
    pub fn parse_param_value(&self, param_name: &str, value_str: &str) -> ValidationResult<f32> {
        parse_param_value(param_name, value_str)
    }
}

/// Normalize a parameter name for consistent lookup.
///
/// Converts to lowercase and replaces spaces/underscores with underscores.
fn normalize_param_name(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}

/// Parse a parameter value from a string.
///
/// Supports various formats:
/// - Plain numbers: "0.5", "20", "-6"
/// - With units: "20dB", "500Hz", "50%", "100ms"
/// - Percentages are converted to 0-100 range
pub fn parse_param_value(param_name: &str, value_str: &str) -> ValidationResult<f32> {
    let s = value_str.trim();

    // Try to parse with common unit suffixes
    if let Some(v) = s.strip_suffix("dB").or_else(|| s.strip_suffix("db")) {
        v.trim()
            .parse::<f32>()
            .map_err(|_| ValidationError::InvalidFormat {
                param: param_name.to_string(),
                reason: format!("cannot parse '{}' as number", v),
            })
    } else if let Some(v) = s.strip_suffix("Hz").or_else(|| s.strip_suffix("hz")) {
        v.trim()
            .parse::<f32>()
            .map_err(|_| ValidationError::InvalidFormat {
                param: param_name.to_string(),
                reason: format!("cannot parse '{}' as number", v),
            })
    } else if let Some(v) = s.strip_suffix("ms") {
        v.trim()
            .parse::<f32>()
            .map_err(|_| ValidationError::InvalidFormat {
                param: param_name.to_string(),
                reason: format!("cannot parse '{}' as number", v),
            })
    } else if let Some(v) = s.strip_suffix('%') {
        v.trim()
            .parse::<f32>()
            .map_err(|_| ValidationError::InvalidFormat {
                param: param_name.to_string(),
                reason: format!("cannot parse '{}' as number", v),
            })
    } else {
        // Plain number
        s.parse::<f32>()
            .map_err(|_| ValidationError::InvalidFormat {
                param: param_name.to_string(),
                reason: format!("cannot parse '{}' as number", s),
            })
    }
}

/// Get parameter information for known effect types.
///
/// Returns parameter metadata based on the effect implementations in sonido-effects.
/// These values are synchronized with the ParameterInfo implementations in each effect.
fn get_effect_params(effect_id: &str) -> Vec<ParamValidationInfo> {
    match effect_id {
        // Distortion: 4 params (Drive, Tone, Level, Waveshape)
        "distortion" => vec![
            ParamValidationInfo {
                name: "drive".into(),
                index: 0,
                min: 0.0,
                max: 40.0,
                default: 12.0,
            },
            ParamValidationInfo {
                name: "tone".into(),
                index: 1,
                min: 500.0,
                max: 10000.0,
                default: 4000.0,
            },
            ParamValidationInfo {
                name: "level".into(),
                index: 2,
                min: -20.0,
                max: 0.0,
                default: -6.0,
            },
            ParamValidationInfo {
                name: "waveshape".into(),
                index: 3,
                min: 0.0,
                max: 3.0,
                default: 0.0,
            },
        ],
        // Compressor: 6 params (Threshold, Ratio, Attack, Release, Makeup, Knee)
        "compressor" => vec![
            ParamValidationInfo {
                name: "threshold".into(),
                index: 0,
                min: -60.0,
                max: 0.0,
                default: -18.0,
            },
            ParamValidationInfo {
                name: "ratio".into(),
                index: 1,
                min: 1.0,
                max: 20.0,
                default: 4.0,
            },
            ParamValidationInfo {
                name: "attack".into(),
                index: 2,
                min: 0.1,
                max: 100.0,
                default: 10.0,
            },
            ParamValidationInfo {
                name: "release".into(),
                index: 3,
                min: 10.0,
                max: 1000.0,
                default: 100.0,
            },
            ParamValidationInfo {
                name: "makeup".into(),
                index: 4,
                min: 0.0,
                max: 24.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "knee".into(),
                index: 5,
                min: 0.0,
                max: 12.0,
                default: 6.0,
            },
        ],
        // Chorus: 3 params (Rate, Depth, Mix)
        "chorus" => vec![
            ParamValidationInfo {
                name: "rate".into(),
                index: 0,
                min: 0.1,
                max: 10.0,
                default: 1.0,
            },
            ParamValidationInfo {
                name: "depth".into(),
                index: 1,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "mix".into(),
                index: 2,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
        ],
        // Flanger: 4 params (Rate, Depth, Feedback, Mix)
        "flanger" => vec![
            ParamValidationInfo {
                name: "rate".into(),
                index: 0,
                min: 0.05,
                max: 5.0,
                default: 0.5,
            },
            ParamValidationInfo {
                name: "depth".into(),
                index: 1,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "feedback".into(),
                index: 2,
                min: 0.0,
                max: 95.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "mix".into(),
                index: 3,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
        ],
        // Phaser: 5 params (Rate, Depth, Stages, Feedback, Mix)
        "phaser" => vec![
            ParamValidationInfo {
                name: "rate".into(),
                index: 0,
                min: 0.05,
                max: 5.0,
                default: 0.3,
            },
            ParamValidationInfo {
                name: "depth".into(),
                index: 1,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "stages".into(),
                index: 2,
                min: 2.0,
                max: 12.0,
                default: 6.0,
            },
            ParamValidationInfo {
                name: "feedback".into(),
                index: 3,
                min: 0.0,
                max: 95.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "mix".into(),
                index: 4,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
        ],
        // Delay: 4 params (Time, Feedback, Mix, Ping-Pong)
        "delay" => vec![
            ParamValidationInfo {
                name: "time".into(),
                index: 0,
                min: 1.0,
                max: 2000.0,
                default: 300.0,
            },
            ParamValidationInfo {
                name: "feedback".into(),
                index: 1,
                min: 0.0,
                max: 95.0,
                default: 40.0,
            },
            ParamValidationInfo {
                name: "mix".into(),
                index: 2,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "ping_pong".into(),
                index: 3,
                min: 0.0,
                max: 1.0,
                default: 0.0,
            },
        ],
        // LowPass Filter: 2 params (Cutoff, Resonance)
        "filter" => vec![
            ParamValidationInfo {
                name: "cutoff".into(),
                index: 0,
                min: 20.0,
                max: 20000.0,
                default: 1000.0,
            },
            ParamValidationInfo {
                name: "resonance".into(),
                index: 1,
                min: 0.1,
                max: 20.0,
                default: 0.707,
            },
        ],
        // MultiVibrato: 2 params (Depth, Mix)
        "multivibrato" => vec![
            ParamValidationInfo {
                name: "depth".into(),
                index: 0,
                min: 0.0,
                max: 200.0,
                default: 100.0,
            },
            ParamValidationInfo {
                name: "mix".into(),
                index: 1,
                min: 0.0,
                max: 100.0,
                default: 100.0,
            },
        ],
        // Tape Saturation: 5 params (Drive, Saturation, Output, HF Rolloff, Bias)
        "tape" => vec![
            ParamValidationInfo {
                name: "drive".into(),
                index: 0,
                min: 0.0,
                max: 24.0,
                default: 6.0,
            },
            ParamValidationInfo {
                name: "saturation".into(),
                index: 1,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "output".into(),
                index: 2,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "hf_rolloff".into(),
                index: 3,
                min: 1000.0,
                max: 20000.0,
                default: 12000.0,
            },
            ParamValidationInfo {
                name: "bias".into(),
                index: 4,
                min: -0.2,
                max: 0.2,
                default: 0.0,
            },
        ],
        // Clean Preamp: 3 params (Gain, Output, Headroom)
        // Preamp: 6 params (Gain, Bass, Mid, Treble, Sag, Output)
        "preamp" => vec![
            ParamValidationInfo {
                name: "gain".into(),
                index: 0,
                min: 0.0,
                max: 30.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "bass".into(),
                index: 1,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "mid".into(),
                index: 2,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "treble".into(),
                index: 3,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "sag".into(),
                index: 4,
                min: 0.0,
                max: 1.0,
                default: 0.15,
            },
            ParamValidationInfo {
                name: "output".into(),
                index: 5,
                min: -20.0,
                max: 20.0,
                default: 0.0,
            },
        ],
        // Overdrive: 3 params (Drive, Tone, Output)
        "overdrive" => vec![
            ParamValidationInfo {
                name: "drive".into(),
                index: 0,
                min: 0.0,
                max: 30.0,
                default: 12.0,
            },
            ParamValidationInfo {
                name: "tone".into(),
                index: 1,
                min: 500.0,
                max: 10000.0,
                default: 4000.0,
            },
            ParamValidationInfo {
                name: "output".into(),
                index: 2,
                min: -20.0,
                max: 20.0,
                default: 0.0,
            },
        ],
        // Fuzz: 3 params (Drive, Fuzz, Output)
        "fuzz" => vec![
            ParamValidationInfo {
                name: "drive".into(),
                index: 0,
                min: 0.0,
                max: 40.0,
                default: 20.0,
            },
            ParamValidationInfo {
                name: "fuzz".into(),
                index: 1,
                min: 0.0,
                max: 1.0,
                default: 0.7,
            },
            ParamValidationInfo {
                name: "output".into(),
                index: 2,
                min: -20.0,
                max: 20.0,
                default: 0.0,
            },
        ],
        // Boost: 2 params (Gain, Bright)
        "boost" => vec![
            ParamValidationInfo {
                name: "gain".into(),
                index: 0,
                min: 0.0,
                max: 20.0,
                default: 6.0,
            },
            ParamValidationInfo {
                name: "bright".into(),
                index: 1,
                min: 0.0,
                max: 1.0,
                default: 0.0,
            },
        ],
        // TubeScreamer: 3 params (Drive, Tone, Output)
        "tube_screamer" => vec![
            ParamValidationInfo {
                name: "drive".into(),
                index: 0,
                min: 0.0,
                max: 30.0,
                default: 14.0,
            },
            ParamValidationInfo {
                name: "tone".into(),
                index: 1,
                min: 1000.0,
                max: 8000.0,
                default: 4000.0,
            },
            ParamValidationInfo {
                name: "output".into(),
                index: 2,
                min: -20.0,
                max: 20.0,
                default: 0.0,
            },
        ],
        // Vibrato: 2 params (Rate, Depth)
        "vibrato" => vec![
            ParamValidationInfo {
                name: "rate".into(),
                index: 0,
                min: 0.1,
                max: 10.0,
                default: 5.0,
            },
            ParamValidationInfo {
                name: "depth".into(),
                index: 1,
                min: 0.0,
                max: 1.0,
                default: 0.5,
            },
        ],
        // Eq3Band: 3 params (Bass, Mid, Treble)
        "eq3" => vec![
            ParamValidationInfo {
                name: "bass".into(),
                index: 0,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "mid".into(),
                index: 1,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "treble".into(),
                index: 2,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
        ],
        // Poweramp: 3 params (Drive, Sag, Output)
        "poweramp" => vec![
            ParamValidationInfo {
                name: "drive".into(),
                index: 0,
                min: 0.0,
                max: 30.0,
                default: 12.0,
            },
            ParamValidationInfo {
                name: "sag".into(),
                index: 1,
                min: 0.0,
                max: 1.0,
                default: 0.4,
            },
            ParamValidationInfo {
                name: "output".into(),
                index: 2,
                min: -20.0,
                max: 20.0,
                default: 0.0,
            },
        ],
        // Cabinet: 1 param (Type)
        "cabinet" => vec![ParamValidationInfo {
            name: "type".into(),
            index: 0,
            min: 0.0,
            max: 2.0,
            default: 0.0,
        }],
        // Reverb: 7 params (Room Size, Decay, Damping, Pre-Delay, Mix, Stereo Width, Type)
        "reverb" => vec![
            ParamValidationInfo {
                name: "room_size".into(),
                index: 0,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "decay".into(),
                index: 1,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "damping".into(),
                index: 2,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "predelay".into(),
                index: 3,
                min: 0.0,
                max: 100.0,
                default: 10.0,
            },
            ParamValidationInfo {
                name: "mix".into(),
                index: 4,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "stereo_width".into(),
                index: 5,
                min: 0.0,
                max: 100.0,
                default: 100.0,
            },
            ParamValidationInfo {
                name: "reverb_type".into(),
                index: 6,
                min: 0.0,
                max: 1.0,
                default: 0.0,
            },
        ],
        // Tremolo: 3 params (Rate, Depth, Waveform)
        "tremolo" => vec![
            ParamValidationInfo {
                name: "rate".into(),
                index: 0,
                min: 0.5,
                max: 20.0,
                default: 5.0,
            },
            ParamValidationInfo {
                name: "depth".into(),
                index: 1,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "waveform".into(),
                index: 2,
                min: 0.0,
                max: 3.0,
                default: 0.0,
            },
        ],
        // Gate: 4 params (Threshold, Attack, Release, Hold)
        "gate" => vec![
            ParamValidationInfo {
                name: "threshold".into(),
                index: 0,
                min: -80.0,
                max: 0.0,
                default: -40.0,
            },
            ParamValidationInfo {
                name: "attack".into(),
                index: 1,
                min: 0.1,
                max: 50.0,
                default: 1.0,
            },
            ParamValidationInfo {
                name: "release".into(),
                index: 2,
                min: 10.0,
                max: 1000.0,
                default: 100.0,
            },
            ParamValidationInfo {
                name: "hold".into(),
                index: 3,
                min: 0.0,
                max: 500.0,
                default: 50.0,
            },
        ],
        // Wah: 4 params (Frequency, Resonance, Sensitivity, Mode)
        "wah" => vec![
            ParamValidationInfo {
                name: "frequency".into(),
                index: 0,
                min: 200.0,
                max: 2000.0,
                default: 800.0,
            },
            ParamValidationInfo {
                name: "resonance".into(),
                index: 1,
                min: 1.0,
                max: 10.0,
                default: 5.0,
            },
            ParamValidationInfo {
                name: "sensitivity".into(),
                index: 2,
                min: 0.0,
                max: 100.0,
                default: 50.0,
            },
            ParamValidationInfo {
                name: "mode".into(),
                index: 3,
                min: 0.0,
                max: 1.0,
                default: 0.0,
            },
        ],
        // Parametric EQ: 9 params (3 bands x 3 params each: Freq, Gain, Q)
        "eq" => vec![
            ParamValidationInfo {
                name: "low_freq".into(),
                index: 0,
                min: 20.0,
                max: 500.0,
                default: 100.0,
            },
            ParamValidationInfo {
                name: "low_gain".into(),
                index: 1,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "low_q".into(),
                index: 2,
                min: 0.5,
                max: 5.0,
                default: 1.0,
            },
            ParamValidationInfo {
                name: "mid_freq".into(),
                index: 3,
                min: 200.0,
                max: 5000.0,
                default: 1000.0,
            },
            ParamValidationInfo {
                name: "mid_gain".into(),
                index: 4,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "mid_q".into(),
                index: 5,
                min: 0.5,
                max: 5.0,
                default: 1.0,
            },
            ParamValidationInfo {
                name: "high_freq".into(),
                index: 6,
                min: 1000.0,
                max: 15000.0,
                default: 5000.0,
            },
            ParamValidationInfo {
                name: "high_gain".into(),
                index: 7,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamValidationInfo {
                name: "high_q".into(),
                index: 8,
                min: 0.5,
                max: 5.0,
                default: 1.0,
            },
        ],
        _ => vec![],
    }
}

/// Validate an effect type exists in the registry.
///
/// This is a convenience function that creates a validator internally.
/// For repeated validation, use `EffectValidator` directly.
///
/// # Example
///
/// ```rust
/// use sonido_config::validate_effect;
///
/// assert!(validate_effect("distortion").is_ok());
/// assert!(validate_effect("unknown").is_err());
/// ```
pub fn validate_effect(effect_type: &str) -> ValidationResult<()> {
    let validator = EffectValidator::new();
    validator.validate_effect(effect_type)
}

/// Validate a parameter value for an effect.
///
/// This is a convenience function that creates a validator internally.
pub fn validate_effect_param(
    effect_type: &str,
    param_name: &str,
    value: f32,
) -> ValidationResult<()> {
    let mut validator = EffectValidator::new();
    validator.validate_param_value(effect_type, param_name, value)
}

/// Validate a preset's effects and parameters.
///
/// Checks that all effects in the preset exist and all parameters
/// are valid for their respective effects.
///
/// # Example
///
/// ```rust,no_run
/// use sonido_config::{Preset, validate_preset};
///
/// let preset = Preset::load("my_preset.toml").unwrap();
/// validate_preset(&preset).expect("preset should be valid");
/// ```
pub fn validate_preset(preset: &crate::Preset) -> ValidationResult<()> {
    let mut validator = EffectValidator::new();
    let mut errors = Vec::new();

    for effect_config in &preset.effects {
        // Validate effect type
        if let Err(e) = validator.validate_effect(&effect_config.effect_type) {
            errors.push(e);
            continue;
        }

        // Validate each parameter
        for (param_name, param_value) in &effect_config.params {
            // Parse the value
            let value = match validator.parse_param_value(param_name, param_value) {
                Ok(v) => v,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };

            // Validate the value
            if let Err(e) =
                validator.validate_param_value(&effect_config.effect_type, param_name, value)
            {
                errors.push(e);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else if errors.len() == 1 {
        Err(errors.pop().unwrap())
    } else {
        Err(ValidationError::Multiple(errors))
    }
}

/// Validate effect configuration parameters.
///
/// This validates a map of parameter name -> value string pairs
/// against an effect type.
pub fn validate_effect_config(
    effect_type: &str,
    params: &HashMap<String, String>,
) -> ValidationResult<()> {
    let mut validator = EffectValidator::new();
    let mut errors = Vec::new();

    // Validate effect type
    validator.validate_effect(effect_type)?;

    // Validate each parameter
    for (param_name, param_value) in params {
        // Parse the value
        let value = match validator.parse_param_value(param_name, param_value) {
            Ok(v) => v,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        // Validate the value
        if let Err(e) = validator.validate_param_value(effect_type, param_name, value) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else if errors.len() == 1 {
        Err(errors.pop().unwrap())
    } else {
        Err(ValidationError::Multiple(errors))
    }
}
