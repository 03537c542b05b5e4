//! Factory presets bundled with the sonido library.
//!
//! This module provides built-in presets that are always available without
//! requiring external files. Each preset is a complete effect chain tuned for
//! a recognizable guitar tone, and serves as a starting point for users.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "clean", "crunch", "lead", "metal", "fuzz", "ambient", "blues", "shoegaze", "funk",
];

/// TOML content for factory presets.
///
/// These are embedded at compile time and always available.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("clean", CLEAN_PRESET),
    ("crunch", CRUNCH_PRESET),
    ("lead", LEAD_PRESET),
    ("metal", METAL_PRESET),
    ("fuzz", FUZZ_PRESET),
    ("ambient", AMBIENT_PRESET),
    ("blues", BLUES_PRESET),
    ("shoegaze", SHOEGAZE_PRESET),
    ("funk", FUNK_PRESET),
];

/// Clean preset - headroom-limited preamp into a gentle tone stack.
const CLEAN_PRESET: &str = r#"
name = "Clean"
description = "Clean, high-headroom tone for studio rhythm and chord work"
sample_rate = 48000

[[effects]]
type = "preamp"
[effects.params]
gain = "0"
bass = "0"
mid = "0"
treble = "1"

[[effects]]
type = "compressor"
[effects.params]
threshold = "-20"
ratio = "2"
attack = "15"
release = "150"
makeup = "2"

[[effects]]
type = "eq3"
[effects.params]
bass = "1"
mid = "0"
treble = "1"

[[effects]]
type = "cabinet"
[effects.params]
type = "4x12"
"#;

/// Crunch preset - light tube-screamer push into a warm power-amp stage.
const CRUNCH_PRESET: &str = r#"
name = "Crunch"
description = "Light overdrive - great for blues and rock rhythm"
sample_rate = 48000

[[effects]]
type = "preamp"
[effects.params]
gain = "6"
bass = "0"
treble = "1"

[[effects]]
type = "tube_screamer"
[effects.params]
drive = "10"
tone = "4500"

[[effects]]
type = "poweramp"
[effects.params]
drive = "14"
sag = "0.3"

[[effects]]
type = "cabinet"
[effects.params]
type = "4x12"
"#;

/// Lead preset - singing overdrive with delay for sustain and space.
const LEAD_PRESET: &str = r#"
name = "Lead"
description = "Singing, sustained lead tone with slapback delay"
sample_rate = 48000

[[effects]]
type = "preamp"
[effects.params]
gain = "10"
mid = "2"

[[effects]]
type = "overdrive"
[effects.params]
drive = "20"
tone = "5500"

[[effects]]
type = "poweramp"
[effects.params]
drive = "20"
sag = "0.5"

[[effects]]
type = "delay"
[effects.params]
time = "380"
feedback = "25"
mix = "20"

[[effects]]
type = "cabinet"
[effects.params]
type = "4x12"
"#;

/// Metal preset - gated, scooped high gain.
const METAL_PRESET: &str = r#"
name = "Metal"
description = "Tight, scooped high-gain distortion for riffing"
sample_rate = 48000

[[effects]]
type = "gate"
[effects.params]
threshold = "-35"
attack = "1"
hold = "30"
release = "40"

[[effects]]
type = "distortion"
[effects.params]
drive = "32"
tone = "4000"
level = "-6"

[[effects]]
type = "preamp"
[effects.params]
gain = "18"
bass = "2"
mid = "-6"
treble = "4"

[[effects]]
type = "poweramp"
[effects.params]
drive = "25"
sag = "0.6"

[[effects]]
type = "cabinet"
[effects.params]
type = "4x12"

[[effects]]
type = "eq3"
[effects.params]
bass = "3"
mid = "-8"
treble = "3"
"#;

/// Fuzz preset - bright boost into a gated fuzz face style clip.
const FUZZ_PRESET: &str = r#"
name = "Fuzz"
description = "Vintage fuzz with a bright boost in front"
sample_rate = 48000

[[effects]]
type = "boost"
[effects.params]
gain = "6"
bright = "true"

[[effects]]
type = "fuzz"
[effects.params]
drive = "25"
fuzz = "0.8"

[[effects]]
type = "cabinet"
[effects.params]
type = "2x12"
"#;

/// Ambient preset - spacious delay and reverb.
const AMBIENT_PRESET: &str = r#"
name = "Ambient"
description = "Lush atmospheric sounds with delay, reverb, and chorus"
sample_rate = 48000

[[effects]]
type = "compressor"
[effects.params]
threshold = "-25"
ratio = "3"
attack = "20"
release = "200"
makeup = "2"

[[effects]]
type = "chorus"
[effects.params]
rate = "0.5"
depth = "30"
mix = "30"

[[effects]]
type = "delay"
[effects.params]
time = "500"
feedback = "50"
mix = "40"

[[effects]]
type = "reverb"
[effects.params]
room_size = "80"
decay = "70"
damping = "30"
predelay = "20"
mix = "50"
"#;

/// Blues preset - 12AX7-voiced tube screamer into a small combo.
const BLUES_PRESET: &str = r#"
name = "Blues"
description = "Warm, touch-sensitive overdrive for blues lead and rhythm"
sample_rate = 48000

[[effects]]
type = "preamp"
[effects.params]
gain = "4"
mid = "1"

[[effects]]
type = "tube_screamer"
[effects.params]
drive = "8"
tone = "3500"

[[effects]]
type = "poweramp"
[effects.params]
drive = "10"
sag = "0.4"

[[effects]]
type = "cabinet"
[effects.params]
type = "1x12"
"#;

/// Shoegaze preset - wall-of-sound fuzz, chorus, and reverb.
const SHOEGAZE_PRESET: &str = r#"
name = "Shoegaze"
description = "Wall-of-sound fuzz drenched in chorus and reverb"
sample_rate = 48000

[[effects]]
type = "boost"
[effects.params]
gain = "8"
bright = "false"

[[effects]]
type = "fuzz"
[effects.params]
drive = "15"
fuzz = "0.5"

[[effects]]
type = "chorus"
[effects.params]
rate = "0.8"
depth = "60"
mix = "50"

[[effects]]
type = "delay"
[effects.params]
time = "420"
feedback = "30"
mix = "25"

[[effects]]
type = "reverb"
[effects.params]
room_size = "90"
decay = "80"
damping = "20"
predelay = "15"
mix = "60"
"#;

/// Funk preset - tight compression and vibrato for clean rhythm chops.
const FUNK_PRESET: &str = r#"
name = "Funk"
description = "Snappy, compressed clean tone with subtle vibrato"
sample_rate = 48000

[[effects]]
type = "compressor"
[effects.params]
threshold = "-22"
ratio = "5"
attack = "3"
release = "60"
makeup = "4"

[[effects]]
type = "eq3"
[effects.params]
bass = "-1"
mid = "2"
treble = "2"

[[effects]]
type = "vibrato"
bypassed = true
[effects.params]
rate = "5"
depth = "0.2"

[[effects]]
type = "cabinet"
[effects.params]
type = "2x12"
"#;

/// Get all factory presets.
///
/// Returns a vector of all built-in presets that ship with the library.
///
/// # Example
///
/// ```rust
/// use sonido_config::factory_presets;
///
/// let presets = factory_presets();
/// println!("Available factory presets:");
/// for preset in &presets {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by name.
///
/// Returns `Some(Preset)` if a factory preset with the given name exists,
/// `None` otherwise. The name match is case-insensitive.
///
/// # Example
///
/// ```rust
/// use sonido_config::get_factory_preset;
///
/// if let Some(preset) = get_factory_preset("crunch") {
///     println!("Found preset: {}", preset.name);
/// }
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    // Also try matching against the preset's actual name field
    for (_, toml) in FACTORY_PRESETS_TOML {
        if let Ok(preset) = Preset::from_toml(toml)
            && preset.name.to_lowercase() == name_lower {
                return Some(preset);
            }
    }

    None
}

/// Get the names of all factory presets.
///
/// Returns the internal identifiers used for factory presets.
///
/// # Example
///
/// ```rust
/// use sonido_config::factory_presets::factory_preset_names;
///
/// let names = factory_preset_names();
/// assert!(names.contains(&"crunch"));
/// ```
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a preset name is a factory preset.
///
/// Returns true if the given name matches any factory preset (case-insensitive).
///
/// # Example
///
/// ```rust
/// use sonido_config::is_factory_preset;
///
/// assert!(is_factory_preset("crunch"));
/// assert!(is_factory_preset("Crunch"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    let name_lower = name.to_lowercase();

    // Check against internal names
    for preset_name in FACTORY_PRESET_NAMES {
        if preset_name.to_lowercase() == name_lower {
            return true;
        }
    }

    // Also check against display names in the presets
    for (_, toml) in FACTORY_PRESETS_TOML {
        if let Ok(preset) = Preset::from_toml(toml)
            && preset.name.to_lowercase() == name_lower {
                return true;
            }
    }

    false
}
