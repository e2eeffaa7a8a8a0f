//! Named entrainment presets.
//!
//! Frequency pairs matching the presets offered by the desktop and web
//! frontends. The ADHD focus preset plays 856 Hz in both ears (no
//! beat); the others put the beat in the right ear.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A named left/right frequency pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// ADHD focus: 856 Hz in both ears
    #[default]
    AdhdFocus,
    /// Theta band: 6 Hz beat (200 / 206 Hz)
    Theta,
    /// Alpha band: 10 Hz beat (200 / 210 Hz)
    Alpha,
    /// Beta band: 15 Hz beat (200 / 215 Hz)
    Beta,
    /// Study: 14 Hz beat (440 / 454 Hz)
    Study,
    /// Calm: 8 Hz beat (400 / 408 Hz)
    Calm,
    /// Sleep: 3 Hz beat (200 / 203 Hz)
    Sleep,
    /// Wake: 25 Hz beat (500 / 525 Hz)
    Wake,
}

impl Preset {
    /// Returns the (left, right) frequency pair in Hz.
    pub fn frequencies(&self) -> (f32, f32) {
        match self {
            Preset::AdhdFocus => (856.0, 856.0),
            Preset::Theta => (200.0, 206.0),
            Preset::Alpha => (200.0, 210.0),
            Preset::Beta => (200.0, 215.0),
            Preset::Study => (440.0, 454.0),
            Preset::Calm => (400.0, 408.0),
            Preset::Sleep => (200.0, 203.0),
            Preset::Wake => (500.0, 525.0),
        }
    }

    /// Returns the display name of the preset.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::AdhdFocus => "ADHD Focus",
            Preset::Theta => "Theta",
            Preset::Alpha => "Alpha",
            Preset::Beta => "Beta",
            Preset::Study => "Study",
            Preset::Calm => "Calm",
            Preset::Sleep => "Sleep",
            Preset::Wake => "Wake",
        }
    }
}
