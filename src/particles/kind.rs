use std::str::FromStr;

use crate::foundation::color::Rgba8;
use crate::foundation::error::PostreelError;

/// Screen animation drawn between the overlay and the quote text.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    #[default]
    None,
    Snow,
    Stars,
    Rain,
    Bubbles,
    Confetti,
    Leaves,
    Butterflies,
    Hearts,
    Particles,
    Light,
    Fire,
    Smoke,
    Clouds,
    Petals,
    Sparkles,
    Aurora,
    Plasma,
    Waves,
    Circles,
}

/// When a particle of a given kind is regenerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecyclePolicy {
    /// Stationary kinds live for the whole recording.
    Never,
    /// Rising kinds leave through the top edge.
    AboveTop,
    /// Drifting kinds leave through the right edge.
    PastRight,
    /// Expanding rings fade out or grow too large.
    Faded,
    /// Anything outside the frame extended by a small margin.
    OutsideFrame,
}

/// How a particle's halo is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glow {
    /// Halo in the particle's own color, sized by the particle.
    Tinted,
    /// Thin translucent white halo.
    Soft,
}

const WHITE: &[Rgba8] = &[Rgba8::WHITE];
const STARS: &[Rgba8] = &[Rgba8::rgb(0xFF, 0xFF, 0x00)];
const RAIN: &[Rgba8] = &[Rgba8::rgb(0x87, 0xCE, 0xEB)];
const BUBBLES: &[Rgba8] = &[Rgba8::rgb(0x00, 0xFF, 0xFF)];
const HEARTS: &[Rgba8] = &[Rgba8::rgb(0xFF, 0x14, 0x93)];
const LIGHT: &[Rgba8] = &[Rgba8::rgb(0xFF, 0xFF, 0xE0)];
const SMOKE: &[Rgba8] = &[Rgba8::rgb(0x80, 0x80, 0x80)];
const CLOUDS: &[Rgba8] = &[Rgba8::rgb(0xF0, 0xF8, 0xFF)];
const WAVES: &[Rgba8] = &[Rgba8::rgb(0x46, 0x82, 0xB4)];
const CONFETTI: &[Rgba8] = &[
    Rgba8::rgb(0xFF, 0x00, 0x00),
    Rgba8::rgb(0x00, 0xFF, 0x00),
    Rgba8::rgb(0x00, 0x00, 0xFF),
    Rgba8::rgb(0xFF, 0xFF, 0x00),
    Rgba8::rgb(0xFF, 0x00, 0xFF),
];
const LEAVES: &[Rgba8] = &[
    Rgba8::rgb(0x22, 0x8B, 0x22),
    Rgba8::rgb(0xFF, 0xD7, 0x00),
    Rgba8::rgb(0xFF, 0x8C, 0x00),
];
const BUTTERFLIES: &[Rgba8] = &[
    Rgba8::rgb(0xFF, 0xB6, 0xC1),
    Rgba8::rgb(0xFF, 0x69, 0xB4),
    Rgba8::rgb(0xDD, 0xA0, 0xDD),
];
const FIRE: &[Rgba8] = &[
    Rgba8::rgb(0xFF, 0x45, 0x00),
    Rgba8::rgb(0xFF, 0x63, 0x47),
    Rgba8::rgb(0xFF, 0xD7, 0x00),
];
const PETALS: &[Rgba8] = &[
    Rgba8::rgb(0xFF, 0xB6, 0xC1),
    Rgba8::rgb(0xFF, 0x69, 0xB4),
    Rgba8::rgb(0xFF, 0xC0, 0xCB),
];
const SPARKLES: &[Rgba8] = &[
    Rgba8::rgb(0xFF, 0xFF, 0xFF),
    Rgba8::rgb(0xFF, 0xD7, 0x00),
    Rgba8::rgb(0x00, 0xFF, 0xFF),
];
const AURORA: &[Rgba8] = &[
    Rgba8::rgb(0x00, 0xFF, 0x00),
    Rgba8::rgb(0x00, 0xFF, 0xFF),
    Rgba8::rgb(0xFF, 0x00, 0xFF),
];
const PLASMA: &[Rgba8] = &[
    Rgba8::rgb(0xFF, 0x00, 0xFF),
    Rgba8::rgb(0x00, 0xFF, 0xFF),
    Rgba8::rgb(0xFF, 0xFF, 0x00),
];
const CIRCLES: &[Rgba8] = &[
    Rgba8::rgb(0xFF, 0x00, 0x00),
    Rgba8::rgb(0x00, 0xFF, 0x00),
    Rgba8::rgb(0x00, 0x00, 0xFF),
    Rgba8::rgb(0xFF, 0xFF, 0x00),
];

impl AnimationKind {
    pub const ALL: [AnimationKind; 20] = [
        AnimationKind::None,
        AnimationKind::Snow,
        AnimationKind::Stars,
        AnimationKind::Rain,
        AnimationKind::Bubbles,
        AnimationKind::Confetti,
        AnimationKind::Leaves,
        AnimationKind::Butterflies,
        AnimationKind::Hearts,
        AnimationKind::Particles,
        AnimationKind::Light,
        AnimationKind::Fire,
        AnimationKind::Smoke,
        AnimationKind::Clouds,
        AnimationKind::Petals,
        AnimationKind::Sparkles,
        AnimationKind::Aurora,
        AnimationKind::Plasma,
        AnimationKind::Waves,
        AnimationKind::Circles,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Snow => "snow",
            Self::Stars => "stars",
            Self::Rain => "rain",
            Self::Bubbles => "bubbles",
            Self::Confetti => "confetti",
            Self::Leaves => "leaves",
            Self::Butterflies => "butterflies",
            Self::Hearts => "hearts",
            Self::Particles => "particles",
            Self::Light => "light",
            Self::Fire => "fire",
            Self::Smoke => "smoke",
            Self::Clouds => "clouds",
            Self::Petals => "petals",
            Self::Sparkles => "sparkles",
            Self::Aurora => "aurora",
            Self::Plasma => "plasma",
            Self::Waves => "waves",
            Self::Circles => "circles",
        }
    }

    /// Colors cycled by particle index.
    pub fn palette(self) -> &'static [Rgba8] {
        match self {
            Self::None | Self::Snow | Self::Particles => WHITE,
            Self::Stars => STARS,
            Self::Rain => RAIN,
            Self::Bubbles => BUBBLES,
            Self::Confetti => CONFETTI,
            Self::Leaves => LEAVES,
            Self::Butterflies => BUTTERFLIES,
            Self::Hearts => HEARTS,
            Self::Light => LIGHT,
            Self::Fire => FIRE,
            Self::Smoke => SMOKE,
            Self::Clouds => CLOUDS,
            Self::Petals => PETALS,
            Self::Sparkles => SPARKLES,
            Self::Aurora => AURORA,
            Self::Plasma => PLASMA,
            Self::Waves => WAVES,
            Self::Circles => CIRCLES,
        }
    }

    pub fn recycle_policy(self) -> RecyclePolicy {
        match self {
            Self::Stars | Self::Light | Self::Sparkles | Self::None => RecyclePolicy::Never,
            Self::Bubbles => RecyclePolicy::AboveTop,
            Self::Clouds => RecyclePolicy::PastRight,
            Self::Circles => RecyclePolicy::Faded,
            _ => RecyclePolicy::OutsideFrame,
        }
    }

    pub fn glow(self) -> Glow {
        match self {
            Self::Aurora | Self::Plasma | Self::Light | Self::Stars | Self::Sparkles => Glow::Tinted,
            _ => Glow::Soft,
        }
    }

    pub fn twinkles(self) -> bool {
        matches!(self, Self::Stars | Self::Sparkles)
    }
}

impl std::fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationKind {
    type Err = PostreelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == needle)
            .ok_or_else(|| PostreelError::validation(format!("unknown animation kind \"{s}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/kind.rs"]
mod tests;
