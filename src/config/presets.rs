//! Choices offered by the picker screens.
//!
//! Presets are suggestions: configs may use any positive size or duration and any color.

use crate::foundation::color::Rgba8;

/// Font sizes in preview pixels (a 450px wide preview; scaled to the canvas when rendering).
pub const FONT_SIZES: &[(&str, u32)] = &[
    ("very small", 24),
    ("small", 32),
    ("medium", 40),
    ("large", 48),
    ("very large", 56),
    ("huge", 64),
];

pub const COLORS: &[(&str, Rgba8)] = &[
    ("white", Rgba8::rgb(0xFF, 0xFF, 0xFF)),
    ("yellow", Rgba8::rgb(0xFF, 0xD7, 0x00)),
    ("pink", Rgba8::rgb(0xFF, 0x14, 0x93)),
    ("cyan", Rgba8::rgb(0x00, 0xFF, 0xFF)),
    ("orange", Rgba8::rgb(0xFF, 0x63, 0x47)),
    ("lime", Rgba8::rgb(0x00, 0xFF, 0x00)),
    ("violet", Rgba8::rgb(0xDA, 0x70, 0xD6)),
    ("red", Rgba8::rgb(0xFF, 0x00, 0x00)),
    ("blue", Rgba8::rgb(0x1E, 0x90, 0xFF)),
    ("gold", Rgba8::rgb(0xFF, 0xA5, 0x00)),
];

/// Recording lengths in seconds.
pub const DURATIONS: &[(&str, u32)] = &[("20 seconds", 20), ("30 seconds", 30), ("1 minute", 60)];

/// Arabic families the picker offers. Fonts are loaded from files, so these are only names.
pub const ARABIC_FONTS: &[&str] = &[
    "Amiri",
    "Cairo",
    "Tajawal",
    "Almarai",
    "El Messiri",
    "Reem Kufi",
    "Mada",
    "Harmattan",
    "Markazi Text",
    "Scheherazade New",
    "Aref Ruqaa",
    "Lemonada",
    "Jomhuria",
    "Lalezar",
    "Mirza",
    "Rakkas",
    "Katibeh",
    "Kufam",
    "Vibes",
    "Noto Naskh Arabic",
];

pub fn is_preset_duration(secs: u32) -> bool {
    DURATIONS.iter().any(|&(_, d)| d == secs)
}

pub fn color_by_name(name: &str) -> Option<Rgba8> {
    COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
        .map(|&(_, c)| c)
}
