//! Static palettes and announcement phrases.

use rand::Rng;

use crate::wheel::ColorScheme;

const DEFAULT_COLORS: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96E6A1", "#DDA0DD", "#F7DC6F", "#BB8FCE", "#85C1E9",
    "#F8B739", "#2ECC71", "#E74C3C", "#3498DB",
];

const RAINBOW_COLORS: [&str; 12] = [
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#06b6d4", "#3b82f6", "#8b5cf6", "#d946ef",
    "#f43f5e", "#14b8a6", "#a3e635", "#fbbf24",
];

const PASTEL_COLORS: [&str; 12] = [
    "#fda4af", "#fdba74", "#fde047", "#bef264", "#86efac", "#5eead4", "#7dd3fc", "#a5b4fc",
    "#c4b5fd", "#f0abfc", "#fca5a5", "#a5f3fc",
];

const OCEAN_COLORS: [&str; 12] = [
    "#0ea5e9", "#06b6d4", "#14b8a6", "#0891b2", "#0284c7", "#0369a1", "#1d4ed8", "#2563eb",
    "#3b82f6", "#0e7490", "#155e75", "#164e63",
];

const SUNSET_COLORS: [&str; 12] = [
    "#f97316", "#fb923c", "#f43f5e", "#ec4899", "#e11d48", "#dc2626", "#f59e0b", "#fbbf24",
    "#d946ef", "#c026d3", "#be185d", "#ea580c",
];

/// Dark mode ignores the selected scheme.
pub const DARK_SLICE_COLORS: [&str; 12] = [
    "#8B0000", "#4A0E4E", "#1a1a2e", "#6B0F1A", "#2D132C", "#4B0082", "#800020", "#3D0C02",
    "#1B1B3A", "#5C0A0A", "#2E0219", "#0D0D0D",
];

pub const LIGHT_PHRASES: [&str; 10] = [
    "The winner is...",
    "You're up:",
    "Time to shine:",
    "The spotlight is on:",
    "Next up:",
    "Let's hear from:",
    "Your turn:",
    "The wheel has chosen:",
    "Congratulations:",
    "Front and center:",
];

pub const DARK_PHRASES: [&str; 18] = [
    "The victim is...",
    "Death comes for:",
    "RIP:",
    "The reaper claims:",
    "Marked for death:",
    "The grave awaits:",
    "Your soul belongs to:",
    "The darkness chooses:",
    "Doomed:",
    "The curse falls upon:",
    "No escape for:",
    "The spirits have chosen:",
    "Your fate is sealed:",
    "Into the void goes:",
    "The coffin awaits:",
    "Next to perish:",
    "The beyond calls:",
    "Summoned from the shadows:",
];

pub fn palette(scheme: ColorScheme) -> &'static [&'static str; 12] {
    match scheme {
        ColorScheme::Default => &DEFAULT_COLORS,
        ColorScheme::Rainbow => &RAINBOW_COLORS,
        ColorScheme::Pastel => &PASTEL_COLORS,
        ColorScheme::Ocean => &OCEAN_COLORS,
        ColorScheme::Sunset => &SUNSET_COLORS,
    }
}

/// Fill color for the slice at `index`, cycling through the palette.
pub fn slice_color(index: usize, dark_mode: bool, scheme: ColorScheme) -> &'static str {
    let colors = if dark_mode {
        &DARK_SLICE_COLORS
    } else {
        palette(scheme)
    };
    colors[index % colors.len()]
}

pub fn random_phrase<R: Rng + ?Sized>(dark_mode: bool, rng: &mut R) -> &'static str {
    let phrases: &[&str] = if dark_mode {
        &DARK_PHRASES
    } else {
        &LIGHT_PHRASES
    };
    phrases[rng.gen_range(0..phrases.len())]
}

/// `m:ss`, e.g. `2:05`.
pub fn format_timer(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_slice_color_cycles() {
        assert_eq!(slice_color(0, false, ColorScheme::Default), "#FF6B6B");
        assert_eq!(slice_color(12, false, ColorScheme::Default), "#FF6B6B");
        assert_eq!(slice_color(13, false, ColorScheme::Ocean), "#06b6d4");
    }

    #[test]
    fn test_dark_mode_ignores_scheme() {
        for scheme in ColorScheme::ALL {
            assert_eq!(slice_color(2, true, scheme), "#1a1a2e");
        }
    }

    #[test]
    fn test_random_phrase_uses_mode_table() {
        for _ in 0..100 {
            assert!(DARK_PHRASES.contains(&random_phrase(true, &mut OsRng)));
            assert!(LIGHT_PHRASES.contains(&random_phrase(false, &mut OsRng)));
        }
    }

    #[test]
    fn test_format_timer() {
        assert_eq!(format_timer(120), "2:00");
        assert_eq!(format_timer(65), "1:05");
        assert_eq!(format_timer(10), "0:10");
        assert_eq!(format_timer(3600), "60:00");
    }
}
