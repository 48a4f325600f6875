/// 10 caractères: compact, bon contraste. Palette par défaut.
pub const PALETTE_COMPACT: &str = " .:-=+*#%@";

/// 70 caractères: Paul Bourke extended, du plus sombre au plus dense.
pub const PALETTE_STANDARD: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Blocs Unicode: pseudo-pixels.
pub const PALETTE_BLOCKS: &str = " ░▒▓█";

/// Minimal: haut contraste.
pub const PALETTE_MINIMAL: &str = " .:░▒▓█";

/// Marker drawn for any lit cell when the palette is empty.
pub const BRIGHT_MARKER: char = '@';

/// Named presets, in menu order.
pub const PRESETS: &[(&str, &str)] = &[
    ("compact", PALETTE_COMPACT),
    ("standard", PALETTE_STANDARD),
    ("blocks", PALETTE_BLOCKS),
    ("minimal", PALETTE_MINIMAL),
];

/// Look up a preset by name.
///
/// # Example
/// ```
/// use cp_core::charset::preset;
/// assert_eq!(preset("blocks"), Some(" ░▒▓█"));
/// assert_eq!(preset("nope"), None);
/// ```
#[must_use]
pub fn preset(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, chars)| *chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_start_dark() {
        for (name, chars) in PRESETS {
            assert!(chars.starts_with(' '), "preset {name} must start with a blank");
            assert!(chars.chars().count() >= 5);
        }
    }
}
