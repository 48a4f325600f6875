use cp_core::charset::{BRIGHT_MARKER, PALETTE_COMPACT};

use crate::error::GrayError;

/// Rampe ordonnée : index 0 = le plus sombre, dernier = le plus lumineux.
///
/// # Example
/// ```
/// use cp_gray::Palette;
/// let palette = Palette::from(" .#");
/// assert_eq!(palette.brightness_to_char(0.0, ' '), ' ');
/// assert_eq!(palette.brightness_to_char(0.5, ' '), '.');
/// assert_eq!(palette.brightness_to_char(1.0, ' '), '#');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    chars: Vec<char>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from(PALETTE_COMPACT)
    }
}

impl From<&str> for Palette {
    fn from(chars: &str) -> Self {
        Self {
            chars: chars.chars().collect(),
        }
    }
}

impl Palette {
    /// Palette from explicit entries. An empty list gives the two-level fallback.
    #[must_use]
    pub fn new(chars: Vec<char>) -> Self {
        Self { chars }
    }

    /// The two-level palette: background or [`BRIGHT_MARKER`].
    #[must_use]
    pub fn empty() -> Self {
        Self { chars: Vec::new() }
    }

    /// Entries, darkest first.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True for the two-level fallback.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub(crate) fn check(&self) -> Result<(), GrayError> {
        if self.chars.contains(&'\0') {
            return Err(GrayError::NullPaletteEntry);
        }
        Ok(())
    }

    /// Quantifie une luminosité vers un caractère.
    ///
    /// Values are clamped to `[0, 1]` (NaN counts as 0), then the entry at
    /// `round(b * (len - 1))` is chosen.
    #[must_use]
    pub fn brightness_to_char(&self, brightness: f64, background: char) -> char {
        let b = if brightness.is_nan() {
            0.0
        } else {
            brightness.clamp(0.0, 1.0)
        };
        match self.chars.len() {
            0 => {
                if b <= 1e-9 {
                    background
                } else {
                    BRIGHT_MARKER
                }
            }
            n => {
                let idx = (b * (n - 1) as f64).round() as usize;
                self.chars[idx.min(n - 1)]
            }
        }
    }

    /// Inverse mapping: palette position normalised to `[0, 1]`.
    ///
    /// Characters outside the palette read as 0 when they are the
    /// background and as 1 otherwise.
    ///
    /// # Example
    /// ```
    /// use cp_gray::Palette;
    /// let palette = Palette::from(" .:#");
    /// assert_eq!(palette.char_to_brightness(':', ' '), 2.0 / 3.0);
    /// assert_eq!(palette.char_to_brightness('x', ' '), 1.0);
    /// ```
    #[must_use]
    pub fn char_to_brightness(&self, ch: char, background: char) -> f64 {
        if self.chars.is_empty() {
            return if ch == BRIGHT_MARKER { 1.0 } else { 0.0 };
        }
        match self.chars.iter().position(|&c| c == ch) {
            Some(_) if self.chars.len() == 1 => 0.0,
            Some(idx) => idx as f64 / (self.chars.len() - 1) as f64,
            None if ch == background => 0.0,
            None => 1.0,
        }
    }
}
