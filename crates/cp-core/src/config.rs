use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CoreError;
use crate::grid::DEFAULT_BACKGROUND;

const DEFAULT_WIDTH: i32 = 48;
const DEFAULT_HEIGHT: i32 = 24;

/// Which plotter the app builds from a config.
///
/// # Example
/// ```
/// use cp_core::config::PlotterType;
/// assert_eq!(PlotterType::default(), PlotterType::Basic);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotterType {
    /// Character brushes only.
    #[default]
    Basic,
    /// Brightness drawing through a palette.
    Grayscale,
}

/// Configuration d'un plotter, déjà validée une fois chargée.
///
/// # Example
/// ```
/// use cp_core::config::PlotterConfig;
/// let config = PlotterConfig::default();
/// assert_eq!((config.width, config.height), (48, 24));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotterConfig {
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    /// Background character.
    pub background_char: char,
    /// Basic or grayscale.
    pub plotter_type: PlotterType,
    /// Palette, darkest first. Empty = use the built-in default.
    pub palette: Vec<char>,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background_char: DEFAULT_BACKGROUND,
            plotter_type: PlotterType::Basic,
            palette: Vec::new(),
        }
    }
}

/// Structure intermédiaire pour la désérialisation (JSON ou TOML).
#[derive(Deserialize)]
struct ConfigFile {
    width: i32,
    height: i32,
    background_char: String,
    plotter_type: PlotterType,
    #[serde(default)]
    palette: Option<String>,
}

impl TryFrom<ConfigFile> for PlotterConfig {
    type Error = CoreError;

    fn try_from(file: ConfigFile) -> Result<Self, CoreError> {
        let mut chars = file.background_char.chars();
        let background_char = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => {
                return Err(CoreError::Config(format!(
                    "background_char is expected to have a single char, got {:?}",
                    file.background_char
                )));
            }
        };
        Ok(Self {
            width: file.width,
            height: file.height,
            background_char,
            plotter_type: file.plotter_type,
            palette: file.palette.map(|p| p.chars().collect()).unwrap_or_default(),
        })
    }
}

impl PlotterConfig {
    /// Parse a JSON document. Does not validate ranges.
    ///
    /// # Errors
    /// Returns an error on malformed JSON, missing or mistyped fields.
    ///
    /// # Example
    /// ```
    /// use cp_core::config::{PlotterConfig, PlotterType};
    /// let json = r#"{"width": 10, "height": 5, "background_char": "@",
    ///                "plotter_type": "grayscale", "palette": " .#"}"#;
    /// let config = PlotterConfig::from_json_str(json).unwrap();
    /// assert_eq!(config.plotter_type, PlotterType::Grayscale);
    /// assert_eq!(config.palette, vec![' ', '.', '#']);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(text).context("Erreur de parsing JSON")?;
        Ok(Self::try_from(file)?)
    }

    /// Parse a TOML document with the same keys as the JSON form.
    ///
    /// # Errors
    /// Returns an error on malformed TOML, missing or mistyped fields.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text).context("Erreur de parsing TOML")?;
        Ok(Self::try_from(file)?)
    }

    /// Check value ranges. Every problem is logged before the error is returned.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] listing the rejected fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut problems = Vec::new();
        if self.width < 1 {
            problems.push(format!("width can't be less than 1, got {}", self.width));
        }
        if self.height < 1 {
            problems.push(format!("height can't be less than 1, got {}", self.height));
        }
        if self.background_char == '\0' {
            problems.push("expected background char not null".to_string());
        }
        if self.palette.contains(&'\0') {
            problems.push("expected palette char not null".to_string());
        }

        if problems.is_empty() {
            return Ok(());
        }
        for problem in &problems {
            log::warn!("{problem}");
        }
        Err(CoreError::Config(problems.join("; ")))
    }
}

/// Charge un fichier de config (`.toml` en TOML, sinon JSON) et le valide.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed or fails validation.
///
/// # Example
/// ```no_run
/// use cp_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/plotter.json")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<PlotterConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let config = if is_toml {
        PlotterConfig::from_toml_str(&content)
    } else {
        PlotterConfig::from_json_str(&content)
    }
    .with_context(|| format!("Config illisible : {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Config invalide : {}", path.display()))?;
    Ok(config)
}
