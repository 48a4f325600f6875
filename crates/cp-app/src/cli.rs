use std::path::PathBuf;

use clap::Parser;

/// charplot: vector drawing on character grids.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration (JSON, ou TOML si l'extension est `.toml`).
    /// Runs the config demo on the plotter it describes.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Demo to run: basic, grayscale, advanced, shapes, filters, palettes,
    /// fills, or "all". Défaut : all, sauf si --config est donné.
    #[arg(long)]
    pub demo: Option<String>,

    /// Dossier de sortie des grilles.
    #[arg(long, default_value = "demo_output")]
    pub out_dir: PathBuf,

    /// Also print every grid to stdout.
    #[arg(long, default_value_t = false)]
    pub print: bool,

    /// Compare the selected demos with their references instead of writing them.
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Reference files (`<nom>_demo.txt`) for --check. Défaut : références intégrées.
    #[arg(long, requires = "check")]
    pub reference_dir: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// The demo selection after defaults: `None` means no named demo runs.
    #[must_use]
    pub fn demo_selection(&self) -> Option<&str> {
        match (self.demo.as_deref(), &self.config) {
            (Some(name), _) => Some(name),
            (None, None) => Some("all"),
            (None, Some(_)) => None,
        }
    }
}
