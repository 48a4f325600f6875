use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cp_core::grid::Grid;

/// Écrit la grille (en-tête + contenu) dans `path`, en créant les dossiers parents.
///
/// # Errors
/// Returns an error for an empty path, or if a directory or the file cannot
/// be created or written.
pub fn save_to_file(grid: &Grid, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("Chemin de sortie vide");
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le dossier {}", parent.display()))?;
    }

    let file = File::create(path).with_context(|| format!("Impossible de créer {}", path.display()))?;
    let mut out = BufWriter::new(file);
    grid.write_to(&mut out)
        .and_then(|()| out.flush())
        .with_context(|| format!("Échec d'écriture de {}", path.display()))?;
    log::debug!("Grille {}x{} écrite dans {}", grid.width(), grid.height(), path.display());
    Ok(())
}
