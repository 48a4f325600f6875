//! Démos : chaque démo dessine une grille et l'écrit dans `<out_dir>/<nom>_demo.txt`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cp_core::charset::PRESETS;
use cp_core::config::{PlotterConfig, PlotterType};
use cp_core::error::CoreError;
use cp_core::grid::Grid;
use cp_core::histogram;
use cp_gray::{GrayscalePlotter, Palette};
use cp_raster::Plotter;
use cp_raster::fill::{flood_fill, scanline_fill};
use cp_raster::region::paste_region;

use crate::export::save_to_file;

/// Named demos, in the order `all` runs them.
pub const DEMOS: &[&str] = &[
    "basic",
    "grayscale",
    "advanced",
    "shapes",
    "filters",
    "palettes",
    "fills",
];

/// Saved output of the demos that involve no floating-point sampling.
const GOLDEN: &[(&str, &str)] = &[
    ("basic", include_str!("../golden/basic_demo.txt")),
    ("grayscale", include_str!("../golden/grayscale_demo.txt")),
    ("shapes", include_str!("../golden/shapes_demo.txt")),
    ("palettes", include_str!("../golden/palettes_demo.txt")),
    ("fills", include_str!("../golden/fills_demo.txt")),
];

/// Built-in reference text for `name`, when one ships with the binary.
#[must_use]
pub fn golden(name: &str) -> Option<&'static str> {
    GOLDEN.iter().find(|(n, _)| *n == name).map(|(_, text)| *text)
}

/// Outcome of comparing one demo against its reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Match,
    /// First differing line (1-based, header included) with both versions.
    Mismatch {
        line: usize,
        expected: String,
        actual: String,
    },
    /// No reference file and no built-in reference.
    Missing,
}

/// Saved-file text of a demo, as [`DemoRunner`] would write it.
///
/// # Errors
/// Returns an error for an unknown name or a failing demo.
pub fn demo_text(name: &str) -> Result<String> {
    let grid = build_demo(name)?;
    let mut out = Vec::new();
    grid.write_to(&mut out).context("Échec du rendu en mémoire")?;
    String::from_utf8(out).context("Rendu non UTF-8")
}

/// Compares `actual` against `expected`, line by line.
#[must_use]
pub fn compare(expected: &str, actual: &str) -> CheckOutcome {
    let (mut exp, mut act) = (expected.lines(), actual.lines());
    for line in 1.. {
        match (exp.next(), act.next()) {
            (None, None) => break,
            (e, a) if e == a => {}
            (e, a) => {
                return CheckOutcome::Mismatch {
                    line,
                    expected: e.unwrap_or_default().to_string(),
                    actual: a.unwrap_or_default().to_string(),
                };
            }
        }
    }
    CheckOutcome::Match
}

/// Either plotter, as selected by [`PlotterConfig::plotter_type`].
#[derive(Clone, Debug)]
pub enum AnyPlotter {
    Basic(Plotter),
    Grayscale(GrayscalePlotter),
}

impl AnyPlotter {
    /// Builds the plotter a config describes. An empty palette selects the default ramp.
    ///
    /// # Errors
    /// Returns an error if the config fails validation.
    pub fn from_config(config: &PlotterConfig) -> Result<Self> {
        config.validate()?;
        let (w, h, bg) = (config.width, config.height, config.background_char);
        Ok(match config.plotter_type {
            PlotterType::Basic => Self::Basic(Plotter::new(w, h, bg)?),
            PlotterType::Grayscale => {
                let palette = if config.palette.is_empty() {
                    Palette::default()
                } else {
                    Palette::new(config.palette.clone())
                };
                Self::Grayscale(GrayscalePlotter::new(w, h, bg, palette)?)
            }
        })
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        match self {
            Self::Basic(p) => p.grid(),
            Self::Grayscale(g) => g.grid(),
        }
    }

    #[must_use]
    pub fn into_grid(self) -> Grid {
        match self {
            Self::Basic(p) => p.into_grid(),
            Self::Grayscale(g) => g.into_plotter().into_grid(),
        }
    }

    /// Scène de démonstration mise à l'échelle de la grille.
    pub fn draw_scene(&mut self) {
        let (w, h) = (self.grid().width(), self.grid().height());
        let (cx, cy) = (w / 2, h / 2);
        match self {
            Self::Basic(p) => {
                p.draw_rectangle(0, 0, w - 1, h - 1, '#', false);
                p.draw_circle(cx, cy, w.min(h) / 3, 'o', false);
                p.draw_line(0, h - 1, w - 1, 0, '/');
            }
            Self::Grayscale(g) => {
                g.draw_radial_gradient(cx, cy, w.max(h) / 2, 1.0, 0.0);
                g.draw_rectangle(0, 0, w - 1, h - 1, 1.0, false);
                g.draw_circle(cx, cy, w.min(h) / 4, 0.0, true);
            }
        }
    }
}

/// Runs demos and saves their grids.
#[derive(Clone, Debug)]
pub struct DemoRunner {
    out_dir: PathBuf,
    print: bool,
}

impl DemoRunner {
    /// `print` also echoes each grid to stdout.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>, print: bool) -> Self {
        Self {
            out_dir: out_dir.into(),
            print,
        }
    }

    /// Runs `"all"` or one named demo; returns the written files.
    ///
    /// # Errors
    /// Returns an error for an unknown name, or if a demo or its export fails.
    pub fn run(&self, selection: &str) -> Result<Vec<PathBuf>> {
        if selection == "all" {
            return DEMOS.iter().map(|name| self.run_one(name)).collect();
        }
        Ok(vec![self.run_one(selection)?])
    }

    fn run_one(&self, name: &str) -> Result<PathBuf> {
        log::info!("Démo « {name} »");
        let grid = build_demo(name).with_context(|| format!("Démo {name} en échec"))?;
        self.emit(name, &grid)
    }

    /// Draws the config scene on the plotter `config` describes and saves it.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or the export fails.
    pub fn run_config(&self, config: &PlotterConfig) -> Result<PathBuf> {
        let mut plotter = AnyPlotter::from_config(config)?;
        plotter.draw_scene();
        self.emit("config", plotter.grid())
    }

    /// Rebuilds `"all"` or one named demo and compares it with its reference.
    ///
    /// References are read from `<reference_dir>/<name>_demo.txt` when a
    /// directory is given, from the built-in copies otherwise. Nothing is
    /// written; with `print`, mismatching grids are echoed to stdout.
    ///
    /// # Errors
    /// Returns an error for an unknown name, a failing demo, or an
    /// unreadable reference file.
    pub fn check(&self, selection: &str, reference_dir: Option<&Path>) -> Result<Vec<(String, CheckOutcome)>> {
        let names: Vec<&str> = if selection == "all" { DEMOS.to_vec() } else { vec![selection] };
        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            let actual = demo_text(name).with_context(|| format!("Démo {name} en échec"))?;
            let expected = match reference_dir {
                Some(dir) => {
                    let path = dir.join(format!("{name}_demo.txt"));
                    if path.exists() {
                        Some(
                            fs::read_to_string(&path)
                                .with_context(|| format!("Lecture impossible : {}", path.display()))?,
                        )
                    } else {
                        None
                    }
                }
                None => golden(name).map(str::to_string),
            };
            let outcome = expected.map_or(CheckOutcome::Missing, |text| compare(&text, &actual));
            match &outcome {
                CheckOutcome::Match => log::info!("{name} : conforme"),
                CheckOutcome::Missing => log::warn!("{name} : pas de référence"),
                CheckOutcome::Mismatch { line, expected, actual: got } => {
                    log::error!("{name} : ligne {line} diffère\n  attendu : {expected}\n  obtenu  : {got}");
                    if self.print {
                        print!("{actual}");
                    }
                }
            }
            outcomes.push((name.to_string(), outcome));
        }
        Ok(outcomes)
    }

    fn emit(&self, name: &str, grid: &Grid) -> Result<PathBuf> {
        let path = self.out_dir.join(format!("{name}_demo.txt"));
        save_to_file(grid, &path)?;
        log::info!("{} écrit ({}x{})", path.display(), grid.width(), grid.height());
        if self.print {
            grid.write_to(&mut io::stdout().lock())
                .context("Échec d'écriture sur stdout")?;
        }
        Ok(path)
    }
}

/// Builds the grid of one named demo without saving it.
///
/// # Errors
/// Returns an error for an unknown name, or if the demo itself fails.
pub fn build_demo(name: &str) -> Result<Grid> {
    match name {
        "basic" => demo_basic(),
        "grayscale" => demo_grayscale(),
        "advanced" => demo_advanced(),
        "shapes" => demo_shapes(),
        "filters" => demo_filters(),
        "palettes" => demo_palettes(),
        "fills" => demo_fills(),
        other => anyhow::bail!("Démo inconnue '{other}' (disponibles : {}, all)", DEMOS.join(", ")),
    }
}

/// Places `panels` in a row (or a column) with one background cell between them.
fn arrange(panels: &[Grid], background: char, horizontal: bool) -> Result<Grid, CoreError> {
    let gaps = panels.len().saturating_sub(1) as i32;
    let (w, h) = if horizontal {
        let w: i32 = panels.iter().map(Grid::width).sum::<i32>() + gaps;
        (w, panels.iter().map(Grid::height).max().unwrap_or(1))
    } else {
        let h: i32 = panels.iter().map(Grid::height).sum::<i32>() + gaps;
        (panels.iter().map(Grid::width).max().unwrap_or(1), h)
    };
    let mut sheet = Grid::new(w, h, background)?;
    let mut offset = 0;
    for panel in panels {
        if horizontal {
            paste_region(&mut sheet, panel, offset, 0);
            offset += panel.width() + 1;
        } else {
            paste_region(&mut sheet, panel, 0, offset);
            offset += panel.height() + 1;
        }
    }
    Ok(sheet)
}

fn demo_basic() -> Result<Grid> {
    let mut plotter = Plotter::new(40, 20, '.')?;
    plotter.draw_rectangle(1, 1, 38, 18, '#', false);
    plotter.draw_line(1, 1, 38, 18, '\\');
    plotter.draw_line(1, 18, 38, 1, '/');
    plotter.draw_triangle(20, 3, 8, 15, 32, 15, '*', false);
    plotter.draw_circle(20, 10, 5, 'o', false);

    if let Some((rare, common)) = histogram::min_max_colors(&plotter.color_histogram()) {
        log::info!("basic : caractère le plus rare '{rare}', le plus fréquent '{common}'");
    }
    Ok(plotter.into_grid())
}

fn demo_grayscale() -> Result<Grid> {
    let mut gray = GrayscalePlotter::new(40, 20, ' ', Palette::default())?;
    gray.draw_rectangle(2, 2, 12, 8, 0.3, true);
    gray.draw_circle(26, 6, 5, 0.6, true);
    gray.draw_triangle(4, 18, 14, 11, 24, 18, 0.9, true);
    gray.draw_line(0, 19, 39, 0, 1.0);

    let (lo, hi) = gray.min_max_brightness();
    log::info!(
        "grayscale : moyenne {:.3}, min {lo:.3}, max {hi:.3}",
        gray.average_brightness()
    );
    Ok(gray.into_plotter().into_grid())
}

fn demo_advanced() -> Result<Grid> {
    let mut linear = GrayscalePlotter::new(24, 12, ' ', Palette::default())?;
    linear.draw_linear_gradient(0, 0, 23, 11, 0.0, 1.0);

    let mut radial = GrayscalePlotter::new(24, 12, ' ', Palette::default())?;
    radial.draw_radial_gradient(12, 6, 10, 1.0, 0.0);
    radial.draw_circle(12, 6, 3, 0.0, false);

    let mut inverted = radial.clone();
    inverted.invert_brightness();
    inverted.apply_gaussian_blur(3)?;

    let panels = [linear, radial, inverted].map(|g| g.into_plotter().into_grid());
    Ok(arrange(&panels, ' ', true)?)
}

fn demo_shapes() -> Result<Grid> {
    let mut plotter = Plotter::new(48, 20, ' ')?;

    // Deux triangles partageant l'arête (2,18)-(14,2).
    plotter.draw_triangle(2, 2, 14, 2, 2, 18, '/', true);
    plotter.draw_triangle(14, 2, 14, 18, 2, 18, '\\', true);

    plotter.draw_circle(24, 10, 6, '@', true);
    plotter.draw_rectangle(33, 2, 45, 8, '=', true);

    plotter.draw_circle(39, 14, 4, '#', false);
    plotter.flood_fill(39, 14, '+')?;

    let stamp = plotter.extract_region(33, 2, 38, 5)?;
    plotter.paste_region(&stamp, 42, 16);
    Ok(plotter.into_grid())
}

fn demo_filters() -> Result<Grid> {
    let mut base = GrayscalePlotter::new(20, 12, ' ', Palette::default())?;
    base.draw_rectangle(3, 2, 10, 9, 1.0, true);
    base.draw_circle(14, 6, 4, 0.6, true);

    let mut boxed = base.clone();
    boxed.apply_box_blur(3)?;

    let mut gaussian = base.clone();
    gaussian.apply_gaussian_blur(5)?;

    let mut threshold = gaussian.clone();
    threshold.apply_threshold(0.5);

    let mut dimmed = base.clone();
    dimmed.adjust_brightness(0.5);

    let panels = [base, boxed, gaussian, threshold, dimmed].map(|g| g.into_plotter().into_grid());
    Ok(arrange(&panels, ' ', true)?)
}

fn demo_palettes() -> Result<Grid> {
    let mut rows = Vec::with_capacity(PRESETS.len() + 1);
    for &(name, chars) in PRESETS {
        let mut gray = GrayscalePlotter::new(48, 3, ' ', Palette::from(chars))?;
        gray.draw_linear_gradient(0, 0, 47, 0, 0.0, 1.0);
        log::debug!("palette {name} : {} niveaux", gray.palette_size());
        rows.push(gray.into_plotter().into_grid());
    }

    let mut marker = GrayscalePlotter::new(48, 3, '.', Palette::empty())?;
    marker.draw_linear_gradient(0, 0, 47, 0, 0.0, 1.0);
    rows.push(marker.into_plotter().into_grid());

    Ok(arrange(&rows, ' ', false)?)
}

/// Labyrinthe déterministe pour comparer les deux remplissages.
fn fill_maze() -> Result<Grid, CoreError> {
    let mut plotter = Plotter::new(60, 24, ' ')?;
    plotter.draw_rectangle(0, 0, 59, 23, '#', false);
    for inset in (3..11).step_by(3) {
        plotter.draw_rectangle(inset * 2, inset, 59 - inset * 2, 23 - inset, '#', false);
    }
    plotter.draw_circle(30, 12, 9, '#', false);

    // LCG : murs pseudo-aléatoires reproductibles
    let mut seed = 0x2545_f491_u32;
    let mut next = move |m: u32| {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        ((seed >> 16) % m) as i32
    };
    for _ in 0..40 {
        let (x, y) = (1 + next(58), 1 + next(22));
        if next(2) == 0 {
            plotter.draw_line(x, y, x + next(6), y, '#');
        } else {
            plotter.draw_line(x, y, x, y + next(4), '#');
        }
    }
    Ok(plotter.into_grid())
}

fn demo_fills() -> Result<Grid> {
    let maze = fill_maze()?;
    let mut flood = maze.clone();
    let mut scan = maze.clone();

    let Some(index) = maze.cells().iter().position(|&c| c == ' ') else {
        anyhow::bail!("Labyrinthe sans cellule libre");
    };
    let width = maze.width() as usize;
    let (x, y) = ((index % width) as i32, (index / width) as i32);
    flood_fill(&mut flood, x, y, 'o')?;
    scanline_fill(&mut scan, x, y, 'o')?;

    if flood != scan {
        log::error!("fills : flood et scanline divergent depuis ({x}, {y})");
        anyhow::bail!("Les remplissages flood et scanline divergent");
    }
    let changed = maze.cells().iter().zip(scan.cells()).filter(|(a, b)| a != b).count();
    log::info!("fills : résultats identiques, {changed} cellules remplies depuis ({x}, {y})");
    Ok(scan)
}
