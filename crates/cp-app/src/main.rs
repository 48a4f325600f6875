use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod demos;
pub mod export;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    let runner = demos::DemoRunner::new(&cli.out_dir, cli.print);

    // 3. Vérification contre les références
    if cli.check {
        let selection = cli.demo.as_deref().unwrap_or("all");
        let outcomes = runner.check(selection, cli.reference_dir.as_deref())?;
        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|(_, o)| matches!(o, demos::CheckOutcome::Mismatch { .. }))
            .map(|(name, _)| name.as_str())
            .collect();
        if !failed.is_empty() {
            anyhow::bail!("Démos non conformes : {}", failed.join(", "));
        }
        log::info!("{} démo(s) vérifiée(s)", outcomes.len());
        return Ok(());
    }

    // 4. Démo depuis la config
    if let Some(ref path) = cli.config {
        let config = cp_core::config::load_config(path)?;
        log::info!(
            "Config {} : {}x{}, {:?}",
            path.display(),
            config.width,
            config.height,
            config.plotter_type
        );
        runner.run_config(&config)?;
    }

    // 5. Démos nommées
    if let Some(selection) = cli.demo_selection() {
        let written = runner.run(selection)?;
        log::info!("{} fichier(s) écrit(s) dans {}", written.len(), cli.out_dir.display());
    }
    Ok(())
}
