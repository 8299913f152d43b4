use anyhow::Result;
use clap::Parser;
use st_core::config::ConvertConfig;

pub mod batch;
pub mod cli;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    // 4. Convertir le dossier
    log::info!("Conversion des slides de {}", cli.dir.display());
    let report = batch::run_batch(&cli.dir, &config, cli.fail_fast)?;

    // 5. Liste des includes
    if !report.generated.is_empty() {
        println!("Add the following to your ASM code:");
        for line in report.include_lines() {
            println!("{line}");
        }
    }

    for (path, reason) in &report.failed {
        eprintln!("Échec : {} : {reason}", path.display());
    }
    if !report.failed.is_empty() {
        anyhow::bail!("{} slide(s) non convertie(s)", report.failed.len());
    }

    Ok(())
}

/// Config file if present, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<ConvertConfig> {
    if cli.config.exists() {
        st_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ConvertConfig::default())
    }
}
