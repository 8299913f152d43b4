use std::path::PathBuf;

use clap::Parser;
use st_core::config::{ConvertConfig, RowOverflow};

/// slidetile — convertit des slides ASCII en tables de tuiles pour l'assembleur.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dossier contenant les slides `.txt`.
    #[arg(default_value = "slides")]
    pub dir: PathBuf,

    /// Fichier de configuration TOML. Absent = valeurs par défaut.
    #[arg(short, long, default_value = "slidetile.toml")]
    pub config: PathBuf,

    /// Dossier de sortie des fichiers `.INC` (défaut : à côté des slides).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Tronquer les slides trop hautes au lieu de les refuser.
    #[arg(long, default_value_t = false)]
    pub truncate: bool,

    /// Arrêter le lot à la première slide en erreur.
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Applique les overrides CLI sur la config chargée.
    pub fn apply_overrides(&self, config: &mut ConvertConfig) {
        if let Some(ref dir) = self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        if self.truncate {
            config.row_overflow = RowOverflow::Truncate;
        }
    }
}
