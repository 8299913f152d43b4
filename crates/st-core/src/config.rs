use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grid::{MAX_COLS, MAX_ROWS};

/// Nombre de valeurs par ligne `DB` par défaut.
pub const ASM_VALUES_PER_LINE: usize = 10;

/// Suffixe ajouté au nom de section par défaut.
pub const SECTION_SUFFIX: &str = "_DATA";

/// Configuration complète d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use st_core::config::ConvertConfig;
/// let config = ConvertConfig::default();
/// assert_eq!(config.max_rows, 18);
/// assert_eq!(config.max_cols, 20);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ConvertConfig {
    // === Grille ===
    /// Hauteur de la grille en tuiles.
    pub max_rows: usize,
    /// Largeur de la grille en tuiles.
    pub max_cols: usize,
    /// Politique quand la slide a plus de lignes que la grille.
    pub row_overflow: RowOverflow,

    // === Sortie ===
    /// Nombre de tokens par ligne `DB`.
    pub values_per_line: usize,
    /// Suffixe du nom de section.
    pub section_suffix: String,
    /// Source du préfixe du nom de section.
    pub section_tag: SectionTag,
    /// Extension des fichiers générés, sans le point.
    pub output_extension: String,
    /// Dossier de sortie. None = à côté de la source.
    pub output_dir: Option<PathBuf>,
}

/// Row overflow policy.
///
/// # Example
/// ```
/// use st_core::config::RowOverflow;
/// assert!(matches!(RowOverflow::default(), RowOverflow::Error));
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum RowOverflow {
    /// Refuser la slide (`TooManyRows`).
    #[default]
    Error,
    /// Garder les premières lignes, avertir dans le log.
    Truncate,
}

/// Quelle partie du fichier de sortie donne le préfixe de section.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum SectionTag {
    /// Extension en majuscules : `SLIDE.INC` → `INC_DATA`.
    #[default]
    Extension,
    /// Nom sans extension en majuscules : `SLIDE.INC` → `SLIDE_DATA`.
    Stem,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_rows: MAX_ROWS,
            max_cols: MAX_COLS,
            row_overflow: RowOverflow::Error,
            values_per_line: ASM_VALUES_PER_LINE,
            section_suffix: SECTION_SUFFIX.to_string(),
            section_tag: SectionTag::Extension,
            output_extension: "inc".to_string(),
            output_dir: None,
        }
    }
}

impl ConvertConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.max_rows = self.max_rows.clamp(1, 255);
        self.max_cols = self.max_cols.clamp(1, 255);
        self.values_per_line = self.values_per_line.clamp(1, 255);
        let ext = self.output_extension.trim_start_matches('.');
        self.output_extension = if ext.is_empty() {
            "inc".to_string()
        } else {
            ext.to_string()
        };
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    grid: Option<GridSection>,
    output: Option<OutputSection>,
}

/// Grid section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct GridSection {
    max_rows: Option<usize>,
    max_cols: Option<usize>,
    row_overflow: Option<RowOverflow>,
}

/// Output section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct OutputSection {
    values_per_line: Option<usize>,
    section_suffix: Option<String>,
    section_tag: Option<SectionTag>,
    output_extension: Option<String>,
    output_dir: Option<PathBuf>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use st_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("slidetile.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse une config TOML depuis une chaîne.
///
/// # Errors
/// Returns an error if the TOML is malformed or has unknown enum values.
///
/// # Example
/// ```
/// use st_core::config::{parse_config, RowOverflow};
/// let config = parse_config("[grid]\nrow_overflow = \"Truncate\"\n").unwrap();
/// assert_eq!(config.row_overflow, RowOverflow::Truncate);
/// assert_eq!(config.max_cols, 20);
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig> {
    let file: ConfigFile = toml::from_str(content)?;

    let mut config = ConvertConfig::default();

    if let Some(g) = file.grid {
        if let Some(v) = g.max_rows {
            config.max_rows = v;
        }
        if let Some(v) = g.max_cols {
            config.max_cols = v;
        }
        if let Some(v) = g.row_overflow {
            config.row_overflow = v;
        }
    }

    if let Some(o) = file.output {
        if let Some(v) = o.values_per_line {
            config.values_per_line = v;
        }
        if let Some(v) = o.section_suffix {
            config.section_suffix = v;
        }
        if let Some(v) = o.section_tag {
            config.section_tag = v;
        }
        if let Some(v) = o.output_extension {
            config.output_extension = v;
        }
        if o.output_dir.is_some() {
            config.output_dir = o.output_dir;
        }
    }

    config.clamp_all();
    Ok(config)
}
