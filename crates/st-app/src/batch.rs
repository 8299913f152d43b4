use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use st_core::config::{ConvertConfig, SectionTag};
use st_source::folder_batch::scan_slides;
use st_source::slide::read_slide;
use st_tiles::encoder::GridEncoder;
use st_tiles::mapper::TileMapper;

/// Résultat d'un lot : fichiers générés et slides en échec.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Fichiers écrits, dans l'ordre de traitement.
    pub generated: Vec<PathBuf>,
    /// Slides refusées, avec la raison.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Directives `INCLUDE` pour les fichiers générés.
    #[must_use]
    pub fn include_lines(&self) -> Vec<String> {
        self.generated
            .iter()
            .map(|p| format!("INCLUDE \"{}\"", p.display()))
            .collect()
    }
}

/// `intro.txt` → `INTRO.INC`, dans `output_dir` si configuré.
#[must_use]
pub fn output_path_for(source: &Path, config: &ConvertConfig) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    let name = format!("{stem}.{}", config.output_extension.to_uppercase());

    match config.output_dir {
        Some(ref dir) => dir.join(name),
        None => source.with_file_name(name),
    }
}

/// `INTRO.INC` → `INC_DATA` (ou `INTRO_DATA` avec `SectionTag::Stem`).
#[must_use]
pub fn section_name_for(output: &Path, config: &ConvertConfig) -> String {
    let tag = match config.section_tag {
        SectionTag::Extension => output.extension(),
        SectionTag::Stem => output.file_stem(),
    };
    let tag = tag
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    format!("{tag}{}", config.section_suffix)
}

/// Convertit une slide et écrit le bloc en une seule fois.
///
/// Lecture, mapping et encodage se font en mémoire ; le fichier n'est créé
/// qu'une fois le bloc complet, via un fichier temporaire renommé.
///
/// # Errors
/// Returns an error if the slide cannot be read or mapped, or if the output
/// cannot be written. No output file exists afterwards in that case.
pub fn convert_slide(
    source: &Path,
    output: &Path,
    mapper: &TileMapper,
    encoder: &GridEncoder,
    config: &ConvertConfig,
) -> Result<()> {
    let lines = read_slide(source)?;
    let grid = mapper
        .map_grid(&lines)
        .with_context(|| format!("Conversion de {}", source.display()))?;
    let text = encoder.encode_grid(&grid, &section_name_for(output, config));

    write_atomic(output, &text)
        .with_context(|| format!("Écriture impossible de {}", output.display()))?;

    log::debug!("{} → {}", source.display(), output.display());
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path)?;
    Ok(())
}

/// Point d'entrée pour la conversion d'un dossier de slides.
///
/// Une slide en erreur est journalisée puis ignorée ; avec `fail_fast`, la
/// première erreur arrête le lot.
///
/// # Errors
/// Returns an error if the folder cannot be scanned, or on the first failing
/// slide when `fail_fast` is set.
pub fn run_batch(dir: &Path, config: &ConvertConfig, fail_fast: bool) -> Result<BatchReport> {
    let slides = scan_slides(dir)?;

    let mapper = TileMapper::from_config(config);
    let encoder = GridEncoder::from_config(config);
    let mut report = BatchReport::default();

    for source in slides {
        let output = output_path_for(&source, config);
        let result = if report.generated.contains(&output) {
            Err(anyhow::anyhow!("{} déjà généré par une autre slide", output.display()))
        } else {
            convert_slide(&source, &output, &mapper, &encoder, config)
        };
        match result {
            Ok(()) => report.generated.push(output),
            Err(e) if fail_fast => return Err(e),
            Err(e) => {
                log::error!("{} ignorée : {e:#}", source.display());
                report.failed.push((source, format!("{e:#}")));
            }
        }
    }

    log::info!(
        "Lot terminé : {} généré(s), {} en échec",
        report.generated.len(),
        report.failed.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_core::config::RowOverflow;

    fn slide(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn output_name_is_uppercased_inc() {
        let config = ConvertConfig::default();
        assert_eq!(
            output_path_for(Path::new("slides/intro.txt"), &config),
            PathBuf::from("slides/INTRO.INC")
        );

        let config = ConvertConfig {
            output_dir: Some(PathBuf::from("build")),
            ..ConvertConfig::default()
        };
        assert_eq!(
            output_path_for(Path::new("slides/intro.txt"), &config),
            PathBuf::from("build/INTRO.INC")
        );
    }

    #[test]
    fn section_name_from_extension_or_stem() {
        let mut config = ConvertConfig::default();
        assert_eq!(section_name_for(Path::new("INTRO.INC"), &config), "INC_DATA");
        config.section_tag = SectionTag::Stem;
        assert_eq!(section_name_for(Path::new("out/INTRO.INC"), &config), "INTRO_DATA");
    }

    #[test]
    fn converts_single_line_slide() {
        let dir = tempfile::tempdir().unwrap();
        let source = slide(dir.path(), "ab.txt", b"AB\n");
        let output = dir.path().join("AB.INC");
        let config = ConvertConfig::default();

        convert_slide(
            &source,
            &output,
            &TileMapper::default(),
            &GridEncoder::default(),
            &config,
        )
        .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 37);
        assert_eq!(lines[0], "INC_DATA::");
        assert_eq!(lines[1], "DB 01.02.00.00.00.00.00.00.00.00");
        assert!(lines[2..].iter().all(|l| *l == "DB 00.00.00.00.00.00.00.00.00.00"));
    }

    #[test]
    fn converts_window_frame() {
        let dir = tempfile::tempdir().unwrap();
        let source = slide(dir.path(), "win.txt", b"\xDA\xC4\xBF\r\n\xB3.\xB3\r\n\xC0\xC4\xD9\r\n");
        let output = dir.path().join("WIN.INC");
        convert_slide(
            &source,
            &output,
            &TileMapper::default(),
            &GridEncoder::new(20),
            &ConvertConfig::default(),
        )
        .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("DB 48.47.49.00"));
        assert!(lines[2].starts_with("DB 46.1B.46.00"));
        assert!(lines[3].starts_with("DB 4B.47.4A.00"));
    }

    #[test]
    fn too_long_line_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = slide(dir.path(), "wide.txt", "A".repeat(21).as_bytes());
        let output = dir.path().join("WIDE.INC");
        let result = convert_slide(
            &source,
            &output,
            &TileMapper::default(),
            &GridEncoder::default(),
            &ConvertConfig::default(),
        );
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn missing_source_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("GONE.INC");
        let result = convert_slide(
            &dir.path().join("gone.txt"),
            &output,
            &TileMapper::default(),
            &GridEncoder::default(),
            &ConvertConfig::default(),
        );
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<st_core::ConvertError>(),
            Some(st_core::ConvertError::SourceNotFound { .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn batch_skips_failures_and_lists_includes() {
        let dir = tempfile::tempdir().unwrap();
        slide(dir.path(), "a.txt", b"HELLO\n");
        slide(dir.path(), "b.txt", "X".repeat(30).as_bytes());
        slide(dir.path(), "c.txt", b"WORLD\n");
        slide(dir.path(), "readme.md", b"ignored");

        let report = run_batch(dir.path(), &ConvertConfig::default(), false).unwrap();
        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("b.txt"));
        assert!(dir.path().join("A.INC").exists());
        assert!(!dir.path().join("B.INC").exists());
        assert!(dir.path().join("C.INC").exists());

        let includes = report.include_lines();
        assert!(includes[0].starts_with("INCLUDE \""));
        assert!(includes[0].ends_with("A.INC\""));
        assert!(includes[1].ends_with("C.INC\""));
    }

    #[test]
    fn case_colliding_slides_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        slide(dir.path(), "A.txt", b"BBB\n");
        slide(dir.path(), "a.txt", b"AAA\n");
        // Case-insensitive filesystems keep a single file.
        if scan_slides(dir.path()).unwrap().len() < 2 {
            return;
        }

        let report = run_batch(dir.path(), &ConvertConfig::default(), false).unwrap();
        assert_eq!(report.generated, vec![dir.path().join("A.INC")]);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("a.txt"));
        assert!(report.failed[0].1.contains("A.INC"));
        assert_eq!(report.include_lines().len(), 1);

        let text = fs::read_to_string(dir.path().join("A.INC")).unwrap();
        assert_eq!(text.lines().nth(1), Some("DB 02.02.02.00.00.00.00.00.00.00"));
    }

    #[test]
    fn fail_fast_stops_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        slide(dir.path(), "a.txt", "X".repeat(30).as_bytes());
        slide(dir.path(), "b.txt", b"OK\n");

        assert!(run_batch(dir.path(), &ConvertConfig::default(), true).is_err());
        assert!(!dir.path().join("B.INC").exists());
    }

    #[test]
    fn tall_slide_respects_overflow_policy() {
        let dir = tempfile::tempdir().unwrap();
        slide(dir.path(), "tall.txt", "LINE\n".repeat(25).as_bytes());

        let report = run_batch(dir.path(), &ConvertConfig::default(), false).unwrap();
        assert!(report.generated.is_empty());
        assert!(report.failed[0].1.contains("25 > 18"));

        let config = ConvertConfig {
            row_overflow: RowOverflow::Truncate,
            ..ConvertConfig::default()
        };
        let report = run_batch(dir.path(), &config, false).unwrap();
        assert_eq!(report.generated.len(), 1);
        let text = fs::read_to_string(&report.generated[0]).unwrap();
        assert_eq!(text.lines().count(), 37);
    }

    #[test]
    fn output_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let slides = dir.path().join("slides");
        fs::create_dir(&slides).unwrap();
        slide(&slides, "intro.txt", b"HI\n");

        let config = ConvertConfig {
            output_dir: Some(dir.path().join("build").join("inc")),
            ..ConvertConfig::default()
        };
        let report = run_batch(&slides, &config, false).unwrap();
        assert_eq!(report.generated, vec![dir.path().join("build/inc/INTRO.INC")]);
        assert!(report.generated[0].exists());
    }
}
