use std::fs;
use std::path::{Path, PathBuf};

use st_core::error::ConvertError;

/// Extension des slides reconnues.
const SLIDE_EXT: &str = "txt";

/// Liste les slides (`*.txt`) directement dans `dir`, triées par chemin.
///
/// Pas de récursion : les sous-dossiers sont ignorés, même s'ils se
/// terminent par `.txt`.
///
/// # Errors
/// Returns `ConvertError::SourceNotFound` if `dir` does not exist, or
/// `ConvertError::Io` if it cannot be listed.
///
/// # Example
/// ```no_run
/// use st_source::folder_batch::scan_slides;
/// use std::path::Path;
/// for slide in scan_slides(Path::new("slides")).unwrap() {
///     println!("{}", slide.display());
/// }
/// ```
pub fn scan_slides(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !dir.is_dir() {
        return Err(ConvertError::SourceNotFound {
            path: dir.display().to_string(),
        });
    }

    let io_err = |source| ConvertError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && is_slide(&path) {
            files.push(path);
        }
    }
    files.sort();

    log::info!("{} slide(s) trouvée(s) dans {}", files.len(), dir.display());
    Ok(files)
}

fn is_slide(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SLIDE_EXT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_txt_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.TXT", "notes.md", "c.txt.bak", "SLIDE.INC"] {
            fs::write(dir.path().join(name), "X").unwrap();
        }
        fs::create_dir(dir.path().join("nested.txt")).unwrap();
        fs::write(dir.path().join("nested.txt").join("d.txt"), "X").unwrap();

        let found: Vec<String> = scan_slides(dir.path())
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();
        assert_eq!(found, vec!["a.TXT", "b.txt"]);
    }

    #[test]
    fn missing_dir_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            scan_slides(&dir.path().join("slides")),
            Err(ConvertError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn empty_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_slides(dir.path()).unwrap().is_empty());
    }
}
