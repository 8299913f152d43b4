use std::path::Path;

use st_core::error::ConvertError;

/// Lit une slide et la découpe en lignes.
///
/// Chaque octet devient le caractère de même point de code : une slide
/// enregistrée en mode DOS garde ses glyphes de cadre (0xB3 → 179, etc.).
///
/// # Errors
/// Returns `ConvertError::SourceNotFound` if `path` does not exist, or
/// `ConvertError::Io` if it cannot be read.
///
/// # Example
/// ```no_run
/// use st_source::slide::read_slide;
/// use std::path::Path;
/// let lines = read_slide(Path::new("slides/intro.txt")).unwrap();
/// ```
pub fn read_slide(path: &Path) -> Result<Vec<String>, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::SourceNotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| ConvertError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let lines = decode_lines(&bytes);
    log::debug!("{} : {} lignes lues", path.display(), lines.len());
    Ok(lines)
}

/// Décode des octets extended-ASCII en lignes, sans terminateurs.
///
/// `\n` et `\r\n` terminent une ligne. Un terminateur final ne crée pas de
/// ligne vide supplémentaire.
///
/// # Example
/// ```
/// use st_source::slide::decode_lines;
/// let lines = decode_lines(b"\xDA\xC4\xBF\r\nHI\n");
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].chars().map(u32::from).collect::<Vec<_>>(), vec![218, 196, 191]);
/// assert_eq!(lines[1], "HI");
/// ```
#[must_use]
pub fn decode_lines(bytes: &[u8]) -> Vec<String> {
    let text: String = bytes.iter().copied().map(char::from).collect();
    text.lines().map(str::to_owned).collect()
}
