use std::fmt::Write;

use st_core::config::{ASM_VALUES_PER_LINE, ConvertConfig};
use st_core::grid::{TileGrid, TileIndex};

/// Sérialise une séquence de tuiles en bloc de données assembleur.
///
/// Format : une ligne d'en-tête `<SECTION>::` puis des lignes
/// `DB tt.tt.tt...` de `values_per_line` tokens au plus.
///
/// # Example
/// ```
/// use st_tiles::encoder::GridEncoder;
/// use st_core::grid::TileIndex;
/// let encoder = GridEncoder::new(2);
/// let text = encoder.encode(&[TileIndex(1), TileIndex(27), TileIndex(0)], "INC_DATA");
/// assert_eq!(text, "INC_DATA::\nDB 01.1B\nDB 00\n");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GridEncoder {
    values_per_line: usize,
}

impl GridEncoder {
    /// Crée un encodeur. `values_per_line` est ramené à au moins 1.
    #[must_use]
    pub fn new(values_per_line: usize) -> Self {
        Self {
            values_per_line: values_per_line.max(1),
        }
    }

    #[must_use]
    pub fn from_config(config: &ConvertConfig) -> Self {
        Self::new(config.values_per_line)
    }

    #[must_use]
    pub fn values_per_line(&self) -> usize {
        self.values_per_line
    }

    /// Encode les tokens dans l'ordre, par paquets de `values_per_line`.
    #[must_use]
    pub fn encode(&self, tokens: &[TileIndex], section_name: &str) -> String {
        // "DB " + n tokens de 2 chars + (n-1) points + '\n'
        let line_len = 3 + self.values_per_line * 3;
        let lines = tokens.len().div_ceil(self.values_per_line);
        let mut out = String::with_capacity(section_name.len() + 3 + lines * line_len);

        out.push_str(section_name);
        out.push_str("::\n");

        for chunk in tokens.chunks(self.values_per_line) {
            out.push_str("DB ");
            for (i, tile) in chunk.iter().enumerate() {
                if i > 0 {
                    out.push('.');
                }
                // Hexadécimal majuscule via Display ; écrire dans une String ne peut pas échouer.
                let _ = write!(out, "{tile}");
            }
            out.push('\n');
        }

        out
    }

    /// Aplatit la grille (row-major) puis l'encode.
    ///
    /// # Example
    /// ```
    /// use st_tiles::encoder::GridEncoder;
    /// use st_tiles::mapper::TileMapper;
    /// let grid = TileMapper::default().map_grid(&["HELLO"]).unwrap();
    /// let text = GridEncoder::default().encode_grid(&grid, "INC_DATA");
    /// assert_eq!(text.lines().count(), 37);
    /// assert!(text.starts_with("INC_DATA::\nDB 08.05.0C.0C.0F.00"));
    /// ```
    #[must_use]
    pub fn encode_grid(&self, grid: &TileGrid, section_name: &str) -> String {
        self.encode(&grid.cells, section_name)
    }
}

impl Default for GridEncoder {
    fn default() -> Self {
        Self::new(ASM_VALUES_PER_LINE)
    }
}
