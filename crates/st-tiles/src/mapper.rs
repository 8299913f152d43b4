use st_core::charset::{TileTable, WindowGlyphTable};
use st_core::config::{ConvertConfig, RowOverflow};
use st_core::error::ConvertError;
use st_core::grid::{MAX_COLS, MAX_ROWS, TileGrid, TileIndex};

/// Dimensions de la grille et politique de débordement vertical.
///
/// # Example
/// ```
/// use st_tiles::mapper::GridLayout;
/// let layout = GridLayout::default();
/// assert_eq!((layout.max_cols, layout.max_rows), (20, 18));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Largeur en tuiles.
    pub max_cols: usize,
    /// Hauteur en tuiles.
    pub max_rows: usize,
    /// Que faire d'une slide trop haute.
    pub row_overflow: RowOverflow,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            max_cols: MAX_COLS,
            max_rows: MAX_ROWS,
            row_overflow: RowOverflow::Error,
        }
    }
}

impl From<&ConvertConfig> for GridLayout {
    fn from(config: &ConvertConfig) -> Self {
        Self {
            max_cols: config.max_cols,
            max_rows: config.max_rows,
            row_overflow: config.row_overflow,
        }
    }
}

/// Traduction caractère → tuile avec padding à taille fixe.
///
/// Les tables sont construites une fois et possédées par le mapper.
///
/// # Example
/// ```
/// use st_tiles::mapper::TileMapper;
/// use st_core::grid::TileIndex;
/// let mapper = TileMapper::default();
/// assert_eq!(mapper.map_character('z'), TileIndex(26));
/// let grid = mapper.map_grid(&["AB"]).unwrap();
/// assert_eq!(grid.height, 18);
/// ```
pub struct TileMapper {
    tiles: TileTable,
    glyphs: WindowGlyphTable,
    layout: GridLayout,
}

impl TileMapper {
    /// Crée un mapper à partir de tables déjà construites.
    #[must_use]
    pub fn new(tiles: TileTable, glyphs: WindowGlyphTable, layout: GridLayout) -> Self {
        Self {
            tiles,
            glyphs,
            layout,
        }
    }

    /// Tables standard, dimensions et politique lues dans la config.
    #[must_use]
    pub fn from_config(config: &ConvertConfig) -> Self {
        Self::new(
            TileTable::standard(),
            WindowGlyphTable::standard(),
            GridLayout::from(config),
        )
    }

    /// Lookup en deux étapes : table principale (majuscule), puis glyphes de
    /// fenêtre (point de code d'origine), puis `TileIndex::DEFAULT`.
    #[inline(always)]
    #[must_use]
    pub fn lookup(&self, ch: char) -> TileIndex {
        self.tiles
            .get(ch)
            .or_else(|| self.glyphs.get(ch))
            .unwrap_or(TileIndex::DEFAULT)
    }

    /// Index de tuile d'un caractère.
    #[inline(always)]
    #[must_use]
    pub fn map_character(&self, ch: char) -> TileIndex {
        self.lookup(ch)
    }

    /// Convertit une ligne en exactement `max_cols` tuiles.
    ///
    /// Un terminateur final (`\n` ou `\r\n`) est ignoré.
    ///
    /// # Errors
    /// Returns `ConvertError::RowTooLong` if the line has more than
    /// `max_cols` characters.
    ///
    /// # Example
    /// ```
    /// use st_tiles::mapper::TileMapper;
    /// let mapper = TileMapper::default();
    /// assert_eq!(mapper.map_row("HI", 1).unwrap().len(), 20);
    /// assert!(mapper.map_row(&"X".repeat(21), 4).is_err());
    /// ```
    pub fn map_row(&self, line: &str, line_number: usize) -> Result<Vec<TileIndex>, ConvertError> {
        let line = strip_terminator(line);
        let max = self.layout.max_cols;

        let len = line.chars().count();
        if len > max {
            return Err(ConvertError::RowTooLong {
                line: line_number,
                len,
                max,
            });
        }

        let mut row = Vec::with_capacity(max);
        row.extend(line.chars().map(|ch| self.map_character(ch)));
        row.resize(max, self.map_character(' '));
        Ok(row)
    }

    /// Convertit une slide complète en grille `max_cols` × `max_rows`.
    ///
    /// Les lignes manquantes en bas sont complétées par des espaces.
    ///
    /// # Errors
    /// Returns `ConvertError::RowTooLong` from the first offending line, or
    /// `ConvertError::TooManyRows` when the slide is taller than the grid and
    /// the policy is `RowOverflow::Error`.
    pub fn map_grid<S: AsRef<str>>(&self, lines: &[S]) -> Result<TileGrid, ConvertError> {
        let max_rows = self.layout.max_rows;

        let lines = if lines.len() > max_rows {
            match self.layout.row_overflow {
                RowOverflow::Error => {
                    return Err(ConvertError::TooManyRows {
                        rows: lines.len(),
                        max: max_rows,
                    });
                }
                RowOverflow::Truncate => {
                    log::warn!("Slide de {} lignes tronquée à {max_rows}", lines.len());
                    &lines[..max_rows]
                }
            }
        } else {
            lines
        };

        let mut rows = Vec::with_capacity(max_rows);
        for (idx, line) in lines.iter().enumerate() {
            rows.push(self.map_row(line.as_ref(), idx + 1)?);
        }
        while rows.len() < max_rows {
            rows.push(self.map_row(" ", rows.len() + 1)?);
        }

        Ok(TileGrid {
            cells: rows.into_iter().flatten().collect(),
            width: self.layout.max_cols,
            height: max_rows,
        })
    }
}

impl Default for TileMapper {
    fn default() -> Self {
        Self::new(
            TileTable::standard(),
            WindowGlyphTable::standard(),
            GridLayout::default(),
        )
    }
}

fn strip_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}
