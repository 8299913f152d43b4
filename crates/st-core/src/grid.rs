use std::fmt;

/// Hauteur par défaut d'une slide, en tuiles.
pub const MAX_ROWS: usize = 18;

/// Largeur par défaut d'une slide, en tuiles.
pub const MAX_COLS: usize = 20;

/// Index d'une tuile pré-dessinée, substituée au caractère par le renderer.
///
/// Le token texte est toujours sur 2 caractères hexadécimaux majuscules.
///
/// # Example
/// ```
/// use st_core::grid::TileIndex;
/// assert_eq!(TileIndex(27).to_string(), "1B");
/// assert_eq!(TileIndex::DEFAULT.to_string(), "00");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIndex(pub u8);

impl TileIndex {
    /// Tuile utilisée pour tout caractère absent des tables.
    pub const DEFAULT: Self = Self(0);

    /// Vrai si l'index est la tuile par défaut.
    #[inline(always)]
    #[must_use]
    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

/// Grille de tuiles d'une slide, row-major, toujours pleine.
///
/// # Example
/// ```
/// use st_core::grid::{TileGrid, TileIndex};
/// let grid = TileGrid::filled(20, 18, TileIndex::DEFAULT);
/// assert_eq!(grid.cells.len(), 360);
/// assert_eq!(grid.rows().count(), 18);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    /// Flat array of tiles, row-major.
    pub cells: Vec<TileIndex>,
    /// Width in tiles.
    pub width: usize,
    /// Height in tiles.
    pub height: usize,
}

impl TileGrid {
    /// Crée une grille remplie d'une seule tuile.
    #[must_use]
    pub fn filled(width: usize, height: usize, tile: TileIndex) -> Self {
        Self {
            cells: vec![tile; width * height],
            width,
            height,
        }
    }

    /// Ligne `y` de la grille, `None` hors limites.
    ///
    /// # Example
    /// ```
    /// use st_core::grid::{TileGrid, TileIndex};
    /// let grid = TileGrid::filled(2, 3, TileIndex(7));
    /// assert_eq!(grid.row(2), Some(&[TileIndex(7), TileIndex(7)][..]));
    /// assert_eq!(grid.row(3), None);
    /// ```
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[TileIndex]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.cells.get(start..start + self.width)
    }

    /// Itère sur les lignes, de haut en bas.
    pub fn rows(&self) -> impl Iterator<Item = &[TileIndex]> {
        self.cells.chunks(self.width.max(1))
    }
}
