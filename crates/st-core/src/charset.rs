//! Tables de correspondance caractère → tuile.
//!
//! Deux tables, construites une seule fois puis immuables : la table
//! principale (lettres, chiffres, ponctuation) et la table des glyphes de
//! fenêtre (box-drawing CP437), consultée seulement en cas d'échec.

use crate::grid::TileIndex;

/// Ponctuation reconnue par la table principale.
pub const PUNCTUATION_TILES: &[(u8, u8)] = &[
    (b'.', 27),
    (b',', 28),
    (b':', 29),
    (b';', 30),
    (b'!', 31),
    (b'?', 32),
    (b'-', 33),
    (b'(', 58),
    (b')', 59),
    (b'[', 60),
    (b']', 61),
    (b'+', 62),
    (b'=', 63),
    (b'&', 64),
    (b'$', 65),
    (b'\'', 66),
    (b'"', 67),
    (b'/', 68),
    (b'|', 69),
];

/// Glyphes de cadre CP437, par point de code : │ ─ ┌ ┐ ┘ └.
pub const WINDOW_GLYPH_TILES: &[(u8, u8)] = &[
    (179, 70),
    (196, 71),
    (218, 72),
    (191, 73),
    (217, 74),
    (192, 75),
];

/// LUT (Lookup Table) principale [0..255] → index de tuile, 0 = absent.
const STANDARD_TILE_LUT: [u8; 256] = init_tile_lut();

/// LUT des glyphes de fenêtre [0..255] → index de tuile, 0 = absent.
const WINDOW_GLYPH_LUT: [u8; 256] = init_glyph_lut();

const fn init_tile_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];

    // A..Z → 1..26
    let mut i = 0;
    while i < 26 {
        lut[b'A' as usize + i] = i as u8 + 1;
        i += 1;
    }

    // 0..9 → 36..45
    i = 0;
    while i < 10 {
        lut[b'0' as usize + i] = i as u8 + 36;
        i += 1;
    }

    i = 0;
    while i < PUNCTUATION_TILES.len() {
        let (ch, tile) = PUNCTUATION_TILES[i];
        lut[ch as usize] = tile;
        i += 1;
    }

    lut
}

const fn init_glyph_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    let mut i = 0;
    while i < WINDOW_GLYPH_TILES.len() {
        let (code, tile) = WINDOW_GLYPH_TILES[i];
        lut[code as usize] = tile;
        i += 1;
    }
    lut
}

/// Reads a LUT slot, mapping the empty slot and code points above 255 to `None`.
#[inline(always)]
fn lut_get(lut: &[u8; 256], ch: char) -> Option<TileIndex> {
    let code = usize::try_from(u32::from(ch)).ok()?;
    match lut.get(code) {
        Some(&tile) if tile != 0 => Some(TileIndex(tile)),
        _ => None,
    }
}

/// Table principale, insensible à la casse (comparée en majuscules).
///
/// # Example
/// ```
/// use st_core::charset::TileTable;
/// use st_core::grid::TileIndex;
/// let table = TileTable::standard();
/// assert_eq!(table.get('a'), Some(TileIndex(1)));
/// assert_eq!(table.get('@'), None);
/// ```
#[derive(Clone)]
pub struct TileTable {
    lut: [u8; 256],
}

impl TileTable {
    /// Lettres 1..26, chiffres 36..45, ponctuation 27..33 et 58..69.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            lut: STANDARD_TILE_LUT,
        }
    }

    /// Index de la tuile pour `ch`, replié en majuscule ASCII.
    ///
    /// Returns `None` when the character has no entry.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, ch: char) -> Option<TileIndex> {
        lut_get(&self.lut, ch.to_ascii_uppercase())
    }
}

impl Default for TileTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Table secondaire des glyphes de cadre, par point de code exact.
///
/// # Example
/// ```
/// use st_core::charset::WindowGlyphTable;
/// use st_core::grid::TileIndex;
/// let glyphs = WindowGlyphTable::standard();
/// assert_eq!(glyphs.get(char::from(179u8)), Some(TileIndex(70)));
/// assert_eq!(glyphs.get('|'), None);
/// ```
#[derive(Clone)]
pub struct WindowGlyphTable {
    lut: [u8; 256],
}

impl WindowGlyphTable {
    /// │ 70, ─ 71, ┌ 72, ┐ 73, ┘ 74, └ 75.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            lut: WINDOW_GLYPH_LUT,
        }
    }

    /// Index de la tuile pour le point de code de `ch`, sans repli de casse.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, ch: char) -> Option<TileIndex> {
        lut_get(&self.lut, ch)
    }
}

impl Default for WindowGlyphTable {
    fn default() -> Self {
        Self::standard()
    }
}
