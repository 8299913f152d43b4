use thiserror::Error;

/// Errors raised while converting one slide.
///
/// Every variant is fatal for the slide being converted and leaves no output
/// behind. The driver decides whether the batch continues.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Requested source path does not exist.
    #[error("Fichier source introuvable : {path}")]
    SourceNotFound {
        /// Path that was not found.
        path: String,
    },

    /// A line is wider than the grid.
    #[error("La ligne {line} dépasse la largeur maximale ({len} > {max} colonnes)")]
    RowTooLong {
        /// 1-based line number in the source.
        line: usize,
        /// Number of characters on the line, terminator excluded.
        len: usize,
        /// Grid width.
        max: usize,
    },

    /// The slide has more lines than the grid.
    #[error("Trop de lignes : {rows} > {max}")]
    TooManyRows {
        /// Number of lines in the source.
        rows: usize,
        /// Grid height.
        max: usize,
    },

    /// Source exists but could not be read.
    #[error("Lecture impossible de {path} : {source}")]
    Io {
        /// Path being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
