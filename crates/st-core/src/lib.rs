/// Tables, grid types, configuration and errors for slidetile.
///
/// This crate contains all shared types used across the slidetile workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod grid;

pub use charset::{TileTable, WindowGlyphTable};
pub use config::ConvertConfig;
pub use error::ConvertError;
pub use grid::{TileGrid, TileIndex};
