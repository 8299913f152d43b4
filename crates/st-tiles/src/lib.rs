/// Tile conversion engine for slidetile.
///
/// Maps slide characters to tile indices and serializes tile grids into
/// assembly data blocks.

pub mod encoder;
pub mod mapper;

pub use encoder::GridEncoder;
pub use mapper::{GridLayout, TileMapper};
