/// Slide sources for slidetile (single files and slide folders).

pub mod folder_batch;
pub mod slide;
