use crate::{error::Result, types::Layer};
use std::path::PathBuf;

/// Materializes live layers as files SAGA can read.
///
/// Both operations are synchronous: when they return, the file exists on
/// disk. Vector layers land in the engine's native vector format (`shp`);
/// tables piggy-back on the same container format.
pub trait LayerExporter {
    fn export_vector(&self, layer: &Layer) -> Result<PathBuf>;

    fn export_table(&self, layer: &Layer) -> Result<PathBuf>;
}
