//! Layer export bookkeeping for one algorithm run.

use crate::{
    cache::SessionExportCache,
    error::Result,
    interfaces::{LayerExporter, LayerResolver, TempFileAllocator},
    naming,
    translate::NATIVE_GRID_EXTENSION,
};
use std::collections::HashMap;
use std::path::Path;

/// Per-run view over the collaborators involved in materializing inputs.
///
/// `exported` maps each original data reference to the file actually
/// handed to SAGA; it starts empty for every run. Raster exports also go
/// through the process-wide [`SessionExportCache`] so the same source is
/// not converted twice while its exported file is still on disk.
pub struct ExportContext<'a> {
    pub resolver: &'a dyn LayerResolver,
    pub exporter: &'a dyn LayerExporter,
    pub temp: &'a dyn TempFileAllocator,
    pub session_cache: &'a mut SessionExportCache,
    pub exported: HashMap<String, String>,
}

impl<'a> ExportContext<'a> {
    pub fn new(
        resolver: &'a dyn LayerResolver,
        exporter: &'a dyn LayerExporter,
        temp: &'a dyn TempFileAllocator,
        session_cache: &'a mut SessionExportCache,
    ) -> Self {
        Self {
            resolver,
            exporter,
            temp,
            session_cache,
            exported: HashMap::new(),
        }
    }

    /// Schedules conversion of a raster source into the native grid
    /// format. Returns the deferred engine command when a conversion run
    /// is needed, or `None` when a previous export is still usable.
    pub fn export_raster_layer(&mut self, source: &str) -> Result<Option<String>> {
        if let Some(dest) = self.session_cache.lookup(source) {
            self.exported.insert(source.to_string(), dest);
            return Ok(None);
        }

        let base_name = match self.resolver.resolve(source) {
            Some(layer) => layer.name,
            None => Path::new(source)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let mut base_name = naming::sanitize(&base_name);
        if base_name.is_empty() {
            base_name = "layer".to_string();
        }

        let destination = self
            .temp
            .new_temp_file_in_shared_folder(&format!("{base_name}.{NATIVE_GRID_EXTENSION}"))?;
        let destination = destination.to_string_lossy().into_owned();
        self.exported.insert(source.to_string(), destination.clone());
        self.session_cache.insert(source, destination.clone());

        Ok(Some(format!(
            "io_gdal 0 -TRANSFORM 1 -RESAMPLING 0 -GRIDS \"{destination}\" -FILES \"{source}\""
        )))
    }

    /// Materializes a vector reference through the host exporter when it
    /// is backed by a live layer. A plain file path is accepted only in
    /// the native vector format.
    pub fn export_vector_layer(&mut self, source: &str) -> Result<()> {
        match self.resolver.resolve(source) {
            Some(layer) => {
                let path = self.exporter.export_vector(&layer)?;
                self.exported
                    .insert(source.to_string(), path.to_string_lossy().into_owned());
                Ok(())
            }
            None => self.require_native_vector(source),
        }
    }

    /// Same as [`export_vector_layer`], for tables. Tables ride on the
    /// vector container format.
    ///
    /// [`export_vector_layer`]: ExportContext::export_vector_layer
    pub fn export_table(&mut self, source: &str) -> Result<()> {
        match self.resolver.resolve(source) {
            Some(layer) => {
                let path = self.exporter.export_table(&layer)?;
                self.exported
                    .insert(source.to_string(), path.to_string_lossy().into_owned());
                Ok(())
            }
            None => self.require_native_vector(source),
        }
    }

    fn require_native_vector(&self, source: &str) -> Result<()> {
        if source.ends_with(crate::translate::NATIVE_VECTOR_EXTENSION) {
            Ok(())
        } else {
            Err(crate::error::Error::UnsupportedFormat(source.to_string()))
        }
    }
}
