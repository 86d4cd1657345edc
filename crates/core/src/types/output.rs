use crate::{error::Result, interfaces::TempFileAllocator};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A result slot of a SAGA tool.
///
/// Rendered on the command line as `-NAME "<path>"`. The destination may
/// be set by the caller before a run; otherwise a compatible file is
/// allocated in the shared temp folder the first time the path is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    pub description: String,
    pub kind: OutputKind,
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputKind {
    Raster,
    Vector,
    Table,
    File,
}

impl OutputKind {
    /// Extensions SAGA can write directly for this output kind.
    pub fn compatible_extensions(&self) -> &'static [&'static str] {
        match self {
            OutputKind::Raster => &["tif", "sdat", "sgrd"],
            OutputKind::Vector => &["shp"],
            OutputKind::Table => &["dbf", "txt", "csv"],
            OutputKind::File => &["txt", "html"],
        }
    }

    pub fn default_extension(&self) -> &'static str {
        match self {
            OutputKind::Raster => "tif",
            OutputKind::Vector => "shp",
            OutputKind::Table => "dbf",
            OutputKind::File => "txt",
        }
    }

    /// Raster and vector outputs are spatial data and get a `.prj`
    /// sidecar when a coordinate reference system is attached to a run.
    pub fn is_spatial(&self) -> bool {
        matches!(self, OutputKind::Raster | OutputKind::Vector)
    }
}

impl Output {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            destination: None,
        }
    }

    /// Resolves the destination file for this run, allocating one when the
    /// caller did not provide a path SAGA can write to. The result is
    /// remembered so later steps (follow-up commands, sidecar files) see
    /// the same path.
    pub fn resolve_destination(&mut self, temp: &dyn TempFileAllocator) -> Result<String> {
        if let Some(dest) = &self.destination {
            let ext = Path::new(dest)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_ascii_lowercase();
            if self.kind.compatible_extensions().contains(&ext.as_str()) {
                return Ok(dest.clone());
            }
        }
        let file_name = format!("{}.{}", self.name.to_ascii_lowercase(), self.kind.default_extension());
        let path = temp.new_temp_file_in_shared_folder(&file_name)?;
        let path = path.to_string_lossy().into_owned();
        self.destination = Some(path.clone());
        Ok(path)
    }
}
