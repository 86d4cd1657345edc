use serde::{Deserialize, Serialize};

/// A live data layer handed back by the host's reference resolver.
///
/// Only the properties the adapter actually inspects are modelled here:
/// the display name (used to derive export file names), the kind, and for
/// rasters the band count plus grid geometry used by pre-flight checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
    pub band_count: usize,
    pub extent: Option<GridExtent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Raster,
    Vector,
    Table,
}

/// Spatial bounding box plus row/column dimensions of a raster.
///
/// SAGA requires all input grids of a tool to share this triple unless
/// the description opts out with `AllowUnmatching`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridExtent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub rows: u32,
    pub cols: u32,
}

impl Layer {
    pub fn raster(name: impl Into<String>, band_count: usize, extent: GridExtent) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Raster,
            band_count,
            extent: Some(extent),
        }
    }

    pub fn vector(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Vector,
            band_count: 0,
            extent: None,
        }
    }

    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Table,
            band_count: 0,
            extent: None,
        }
    }
}
