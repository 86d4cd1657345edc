//! Pre-flight checks over bound raster inputs.
//!
//! These run before any command is built. A finding is a user-facing
//! message, not an error: the host decides whether to refuse the run.

use crate::{
    interfaces::LayerResolver,
    types::{AlgorithmDescriptor, GridExtent, InputDataType, ParameterKind},
};

/// Checks that no raster input has more than one band (SAGA cannot read
/// multiband layers) and that all raster inputs share the same grid
/// extent, unless the description opted out with `AllowUnmatching`.
pub fn check_before_execution(
    alg: &AlgorithmDescriptor,
    resolver: &dyn LayerResolver,
) -> Option<String> {
    let mut first_extent: Option<GridExtent> = None;

    for param in &alg.parameters {
        let files: Vec<&str> = match (&param.kind, param.value.as_deref()) {
            (ParameterKind::Raster, Some(value)) => vec![value],
            (ParameterKind::MultipleInput(InputDataType::Raster), Some(value)) => {
                value.split(';').collect()
            }
            _ => continue,
        };

        for file in files {
            let Some(layer) = resolver.resolve(file) else {
                continue;
            };
            if layer.band_count > 1 {
                return Some(format!(
                    "Input layer {} has more than one band.\n\
                     Multiband layers are not supported by SAGA",
                    layer.name
                ));
            }
            if alg.allow_unmatching_grid_extents {
                continue;
            }
            if let Some(extent) = layer.extent {
                match first_extent {
                    None => first_extent = Some(extent),
                    Some(seen) if seen != extent => {
                        return Some(
                            "Input layers do not have the same grid extent.".to_string(),
                        );
                    }
                    Some(_) => {}
                }
            }
        }
    }

    None
}
