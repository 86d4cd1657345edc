//! Name sanitation and decoration for SAGA tools and libraries.
//!
//! SAGA library and tool names are terse (`ta_morphometry`, `grid_tools`);
//! the host shows decorated equivalents instead. Decoration is a static
//! lookup that falls through to the raw name when unlisted, so new SAGA
//! libraries keep working without a table update.

/// Characters allowed in internal and command-line identifiers.
const VALID_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789:";

/// Namespace prefix of every algorithm exposed by this provider.
pub const COMMAND_LINE_PREFIX: &str = "saga:";

const GROUP_NAMES: &[(&str, &str)] = &[
    ("climate_tools", "Climate"),
    ("grid_analysis", "Raster analysis"),
    ("grid_calculus", "Raster calculus"),
    ("grid_filter", "Raster filter"),
    ("grid_gridding", "Raster creation"),
    ("grid_tools", "Raster tools"),
    ("grid_visualisation", "Raster visualization"),
    ("imagery_classification", "Image analysis"),
    ("imagery_segmentation", "Image segmentation"),
    ("imagery_tools", "Image tools"),
    ("io_gdal", "Import/Export"),
    ("shapes_grid", "Vector <-> raster"),
    ("shapes_lines", "Vector line tools"),
    ("shapes_points", "Vector point tools"),
    ("shapes_polygons", "Vector polygon tools"),
    ("shapes_tools", "Vector general tools"),
    ("sim_hydrology", "Simulation"),
    ("statistics_grid", "Raster statistics"),
    ("statistics_kriging", "Kriging"),
    ("statistics_regression", "Regression"),
    ("ta_channels", "Terrain channels"),
    ("ta_hydrology", "Terrain hydrology"),
    ("ta_lighting", "Terrain lighting"),
    ("ta_morphometry", "Terrain morphometry"),
    ("ta_preprocessor", "Terrain preprocessing"),
    ("table_calculus", "Table calculus"),
    ("table_tools", "Table tools"),
];

const ALGORITHM_NAMES: &[(&str, &str)] = &[
    ("Flow Accumulation (Top-Down)", "Catchment area"),
    ("Flow Accumulation (Recursive)", "Catchment area (recursive)"),
    ("Flow Accumulation (Flow Tracing)", "Catchment area (flow tracing)"),
];

/// Strips every character outside the identifier alphabet.
pub fn sanitize(name: &str) -> String {
    name.chars().filter(|c| VALID_CHARS.contains(*c)).collect()
}

/// Identifier the host uses to invoke the algorithm:
/// the namespace prefix plus the sanitized, lower-cased raw name.
pub fn command_line_name(raw_name: &str) -> String {
    format!("{}{}", COMMAND_LINE_PREFIX, sanitize(raw_name).to_lowercase())
}

/// Decorated display name of a tool; the raw name when unlisted.
pub fn decorated_algorithm_name(name: &str) -> &str {
    ALGORITHM_NAMES
        .iter()
        .find(|(raw, _)| *raw == name)
        .map(|(_, decorated)| *decorated)
        .unwrap_or(name)
}

/// Decorated display name of a SAGA library; the raw name when unlisted.
pub fn decorated_group_name(name: &str) -> &str {
    GROUP_NAMES
        .iter()
        .find(|(raw, _)| *raw == name)
        .map(|(_, decorated)| *decorated)
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_invalid_chars() {
        assert_eq!(sanitize("Slope, Aspect, Curvature"), "SlopeAspectCurvature");
        assert_eq!(sanitize("a-b_c d(e)"), "abcde");
    }

    #[test]
    fn test_command_line_name() {
        assert_eq!(
            command_line_name("Slope, Aspect, Curvature"),
            "saga:slopeaspectcurvature"
        );
    }

    #[test]
    fn test_group_decoration_falls_through() {
        assert_eq!(decorated_group_name("ta_morphometry"), "Terrain morphometry");
        assert_eq!(decorated_group_name("unknown_library"), "unknown_library");
    }

    #[test]
    fn test_algorithm_decoration_falls_through() {
        assert_eq!(
            decorated_algorithm_name("Flow Accumulation (Top-Down)"),
            "Catchment area"
        );
        assert_eq!(decorated_algorithm_name("RGB Composite"), "RGB Composite");
    }
}
