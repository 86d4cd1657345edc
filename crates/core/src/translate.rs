//! Per-variant translation of parameters into command line fragments.
//!
//! Translation happens in two passes over a descriptor. The first pass
//! ([`schedule_exports`]) decides, per parameter, whether the bound value
//! needs materializing in an engine-native format and rewrites values in
//! place where a companion file makes re-export unnecessary. The second
//! pass ([`render_parameter`]) turns each bound parameter into its
//! `-NAME value` fragment.

use crate::{
    error::{Error, Result},
    export::ExportContext,
    interfaces::TempFileAllocator,
    types::{AlgorithmDescriptor, InputDataType, Parameter, ParameterKind},
};
use std::collections::HashMap;

/// Grid format SAGA ingests directly.
pub const NATIVE_GRID_EXTENSION: &str = "sgrd";

/// Data half of a native grid; the header sibling is derived by swapping
/// the extension, so no re-export is needed.
pub const COMPANION_GRID_EXTENSION: &str = "sdat";

/// Vector format SAGA ingests directly.
pub const NATIVE_VECTOR_EXTENSION: &str = "shp";

/// First pass: walks all bound parameters, rewrites companion grid
/// references in place, exports what SAGA cannot read, and returns the
/// deferred raster conversion commands to run before the main invocation.
///
/// Vector and table exports happen synchronously inside this call; only
/// raster conversions are deferred, because they are themselves engine
/// invocations.
pub fn schedule_exports(
    alg: &mut AlgorithmDescriptor,
    ctx: &mut ExportContext<'_>,
) -> Result<Vec<String>> {
    let mut commands = Vec::new();

    for param in &mut alg.parameters {
        let Some(value) = param.value.clone() else {
            continue;
        };
        match &param.kind {
            ParameterKind::Raster => {
                if let Some(rewritten) = companion_rewrite(&value) {
                    param.value = Some(rewritten);
                } else if !value.ends_with(NATIVE_GRID_EXTENSION) {
                    if let Some(command) = ctx.export_raster_layer(&value)? {
                        commands.push(command);
                    }
                }
            }
            ParameterKind::Vector => ctx.export_vector_layer(&value)?,
            ParameterKind::Table => ctx.export_table(&value)?,
            ParameterKind::MultipleInput(datatype) => {
                if value.is_empty() {
                    continue;
                }
                match datatype {
                    InputDataType::Raster => {
                        let mut items: Vec<String> =
                            value.split(';').map(str::to_string).collect();
                        for item in &mut items {
                            if let Some(rewritten) = companion_rewrite(item) {
                                *item = rewritten;
                            } else if !item.ends_with(NATIVE_GRID_EXTENSION) {
                                if let Some(command) = ctx.export_raster_layer(item)? {
                                    commands.push(command);
                                }
                            }
                        }
                        param.value = Some(items.join(";"));
                    }
                    d if d.is_vector() => {
                        for item in value.split(';') {
                            ctx.export_vector_layer(item)?;
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    Ok(commands)
}

/// Swaps a companion grid reference for its native header sibling.
/// Same base name, different extension; no export involved.
fn companion_rewrite(value: &str) -> Option<String> {
    value
        .strip_suffix(COMPANION_GRID_EXTENSION)
        .map(|stem| format!("{stem}{NATIVE_GRID_EXTENSION}"))
}

/// Second pass: renders one bound parameter as its command line
/// fragment. Returns `None` when the parameter carries no value.
pub fn render_parameter(
    param: &Parameter,
    extent_field_names: Option<&[String; 4]>,
    cell_size: f64,
    exported: &HashMap<String, String>,
    temp: &dyn TempFileAllocator,
) -> Result<Option<String>> {
    let Some(value) = param.value.as_deref() else {
        return Ok(None);
    };

    let fragment = match &param.kind {
        ParameterKind::Raster | ParameterKind::Vector | ParameterKind::Table => {
            let path = exported.get(value).map(String::as_str).unwrap_or(value);
            format!("-{} \"{}\"", param.name, path)
        }
        ParameterKind::MultipleInput(_) => {
            let mut list = value.to_string();
            for (source, destination) in exported {
                list = list.replace(source.as_str(), destination.as_str());
            }
            format!("-{} \"{}\"", param.name, list)
        }
        ParameterKind::Boolean => {
            let rendered = if param.is_truthy() { "true" } else { "false" };
            format!("-{} {}", param.name.trim(), rendered)
        }
        ParameterKind::FixedTable { columns } => {
            let path = write_fixed_table(columns, value, temp)?;
            format!("-{} \"{}\"", param.name, path)
        }
        ParameterKind::Extent => {
            let names = extent_field_names.ok_or_else(|| {
                Error::Other(format!(
                    "parameter {} is an extent but the description declares no extent field names",
                    param.name
                ))
            })?;
            render_extent(names, value, cell_size)?
        }
        ParameterKind::Number | ParameterKind::Selection { .. } => {
            format!("-{} {}", param.name, value)
        }
        ParameterKind::Generic(_) => format!("-{} \"{}\"", param.name, value),
    };

    Ok(Some(fragment))
}

/// SAGA is cell-center based, not corner based, so each bounding box
/// field is shifted by half the output cell size, inward on the maxima.
fn render_extent(names: &[String; 4], value: &str, cell_size: f64) -> Result<String> {
    let numbers = value
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<f64>, _>>()
        .map_err(|e| Error::Other(format!("malformed extent value {value:?}: {e}")))?;
    if numbers.len() != 4 {
        return Err(Error::Other(format!(
            "extent value must have 4 numbers, got {}: {value:?}",
            numbers.len()
        )));
    }

    let half_cell = cell_size / 2.0;
    let offsets = [half_cell, -half_cell, half_cell, -half_cell];
    let fragments: Vec<String> = names
        .iter()
        .zip(numbers.iter().zip(offsets.iter()))
        .map(|(name, (number, offset))| format!("-{} {}", name, number + offset))
        .collect();
    Ok(fragments.join(" "))
}

/// Serializes a fixed table payload into a tab-delimited temp file:
/// a header row of column names, then the flat value list in rows of
/// three.
fn write_fixed_table(
    columns: &[String],
    value: &str,
    temp: &dyn TempFileAllocator,
) -> Result<String> {
    let path = temp.new_temp_file("txt")?;
    let mut contents = columns.join("\t");
    contents.push('\n');
    let values: Vec<&str> = value.split(',').map(str::trim).collect();
    for row in values.chunks(3) {
        contents.push_str(&row.join("\t"));
        contents.push('\n');
    }
    std::fs::write(&path, contents)?;
    Ok(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SystemTempAllocator;
    use crate::types::Parameter;
    use tempfile::TempDir;

    fn temp_allocator(dir: &TempDir) -> SystemTempAllocator {
        SystemTempAllocator::with_root(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_companion_rewrite_keeps_base_name() {
        assert_eq!(
            companion_rewrite("/data/dem.sdat"),
            Some("/data/dem.sgrd".to_string())
        );
        assert_eq!(companion_rewrite("/data/dem.tif"), None);
    }

    #[test]
    fn test_boolean_rendering() {
        let dir = TempDir::new().unwrap();
        let temp = temp_allocator(&dir);
        let exported = HashMap::new();

        let param = Parameter::new("NORM", "Normalise", ParameterKind::Boolean).with_value("true");
        let fragment = render_parameter(&param, None, 0.0, &exported, &temp)
            .unwrap()
            .unwrap();
        assert_eq!(fragment, "-NORM true");

        let param = Parameter::new("NORM", "Normalise", ParameterKind::Boolean).with_value("no");
        let fragment = render_parameter(&param, None, 0.0, &exported, &temp)
            .unwrap()
            .unwrap();
        assert_eq!(fragment, "-NORM false");
    }

    #[test]
    fn test_unbound_parameter_is_omitted() {
        let dir = TempDir::new().unwrap();
        let temp = temp_allocator(&dir);
        let param = Parameter::new("GRID", "Grid", ParameterKind::Raster);
        assert!(render_parameter(&param, None, 0.0, &HashMap::new(), &temp)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_extent_offsets_alternate_sign() {
        let dir = TempDir::new().unwrap();
        let temp = temp_allocator(&dir);
        let names = [
            "XMIN".to_string(),
            "XMAX".to_string(),
            "YMIN".to_string(),
            "YMAX".to_string(),
        ];
        let param = Parameter::new("OUTPUT_EXTENT", "Output extent", ParameterKind::Extent)
            .with_value("100,200,300,400");

        let fragment = render_parameter(&param, Some(&names), 10.0, &HashMap::new(), &temp)
            .unwrap()
            .unwrap();
        assert_eq!(fragment, "-XMIN 105 -XMAX 195 -YMIN 305 -YMAX 395");
    }

    #[test]
    fn test_extent_without_field_names_is_an_error() {
        let dir = TempDir::new().unwrap();
        let temp = temp_allocator(&dir);
        let param = Parameter::new("OUTPUT_EXTENT", "Output extent", ParameterKind::Extent)
            .with_value("1,2,3,4");
        assert!(render_parameter(&param, None, 0.0, &HashMap::new(), &temp).is_err());
    }

    #[test]
    fn test_fixed_table_round_trip() {
        let dir = TempDir::new().unwrap();
        let temp = temp_allocator(&dir);
        let param = Parameter::new(
            "RECLASS",
            "Reclassify",
            ParameterKind::FixedTable {
                columns: vec!["X".into(), "Y".into(), "Z".into()],
            },
        )
        .with_value("1,2,3,4,5,6");

        let fragment = render_parameter(&param, None, 0.0, &HashMap::new(), &temp)
            .unwrap()
            .unwrap();
        let path = fragment
            .strip_prefix("-RECLASS \"")
            .and_then(|s| s.strip_suffix('"'))
            .unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, "X\tY\tZ\n1\t2\t3\n4\t5\t6\n");
    }

    #[test]
    fn test_number_and_selection_render_unquoted() {
        let dir = TempDir::new().unwrap();
        let temp = temp_allocator(&dir);
        let exported = HashMap::new();

        let param = Parameter::new("LEVEL", "Level", ParameterKind::Number).with_value("3.5");
        assert_eq!(
            render_parameter(&param, None, 0.0, &exported, &temp).unwrap().unwrap(),
            "-LEVEL 3.5"
        );

        let param = Parameter::new(
            "METHOD",
            "Method",
            ParameterKind::Selection { options: vec![] },
        )
        .with_value("1");
        assert_eq!(
            render_parameter(&param, None, 0.0, &exported, &temp).unwrap().unwrap(),
            "-METHOD 1"
        );
    }

    #[test]
    fn test_generic_renders_quoted() {
        let dir = TempDir::new().unwrap();
        let temp = temp_allocator(&dir);
        let param = Parameter::new("FIELD", "Attribute", ParameterKind::Generic("TableField".into()))
            .with_value("ELEV");
        assert_eq!(
            render_parameter(&param, None, 0.0, &HashMap::new(), &temp).unwrap().unwrap(),
            "-FIELD \"ELEV\""
        );
    }

    #[test]
    fn test_data_parameters_render_exported_path() {
        let dir = TempDir::new().unwrap();
        let temp = temp_allocator(&dir);
        let mut exported = HashMap::new();
        exported.insert("/data/dem.tif".to_string(), "/tmp/dem.sgrd".to_string());

        let param =
            Parameter::new("GRID", "Grid", ParameterKind::Raster).with_value("/data/dem.tif");
        assert_eq!(
            render_parameter(&param, None, 0.0, &exported, &temp).unwrap().unwrap(),
            "-GRID \"/tmp/dem.sgrd\""
        );

        let param = Parameter::new(
            "GRIDS",
            "Grids",
            ParameterKind::MultipleInput(InputDataType::Raster),
        )
        .with_value("/data/dem.tif;/data/other.sgrd");
        assert_eq!(
            render_parameter(&param, None, 0.0, &exported, &temp).unwrap().unwrap(),
            "-GRIDS \"/tmp/dem.sgrd;/data/other.sgrd\""
        );
    }
}
