//! Parameter and output line grammar.
//!
//! Both kinds of line are `|`-delimited: a kind token, the SAGA flag
//! name, a description, then kind-specific fields. Unknown parameter
//! kinds degrade to [`ParameterKind::Generic`] so a newer description
//! file does not break parsing; the translator will render them quoted.

use crate::{
    error::{Error, Result},
    types::{InputDataType, Output, OutputKind, Parameter, ParameterKind},
};

pub(crate) fn parameter_from_line(line: &str) -> Result<Parameter> {
    let tokens: Vec<&str> = line.split('|').map(str::trim).collect();
    if tokens.len() < 3 {
        return Err(Error::ParseError(format!(
            "parameter line needs at least kind, name and description: {line}"
        )));
    }
    let kind_token = tokens[0].strip_prefix("Parameter").unwrap_or(tokens[0]);
    let name = tokens[1];
    let description = tokens[2];

    let mut default_value = None;
    let kind = match kind_token {
        "Raster" => ParameterKind::Raster,
        "Vector" => ParameterKind::Vector,
        "Table" => ParameterKind::Table,
        "MultipleInput" => {
            let code = tokens
                .get(3)
                .and_then(|t| t.parse::<i32>().ok())
                .ok_or_else(|| {
                    Error::ParseError(format!("MultipleInput needs a datatype code: {line}"))
                })?;
            let datatype = InputDataType::from_code(code).ok_or_else(|| {
                Error::ParseError(format!("unknown MultipleInput datatype {code}: {line}"))
            })?;
            ParameterKind::MultipleInput(datatype)
        }
        "Boolean" => {
            if let Some(default) = tokens.get(3) {
                default_value = Some(default.to_lowercase());
            }
            ParameterKind::Boolean
        }
        "Number" => {
            // ParameterNumber|NAME|Description|min|max|default
            if let Some(default) = tokens.get(5) {
                if default.parse::<f64>().is_ok() {
                    default_value = Some(default.to_string());
                }
            }
            ParameterKind::Number
        }
        "Selection" => {
            let options = tokens
                .get(3)
                .map(|t| t.split(';').map(|o| o.trim().to_string()).collect())
                .unwrap_or_default();
            ParameterKind::Selection { options }
        }
        "FixedTable" => {
            // ParameterFixedTable|NAME|Description|rows|col;col;col|fixed
            let columns: Vec<String> = tokens
                .get(4)
                .map(|t| t.split(';').map(|c| c.trim().to_string()).collect())
                .unwrap_or_default();
            if columns.is_empty() {
                return Err(Error::ParseError(format!(
                    "FixedTable needs column names: {line}"
                )));
            }
            ParameterKind::FixedTable { columns }
        }
        "Extent" => ParameterKind::Extent,
        other => ParameterKind::Generic(other.to_string()),
    };

    let mut param = Parameter::new(name, description, kind);
    param.value = default_value;
    Ok(param)
}

pub(crate) fn output_from_line(line: &str) -> Result<Output> {
    let tokens: Vec<&str> = line.split('|').map(str::trim).collect();
    if tokens.len() < 3 {
        return Err(Error::ParseError(format!(
            "output line needs kind, name and description: {line}"
        )));
    }
    let kind = match tokens[0] {
        "OutputRaster" => OutputKind::Raster,
        "OutputVector" => OutputKind::Vector,
        "OutputTable" => OutputKind::Table,
        _ => OutputKind::File,
    };
    Ok(Output::new(tokens[1], tokens[2], kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_kinds() {
        let p = parameter_from_line("ParameterRaster|GRID|Grid|False").unwrap();
        assert_eq!(p.kind, ParameterKind::Raster);
        assert_eq!(p.name, "GRID");
        assert!(p.value.is_none());

        let p = parameter_from_line("ParameterMultipleInput|LAYERS|Layers|-1|True").unwrap();
        assert_eq!(p.kind, ParameterKind::MultipleInput(InputDataType::VectorAny));

        let p = parameter_from_line("ParameterTableField|FIELD|Attribute|TABLE|-1|False").unwrap();
        assert_eq!(p.kind, ParameterKind::Generic("TableField".to_string()));
    }

    #[test]
    fn test_boolean_default_is_bound() {
        let p = parameter_from_line("ParameterBoolean|NORM|Normalise|True").unwrap();
        assert_eq!(p.value.as_deref(), Some("true"));
        assert!(p.is_truthy());
    }

    #[test]
    fn test_number_default() {
        let p = parameter_from_line("ParameterNumber|USER_SIZE|Cellsize|0|None|100.0").unwrap();
        assert_eq!(p.value.as_deref(), Some("100.0"));

        let p = parameter_from_line("ParameterNumber|LEVEL|Level|0|None|None").unwrap();
        assert!(p.value.is_none());
    }

    #[test]
    fn test_fixed_table_columns() {
        let p = parameter_from_line(
            "ParameterFixedTable|RECLASS|Reclassify|3|minimum;maximum;new|False",
        )
        .unwrap();
        assert_eq!(
            p.kind,
            ParameterKind::FixedTable {
                columns: vec!["minimum".into(), "maximum".into(), "new".into()]
            }
        );
    }

    #[test]
    fn test_malformed_lines() {
        assert!(parameter_from_line("ParameterRaster|GRID").is_err());
        assert!(parameter_from_line("ParameterMultipleInput|X|Layers|notacode").is_err());
        assert!(output_from_line("OutputRaster|RESULT").is_err());
    }

    #[test]
    fn test_output_kinds() {
        assert_eq!(
            output_from_line("OutputVector|SHAPES|Result shapes").unwrap().kind,
            OutputKind::Vector
        );
        assert_eq!(
            output_from_line("OutputHTML|REPORT|Report").unwrap().kind,
            OutputKind::File
        );
    }
}
