//! Line-oriented description file parsing.
//!
//! A description file declares one SAGA tool: line 1 is the name with an
//! optional `|saga_command` alias, line 2 the SAGA library, and every
//! following non-blank line a directive (`Hardcoded|`, `Parameter...`,
//! `AllowUnmatching`, `Extent `) or an output declaration. Parsing stops
//! at the first blank line.

pub mod params;

use crate::{
    error::{Error, Result},
    naming,
    types::{AlgorithmDescriptor, Parameter, ParameterKind, OUTPUT_EXTENT},
};
use std::fs;
use std::path::Path;

/// Reads and parses a description file into a descriptor.
pub fn parse_description_file(path: &Path) -> Result<AlgorithmDescriptor> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::ParseError(format!("cannot read {}: {e}", path.display())))?;
    parse_description(&text, path)
}

pub(crate) fn parse_description(text: &str, path: &Path) -> Result<AlgorithmDescriptor> {
    let mut lines = text.lines().map(str::trim);

    let first = lines
        .next()
        .filter(|l| !l.is_empty())
        .ok_or_else(|| Error::ParseError(format!("{}: missing name line", path.display())))?;
    // `name|command` aliases the tool under a different SAGA console name
    let (raw_name, saga_name) = match first.split_once('|') {
        Some((name, command)) => (name.trim(), command.trim().to_string()),
        None => (first, first.to_string()),
    };

    let command_line_name = naming::command_line_name(raw_name);
    let display_name = naming::decorated_algorithm_name(raw_name).to_string();
    let name = naming::sanitize(&display_name).to_lowercase();

    let group = lines
        .next()
        .filter(|l| !l.is_empty())
        .ok_or_else(|| Error::ParseError(format!("{}: missing group line", path.display())))?
        .to_string();
    let display_group = naming::decorated_group_name(&group).to_string();

    let mut parameters = Vec::new();
    let mut outputs = Vec::new();
    let mut hardcoded_tokens = Vec::new();
    let mut extent_field_names = None;
    let mut allow_unmatching_grid_extents = false;

    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some(token) = line.strip_prefix("Hardcoded|") {
            hardcoded_tokens.push(token.to_string());
        } else if line.starts_with("Parameter") {
            parameters.push(params::parameter_from_line(line)?);
        } else if line.starts_with("AllowUnmatching") {
            allow_unmatching_grid_extents = true;
        } else if let Some(rest) = line.strip_prefix("Extent ") {
            // An extent directive wraps 4 SAGA numerical fields in a
            // single synthetic bounding box parameter
            let fields: Vec<&str> = rest.split_whitespace().collect();
            let [n1, n2, n3, n4] = fields.as_slice() else {
                return Err(Error::ParseError(format!(
                    "Extent directive needs exactly 4 field names, got {}: {line}",
                    fields.len()
                )));
            };
            extent_field_names = Some([
                n1.to_string(),
                n2.to_string(),
                n3.to_string(),
                n4.to_string(),
            ]);
            parameters.push(Parameter::new(OUTPUT_EXTENT, "Output extent", ParameterKind::Extent));
        } else {
            outputs.push(params::output_from_line(line)?);
        }
    }

    Ok(AlgorithmDescriptor {
        name,
        display_name,
        command_line_name,
        saga_name,
        group,
        display_group,
        parameters,
        outputs,
        hardcoded_tokens,
        extent_field_names,
        allow_unmatching_grid_extents,
        description_file: path.to_path_buf(),
    })
}
