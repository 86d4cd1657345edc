use super::{Output, Parameter};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Synthetic parameter registered for the `Extent` directive.
pub const OUTPUT_EXTENT: &str = "OUTPUT_EXTENT";

/// Parameter whose value, when present, carries the output cell size.
pub const USER_SIZE: &str = "USER_SIZE";

/// Everything the description file says about one SAGA tool.
///
/// Built once per algorithm registration by the description parser and
/// immutable afterwards, except for parameter values and output
/// destinations which callers bind before each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmDescriptor {
    /// Sanitized lowercase identifier used internally by the host.
    pub name: String,
    /// Decorated, human readable name.
    pub display_name: String,
    /// Identifier the host uses to invoke the algorithm, e.g. `saga:slopeaspectcurvature`.
    pub command_line_name: String,
    /// Name of the tool as SAGA knows it on its own console.
    pub saga_name: String,
    /// Undecorated SAGA library name; first token of the main command.
    pub group: String,
    /// Decorated group name for display.
    pub display_group: String,
    pub parameters: Vec<Parameter>,
    pub outputs: Vec<Output>,
    /// Literal tokens from `Hardcoded|` directives, included verbatim.
    pub hardcoded_tokens: Vec<String>,
    /// SAGA field names recorded by an `Extent` directive, in order.
    pub extent_field_names: Option<[String; 4]>,
    /// Set by the `AllowUnmatching` directive; disables the grid extent
    /// pre-flight check.
    pub allow_unmatching_grid_extents: bool,
    /// The description file this descriptor was parsed from.
    pub description_file: PathBuf,
}

impl AlgorithmDescriptor {
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.name == name)
    }

    /// Binds a parameter value. Returns false when no parameter with the
    /// given flag name exists.
    pub fn set_parameter_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.parameter_mut(name) {
            Some(param) => {
                param.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.iter().find(|o| o.name == name)
    }

    pub fn set_output_destination(&mut self, name: &str, destination: impl Into<String>) -> bool {
        match self.outputs.iter_mut().find(|o| o.name == name) {
            Some(out) => {
                out.destination = Some(destination.into());
                true
            }
            None => false,
        }
    }

    /// Cell size of the output grid, taken from the `USER_SIZE` parameter
    /// when one is bound; 0 otherwise.
    pub fn output_cell_size(&self) -> f64 {
        self.parameters
            .iter()
            .find(|p| p.name == USER_SIZE && p.value.is_some())
            .and_then(|p| p.value.as_deref())
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    /// A pristine copy for a new execution context, re-read from the same
    /// description file so no values leak between runs.
    pub fn fresh_copy(&self) -> Result<Self> {
        crate::parser::parse_description_file(&self.description_file)
    }
}
