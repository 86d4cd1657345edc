use serde::{Deserialize, Serialize};

/// A typed input slot of a SAGA tool, as declared in its description file.
///
/// The flag name is the SAGA-native identifier passed on the command line
/// (`-NAME value`). The value is a string whose interpretation depends on
/// the kind: a file reference or layer URI for data inputs, `true`/`false`
/// for booleans, a number, a `;`-delimited list for multiple inputs, or a
/// `,`-delimited flat payload for fixed tables and extents. A value of
/// `None` means the parameter is omitted from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    pub kind: ParameterKind,
    pub value: Option<String>,
}

/// Closed set of parameter kinds understood by the translator.
///
/// Adding a variant forces every `match` over parameters to be revisited,
/// which is exactly what we want when SAGA grows a new input type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterKind {
    Raster,
    Vector,
    Table,
    MultipleInput(InputDataType),
    Boolean,
    Number,
    Selection { options: Vec<String> },
    FixedTable { columns: Vec<String> },
    Extent,
    /// Anything the description declares that we have no special handling
    /// for; rendered quoted as-is. Keeps the original kind token around
    /// for display purposes.
    Generic(String),
}

/// Element type of a `MultipleInput` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputDataType {
    Raster,
    VectorAny,
    VectorPoint,
    VectorLine,
    VectorPolygon,
    Table,
}

impl InputDataType {
    /// Decodes the numeric datatype code used in description files.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(InputDataType::VectorAny),
            0 => Some(InputDataType::VectorPoint),
            1 => Some(InputDataType::VectorLine),
            2 => Some(InputDataType::VectorPolygon),
            3 => Some(InputDataType::Raster),
            5 => Some(InputDataType::Table),
            _ => None,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            InputDataType::VectorAny
                | InputDataType::VectorPoint
                | InputDataType::VectorLine
                | InputDataType::VectorPolygon
        )
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Boolean parameters treat anything but a literal true as false.
    pub fn is_truthy(&self) -> bool {
        match &self.value {
            Some(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            None => false,
        }
    }
}
