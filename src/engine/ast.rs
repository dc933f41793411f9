//! Query document AST
//!
//! Only what the resolvers need: one anonymous or named query operation made
//! of fields with optional aliases, literal arguments and sub-selections.
//!
//! ```text
//! query People {
//!   young: infoFiltrada(edadMax: 25, ciudad: null) { id nombre }
//!   infoRangoEdadesPorCiudad { Ciudad RangoEdades { EdadMin EdadMax } }
//! }
//! ```

use crate::query::Arguments;

/// A parsed query document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Optional operation name
    pub operation_name: Option<String>,
    /// Root selection set
    pub selection: Vec<Field>,
}

/// A selected field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Response key override
    pub alias: Option<String>,
    /// Field name
    pub name: String,
    /// Literal arguments
    pub arguments: Arguments,
    /// Sub-selection, empty for leaf fields
    pub selection: Vec<Field>,
}

impl Field {
    /// Create a leaf field without arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
            arguments: Arguments::new(),
            selection: Vec::new(),
        }
    }

    /// Key under which the field's value appears in the response
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn is_leaf(&self) -> bool {
        self.selection.is_empty()
    }
}
