//! Output formats
//!
//!     Serializers for parsed trees, looked up by name through the
//!     [`FormatRegistry`](registry::FormatRegistry):
//!
//!         - `print`: the fully parenthesized source form (see
//!           [print](crate::pratt::visitor::print)).
//!         - `treeviz`: one line per node, see [treeviz](treeviz).
//!         - `json`, `yaml`: the [`AstSnapshot`] of the tree through serde.

pub mod registry;
pub mod treeviz;

use crate::pratt::ast::{snapshot_node, AstNode, AstSnapshot};
use crate::pratt::visitor::print::print;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};

pub struct PrintFormatter;

impl Formatter for PrintFormatter {
    fn name(&self) -> &str {
        "print"
    }

    fn serialize(&self, tree: &AstNode) -> Result<String, FormatError> {
        Ok(format!("{}\n", print(tree)))
    }

    fn description(&self) -> &str {
        "Fully parenthesized source form"
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &AstNode) -> Result<String, FormatError> {
        let snapshot: AstSnapshot = snapshot_node(tree);
        serde_json::to_string_pretty(&snapshot)
            .map(|json| json + "\n")
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Tree snapshot as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tree: &AstNode) -> Result<String, FormatError> {
        serde_yaml::to_string(&snapshot_node(tree))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Tree snapshot as YAML"
    }
}
