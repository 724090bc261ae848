//! Error type for tree building and layout.
//!
//! Structural problems are detected while the tree is built, before any
//! geometry is computed. The placement passes themselves cannot fail.

use thiserror::Error;

/// Errors that abort a layout run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// No root could be resolved: the explicit root id is not among the
    /// input records, or every record is declared as somebody's child.
    #[error("root node not found{}", root_hint(.requested))]
    RootNotFound {
        /// The explicitly requested root id, if any.
        requested: Option<String>,
    },

    /// More than one record has no parent and no explicit root was given.
    #[error("multiple root candidates ({}); set rootId to pick one", .candidates.join(", "))]
    MultipleRootCandidates {
        /// Ids of every parentless record, in input order.
        candidates: Vec<String>,
    },

    /// Two input records share the same id.
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(String),

    /// A layout option is out of range.
    #[error("invalid layout option `{name}`: {value} (must be finite and positive)")]
    InvalidOption {
        /// Option name as it appears in the options record.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

fn root_hint(requested: &Option<String>) -> String {
    match requested {
        Some(id) => format!(": `{id}` is not in the input"),
        None => ": every node has a parent".to_string(),
    }
}
