//! Layout options.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Default minimum horizontal gap between sibling subtrees.
pub const DEFAULT_MINIMAL_COLUMN_DISTANCE: f64 = 50.0;

/// Default vertical distance between depth levels.
pub const DEFAULT_MINIMAL_ROW_DISTANCE: f64 = 100.0;

/// Per-run configuration for the tidy tree layout.
///
/// Deserializes from a camelCase record; the snake_case names
/// `root_id`, `minimal_x_distance` and `minimal_y_distance` are accepted as
/// aliases. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Explicit root id. When absent the unique parentless node is used.
    #[serde(alias = "root_id")]
    pub root_id: Option<String>,
    /// Swap axes: depth grows along x instead of y.
    pub horizontal: bool,
    /// Minimum gap between sibling subtrees at every shared depth.
    #[serde(alias = "minimal_x_distance", alias = "minimal_column_distance")]
    pub minimal_column_distance: f64,
    /// Distance between consecutive depth levels.
    #[serde(alias = "minimal_y_distance", alias = "minimal_row_distance")]
    pub minimal_row_distance: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            root_id: None,
            horizontal: false,
            minimal_column_distance: DEFAULT_MINIMAL_COLUMN_DISTANCE,
            minimal_row_distance: DEFAULT_MINIMAL_ROW_DISTANCE,
        }
    }
}

impl LayoutOptions {
    /// Set the explicit root id.
    pub fn with_root(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = Some(root_id.into());
        self
    }

    /// Set the axis-swap flag.
    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    /// Set the minimum sibling gap.
    pub fn with_column_distance(mut self, distance: f64) -> Self {
        self.minimal_column_distance = distance;
        self
    }

    /// Set the level spacing.
    pub fn with_row_distance(mut self, distance: f64) -> Self {
        self.minimal_row_distance = distance;
        self
    }

    /// Reject distances that are not finite and positive.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("minimalColumnDistance", self.minimal_column_distance),
            ("minimalRowDistance", self.minimal_row_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidOption { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = LayoutOptions::default();
        assert_eq!(options.root_id, None);
        assert!(!options.horizontal);
        assert_eq!(options.minimal_column_distance, 50.0);
        assert_eq!(options.minimal_row_distance, 100.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let options: LayoutOptions = serde_json::from_value(json!({
            "rootId": "root",
            "horizontal": true
        }))
        .unwrap();

        assert_eq!(options.root_id.as_deref(), Some("root"));
        assert!(options.horizontal);
        assert_eq!(options.minimal_column_distance, 50.0);
        assert_eq!(options.minimal_row_distance, 100.0);
    }

    #[test]
    fn test_deserialize_snake_case_aliases() {
        let options: LayoutOptions = serde_json::from_value(json!({
            "root_id": "root",
            "minimal_x_distance": 80,
            "minimal_y_distance": 120
        }))
        .unwrap();

        assert_eq!(options.root_id.as_deref(), Some("root"));
        assert_eq!(options.minimal_column_distance, 80.0);
        assert_eq!(options.minimal_row_distance, 120.0);
    }

    #[test]
    fn test_builders() {
        let options = LayoutOptions::default()
            .with_root("r")
            .with_horizontal(true)
            .with_column_distance(40.0)
            .with_row_distance(120.0);

        assert_eq!(options.root_id.as_deref(), Some("r"));
        assert!(options.horizontal);
        assert_eq!(options.minimal_column_distance, 40.0);
        assert_eq!(options.minimal_row_distance, 120.0);
    }

    #[test]
    fn test_validate_rejects_bad_distances() {
        let err = LayoutOptions::default()
            .with_column_distance(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidOption {
                name: "minimalColumnDistance",
                value: 0.0
            }
        );

        let err = LayoutOptions::default()
            .with_row_distance(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidOption {
                name: "minimalRowDistance",
                ..
            }
        ));
    }
}
