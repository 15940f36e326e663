//! Table configuration.

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::sort::{SortEntry, SortMode};
use crate::visibility::VisibilityState;

/// Visual variant of the table.
///
/// Carried to the renderer; never influences derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableVariant {
    #[default]
    Default,
    Light,
    White,
    InBlock,
}

/// Per-table configuration.
///
/// Options can be built in code or loaded from JSON:
///
/// ```
/// use tabula::{SortMode, TableOptions, TableVariant};
///
/// let options = TableOptions::from_json(
///     r#"{ "variant": "inBlock", "initialSortBy": [{ "id": "age", "desc": true }] }"#,
/// )
/// .unwrap();
/// assert_eq!(options.variant, TableVariant::InBlock);
/// assert!(options.sorting);
/// assert_eq!(options.sort_mode, SortMode::Single);
/// assert_eq!(options.initial_sort.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    /// Visual variant.
    pub variant: TableVariant,
    /// Table-wide sort switch.
    pub sorting: bool,
    /// How column toggles combine.
    pub sort_mode: SortMode,
    /// Sort keys applied when the table state is first created.
    #[serde(alias = "initialSortBy")]
    pub initial_sort: Vec<SortEntry>,
    /// Visibility applied when the table state is first created.
    pub column_visibility: VisibilityState,
    /// Row clicks also toggle expansion.
    pub expand_on_row_click: bool,
    /// Test id for the table element.
    pub test_id: Option<String>,
    /// Extra class for the table element.
    pub class_name: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            variant: TableVariant::Default,
            sorting: true,
            sort_mode: SortMode::Single,
            initial_sort: Vec::new(),
            column_visibility: VisibilityState::default(),
            expand_on_row_click: false,
            test_id: None,
            class_name: None,
        }
    }
}

impl TableOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the visual variant.
    pub fn variant(mut self, variant: TableVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Enable or disable sorting for the whole table.
    pub fn sorting(mut self, enabled: bool) -> Self {
        self.sorting = enabled;
        self
    }

    /// Set the sort mode.
    pub fn sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self
    }

    /// Set the initial sort keys.
    pub fn initial_sort(mut self, entries: impl IntoIterator<Item = SortEntry>) -> Self {
        self.initial_sort = entries.into_iter().collect();
        self
    }

    /// Set the initial column visibility.
    pub fn column_visibility(mut self, visibility: VisibilityState) -> Self {
        self.column_visibility = visibility;
        self
    }

    /// Toggle expansion when a row is clicked.
    pub fn expand_on_row_click(mut self) -> Self {
        self.expand_on_row_click = true;
        self
    }

    /// Set the test id.
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Set the table class.
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}
