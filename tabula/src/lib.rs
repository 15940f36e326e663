//! Headless table view-model engine.
//!
//! Given rows, a column schema and interaction state (sort order, column
//! visibility, row expansion), `tabula` derives what a table should show:
//! the header row, the ordered rows with their visible cells, and detail
//! entries for expanded rows. Drawing is left to the caller.

pub mod column;
pub mod dispatch;
pub mod error;
pub mod expansion;
pub mod header;
pub mod options;
pub mod row_model;
pub mod session;
pub mod sort;
pub mod state;
pub mod table;
pub mod value;
pub mod visibility;

pub use column::{Column, ColumnMeta, ColumnSchema};
pub use dispatch::{Dispatch, EventResult, TableAction, TableEvent};
pub use error::TableError;
pub use expansion::{ExpansionController, ExpansionState};
pub use header::{HeaderGroup, HeaderView, SortIndicator};
pub use options::{TableOptions, TableVariant};
pub use row_model::{CellView, DetailView, RenderItem, RowView};
pub use session::TableSession;
pub use sort::{SortDirection, SortEntry, SortMode, SortState};
pub use state::TableState;
pub use table::{Table, TableBuilder, TableModel};
pub use value::Value;
pub use visibility::VisibilityState;

pub mod prelude {
    pub use crate::column::{Column, ColumnMeta};
    pub use crate::dispatch::{EventResult, TableAction, TableEvent};
    pub use crate::expansion::ExpansionController;
    pub use crate::options::{TableOptions, TableVariant};
    pub use crate::row_model::{RenderItem, RowView};
    pub use crate::session::TableSession;
    pub use crate::sort::{SortDirection, SortEntry, SortMode};
    pub use crate::state::TableState;
    pub use crate::table::Table;
    pub use crate::value::Value;
}
