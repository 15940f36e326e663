//! Sort state and the click-to-sort toggle protocol.
//!
//! A column's sort indicator cycles `None -> Ascending -> Descending -> None`
//! (or starts with descending for columns configured that way). In
//! [`SortMode::Single`] toggling a column replaces every other entry; in
//! [`SortMode::Multi`] the column's entry is advanced in place or appended
//! as the lowest-priority key.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Direction of a sort entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Returns `true` for descending.
    pub fn is_descending(self) -> bool {
        matches!(self, SortDirection::Descending)
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison result.
    ///
    /// Descending negates the comparison, so equal pairs stay equal and
    /// the stable sort keeps their input order.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// How toggling a column combines with existing sort entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Only one column is sorted at a time.
    #[default]
    Single,
    /// Columns accumulate as sort keys in toggle order.
    Multi,
}

/// One sort key: a column and a direction.
///
/// Serialized as `{ "id": "...", "desc": bool }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SortEntryRepr", into = "SortEntryRepr")]
pub struct SortEntry {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortEntry {
    /// Ascending entry for a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending entry for a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SortEntryRepr {
    id: String,
    #[serde(default)]
    desc: bool,
}

impl From<SortEntryRepr> for SortEntry {
    fn from(repr: SortEntryRepr) -> Self {
        Self {
            column_id: repr.id,
            direction: if repr.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        }
    }
}

impl From<SortEntry> for SortEntryRepr {
    fn from(entry: SortEntry) -> Self {
        Self {
            desc: entry.direction.is_descending(),
            id: entry.column_id,
        }
    }
}

/// Next state in a column's sort cycle.
pub fn next_direction(current: Option<SortDirection>, desc_first: bool) -> Option<SortDirection> {
    let first = if desc_first {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    match current {
        None => Some(first),
        Some(direction) if direction == first => Some(first.reversed()),
        Some(_) => None,
    }
}

/// Ordered sort keys, primary key first.
///
/// Holds at most one entry per column. Only [`SortState::toggle`] and the
/// seeding constructors mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortState {
    entries: Vec<SortEntry>,
}

impl SortState {
    /// Empty sort state (input order).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries, keeping the first entry for each column.
    pub fn from_entries(entries: impl IntoIterator<Item = SortEntry>) -> Self {
        let mut state = Self::new();
        for entry in entries {
            if state.index_of(&entry.column_id).is_none() {
                state.entries.push(entry);
            }
        }
        state
    }

    /// Entries in priority order.
    pub fn entries(&self) -> &[SortEntry] {
        &self.entries
    }

    /// Number of active sort keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no column is sorted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The primary sort key, if any.
    pub fn primary(&self) -> Option<&SortEntry> {
        self.entries.first()
    }

    /// Priority of a column among the sort keys.
    pub fn index_of(&self, column_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.column_id == column_id)
    }

    /// Current direction of a column, or `None` when unsorted.
    pub fn direction(&self, column_id: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|e| e.column_id == column_id)
            .map(|e| e.direction)
    }

    /// Whether this column is an active sort key.
    pub fn is_sorted(&self, column_id: &str) -> bool {
        self.index_of(column_id).is_some()
    }

    /// Remove every entry. Returns true if anything was removed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.entries.is_empty();
        self.entries.clear();
        changed
    }

    /// Advance a column through its sort cycle.
    ///
    /// The caller checks sortability. Returns the column's new direction.
    pub fn toggle(
        &mut self,
        column_id: &str,
        desc_first: bool,
        mode: SortMode,
    ) -> Option<SortDirection> {
        let next = next_direction(self.direction(column_id), desc_first);

        match mode {
            SortMode::Single => {
                self.entries.clear();
                if let Some(direction) = next {
                    self.entries.push(SortEntry {
                        column_id: column_id.to_string(),
                        direction,
                    });
                }
            }
            SortMode::Multi => match (self.index_of(column_id), next) {
                (Some(index), Some(direction)) => self.entries[index].direction = direction,
                (Some(index), None) => {
                    self.entries.remove(index);
                }
                (None, Some(direction)) => self.entries.push(SortEntry {
                    column_id: column_id.to_string(),
                    direction,
                }),
                (None, None) => {}
            },
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_ascending_first() {
        let asc = next_direction(None, false);
        assert_eq!(asc, Some(SortDirection::Ascending));
        let desc = next_direction(asc, false);
        assert_eq!(desc, Some(SortDirection::Descending));
        assert_eq!(next_direction(desc, false), None);
    }

    #[test]
    fn test_cycle_descending_first() {
        let desc = next_direction(None, true);
        assert_eq!(desc, Some(SortDirection::Descending));
        let asc = next_direction(desc, true);
        assert_eq!(asc, Some(SortDirection::Ascending));
        assert_eq!(next_direction(asc, true), None);
    }

    #[test]
    fn test_direction_apply() {
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Descending.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
    }

    #[test]
    fn test_from_entries_drops_duplicates() {
        let state = SortState::from_entries([SortEntry::asc("a"), SortEntry::desc("a")]);
        assert_eq!(state.entries(), &[SortEntry::asc("a")]);
    }
}
