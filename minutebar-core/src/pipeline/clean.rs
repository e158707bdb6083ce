//! Cleaning stage: drop the adjusted close.

use crate::domain::{Bar, BarTable, TaggedBar};

/// Column removed by [`clean`].
pub const DROPPED_COLUMN: &str = "Adj Close";

/// Strip `Adj Close` from every row. Rows without one pass through as well.
pub fn clean(table: BarTable<TaggedBar>) -> BarTable<Bar> {
    table.map_rows(Bar::from)
}
