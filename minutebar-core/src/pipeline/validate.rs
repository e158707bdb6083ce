//! Validation stage. Logs only; the table always passes through.

use crate::domain::BarTable;
use tracing::{error, info};

/// Outcome of the emptiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Empty,
    Valid { rows: usize },
}

/// Classify a table without touching its rows.
pub fn check<B>(table: &BarTable<B>) -> Validity {
    if table.is_empty() {
        Validity::Empty
    } else {
        Validity::Valid { rows: table.len() }
    }
}

/// Log the table's validity and hand it back unchanged.
pub fn validate<B>(table: BarTable<B>) -> BarTable<B> {
    match check(&table) {
        Validity::Empty => error!(ticker = %table.symbol, "no data fetched"),
        Validity::Valid { rows } => info!(ticker = %table.symbol, rows, "data fetched"),
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table() {
        let t: BarTable<u8> = BarTable::empty("DIS");
        assert_eq!(check(&t), Validity::Empty);
        assert_eq!(validate(t), BarTable::empty("DIS"));
    }

    #[test]
    fn non_empty_passes_through() {
        let t = BarTable::new("NFLX", vec![1u8, 2, 3]);
        assert_eq!(check(&t), Validity::Valid { rows: 3 });
        assert_eq!(validate(t.clone()), t);
    }
}
