//! Per-symbol bar tables.

use serde::{Deserialize, Serialize};

/// One symbol's bars for one trading day, in ascending timestamp order.
///
/// The symbol lives on the table as well as on each row so an empty table
/// still knows what it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTable<B> {
    pub symbol: String,
    pub rows: Vec<B>,
}

impl<B> BarTable<B> {
    pub fn new(symbol: impl Into<String>, rows: Vec<B>) -> Self {
        Self {
            symbol: symbol.into(),
            rows,
        }
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply a row-wise transformation, keeping the symbol.
    pub fn map_rows<C>(self, f: impl FnMut(B) -> C) -> BarTable<C> {
        BarTable {
            symbol: self.symbol,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}
