//! Domain types for minutebar

pub mod bar;
pub mod symbol;
pub mod table;

pub use bar::{Bar, EnrichedBar, TaggedBar};
pub use symbol::{default_symbols, StaticSymbol, SymbolProvider};
pub use table::BarTable;
