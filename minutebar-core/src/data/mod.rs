//! Market-data providers

pub mod memory;
pub mod provider;
pub mod yahoo;

pub use memory::MemoryProvider;
pub use provider::{BarInterval, DataError, DataProvider, DataSource, FetchResult, RawBar};
pub use yahoo::YahooProvider;
