//! Tracked instruments.

/// Source of a ticker symbol for one tracked instrument.
pub trait SymbolProvider {
    fn symbol(&self) -> &str;
}

/// A fixed ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSymbol(String);

impl StaticSymbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn netflix() -> Self {
        Self::new("NFLX")
    }

    pub fn disney() -> Self {
        Self::new("DIS")
    }
}

impl SymbolProvider for StaticSymbol {
    fn symbol(&self) -> &str {
        &self.0
    }
}

/// The instruments tracked when nothing else is configured.
pub fn default_symbols() -> Vec<StaticSymbol> {
    vec![StaticSymbol::netflix(), StaticSymbol::disney()]
}
