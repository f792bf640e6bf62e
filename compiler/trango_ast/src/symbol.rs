//! Resolved symbols.
//!
//! The frontend resolves every top-level name to a symbol before the
//! core runs; the core queries the table when it needs to know what
//! kind of declaration a name refers to (e.g. whether a reference names
//! a class, so `new X()` can call the synthesized factory).

use rustc_hash::FxHashMap;

/// Index into a [`SymbolTable`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SymbolId(pub u32);

/// What a symbol declares.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Variable,
    Function,
    Class,
    Interface,
    TypeAlias,
    Enum,
    Import,
}

/// One resolved symbol.
#[derive(Clone, PartialEq, Debug)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub exported: bool,
}

/// Name → symbol table for one source file.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_name: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Register a symbol. Later registrations shadow earlier ones of
    /// the same name (the frontend guarantees top-level uniqueness, so
    /// shadowing only happens for erroneous input).
    pub fn insert(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        self.by_name.insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        id
    }

    /// Look a name up.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.by_name
            .get(name)
            .and_then(|id| self.symbols.get(id.0 as usize))
    }

    /// Resolve a [`SymbolId`].
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        let mut table = SymbolTable::new();
        table.insert(Symbol {
            name: "User".to_string(),
            kind: SymbolKind::Class,
            exported: true,
        });
        let found = table.lookup("User");
        assert_eq!(found.map(|s| s.kind), Some(SymbolKind::Class));
        assert!(table.lookup("Missing").is_none());
    }
}
