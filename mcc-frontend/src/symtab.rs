//! Symbol table
//!
//! A flat name-to-entry map. The lexer registers every identifier it
//! sees with no type; the semantic analyzer fills the type in when the
//! declaration is reduced.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Source-level types (the language only has `int`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    Int,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Int => write!(f, "int"),
        }
    }
}

/// Symbol table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub name: String,
    pub ty: Option<SourceType>,
}

/// Flat symbol table for a single compilation
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name with no type yet. Re-registering is a no-op.
    pub fn add(&mut self, name: &str) {
        self.entries.entry(name.to_string()).or_insert_with(|| SymbolEntry {
            name: name.to_string(),
            ty: None,
        });
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SymbolEntry> {
        self.entries.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_and_lookup() {
        let mut table = SymbolTable::new();
        assert!(!table.has("a"));

        table.add("a");
        assert!(table.has("a"));
        assert_eq!(table.get("a").unwrap().ty, None);
    }

    #[test]
    fn test_re_add_keeps_type() {
        let mut table = SymbolTable::new();
        table.add("a");
        table.get_mut("a").unwrap().ty = Some(SourceType::Int);

        // The lexer may see the same identifier again later
        table.add("a");
        assert_eq!(table.get("a").unwrap().ty, Some(SourceType::Int));
        assert_eq!(table.len(), 1);
    }
}
