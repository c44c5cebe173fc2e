// Symbol table: one flat namespace per parse, no scopes, no deletion

use crate::errors::SymbolError;
use crate::parser::ast::DataType;
use rustc_hash::FxHashMap;

/// Declared type and initialization state of one identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub data_type: DataType,
    pub initialized: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    entries: FxHashMap<String, Symbol>,
    // Declaration order, for stable listings
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Declare `name`. Fails if it is already present.
    pub fn add(
        &mut self,
        name: &str,
        data_type: DataType,
        initialized: bool,
    ) -> Result<(), SymbolError> {
        if self.entries.contains_key(name) {
            return Err(SymbolError::Duplicate(name.to_string()));
        }

        self.entries.insert(
            name.to_string(),
            Symbol {
                data_type,
                initialized,
            },
        );
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<DataType, SymbolError> {
        self.get(name).map(|symbol| symbol.data_type)
    }

    pub fn get(&self, name: &str) -> Result<&Symbol, SymbolError> {
        self.entries
            .get(name)
            .ok_or_else(|| SymbolError::Undeclared(name.to_string()))
    }

    pub fn set_initialized(&mut self, name: &str) -> Result<(), SymbolError> {
        self.get_mut(name)?.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self, name: &str) -> Result<bool, SymbolError> {
        self.get(name).map(|symbol| symbol.initialized)
    }

    /// Overwrite the stored type of an existing identifier.
    pub fn update(&mut self, name: &str, data_type: DataType) -> Result<(), SymbolError> {
        self.get_mut(name)?.data_type = data_type;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|symbol| (name.as_str(), symbol)))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Symbol, SymbolError> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| SymbolError::Undeclared(name.to_string()))
    }
}
