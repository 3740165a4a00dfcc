//! The variable environment and the global function table.

use std::collections::HashMap;

use salt_par::Stmt;

use crate::value::Value;

/// A function definition, extracted from a `Stmt::FunctionDefinition`
/// once and stored by name for the lifetime of the program.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub return_type: salt_par::TypeName,
    pub parameters: Vec<salt_par::Param>,
    pub body: Vec<Stmt>,
}

/// Holds every declared variable's cell. A variable's dynamic type never
/// changes after declaration; the variant of the stored [`Value`] is the
/// type tag.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.variables.get_mut(name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn declare(&mut self, name: String, value: Value) {
        self.variables.insert(name, value);
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    /// A shallow copy used to build a function call's activation
    /// environment: the callee reads the caller's variables, but writes
    /// never propagate back because the caller keeps its own copy.
    pub fn snapshot(&self) -> Environment {
        self.clone()
    }
}

/// Process-wide function table. Definitions are global regardless of
/// where in source they appear; a redefinition overwrites.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: String, def: FunctionDef) {
        self.functions.insert(name, def);
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }
}
