//! Binding environments: a chain of lexical frames.
//!
//! Each frame owns its variable and user-function bindings and holds a
//! reference to the enclosing frame. Lookups climb the chain; definitions
//! always bind in the frame they are called on. The built-in operator
//! table is process-wide and immutable, so it is consulted directly
//! rather than through the chain (see `builtins::lookup`).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::builtins::{self, Builtin};
use crate::value::Value;

/// Shared handle to an environment frame.
pub type EnvRef = Rc<RefCell<Env>>;

/// A named, parameterised callable defined by `define-func`.
///
/// The body is a `List` of forms evaluated in order on each call; the
/// result of the last form is the call's result.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFunction {
    pub name: String,
    pub params: Vec<String>,
    pub body: Value,
}

#[derive(Debug, Default)]
pub struct Env {
    vars: HashMap<String, Value>,
    funcs: HashMap<String, UserFunction>,
    parent: Option<EnvRef>,
}

impl Env {
    /// A fresh root frame with no parent.
    pub fn root() -> EnvRef {
        Rc::new(RefCell::new(Env::default()))
    }

    /// A fresh frame chained to `parent`.
    pub fn with_parent(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Env {
            vars: HashMap::new(),
            funcs: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Bind or overwrite a variable in this frame.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Bind or overwrite a user function in this frame.
    pub fn set_user_function(&mut self, func: UserFunction) {
        self.funcs.insert(func.name.clone(), func);
    }

    /// Variable lookup: this frame first, then the parent chain.
    pub fn try_get_variable(&self, name: &str) -> Option<Value> {
        match self.vars.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .parent
                .as_ref()
                .and_then(|p| p.borrow().try_get_variable(name)),
        }
    }

    /// User-function lookup: this frame first, then the parent chain.
    pub fn try_get_user_function(&self, name: &str) -> Option<UserFunction> {
        match self.funcs.get(name) {
            Some(func) => Some(func.clone()),
            None => self
                .parent
                .as_ref()
                .and_then(|p| p.borrow().try_get_user_function(name)),
        }
    }

    /// Built-in lookup: the shared table, no chain walk.
    pub fn try_get_builtin(&self, name: &str) -> Option<Builtin> {
        builtins::lookup(name)
    }

    /// All variable names visible from this frame, sorted.
    pub fn variable_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names(&mut names, |env| env.vars.keys().cloned().collect());
        names.sort();
        names.dedup();
        names
    }

    /// All user-function names visible from this frame, sorted.
    pub fn user_function_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names(&mut names, |env| env.funcs.keys().cloned().collect());
        names.sort();
        names.dedup();
        names
    }

    fn collect_names(&self, out: &mut Vec<String>, pick: fn(&Env) -> Vec<String>) {
        out.extend(pick(self));
        if let Some(parent) = &self.parent {
            parent.borrow().collect_names(out, pick);
        }
    }
}
