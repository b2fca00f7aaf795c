//! Lexically-chained variable store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// A mapping from names to values plus an optional outer environment.
/// Lookup walks outward; insertion always targets the innermost scope, so
/// inner bindings shadow outer ones rather than mutating them.
///
/// Environments are shared: every closure holds the environment its literal
/// was evaluated in, and nested scopes hold their parent.
#[derive(Debug)]
pub struct Environment {
    store: RefCell<HashMap<String, Rc<Object>>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// A root environment for a REPL session or script run.
    pub fn new() -> Rc<Environment> {
        Self::with_outer(None)
    }

    /// A scope nested inside `outer`.
    pub fn new_enclosed(outer: Rc<Environment>) -> Rc<Environment> {
        Self::with_outer(Some(outer))
    }

    fn with_outer(outer: Option<Rc<Environment>>) -> Rc<Environment> {
        Rc::new(Environment {
            store: RefCell::new(HashMap::new()),
            outer,
        })
    }

    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        match self.store.borrow().get(name) {
            Some(value) => Some(Rc::clone(value)),
            None => self.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    pub fn set(&self, name: impl Into<String>, value: Rc<Object>) {
        self.store.borrow_mut().insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_what_was_set() {
        let env = Environment::new();
        env.set("foo", Rc::new(Object::Integer(42)));
        let value = env.get("foo").expect("binding should exist");
        assert!(matches!(value.as_ref(), Object::Integer(42)));
    }

    #[test]
    fn get_misses_unknown_names() {
        let env = Environment::new();
        assert!(env.get("missing").is_none());
    }

    #[test]
    fn set_rebinds_in_place() {
        let env = Environment::new();
        env.set("foo", Rc::new(Object::Integer(1)));
        env.set("foo", Rc::new(Object::Integer(2)));
        let value = env.get("foo").expect("binding should exist");
        assert!(matches!(value.as_ref(), Object::Integer(2)));
    }

    #[test]
    fn lookup_falls_through_to_outer() {
        let outer = Environment::new();
        outer.set("foo", Rc::new(Object::Integer(42)));
        let inner = Environment::new_enclosed(outer);
        let value = inner.get("foo").expect("outer binding should be visible");
        assert!(matches!(value.as_ref(), Object::Integer(42)));
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let outer = Environment::new();
        outer.set("foo", Rc::new(Object::Integer(1)));
        let inner = Environment::new_enclosed(Rc::clone(&outer));

        inner.set("foo", Rc::new(Object::Integer(2)));

        let inner_value = inner.get("foo").expect("inner binding should exist");
        assert!(matches!(inner_value.as_ref(), Object::Integer(2)));

        // The outer binding is untouched.
        let outer_value = outer.get("foo").expect("outer binding should exist");
        assert!(matches!(outer_value.as_ref(), Object::Integer(1)));
    }

    #[test]
    fn lookup_walks_multiple_levels() {
        let root = Environment::new();
        root.set("foo", Rc::new(Object::Integer(42)));
        let middle = Environment::new_enclosed(root);
        let leaf = Environment::new_enclosed(middle);
        assert!(leaf.get("foo").is_some());
    }
}
