use std::collections::HashMap;
use std::rc::Rc;

use crate::interpreter::value::Value;

/// A lexical scope frame mapping names to values.
///
/// Frames are chained: lookup walks outward through the parent links, so the
/// innermost binding of a name wins. A frame is never mutated once built;
/// extending a scope creates a new child frame. This is what lets function
/// values capture their defining environment and keep it alive after the
/// enclosing call has returned.
#[derive(Debug)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates the empty root frame.
    #[must_use]
    pub fn root() -> Rc<Self> {
        Rc::new(Self {
            bindings: HashMap::new(),
            parent: None,
        })
    }

    /// Creates a child frame of `parent` holding the given bindings.
    ///
    /// When the same name appears more than once, the later binding wins;
    /// this is what lets a parameter shadow the function's own name.
    ///
    /// # Example
    /// ```
    /// use curio::interpreter::env::Environment;
    /// use curio::interpreter::value::Value;
    ///
    /// let root = Environment::root();
    /// let scope = Environment::extend(&root, [("x".to_string(), Value::Integer(1))]);
    /// let inner = Environment::extend(&scope, [("x".to_string(), Value::Integer(2))]);
    ///
    /// assert_eq!(scope.lookup("x"), Some(&Value::Integer(1)));
    /// assert_eq!(inner.lookup("x"), Some(&Value::Integer(2)));
    /// ```
    #[must_use]
    pub fn extend(
        parent: &Rc<Self>,
        bindings: impl IntoIterator<Item = (String, Value)>,
    ) -> Rc<Self> {
        Rc::new(Self {
            bindings: bindings.into_iter().collect(),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Resolves a name against this frame and its ancestors.
    ///
    /// Returns the innermost binding, or `None` when the name is bound
    /// nowhere in the chain.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut frame = self;
        loop {
            if let Some(value) = frame.bindings.get(name) {
                return Some(value);
            }
            match &frame.parent {
                Some(parent) => frame = parent,
                None => return None,
            }
        }
    }
}
