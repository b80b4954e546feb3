use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::ClassDef;
use crate::error::RuntimeError;
use crate::interpreter::evaluator::core::EvalResult;

/// The table of class definitions known to a program.
///
/// The registry is populated once, during program load, and explicitly
/// frozen before the program body starts evaluating. Registration order does
/// not matter: classes may reference each other freely, because lookup only
/// happens during evaluation, after every class is in the table.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Rc<ClassDef>>,
    frozen: bool,
}

impl ClassRegistry {
    /// Creates an empty, unfrozen registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class definition during program load.
    ///
    /// # Errors
    /// - [`RuntimeError::DuplicateClass`] when the name is already taken.
    /// - [`RuntimeError::RegistryFrozen`] when registration is attempted
    ///   after [`freeze`](Self::freeze).
    pub fn register(&mut self, class: ClassDef) -> EvalResult<()> {
        if self.frozen {
            return Err(RuntimeError::RegistryFrozen {
                name: class.name.clone(),
                line: class.line,
            });
        }
        if self.classes.contains_key(&class.name) {
            return Err(RuntimeError::DuplicateClass {
                name: class.name.clone(),
                line: class.line,
            });
        }

        self.classes.insert(class.name.clone(), Rc::new(class));
        Ok(())
    }

    /// Freezes the registry; the lifecycle transition from load to
    /// evaluation. Registration afterwards is an error.
    ///
    /// # Example
    /// ```
    /// use curio::ast::ClassDef;
    /// use curio::interpreter::registry::ClassRegistry;
    ///
    /// let mut registry = ClassRegistry::new();
    /// registry.freeze();
    ///
    /// let class = ClassDef {
    ///     name: "Empty".to_string(),
    ///     params: vec![],
    ///     guards: vec![],
    ///     members: vec![],
    ///     line: 1,
    /// };
    /// assert!(registry.register(class).is_err());
    /// ```
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns `true` when a class with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Looks up a class definition by name.
    ///
    /// # Errors
    /// [`RuntimeError::UnknownClass`] when no class with that name exists.
    pub fn lookup(&self, name: &str, line: usize) -> EvalResult<Rc<ClassDef>> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownClass {
                name: name.to_string(),
                line,
            })
    }
}
