use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::class::ClassInfo},
};

/// Registry of declared classes, keyed by name.
///
/// Classes are immutable once declared, except for their static field
/// values, which live behind a `RefCell` inside `ClassInfo`.
#[derive(Debug, Default)]
pub struct ClassStorage {
    classes: IndexMap<String, Rc<ClassInfo>>,
}

impl ClassStorage {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class.
    ///
    /// # Errors
    /// `ClassAlreadyDeclared` if the name is taken.
    pub fn declare(&mut self, info: ClassInfo, line: usize) -> EvalResult<Rc<ClassInfo>> {
        if self.classes.contains_key(&info.name) {
            return Err(RuntimeError::ClassAlreadyDeclared { name: info.name,
                                                            line });
        }
        let info = Rc::new(info);
        self.classes.insert(info.name.clone(), Rc::clone(&info));
        Ok(info)
    }

    /// Looks a class up by name.
    ///
    /// # Errors
    /// `UnknownClass` if no class has that name.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<Rc<ClassInfo>> {
        self.find(name)
            .ok_or_else(|| RuntimeError::UnknownClass { name: name.to_string(),
                                                        line })
    }

    /// Looks a class up by name, if declared.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Rc<ClassInfo>> {
        self.classes.get(name).cloned()
    }

    /// Returns `true` if a class with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Names of all declared classes, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}
