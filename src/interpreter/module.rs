use std::{fs, path::PathBuf};

use indexmap::IndexMap;

use crate::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::tokenize, parser::core::parse_program},
};

/// Extension appended to include paths that have none.
pub const SOURCE_EXTENSION: &str = "tes";

/// Resolves the path of an `include`/`use` statement to parsed statements.
///
/// The `Context` executes whatever the loader returns, in the including
/// program's global scope. Each path is loaded at most once per context.
pub trait ModuleLoader {
    /// Loads and parses the module at `path`.
    ///
    /// # Errors
    /// `Include` when the module cannot be found, read or parsed.
    fn load(&mut self, path: &str, line: usize) -> EvalResult<Vec<Statement>>;
}

fn include_error(path: &str, details: impl ToString, line: usize) -> RuntimeError {
    RuntimeError::Include { path: path.to_string(),
                            details: details.to_string(),
                            line }
}

/// Parses `source` as the module `path`.
fn parse_module(path: &str, source: &str, line: usize) -> EvalResult<Vec<Statement>> {
    let tokens = tokenize(source).map_err(|e| include_error(path, e, line))?;
    parse_program(&tokens).map_err(|e| include_error(path, e, line))
}

/// Loads modules from source files below a base directory.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    base: PathBuf,
}

impl SourceLoader {
    /// A loader resolving paths relative to `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ModuleLoader for SourceLoader {
    fn load(&mut self, path: &str, line: usize) -> EvalResult<Vec<Statement>> {
        let mut file = self.base.join(path);
        if file.extension().is_none() {
            file.set_extension(SOURCE_EXTENSION);
        }
        tracing::debug!(file = %file.display(), "loading module");

        let source = fs::read_to_string(&file).map_err(|e| include_error(path, e, line))?;
        parse_module(path, &source, line)
    }
}

/// Serves modules from sources registered in memory.
///
/// # Example
/// ```
/// use tessera::interpreter::module::{MemoryLoader, ModuleLoader};
///
/// let mut loader = MemoryLoader::new();
/// loader.insert("greeting", "func hello(): string => \"hi\";");
///
/// assert_eq!(loader.load("greeting", 1).unwrap().len(), 1);
/// assert!(loader.load("missing", 1).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    modules: IndexMap<String, String>,
}

impl MemoryLoader {
    /// A loader with no modules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` under `path`, replacing any earlier source.
    pub fn insert(&mut self, path: &str, source: &str) {
        self.modules.insert(path.to_string(), source.to_string());
    }
}

impl ModuleLoader for MemoryLoader {
    fn load(&mut self, path: &str, line: usize) -> EvalResult<Vec<Statement>> {
        let source = self.modules
                         .get(path)
                         .ok_or_else(|| include_error(path, "no such module", line))?;
        parse_module(path, source, line)
    }
}
