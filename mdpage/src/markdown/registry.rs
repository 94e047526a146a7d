//! Extension registry for named Markdown plugins
//!
//! Transforms are configured with a list of extension names. The registry resolves those
//! names into a parser option set, so callers can plug in their own extensions next to
//! the built-in ones.

use super::extension::{BuiltinExtension, Extension};
use crate::error::TransformError;
use comrak::ComrakOptions;
use std::collections::HashMap;

/// Name → extension table consulted when a pipeline is built.
///
/// # Examples
///
/// ```ignore
/// let mut registry = ExtensionRegistry::new();
/// registry.register(MyExtension);
///
/// let options = registry.options_for(&["my-extension"])?;
/// ```
pub struct ExtensionRegistry {
    extensions: HashMap<String, Box<dyn Extension>>,
}

impl ExtensionRegistry {
    /// A registry that knows no extensions, not even the built-in ones.
    pub fn new() -> Self {
        ExtensionRegistry {
            extensions: HashMap::new(),
        }
    }

    /// Make `extension` selectable by its name. A later registration under the same
    /// name shadows a built-in one.
    pub fn register<E: Extension + 'static>(&mut self, extension: E) {
        self.extensions
            .insert(extension.name().to_string(), Box::new(extension));
    }

    /// Look up the extension a configured name refers to.
    pub fn get(&self, name: &str) -> Result<&dyn Extension, TransformError> {
        self.extensions
            .get(name)
            .map(|e| e.as_ref())
            .ok_or_else(|| TransformError::ExtensionNotFound(name.to_string()))
    }

    /// Whether a configuration naming `name` would be accepted.
    pub fn has(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Selectable names in alphabetical order.
    pub fn list_extensions(&self) -> Vec<String> {
        let mut names: Vec<_> = self.extensions.keys().cloned().collect();
        names.sort();
        names
    }

    /// comrak options with every named extension applied in list order. The first
    /// unknown name aborts with [`TransformError::ExtensionNotFound`].
    pub fn options_for<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<ComrakOptions<'static>, TransformError> {
        let mut options = ComrakOptions::default();
        for name in names {
            self.get(name.as_ref())?.apply(&mut options);
        }
        Ok(options)
    }

    /// Every [`BuiltinExtension`], whether or not it is on by default.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for extension in BuiltinExtension::ALL {
            registry.register(extension);
        }
        registry
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
