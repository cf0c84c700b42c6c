//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use tracing::debug;
use trowel_core::{
    application::ports::TemplateStore,
    domain::TemplateDescription,
    error::{TrowelError, TrowelResult},
};

use crate::builtin_templates;

/// Thread-safe in-memory template store, keyed by template name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<String, TemplateDescription>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> TrowelResult<Self> {
        let store = Self::new();
        for template in builtin_templates::all_templates() {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Register a template, replacing any with the same name.
    ///
    /// Dependency declarations are checked here so a bad template fails at
    /// registration rather than halfway through generation.
    pub fn insert(&self, template: TemplateDescription) -> TrowelResult<()> {
        template.dependency_specs()?;
        template.dev_dependency_specs()?;

        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        debug!(template = %template.name, "Registering template");
        inner.insert(template.name.clone(), template);
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn find(&self, name: &str) -> TrowelResult<Option<TemplateDescription>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        Ok(inner.get(name).cloned())
    }

    fn list(&self) -> TrowelResult<Vec<String>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        Ok(inner.keys().cloned().collect())
    }
}

fn lock_error() -> TrowelError {
    TrowelError::Internal {
        message: "template store lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trowel_core::domain::DEFAULT_TEMPLATE;

    #[test]
    fn builtin_store_holds_only_the_default_template() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(store.list().unwrap(), [DEFAULT_TEMPLATE]);
        assert!(store.find(DEFAULT_TEMPLATE).unwrap().is_some());
        assert!(store.find("react").unwrap().is_none());
    }

    #[test]
    fn insert_rejects_malformed_dependencies() {
        let store = InMemoryStore::new();
        let bad = TemplateDescription::new("bad", "broken").with_dependency("chalk");
        assert!(store.insert(bad).is_err());
        assert!(store.is_empty());
    }
}
