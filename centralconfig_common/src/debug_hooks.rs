use parking_lot::RwLock;
use serde::Serialize;
use stack_string::StackString;
use std::{any::Any, collections::BTreeMap, sync::Arc};

use crate::errors::ConfigError as Error;

pub static UI_FRAMEWORK_HOOK: &str = "ui_framework";

type Hook = Arc<dyn Any + Send + Sync>;

/// Named references handed to developer tooling.
///
/// Entries are set once at startup and live as long as the registry.
#[derive(Clone, Default)]
pub struct DebugHookRegistry {
    hooks: Arc<RwLock<BTreeMap<StackString, Hook>>>,
}

impl DebugHookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns error if `name` is already registered
    pub fn register<T>(&self, name: &str, value: T) -> Result<(), Error>
    where
        T: Any + Send + Sync,
    {
        let mut hooks = self.hooks.write();
        if hooks.contains_key(name) {
            return Err(Error::DebugHookExists(name.into()));
        }
        hooks.insert(name.into(), Arc::new(value));
        Ok(())
    }

    pub fn get<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let hook = self.hooks.read().get(name).cloned()?;
        hook.downcast().ok()
    }

    pub fn names(&self) -> Vec<StackString> {
        self.hooks.read().keys().cloned().collect()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FrameworkInfo {
    pub name: StackString,
    pub version: StackString,
}

impl FrameworkInfo {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use anyhow::Error;
    use stack_string::StackString;

    use crate::{
        debug_hooks::{DebugHookRegistry, FrameworkInfo, UI_FRAMEWORK_HOOK},
        errors::ConfigError,
    };

    #[test]
    fn test_register_once() -> Result<(), Error> {
        let hooks = DebugHookRegistry::new();
        let info = FrameworkInfo::new("dioxus", "0.6");
        hooks.register(UI_FRAMEWORK_HOOK, info.clone())?;

        assert_eq!(
            hooks.register(UI_FRAMEWORK_HOOK, FrameworkInfo::new("other", "1")),
            Err(ConfigError::DebugHookExists(UI_FRAMEWORK_HOOK.into()))
        );

        let shared = hooks.clone();
        let found = shared.get::<FrameworkInfo>(UI_FRAMEWORK_HOOK);
        assert_eq!(found.as_deref(), Some(&info));
        assert!(hooks.get::<String>(UI_FRAMEWORK_HOOK).is_none());
        assert!(hooks.get::<FrameworkInfo>("missing").is_none());
        assert_eq!(hooks.names(), vec![StackString::from(UI_FRAMEWORK_HOOK)]);
        Ok(())
    }
}
