use log::{debug, error};

use crate::{
    debug_hooks::{DebugHookRegistry, FrameworkInfo, UI_FRAMEWORK_HOOK},
    errors::ConfigError as Error,
};

pub static MOUNT_POINT_ID: &str = "centralconfigapp";

/// Attribute on the mount point carrying the query endpoint the host serves with.
pub static API_ENDPOINT_ATTRIBUTE: &str = "data-api-endpoint";

/// The hosting document the UI is mounted into.
pub trait HostDocument {
    type Element;

    fn get_element_by_id(&self, id: &str) -> Option<Self::Element>;
}

/// Renders the root component under a target element.
pub trait Renderer {
    type Target;

    /// # Errors
    /// Returns error if the framework fails to mount
    fn render(&self, target: Self::Target) -> Result<(), Error>;

    fn framework_info(&self) -> FrameworkInfo;
}

/// Mount the root component at [`MOUNT_POINT_ID`].
///
/// A missing mount point is logged and returned as an error without
/// rendering anything. Otherwise the framework is registered with `hooks`
/// and `render` is called exactly once.
///
/// # Errors
/// Returns error if the mount point is absent, the framework hook was
/// already registered or the renderer fails
pub fn bootstrap<D, R>(document: &D, renderer: &R, hooks: &DebugHookRegistry) -> Result<(), Error>
where
    D: HostDocument,
    R: Renderer<Target = D::Element>,
{
    let Some(target) = document.get_element_by_id(MOUNT_POINT_ID) else {
        error!("no element with id {MOUNT_POINT_ID}");
        return Err(Error::MountPointMissing(MOUNT_POINT_ID.into()));
    };
    let info = renderer.framework_info();
    debug!("mounting {} {} at #{MOUNT_POINT_ID}", info.name, info.version);
    hooks.register(UI_FRAMEWORK_HOOK, info)?;
    renderer.render(target)
}

#[cfg(test)]
mod test {
    use anyhow::Error;
    use parking_lot::Mutex;
    use stack_string::StackString;
    use std::collections::BTreeSet;

    use crate::{
        bootstrap::{HostDocument, MOUNT_POINT_ID, Renderer, bootstrap},
        debug_hooks::{DebugHookRegistry, FrameworkInfo, UI_FRAMEWORK_HOOK},
        errors::ConfigError,
    };

    struct FakeDocument {
        ids: BTreeSet<StackString>,
    }

    impl FakeDocument {
        fn new(ids: &[&str]) -> Self {
            Self {
                ids: ids.iter().map(|&id| id.into()).collect(),
            }
        }
    }

    impl HostDocument for FakeDocument {
        type Element = StackString;

        fn get_element_by_id(&self, id: &str) -> Option<Self::Element> {
            self.ids.get(id).cloned()
        }
    }

    #[derive(Default)]
    struct FakeRenderer {
        renders: Mutex<Vec<StackString>>,
    }

    impl Renderer for FakeRenderer {
        type Target = StackString;

        fn render(&self, target: Self::Target) -> Result<(), ConfigError> {
            self.renders.lock().push(target);
            Ok(())
        }

        fn framework_info(&self) -> FrameworkInfo {
            FrameworkInfo::new("fake", "0.0")
        }
    }

    #[test]
    fn test_bootstrap_renders_once() -> Result<(), Error> {
        let document = FakeDocument::new(&["header", MOUNT_POINT_ID, "footer"]);
        let renderer = FakeRenderer::default();
        let hooks = DebugHookRegistry::new();

        bootstrap(&document, &renderer, &hooks)?;

        let renders = renderer.renders.lock();
        assert_eq!(renders.as_slice(), &[StackString::from(MOUNT_POINT_ID)]);
        assert_eq!(
            hooks
                .get::<FrameworkInfo>(UI_FRAMEWORK_HOOK)
                .map(|f| f.name.clone()),
            Some("fake".into())
        );
        Ok(())
    }

    #[test]
    fn test_bootstrap_missing_mount_point() {
        let document = FakeDocument::new(&["app"]);
        let renderer = FakeRenderer::default();
        let hooks = DebugHookRegistry::new();

        assert_eq!(
            bootstrap(&document, &renderer, &hooks),
            Err(ConfigError::MountPointMissing(MOUNT_POINT_ID.into()))
        );
        assert!(renderer.renders.lock().is_empty());
        assert!(hooks.names().is_empty());
    }

    #[test]
    fn test_bootstrap_twice_fails() -> Result<(), Error> {
        let document = FakeDocument::new(&[MOUNT_POINT_ID]);
        let renderer = FakeRenderer::default();
        let hooks = DebugHookRegistry::new();

        bootstrap(&document, &renderer, &hooks)?;
        assert!(bootstrap(&document, &renderer, &hooks).is_err());
        assert_eq!(renderer.renders.lock().len(), 1);
        Ok(())
    }
}
