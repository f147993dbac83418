//! Theme propagation.
//!
//! Two ways to hand a theme down a call tree:
//!
//! - [`Environment`] is an explicit, persistent key-value scope. Extending
//!   it returns a new environment and leaves the parent untouched, so it can
//!   be passed by value into child style computations.
//! - [`provide_theme`] / [`use_theme`] keep the same kind of scope on a
//!   thread-local stack for code that cannot thread an argument through.
//!
//! Both fall back to [`default_theme`], built once per process.

use std::{
    any::{Any, TypeId},
    cell::RefCell,
    sync::{Arc, OnceLock},
};

use im::HashMap;
use tracing::debug;

use crate::theme::Theme;

type ContextMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

static DEFAULT_THEME: OnceLock<Arc<Theme>> = OnceLock::new();

/// The process-wide default theme.
pub fn default_theme() -> Arc<Theme> {
    DEFAULT_THEME
        .get_or_init(|| {
            debug!("building the default theme");
            Arc::new(Theme::default())
        })
        .clone()
}

/// A read-only, type-keyed scope of shared values.
#[derive(Clone, Default)]
pub struct Environment {
    values: ContextMap,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("len", &self.values.len())
            .finish()
    }
}

impl Environment {
    /// An empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a child environment that also holds `value`, shadowing any
    /// value of the same type in `self`.
    pub fn provide<T>(&self, value: impl Into<Arc<T>>) -> Self
    where
        T: Send + Sync + 'static,
    {
        let value: Arc<T> = value.into();
        Self {
            values: self.values.update(TypeId::of::<T>(), value),
        }
    }

    /// The nearest value of type `T`, if any.
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let value = self.values.get(&TypeId::of::<T>())?.clone();
        value.downcast::<T>().ok()
    }

    /// Shorthand for providing a theme.
    pub fn with_theme(&self, theme: impl Into<Arc<Theme>>) -> Self {
        self.provide::<Theme>(theme)
    }

    /// The provided theme, or the process-wide default.
    pub fn theme(&self) -> Arc<Theme> {
        self.get::<Theme>().unwrap_or_else(default_theme)
    }
}

thread_local! {
    static ENVIRONMENT_STACK: RefCell<Vec<Environment>> = RefCell::new(vec![Environment::new()]);
}

fn current_environment() -> Environment {
    ENVIRONMENT_STACK.with(|stack| stack.borrow().last().cloned().unwrap_or_default())
}

fn pop_environment() {
    ENVIRONMENT_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let popped = stack.pop();
        debug_assert!(popped.is_some(), "environment stack underflow");
        if stack.is_empty() {
            stack.push(Environment::new());
        }
    });
}

/// Runs `f` with `env` as the current scope on this thread.
pub fn scope<F, R>(env: Environment, f: F) -> R
where
    F: FnOnce() -> R,
{
    ENVIRONMENT_STACK.with(|stack| stack.borrow_mut().push(env));
    struct ScopeGuard;
    impl Drop for ScopeGuard {
        fn drop(&mut self) {
            pop_environment();
        }
    }
    let guard = ScopeGuard;
    let result = f();
    drop(guard);
    result
}

/// Provides `theme` to everything `f` calls on this thread.
///
/// ```
/// use std::sync::Arc;
///
/// use neighbor_theme::{Theme, provide_theme, use_theme};
///
/// let theme = Arc::new(Theme::default());
/// provide_theme(theme.clone(), || {
///     assert!(Arc::ptr_eq(&use_theme(None), &theme));
/// });
/// ```
pub fn provide_theme<F, R>(theme: impl Into<Arc<Theme>>, f: F) -> R
where
    F: FnOnce() -> R,
{
    scope(current_environment().with_theme(theme), f)
}

/// The nearest theme provided on this thread, else `fallback`, else the
/// process-wide default.
pub fn use_theme(fallback: Option<Arc<Theme>>) -> Arc<Theme> {
    current_environment()
        .get::<Theme>()
        .or(fallback)
        .unwrap_or_else(default_theme)
}

/// The current thread-local scope.
pub fn use_environment() -> Environment {
    current_environment()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        palette::{PaletteMode, PaletteOptionsBuilder},
        theme::{ThemeOptionsBuilder, create_theme},
    };

    fn dark_theme() -> Arc<Theme> {
        Arc::new(create_theme(
            ThemeOptionsBuilder::default()
                .palette(
                    PaletteOptionsBuilder::default()
                        .mode(PaletteMode::Dark)
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        ))
    }

    #[test]
    fn test_default_theme_is_shared() {
        assert!(Arc::ptr_eq(&default_theme(), &default_theme()));
        assert_eq!(default_theme().palette.mode, PaletteMode::Light);
    }

    #[test]
    fn test_environment_falls_back_to_default() {
        let env = Environment::new();
        assert!(Arc::ptr_eq(&env.theme(), &default_theme()));
    }

    #[test]
    fn test_child_environment_shadows_parent() {
        let parent = Environment::new().provide::<u32>(1);
        let child = parent.provide::<u32>(2).with_theme(dark_theme());
        assert_eq!(*parent.get::<u32>().unwrap(), 1);
        assert_eq!(*child.get::<u32>().unwrap(), 2);
        assert_eq!(child.theme().palette.mode, PaletteMode::Dark);
        assert_eq!(parent.theme().palette.mode, PaletteMode::Light);
        assert!(parent.get::<String>().is_none());
    }

    #[test]
    fn test_provide_theme_is_scoped() {
        let dark = dark_theme();
        provide_theme(dark.clone(), || {
            assert!(Arc::ptr_eq(&use_theme(None), &dark));
            let light = Arc::new(Theme::default());
            provide_theme(light.clone(), || {
                assert!(Arc::ptr_eq(&use_theme(None), &light));
            });
            assert!(Arc::ptr_eq(&use_theme(None), &dark));
        });
        assert_eq!(use_theme(None).palette.mode, PaletteMode::Light);
    }

    #[test]
    fn test_fallback_used_without_provider() {
        let dark = dark_theme();
        assert!(Arc::ptr_eq(&use_theme(Some(dark.clone())), &dark));
        provide_theme(Theme::default(), || {
            assert_eq!(use_theme(Some(dark.clone())).palette.mode, PaletteMode::Light);
        });
    }

    #[test]
    fn test_scope_unwinds_on_panic() {
        let dark = dark_theme();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: () = provide_theme(dark.clone(), || panic!("boom"));
        }));
        assert!(result.is_err());
        assert!(use_environment().get::<Theme>().is_none());
    }
}
