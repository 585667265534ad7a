//! Lifecycle hooks and initialization options.
//!
//! DESIGN
//! ======
//! Hooks are host-supplied async callbacks around the two cache-facing
//! phases (hydrate, update), plus one error sink. They take no arguments and
//! may fail; a hook failure is routed through the same funnel as a storage
//! failure. Nothing here is ever rethrown to the host: every failure ends at
//! `on_error`, or at a log line when no sink was supplied.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::services::cache::CacheError;

// =============================================================================
// STAGE CONSTANTS
// =============================================================================

/// Stage label for the hook invoked before cache-read-and-apply.
pub const STAGE_BEFORE_HYDRATE: &str = "before_hydrate";

/// Stage label for the hook invoked after cache-read-and-apply.
pub const STAGE_AFTER_HYDRATE: &str = "after_hydrate";

/// Stage label for the hook invoked before capture-and-save.
pub const STAGE_BEFORE_CACHE: &str = "before_cache";

/// Stage label for the hook invoked after capture-and-save.
pub const STAGE_AFTER_CACHE: &str = "after_cache";

// =============================================================================
// ERROR
// =============================================================================

/// Boxed error type carried by failed hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The failure value delivered to `on_error`, covering every lifecycle path.
#[derive(Debug, thiserror::Error)]
pub enum FormStoreError {
    /// The cache gateway failed: storage engine error or a record that
    /// would not encode/decode.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A lifecycle hook failed at the named stage.
    #[error("{stage} hook failed: {source}")]
    Hook {
        /// One of the `STAGE_*` labels.
        stage: &'static str,
        #[source]
        source: BoxError,
    },
}

// =============================================================================
// HOOK TYPES
// =============================================================================

/// A no-argument async lifecycle hook.
pub type LifecycleHook = Arc<dyn Fn() -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// The error sink. Receives every lifecycle failure; never re-raises.
pub type ErrorHook = Arc<dyn Fn(FormStoreError) -> BoxFuture<'static, ()> + Send + Sync>;

/// Run an optional hook, tagging any failure with its stage.
pub(crate) async fn run_hook(
    hook: Option<&LifecycleHook>,
    stage: &'static str,
) -> Result<(), FormStoreError> {
    match hook {
        Some(hook) => hook()
            .await
            .map_err(|source| FormStoreError::Hook { stage, source }),
        None => Ok(()),
    }
}

// =============================================================================
// INIT OPTIONS
// =============================================================================

/// Configuration bundle passed once at initialization and held for the
/// lifetime of the controller. Builder-style; all hooks optional.
#[derive(Clone, Default)]
pub struct InitOptions {
    pub before_hydrate: Option<LifecycleHook>,
    pub after_hydrate: Option<LifecycleHook>,
    pub before_cache: Option<LifecycleHook>,
    pub after_cache: Option<LifecycleHook>,
    pub on_error: Option<ErrorHook>,
}

impl InitOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook invoked before each form's cache-read-and-apply.
    #[must_use]
    pub fn before_hydrate<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.before_hydrate = Some(Arc::new(move || hook().boxed()));
        self
    }

    /// Hook invoked after each form's cache-read-and-apply.
    #[must_use]
    pub fn after_hydrate<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.after_hydrate = Some(Arc::new(move || hook().boxed()));
        self
    }

    /// Hook invoked before each capture-and-save.
    #[must_use]
    pub fn before_cache<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.before_cache = Some(Arc::new(move || hook().boxed()));
        self
    }

    /// Hook invoked after each capture-and-save.
    #[must_use]
    pub fn after_cache<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.after_cache = Some(Arc::new(move || hook().boxed()));
        self
    }

    /// Error sink invoked with the failure value whenever any lifecycle step
    /// fails. When absent, failures are logged and discarded.
    #[must_use]
    pub fn on_error<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(FormStoreError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_error = Some(Arc::new(move |err| hook(err).boxed()));
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "hooks_test.rs"]
mod tests;
