//! `formstore` — auto-persistence for in-progress form input.
//!
//! ARCHITECTURE
//! ============
//! Forms opt in with the `data-cache` marker attribute. [`init`] discovers
//! them through an injected [`FormSource`], restores each one from a cached
//! record (hydration), then keeps cache and form state consistent: every
//! change event overwrites the record, every submit deletes it. Records live
//! in an external key-value engine behind [`KeyValueBackend`], scoped to the
//! fixed `fs-db` / `formstore` partition and keyed `form#<id>`.
//!
//! ERROR HANDLING
//! ==============
//! Fail-soft by policy: a caching failure must never break the user's
//! ability to fill out and submit a form. Every failure funnels to the
//! optional `on_error` hook (or a log line) and nothing is ever rethrown to
//! the host.

mod dom;
mod hooks;
mod record;
mod services;
mod store;

pub use dom::*;
pub use hooks::*;
pub use record::*;
pub use store::*;

pub use services::cache::{CacheError, CacheGateway};
pub use services::codec;

use std::sync::Arc;

use tracing::debug;

use services::controller::Controller;

// =============================================================================
// INSTANCE HANDLE
// =============================================================================

/// Handle returned by [`init`]. Exposes exactly one operation: re-running
/// discovery for dynamically inserted forms.
pub struct FormStore {
    controller: Arc<Controller>,
}

impl FormStore {
    /// Re-run the discover-and-attach pass over the form source.
    ///
    /// Already-attached forms are skipped, so calling this repeatedly never
    /// stacks duplicate listeners. Fire-and-forget: attachment proceeds in
    /// background tasks and this call does not wait for any pass to settle.
    pub fn refresh(&self) {
        let handles = self.controller.attach_eligible();
        debug!(spawned = handles.len(), "refresh pass started");
    }
}

// =============================================================================
// INIT
// =============================================================================

/// Attach form caching to the host's forms.
///
/// Returns synchronously; per-form hydration and listener attachment run
/// concurrently in background tasks, one per discovered form. A form that
/// fails during hydration receives no listeners for that pass.
///
/// # Panics
///
/// Must be called within a Tokio runtime; spawning the attach tasks panics
/// outside one.
pub fn init(
    backend: &dyn KeyValueBackend,
    source: Arc<dyn FormSource>,
    options: InitOptions,
) -> FormStore {
    let cache = CacheGateway::open(backend);
    let controller = Arc::new(Controller::new(source, cache, options));
    let handles = controller.attach_eligible();
    debug!(forms = handles.len(), "formstore initialized");
    FormStore { controller }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
