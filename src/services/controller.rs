//! Form lifecycle controller — discover, hydrate, attach, react.
//!
//! DESIGN
//! ======
//! Discovery asks the injected form source for candidates and keeps those
//! carrying the opt-in marker. Each form gets its own spawned task per
//! pass: hydrate first, then (on the form's first pass only) subscribe and
//! hand the event stream to a detached loop. Later passes re-hydrate but
//! never stack a second listener. Forms share nothing but the cache
//! partition, so hydration runs concurrently across forms with no ordering
//! guarantee between them.
//!
//! LIFECYCLE
//! =========
//! 1. Claim the form by handle identity (first pass wins the listeners)
//! 2. Hydrate: before-hydrate hook → load → apply → after-hydrate hook
//! 3. First pass only: subscribe, then loop in a detached task:
//!    - change → before-cache hook → capture → save → after-cache hook
//!    - submit → remove cached record (native submission is never blocked)
//!
//! ERROR HANDLING
//! ==============
//! Fail-closed during hydration: any failure means no listeners this pass,
//! and a first-pass claim is released so a later refresh can retry.
//! Fail-soft once attached: a failed save or delete is reported and the
//! loop keeps running; the next event retries independently. Every failure
//! funnels to the error sink; nothing is rethrown to the host.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::dom::{CACHE_MARKER_ATTR, FormEvent, FormHandle, FormSource};
use crate::hooks::{
    FormStoreError, InitOptions, STAGE_AFTER_CACHE, STAGE_AFTER_HYDRATE, STAGE_BEFORE_CACHE,
    STAGE_BEFORE_HYDRATE, run_hook,
};
use crate::record::form_cache_key;
use crate::services::cache::CacheGateway;
use crate::services::codec;

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns discovery and the per-form state machines. One instance per `init`
/// call, shared by every task it spawns.
pub struct Controller {
    source: Arc<dyn FormSource>,
    cache: CacheGateway,
    options: InitOptions,
    /// Identities of forms whose listeners are live (or being attached).
    /// Keyed by handle address, which sources keep stable across passes.
    attached: Mutex<HashSet<usize>>,
}

impl Controller {
    #[must_use]
    pub fn new(source: Arc<dyn FormSource>, cache: CacheGateway, options: InitOptions) -> Self {
        Self { source, cache, options, attached: Mutex::new(HashSet::new()) }
    }

    /// Run one discovery pass over the source: every marked form gets a
    /// spawned hydrate task, and forms seen for the first time also get
    /// their change/submit listeners. Returns the pass's task handles;
    /// each settles once its form is hydrated and (if new) attached.
    /// Callers may await them or drop them for fire-and-forget.
    pub fn attach_eligible(self: &Arc<Self>) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();
        for form in self.source.forms() {
            if !form.has_attribute(CACHE_MARKER_ATTR) {
                continue;
            }
            let first_pass = self.claim(&form);
            let controller = Arc::clone(self);
            handles.push(tokio::spawn(controller.run_form(form, first_pass)));
        }
        handles
    }

    /// One pass over one form: hydrate, then attach listeners when this
    /// pass claimed the form first.
    async fn run_form(self: Arc<Self>, form: Arc<dyn FormHandle>, first_pass: bool) {
        let key = form_cache_key(form.form_id().as_deref());

        if let Err(err) = self.hydrate(form.as_ref(), &key).await {
            // Fail closed: no listeners this pass. A first-pass claim is
            // released so a later refresh can retry the form.
            if first_pass {
                self.release(&form);
            }
            self.report(err).await;
            return;
        }

        if !first_pass {
            debug!(form_key = %key, "form re-hydrated; listeners already live");
            return;
        }

        let mut events = form.subscribe();
        debug!(form_key = %key, "form attached");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    FormEvent::Change => {
                        if let Err(err) = self.update(form.as_ref(), &key).await {
                            self.report(err).await;
                        }
                    }
                    FormEvent::Submit => {
                        if let Err(err) = self.cache.remove(&key).await {
                            self.report(FormStoreError::from(err)).await;
                        }
                    }
                }
            }
            debug!(form_key = %key, "form event stream closed");
        });
    }

    /// Restore the form from its cached record, bracketed by the hydrate
    /// hooks. An absent record hydrates nothing and succeeds.
    async fn hydrate(&self, form: &dyn FormHandle, key: &str) -> Result<(), FormStoreError> {
        run_hook(self.options.before_hydrate.as_ref(), STAGE_BEFORE_HYDRATE).await?;
        if let Some(record) = self.cache.load(key).await? {
            debug!(form_key = %key, fields = record.values.len(), "hydrating form from cache");
            codec::apply(form, &record);
        }
        run_hook(self.options.after_hydrate.as_ref(), STAGE_AFTER_HYDRATE).await?;
        Ok(())
    }

    /// Capture the form and overwrite its cached record, bracketed by the
    /// cache hooks.
    async fn update(&self, form: &dyn FormHandle, key: &str) -> Result<(), FormStoreError> {
        run_hook(self.options.before_cache.as_ref(), STAGE_BEFORE_CACHE).await?;
        let record = codec::capture(form);
        self.cache.save(key, &record).await?;
        debug!(form_key = %key, fields = record.values.len(), "form cached");
        run_hook(self.options.after_cache.as_ref(), STAGE_AFTER_CACHE).await?;
        Ok(())
    }

    /// Funnel a failure to the error sink, or log it when none was
    /// supplied. Never re-raises.
    async fn report(&self, err: FormStoreError) {
        warn!(error = %err, "form cache lifecycle failure");
        if let Some(on_error) = &self.options.on_error {
            on_error(err).await;
        }
    }

    fn claim(&self, form: &Arc<dyn FormHandle>) -> bool {
        let mut attached = self.attached.lock().unwrap_or_else(PoisonError::into_inner);
        attached.insert(handle_identity(form))
    }

    fn release(&self, form: &Arc<dyn FormHandle>) {
        let mut attached = self.attached.lock().unwrap_or_else(PoisonError::into_inner);
        attached.remove(&handle_identity(form));
    }
}

fn handle_identity(form: &Arc<dyn FormHandle>) -> usize {
    Arc::as_ptr(form).cast::<()>().addr()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
