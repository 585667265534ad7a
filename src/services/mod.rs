//! Core services behind the public entry point.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the snapshot codec, the typed cache gateway, and the
//! per-form lifecycle, so the public surface stays a thin init/refresh
//! shell over injected DOM and storage contracts.

pub mod cache;
pub mod codec;
pub mod controller;
