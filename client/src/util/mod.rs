//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page logic so the
//! session rules stay testable without a browser.

pub mod auth;
#[cfg(feature = "hydrate")]
pub mod browser;
pub mod config;
pub mod session_sync;
