//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates session rules to
//! `util` and the `authsync` crate.

pub mod home;
pub mod login;
