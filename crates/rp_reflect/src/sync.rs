//! Locks used by the class info cells and the shared registry.
//!
//! The crate is otherwise written against `core` and `alloc`; these are the
//! only items taken from `std`, so a `no_std` port only has to swap this module.

pub(crate) use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
