//! Runtime support for reactive primitives.
//!
//! This module provides the dependency graph shared by signals, memos and
//! effects, and the scoping rules that decide which runtime a new
//! primitive belongs to.

mod context;

pub use context::ReactiveRuntime;
