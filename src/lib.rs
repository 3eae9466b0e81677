#![deny(missing_docs)]

//! Ordered map backed by a red-black tree, in particular [`collections::RBTree`].
//!
//! Nodes live in an arena and refer to each other by index, so parent links need no
//! reference counting and teardown never recurses.

//!# Features
//!
//! This crate supports the following cargo features:
//! - `unsafe-optim` : Enable unsafe optimisations in release mode.
//! - `cap` : Track allocated memory in tests (instead of using mimalloc).

/// Containers.
pub mod collections;
