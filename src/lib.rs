//! Copy-on-write collections over a manually reference-counted buffer core.
//!
//! # Purpose
//! This crate exists because most clones are never written to. A [`CowVec`](cow::CowVec)
//! or [`CowStr`](cow::CowStr) clone is O(1): both handles point at the same heap block
//! and only a share count changes. The block is copied lazily, by the first handle that
//! mutates while the block is shared, and every mutating method makes that decision
//! itself so callers never have to.
//!
//! The same philosophy of paying only for what you touch shapes the other two families:
//! [`List`](linked::List) is a doubly-linked list over a circular chain whose cursor can
//! edit any position in O(1), and [`HashTable`](hash::HashTable) threads all of its
//! entries onto one such chain so that iteration never walks empty buckets.
//!
//! # Method
//! All of the containers here are written from scratch over raw allocations. None of
//! them use [`Vec`], [`String`] or [`std::collections`] internally; in fact the hash
//! table's bucket array is a [`CowVec`](cow::CowVec) and its entry chain is the list's
//! own node machinery, so the crate eats its own cooking. Unsafe code is confined to the
//! buffer and node layers, with the invariants each block relies on stated at the site.
//!
//! # Error Handling
//! Fallible operations come in pairs: a panicking method for indices the caller has
//! already checked, and a `try_` variant returning a strongly typed error. Errors are
//! plain structs (often ZSTs) implementing [`Error`](std::error::Error), grouped into
//! enums for static dispatch where a method can fail more than one way.
//!
//! # Dependencies
//! `libc` provides the page size that the buffer's growth policy rounds large
//! allocations to. `derive_more` removes some very repetitive error boilerplate, and
//! `log` reports bucket-array rebuilds so pathological hash distributions are visible.
//! That's the lot.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod cow;
pub mod hash;
pub mod linked;

pub(crate) mod util;
