// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_nest --heading-base-level=0

//! Understory Nest: drag-and-drop re-nesting of a hierarchical list.
//!
//! Understory Nest is the data structure behind list UIs where an entry can be
//! dropped onto another entry to form a folder, dropped into an existing
//! folder, or dragged back out to the top level, all under a configurable
//! maximum nesting depth.
//!
//! It does not capture gestures, draw highlights, or prompt for names. A
//! gesture layer resolves a finished drop to a `(source, destination)` pair of
//! [`NodeId`]s and hands it to [`Nest::eval`]; the answer says whether the drop
//! was legal and what changed.
//!
//! ## Model
//!
//! - Items are leaves. Groups own an ordered, doubly-linked chain of children.
//! - One root group holds the visible top-level list. Its children are at
//!   level 0; each group's children sit one level below the group.
//! - Every link is an identifier resolved through the [`Registry`], which owns
//!   all nodes.
//! - A group other than the root always holds at least two children. When a
//!   move leaves a group with one child, the group is dissolved and that child
//!   takes its place.
//!
//! ## Drops
//!
//! [`Nest::eval`] returns an [`Outcome`]:
//! - [`Outcome::GroupFormed`] when dropping onto an item: both are wrapped in a
//!   new group at the destination's position, destination first.
//! - [`Outcome::ItemMoved`] when dropping onto a group: the source joins at the tail.
//! - [`Outcome::NoOp`] when the source already sits directly in the destination.
//! - [`Outcome::Rejected`] when the drop would nest too deeply, would move a
//!   group into itself, or is disabled by [`NodeFlags`]. The tree is unchanged.
//!
//! Unknown identifiers are caller errors and return [`Error`].
//!
//! ## Notifications
//!
//! Mutations queue [`Notification`]s (group created or removed, item added or
//! removed, name changed) for a rendering layer to reconcile. Drain them with
//! [`Nest::take_notifications`]; ignoring them is harmless.
//!
//! ## Bulk replacement
//!
//! [`Nest::describe`] produces a nested [`Entry`] description of the tree and
//! [`Nest::reset`] rebuilds the tree from one, keeping the identifiers given.
//!
//! ## Example
//!
//! ```rust
//! use understory_nest::{Nest, NestOptions, Outcome, Rejection};
//!
//! let mut nest = Nest::init(NestOptions::new().max_depth(1), ["a", "b", "c"]);
//! let ids: Vec<_> = nest.children(nest.root()).collect();
//!
//! let Ok(Outcome::GroupFormed { group }) = nest.eval(ids[0], ids[1]) else {
//!     unreachable!();
//! };
//!
//! // `b` already sits at level 1, so merging `c` onto it would create level 2.
//! assert_eq!(
//!     nest.eval(ids[2], ids[1]),
//!     Ok(Outcome::Rejected(Rejection::DepthExceeded { max_depth: 1 })),
//! );
//!
//! // Dragging `a` back to the top level dissolves the group.
//! nest.eval(ids[0], nest.root()).unwrap();
//! assert!(nest.get(group).is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod depth;
mod error;
mod gate;
mod id;
mod mutate;
mod node;
mod notify;
mod options;
mod registry;
mod snapshot;
mod tree;

pub use error::{Error, SnapshotFault};
pub use gate::{Outcome, Rejection};
pub use id::NodeId;
pub use node::{Node, NodeFlags, NodeKind, Tags};
pub use notify::Notification;
pub use options::{NamePrompt, NestOptions, Unnamed};
pub use registry::Registry;
pub use snapshot::Entry;
pub use tree::{Children, Nest, Row};
