// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drop entry point: legality checks followed by dispatch to the mutator.

use crate::depth;
use crate::error::Error;
use crate::id::NodeId;
use crate::node::NodeFlags;
use crate::options::NamePrompt;
use crate::tree::Nest;

/// Result of evaluating a resolved drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The drop is illegal; the tree is unchanged.
    Rejected(Rejection),
    /// Nothing to do: the source already sits directly in the destination,
    /// or was dropped on itself.
    NoOp,
    /// The source and destination were merged into the new `group`.
    GroupFormed {
        /// The new group.
        group: NodeId,
    },
    /// The source was appended to the existing `group`.
    ItemMoved {
        /// The destination group.
        group: NodeId,
    },
}

/// Why a drop was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The move would nest some node deeper than `max_depth`.
    DepthExceeded {
        /// The configured maximum.
        max_depth: u32,
    },
    /// The destination lies inside the dragged group.
    IntoOwnSubtree,
    /// The root cannot be dragged.
    RootImmovable,
    /// The source lacks [`NodeFlags::DRAGGABLE`].
    NotDraggable,
    /// The destination lacks [`NodeFlags::DROPPABLE`].
    NotDroppable,
}

impl<P: NamePrompt> Nest<P> {
    /// Evaluate the drop of `src` onto `dest`.
    ///
    /// Dropping onto a group appends to it; dropping onto an item forms a new
    /// group. Unknown ids are a caller error; every other refusal is reported
    /// as [`Outcome::Rejected`] with the tree left untouched.
    pub fn eval(&mut self, src: NodeId, dest: NodeId) -> Result<Outcome, Error> {
        let src_parent = self.lookup(src)?.parent;
        let dest_is_group = self.lookup(dest)?.is_group();
        if src == dest || src_parent == Some(dest) {
            tracing::trace!(%src, %dest, "no-op drop");
            return Ok(Outcome::NoOp);
        }
        if let Some(reason) = self.rejection(src, dest) {
            tracing::debug!(%src, %dest, ?reason, "drop rejected");
            return Ok(Outcome::Rejected(reason));
        }
        if dest_is_group {
            self.add_child(dest, src);
            Ok(Outcome::ItemMoved { group: dest })
        } else {
            let group = self.merge_into_group(dest, src);
            Ok(Outcome::GroupFormed { group })
        }
    }

    /// Move `item` into `group` without a gesture.
    ///
    /// Applies the same checks as [`Nest::eval`] but requires `group` to be a
    /// group, so it never forms a new one.
    pub fn add_existing(&mut self, group: NodeId, item: NodeId) -> Result<Outcome, Error> {
        self.lookup(item)?;
        if !self.lookup(group)?.is_group() {
            return Err(Error::NotAGroup(group));
        }
        self.eval(item, group)
    }

    fn rejection(&self, src: NodeId, dest: NodeId) -> Option<Rejection> {
        if src == self.root() {
            return Some(Rejection::RootImmovable);
        }
        if !self.registry.node(src).flags.contains(NodeFlags::DRAGGABLE) {
            return Some(Rejection::NotDraggable);
        }
        if !self.registry.node(dest).flags.contains(NodeFlags::DROPPABLE) {
            return Some(Rejection::NotDroppable);
        }
        if self.is_within(dest, src) {
            return Some(Rejection::IntoOwnSubtree);
        }
        let max_depth = self.options.max_depth;
        if depth::would_exceed(&self.registry, src, dest, max_depth) {
            return Some(Rejection::DepthExceeded { max_depth });
        }
        None
    }
}
