// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications describing structural changes for a rendering layer.

use alloc::string::String;

use crate::id::NodeId;

/// One observed change, queued by mutating operations and drained with
/// [`Nest::take_notifications`](crate::Nest::take_notifications).
///
/// Notifications are observational. Ignoring them never affects the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// A drop merged two nodes into the new group `group`.
    GroupCreated {
        /// The new group.
        group: NodeId,
        /// Its first child (the drop destination).
        head: NodeId,
        /// Its last child (the dragged node).
        tail: NodeId,
    },
    /// `group` was dissolved or removed from `parent`.
    GroupRemoved {
        /// The group that no longer exists.
        group: NodeId,
        /// The group it belonged to.
        parent: NodeId,
    },
    /// `item` was appended to `group`.
    ItemAdded {
        /// The moved node.
        item: NodeId,
        /// Its new parent.
        group: NodeId,
    },
    /// `item` left `group`.
    ItemRemoved {
        /// The moved or removed node.
        item: NodeId,
        /// Its former parent.
        group: NodeId,
    },
    /// A group's display name changed.
    NameChanged {
        /// The renamed group.
        group: NodeId,
        /// Previous name, `None` if it was unnamed.
        old_name: Option<String>,
        /// New name.
        new_name: String,
    },
}
