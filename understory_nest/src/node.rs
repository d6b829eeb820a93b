// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public node types: items, groups, and their sibling links.

use alloc::string::String;
use smallvec::SmallVec;

use crate::id::NodeId;

bitflags::bitflags! {
    /// Per-node drag-and-drop capabilities.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node may be used as the source of a drop.
        const DRAGGABLE = 0b0000_0001;
        /// Node accepts drops (forming a group for items, joining for groups).
        const DROPPABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::DRAGGABLE | Self::DROPPABLE
    }
}

/// Presentation tags attached to a node by the rendering layer.
pub type Tags = SmallVec<[String; 2]>;

/// The two node variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf wrapping one end-user entry.
    Item,
    /// A folder owning an ordered sibling chain from `head` to `tail`.
    Group {
        /// First child.
        head: Option<NodeId>,
        /// Last child.
        tail: Option<NodeId>,
        /// Display name, if one has been given.
        name: Option<String>,
    },
}

/// One node of the nesting tree.
///
/// Links (`parent`, `prev`, `next`, and a group's `head`/`tail`) are
/// identifiers resolved through the owning [`Registry`](crate::Registry).
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) level: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) flags: NodeFlags,
    pub(crate) tags: Tags,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn item(id: NodeId) -> Self {
        Self {
            id,
            level: 0,
            parent: None,
            prev: None,
            next: None,
            flags: NodeFlags::default(),
            tags: Tags::new(),
            kind: NodeKind::Item,
        }
    }

    pub(crate) fn group(id: NodeId, name: Option<String>) -> Self {
        Self {
            kind: NodeKind::Group {
                head: None,
                tail: None,
                name,
            },
            ..Self::item(id)
        }
    }

    /// Identifier of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Nesting depth. Children of the root are at level 0.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Owning group, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Previous sibling.
    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    /// Next sibling.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Drag-and-drop capabilities.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Presentation tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns true if the node carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Item or group.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns true for groups (including the root).
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// First child of a group; `None` for items and empty groups.
    pub fn head(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Group { head, .. } => head,
            NodeKind::Item => None,
        }
    }

    /// Last child of a group; `None` for items and empty groups.
    pub fn tail(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Group { tail, .. } => tail,
            NodeKind::Item => None,
        }
    }

    /// Display name of a group.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Group { name, .. } => name.as_deref(),
            NodeKind::Item => None,
        }
    }

    pub(crate) fn set_head(&mut self, id: Option<NodeId>) {
        if let NodeKind::Group { head, .. } = &mut self.kind {
            *head = id;
        }
    }

    pub(crate) fn set_tail(&mut self, id: Option<NodeId>) {
        if let NodeKind::Group { tail, .. } = &mut self.kind {
            *tail = id;
        }
    }

    /// Drop every relational link, leaving the node free-standing.
    pub(crate) fn detach_links(&mut self) {
        self.parent = None;
        self.prev = None;
        self.next = None;
        self.set_head(None);
        self.set_tail(None);
    }
}
