// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested descriptions of a whole tree, for bulk replacement.

use alloc::{string::String, vec::Vec};
use hashbrown::HashSet;

use crate::error::{Error, SnapshotFault};
use crate::id::NodeId;
use crate::node::{Node, NodeKind};
use crate::options::NamePrompt;
use crate::tree::Nest;

/// One entry of a nested description, as produced by [`Nest::describe`] and
/// accepted by [`Nest::reset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// An item.
    Leaf(NodeId),
    /// A group and its children, in order.
    Branch {
        /// Group id, kept as given.
        id: NodeId,
        /// Display name.
        name: Option<String>,
        /// Children, head first.
        children: Vec<Self>,
    },
}

impl Entry {
    /// Identifier of the node this entry describes.
    pub fn id(&self) -> NodeId {
        match self {
            Self::Leaf(id) | Self::Branch { id, .. } => *id,
        }
    }
}

fn validate(
    entries: &[Entry],
    level: u32,
    root: NodeId,
    max_depth: u32,
    seen: &mut HashSet<NodeId>,
) -> Result<(), SnapshotFault> {
    for entry in entries {
        let id = entry.id();
        if id == root {
            return Err(SnapshotFault::RootId(id));
        }
        if !seen.insert(id) {
            return Err(SnapshotFault::DuplicateId(id));
        }
        if level > max_depth {
            return Err(SnapshotFault::TooDeep {
                id,
                level,
                max_depth,
            });
        }
        if let Entry::Branch { children, .. } = entry {
            if children.len() < 2 {
                return Err(SnapshotFault::UnderfilledGroup(id));
            }
            validate(children, level + 1, root, max_depth, seen)?;
        }
    }
    Ok(())
}

impl<P: NamePrompt> Nest<P> {
    /// Describe the current structure below the root.
    pub fn describe(&self) -> Vec<Entry> {
        self.describe_children(self.root())
    }

    fn describe_children(&self, group: NodeId) -> Vec<Entry> {
        self.children(group)
            .map(|id| match &self.registry.node(id).kind {
                NodeKind::Item => Entry::Leaf(id),
                NodeKind::Group { name, .. } => Entry::Branch {
                    id,
                    name: name.clone(),
                    children: self.describe_children(id),
                },
            })
            .collect()
    }

    /// Replace the whole structure with `entries`.
    ///
    /// The description is checked before anything changes; a malformed one
    /// leaves the tree as it was. Existing items named by a leaf are reused
    /// with their tags and flags; unknown leaf ids become fresh items. Items
    /// the description does not mention are dropped, and every previous
    /// group record is discarded. The root keeps its id.
    pub fn reset(&mut self, entries: Vec<Entry>) -> Result<(), Error> {
        let mut seen = HashSet::new();
        validate(
            &entries,
            0,
            self.root(),
            self.options.max_depth,
            &mut seen,
        )?;

        self.registry.clear();
        let root = self.root();
        for entry in entries {
            let id = self.build(entry, 0);
            self.append(root, id);
        }

        let stale: Vec<NodeId> = self
            .registry
            .iter()
            .map(Node::id)
            .filter(|id| *id != root && !seen.contains(id))
            .collect();
        for id in &stale {
            self.registry.remove(*id);
        }
        tracing::debug!(nodes = self.registry.len(), dropped = stale.len(), "tree reset");
        Ok(())
    }

    fn build(&mut self, entry: Entry, level: u32) -> NodeId {
        match entry {
            Entry::Leaf(id) => {
                if !self.registry.contains(id) {
                    self.registry.insert(Node::item(id));
                }
                self.registry.node_mut(id).level = level;
                id
            }
            Entry::Branch { id, name, children } => {
                let mut group = Node::group(id, name);
                group.level = level;
                self.registry.insert(group);
                for child in children {
                    let child_id = self.build(child, level + 1);
                    self.append(id, child_id);
                }
                id
            }
        }
    }
}
