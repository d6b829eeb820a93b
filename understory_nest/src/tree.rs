// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree instance: construction, accessors, direct edits, and presentation order.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::depth::child_level;
use crate::error::Error;
use crate::id::NodeId;
use crate::node::{Node, NodeFlags};
use crate::notify::Notification;
use crate::options::{NamePrompt, NestOptions, Unnamed};
use crate::registry::Registry;

/// A depth-limited nesting tree driven by resolved drag-and-drop gestures.
///
/// The type parameter `P` supplies names for groups formed by a drop. It
/// defaults to [`Unnamed`], so most callers can simply use [`Nest`].
///
/// All mutation happens through `&mut self` methods and leaves the tree
/// consistent before returning. Changes are reported as [`Notification`]s,
/// queued until drained with [`Nest::take_notifications`].
///
/// ## Example
///
/// ```rust
/// use understory_nest::{Nest, NestOptions, Outcome};
///
/// let mut nest = Nest::init(NestOptions::new().max_depth(2), ["a", "b", "c"]);
/// let ids: Vec<_> = nest.children(nest.root()).collect();
///
/// // Drop `a` on `b`: they form a group in `b`'s place.
/// let Ok(Outcome::GroupFormed { group }) = nest.eval(ids[0], ids[1]) else {
///     unreachable!();
/// };
/// assert_eq!(nest.children(group).collect::<Vec<_>>(), [ids[1], ids[0]]);
///
/// // Drop `c` on the group: it joins at the tail.
/// assert_eq!(nest.eval(ids[2], group), Ok(Outcome::ItemMoved { group }));
/// assert_eq!(nest.level_of(ids[2]), Some(1));
/// ```
pub struct Nest<P: NamePrompt = Unnamed> {
    pub(crate) registry: Registry,
    pub(crate) options: NestOptions,
    pub(crate) prompt: P,
    pending: Vec<Notification>,
}

impl<P: NamePrompt> core::fmt::Debug for Nest<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let groups = self.registry.groups(None).count();
        f.debug_struct("Nest")
            .field("root", &self.registry.root())
            .field("nodes", &self.registry.len())
            .field("groups", &groups)
            .field("options", &self.options)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl Default for Nest {
    fn default() -> Self {
        Self::new(NestOptions::default())
    }
}

impl Nest {
    /// Create an empty tree holding only the root group.
    pub fn new(options: NestOptions) -> Self {
        Self::with_prompt(options, Unnamed)
    }

    /// Create a tree whose root holds one item per leaf, in order.
    ///
    /// Each leaf becomes the item's first presentation tag.
    pub fn init<I, T>(options: NestOptions, leaves: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut nest = Self::new(options);
        nest.push_items(leaves);
        nest
    }
}

/// One row of a group's presentation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Row {
    /// Node shown on this row.
    pub id: NodeId,
    /// Its nesting level.
    pub level: u32,
    /// Whether it is a group header.
    pub is_group: bool,
}

/// Iterator over the children of a group, head to tail.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    registry: &'a Registry,
    cursor: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cursor?;
        self.cursor = self.registry.get(id).and_then(Node::next);
        Some(id)
    }
}

impl<P: NamePrompt> Nest<P> {
    /// Create an empty tree that names new groups with `prompt`.
    pub fn with_prompt(options: NestOptions, prompt: P) -> Self {
        let root = Node::group(NodeId::new_random(), None);
        tracing::debug!(root = %root.id, max_depth = options.max_depth, "nest created");
        Self {
            registry: Registry::new(root),
            options,
            prompt,
            pending: Vec::new(),
        }
    }

    /// Same as [`Nest::init`], with a naming hook.
    pub fn init_with_prompt<I, T>(options: NestOptions, prompt: P, leaves: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut nest = Self::with_prompt(options, prompt);
        nest.push_items(leaves);
        nest
    }

    fn push_items<I, T>(&mut self, leaves: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let root = self.registry.root();
        for leaf in leaves {
            let mut item = Node::item(NodeId::new_random());
            item.tags.push(leaf.into());
            let id = item.id;
            self.registry.insert(item);
            self.append(root, id);
        }
    }

    /// Options this tree was created with.
    pub fn options(&self) -> NestOptions {
        self.options
    }

    /// Identifier of the root group.
    pub fn root(&self) -> NodeId {
        self.registry.root()
    }

    /// Read-only view of every node.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.registry.get(id)
    }

    /// Parent of a node, or `None` for the root and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.registry.get(id).and_then(Node::parent)
    }

    /// Level of a node, or `None` for unknown ids.
    pub fn level_of(&self, id: NodeId) -> Option<u32> {
        self.registry.get(id).map(Node::level)
    }

    /// Children of a group, head to tail. Empty for items and unknown ids.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            registry: &self.registry,
            cursor: self.registry.get(id).and_then(Node::head),
        }
    }

    /// Deepest level reachable through `group`, as used by the depth policy.
    pub fn deepest(&self, group: NodeId) -> Result<u32, Error> {
        let node = self.lookup(group)?;
        if !node.is_group() {
            return Err(Error::NotAGroup(group));
        }
        Ok(crate::depth::deepest_below(&self.registry, group))
    }

    /// Drain queued notifications in emission order.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        core::mem::take(&mut self.pending)
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        tracing::trace!(?notification, "notify");
        self.pending.push(notification);
    }

    pub(crate) fn lookup(&self, id: NodeId) -> Result<&Node, Error> {
        self.registry.get(id).ok_or(Error::UnknownIdentifier(id))
    }

    /// Returns true if `id` is `ancestor` or lies inside its subtree.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            if cur == ancestor {
                return true;
            }
            cursor = self.parent_of(cur);
        }
        false
    }

    /// Groups `src` could be dropped into.
    ///
    /// Excludes the root, `src`'s current parent, `src` itself, and anything
    /// inside `src`. The returned groups are in an unspecified order.
    pub fn drop_targets(&self, src: NodeId) -> Result<Vec<NodeId>, Error> {
        let parent = self.lookup(src)?.parent;
        Ok(self
            .registry
            .groups(parent)
            .filter(|g| g.flags.contains(NodeFlags::DROPPABLE) && !self.is_within(g.id, src))
            .map(Node::id)
            .collect())
    }

    // --- direct edits ---

    /// Remove a node and its subtree.
    ///
    /// If the parent is left with a single child it is dissolved.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), Error> {
        let node = self.lookup(id)?;
        if id == self.registry.root() {
            return Err(Error::RootRemoval);
        }
        let was_group = node.is_group();
        let parent = self.unlink(id);
        self.drop_subtree(id);
        tracing::debug!(%id, was_group, "node removed");
        if let Some(parent) = parent {
            self.notify(if was_group {
                Notification::GroupRemoved { group: id, parent }
            } else {
                Notification::ItemRemoved { item: id, group: parent }
            });
            self.settle(parent);
        }
        Ok(())
    }

    /// Give a group a display name.
    pub fn rename_group(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), Error> {
        if !self.lookup(id)?.is_group() {
            return Err(Error::NotAGroup(id));
        }
        self.set_name(id, name.into());
        Ok(())
    }

    /// Replace a node's drag-and-drop capabilities.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) -> Result<(), Error> {
        self.lookup(id)?;
        self.registry.node_mut(id).flags = flags;
        Ok(())
    }

    /// Attach a presentation tag. Adding a tag twice has no effect.
    pub fn add_tag(&mut self, id: NodeId, tag: impl Into<String>) -> Result<(), Error> {
        let tag = tag.into();
        if self.lookup(id)?.has_tag(&tag) {
            return Ok(());
        }
        self.registry.node_mut(id).tags.push(tag);
        Ok(())
    }

    /// Detach a presentation tag; returns whether it was present.
    pub fn remove_tag(&mut self, id: NodeId, tag: &str) -> Result<bool, Error> {
        self.lookup(id)?;
        let tags = &mut self.registry.node_mut(id).tags;
        let before = tags.len();
        tags.retain(|t| t.as_str() != tag);
        Ok(tags.len() != before)
    }

    // --- presentation ---

    /// Rows of `group`'s subtree in display order: head to tail, each group
    /// followed by its own rows. Empty for items and unknown ids.
    pub fn render_order(&self, group: NodeId) -> Vec<Row> {
        let mut rows = Vec::new();
        self.collect_rows(group, &mut rows);
        rows
    }

    fn collect_rows(&self, group: NodeId, rows: &mut Vec<Row>) {
        for id in self.children(group) {
            let node = self.registry.node(id);
            rows.push(Row {
                id,
                level: node.level,
                is_group: node.is_group(),
            });
            if node.is_group() {
                self.collect_rows(id, rows);
            }
        }
    }

    /// Indented outline of `group`'s subtree, one node per line.
    pub fn dump(&self, group: NodeId) -> String {
        let mut out = String::new();
        for row in self.render_order(group) {
            let node = self.registry.node(row.id);
            for _ in 0..row.level {
                out.push_str("  ");
            }
            if row.is_group {
                out.push('[');
                out.push_str(node.name().unwrap_or("unnamed"));
                out.push_str("] ");
            } else if let Some(tag) = node.tags.first() {
                out.push_str(tag);
                out.push(' ');
            }
            out.push_str(&row.id.to_string());
            out.push('\n');
        }
        out
    }

    // --- validation ---

    /// Verify sibling links, levels, group sizes, and registry coverage.
    pub fn check_invariants(&self) -> Result<(), Error> {
        let root = self.registry.root();
        if self.lookup(root)?.parent.is_some() {
            return Err(Error::Corrupt("root has a parent", root));
        }
        let mut seen = HashSet::new();
        seen.insert(root);
        let mut stack = alloc::vec![root];
        while let Some(group) = stack.pop() {
            let g = self.registry.node(group);
            let level = child_level(&self.registry, group);
            let mut prev = None;
            let mut count = 0_usize;
            let mut cursor = g.head();
            while let Some(id) = cursor {
                if !seen.insert(id) {
                    return Err(Error::Corrupt("node reached twice", id));
                }
                let n = self.lookup(id)?;
                if n.parent != Some(group) {
                    return Err(Error::Corrupt("parent link mismatch", id));
                }
                if n.prev != prev {
                    return Err(Error::Corrupt("prev link mismatch", id));
                }
                if n.level != level {
                    return Err(Error::Corrupt("level mismatch", id));
                }
                if n.is_group() {
                    stack.push(id);
                }
                count += 1;
                prev = Some(id);
                cursor = n.next;
            }
            if g.tail() != prev {
                return Err(Error::Corrupt("tail link mismatch", group));
            }
            if group != root && count < 2 {
                return Err(Error::Corrupt("group holds fewer than two children", group));
            }
        }
        if let Some(stray) = self.registry.iter().find(|n| !seen.contains(&n.id)) {
            return Err(Error::Corrupt("node unreachable from root", stray.id));
        }
        Ok(())
    }
}
