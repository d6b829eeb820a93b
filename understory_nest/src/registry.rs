// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifier-indexed store owning every node of one tree.

use hashbrown::HashMap;

use crate::id::NodeId;
use crate::node::{Node, NodeKind};

/// Owning table of nodes keyed by [`NodeId`].
///
/// The registry is the single source of truth for node data: every sibling,
/// parent, and child link is an identifier looked up here. Its read surface
/// is public; writes happen only through [`Nest`](crate::Nest) operations.
#[derive(Clone, Debug)]
pub struct Registry {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
}

impl Registry {
    pub(crate) fn new(root: Node) -> Self {
        let id = root.id;
        let mut nodes = HashMap::new();
        nodes.insert(id, root);
        Self { nodes, root: id }
    }

    /// Identifier of the root group.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns true if `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is always present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all live nodes in an unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Iterate every group except the root, optionally skipping `exclude`.
    ///
    /// The returned groups are in an unspecified order.
    pub fn groups(&self, exclude: Option<NodeId>) -> impl Iterator<Item = &Node> + '_ {
        let root = self.root;
        self.nodes
            .values()
            .filter(move |n| n.is_group() && n.id != root && Some(n.id) != exclude)
    }

    /// Iterate nodes carrying the presentation tag `tag`, in an unspecified order.
    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.values().filter(move |n| n.has_tag(tag))
    }

    // --- crate-private writes ---

    /// Access a node; panics if `id` is dangling.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(&id).expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is dangling.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes.get_mut(&id).expect("dangling NodeId")
    }

    pub(crate) fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    /// Detach every node, reset item levels to zero, and discard every group
    /// record other than the root, which is left empty.
    pub(crate) fn clear(&mut self) {
        let root = self.root;
        self.nodes
            .retain(|id, n| *id == root || matches!(n.kind, NodeKind::Item));
        for node in self.nodes.values_mut() {
            node.detach_links();
            node.level = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn registry_with(nodes: &[Node]) -> Registry {
        let mut reg = Registry::new(Node::group(NodeId::from_u128(1), None));
        for n in nodes {
            reg.insert(n.clone());
        }
        reg
    }

    #[test]
    fn groups_skip_root_and_excluded() {
        let g1 = Node::group(NodeId::from_u128(10), None);
        let g2 = Node::group(NodeId::from_u128(11), None);
        let item = Node::item(NodeId::from_u128(12));
        let reg = registry_with(&[g1, g2, item]);

        let mut all: Vec<NodeId> = reg.groups(None).map(Node::id).collect();
        all.sort();
        assert_eq!(all, [NodeId::from_u128(10), NodeId::from_u128(11)]);

        let rest: Vec<NodeId> = reg
            .groups(Some(NodeId::from_u128(10)))
            .map(Node::id)
            .collect();
        assert_eq!(rest, [NodeId::from_u128(11)]);
    }

    #[test]
    fn by_tag_matches_exact_tags() {
        let mut a = Node::item(NodeId::from_u128(2));
        a.tags.push("todo".into());
        let mut b = Node::item(NodeId::from_u128(3));
        b.tags.push("todo-later".into());
        let reg = registry_with(&[a, b]);

        let hits: Vec<NodeId> = reg.by_tag("todo").map(Node::id).collect();
        assert_eq!(hits, [NodeId::from_u128(2)]);
    }

    #[test]
    fn clear_keeps_items_and_root() {
        let mut item = Node::item(NodeId::from_u128(2));
        item.level = 3;
        item.parent = Some(NodeId::from_u128(10));
        item.next = Some(NodeId::from_u128(4));
        let group = Node::group(NodeId::from_u128(10), None);
        let mut reg = registry_with(&[item, group]);
        reg.node_mut(NodeId::from_u128(1))
            .set_head(Some(NodeId::from_u128(10)));

        reg.clear();

        assert_eq!(reg.len(), 2, "only the root and the item remain");
        let item = reg.get(NodeId::from_u128(2)).unwrap();
        assert_eq!(item.level(), 0);
        assert_eq!(item.parent(), None);
        assert_eq!(item.next(), None);
        assert_eq!(reg.get(NodeId::from_u128(1)).unwrap().head(), None);
        assert!(!reg.contains(NodeId::from_u128(10)));
    }
}
