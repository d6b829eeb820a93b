// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural mutation: relinking, group formation, re-leveling, and dissolution.
//!
//! Every routine here leaves the sibling chains consistent before returning.
//! Callers in the gate decide legality; nothing here checks depth.

use alloc::string::String;
use alloc::vec;

use crate::depth::child_level;
use crate::id::NodeId;
use crate::node::{Node, NodeKind};
use crate::notify::Notification;
use crate::options::NamePrompt;
use crate::tree::Nest;

impl<P: NamePrompt> Nest<P> {
    /// Remove `id` from its sibling chain, patching its neighbours and its
    /// parent's `head`/`tail`. Returns the former parent.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<NodeId> {
        let (parent, prev, next) = {
            let n = self.registry.node(id);
            (n.parent, n.prev, n.next)
        };
        match prev {
            Some(p) => self.registry.node_mut(p).next = next,
            None => {
                if let Some(parent) = parent {
                    self.registry.node_mut(parent).set_head(next);
                }
            }
        }
        match next {
            Some(n) => self.registry.node_mut(n).prev = prev,
            None => {
                if let Some(parent) = parent {
                    self.registry.node_mut(parent).set_tail(prev);
                }
            }
        }
        let n = self.registry.node_mut(id);
        n.parent = None;
        n.prev = None;
        n.next = None;
        parent
    }

    /// Append the detached node `id` at the tail of `group`.
    pub(crate) fn append(&mut self, group: NodeId, id: NodeId) {
        let tail = self.registry.node(group).tail();
        {
            let n = self.registry.node_mut(id);
            n.parent = Some(group);
            n.prev = tail;
            n.next = None;
        }
        match tail {
            Some(t) => self.registry.node_mut(t).next = Some(id),
            None => self.registry.node_mut(group).set_head(Some(id)),
        }
        self.registry.node_mut(group).set_tail(Some(id));
    }

    /// Put the detached node `new` in the chain position held by `old`, which
    /// is left detached.
    pub(crate) fn replace(&mut self, old: NodeId, new: NodeId) {
        let (parent, prev, next) = {
            let o = self.registry.node_mut(old);
            let links = (o.parent, o.prev, o.next);
            o.parent = None;
            o.prev = None;
            o.next = None;
            links
        };
        {
            let n = self.registry.node_mut(new);
            n.parent = parent;
            n.prev = prev;
            n.next = next;
        }
        match prev {
            Some(p) => self.registry.node_mut(p).next = Some(new),
            None => {
                if let Some(parent) = parent {
                    self.registry.node_mut(parent).set_head(Some(new));
                }
            }
        }
        match next {
            Some(n) => self.registry.node_mut(n).prev = Some(new),
            None => {
                if let Some(parent) = parent {
                    self.registry.node_mut(parent).set_tail(Some(new));
                }
            }
        }
    }

    /// Increase the level of `id` and its whole subtree by one.
    pub(crate) fn level_up(&mut self, id: NodeId) {
        self.registry.node_mut(id).level += 1;
        let mut cursor = self.registry.node(id).head();
        while let Some(child) = cursor {
            self.level_up(child);
            cursor = self.registry.node(child).next;
        }
    }

    /// Place `id` at `level`, with each descendant one level below its parent.
    pub(crate) fn set_level(&mut self, id: NodeId, level: u32) {
        self.registry.node_mut(id).level = level;
        let mut cursor = self.registry.node(id).head();
        while let Some(child) = cursor {
            self.set_level(child, level + 1);
            cursor = self.registry.node(child).next;
        }
    }

    /// Form a new group from the non-group `dest` and `src`.
    ///
    /// The group takes `dest`'s position, with `dest` as head and `src` as
    /// tail, both one level deeper than `dest` was. If `src`'s former parent
    /// is left with fewer than two children it is dissolved.
    pub(crate) fn merge_into_group(&mut self, dest: NodeId, src: NodeId) -> NodeId {
        debug_assert!(
            !self.registry.node(dest).is_group(),
            "merge destination must be an item"
        );
        let old_parent = self.unlink(src);

        let group = NodeId::new_random();
        let mut node = Node::group(group, None);
        node.level = self.registry.node(dest).level;
        self.registry.insert(node);

        self.replace(dest, group);
        self.append(group, dest);
        self.append(group, src);
        self.level_up(dest);
        let level = self.registry.node(dest).level;
        self.set_level(src, level);

        tracing::debug!(%group, head = %dest, tail = %src, level, "group formed");
        self.notify(Notification::GroupCreated {
            group,
            head: dest,
            tail: src,
        });
        if let Some(name) = self.prompt.name_for(group, dest, src) {
            self.set_name(group, name);
        }

        if let Some(parent) = old_parent {
            self.settle(parent);
        }
        group
    }

    /// Append `id` to `group`, re-levelling its subtree and dissolving its
    /// former parent if that parent is left with fewer than two children.
    ///
    /// If `id` already belongs to `group` it moves to the tail.
    pub(crate) fn add_child(&mut self, group: NodeId, id: NodeId) {
        let old_parent = self.unlink(id);
        self.append(group, id);
        let level = child_level(&self.registry, group);
        self.set_level(id, level);

        tracing::debug!(item = %id, %group, level, "node moved");
        self.notify(Notification::ItemAdded { item: id, group });
        if let Some(parent) = old_parent {
            self.notify(Notification::ItemRemoved {
                item: id,
                group: parent,
            });
            if parent != group {
                self.settle(parent);
            }
        }
    }

    /// Dissolve `group` if it no longer holds two children.
    ///
    /// A group with one child is replaced in place by that child. An empty
    /// group is unlinked, and its own parent is checked in turn. The root is
    /// never dissolved.
    pub(crate) fn settle(&mut self, group: NodeId) {
        let Some(parent) = self.registry.node(group).parent else {
            return;
        };
        let head = self.registry.node(group).head();
        let tail = self.registry.node(group).tail();
        match head {
            None => {
                self.unlink(group);
                self.registry.remove(group);
                tracing::debug!(%group, %parent, "empty group removed");
                self.notify(Notification::GroupRemoved { group, parent });
                self.settle(parent);
            }
            Some(only) if head == tail => {
                let level = self.registry.node(group).level;
                self.unlink(only);
                self.replace(group, only);
                self.set_level(only, level);
                self.registry.remove(group);
                tracing::debug!(%group, survivor = %only, "group dissolved");
                self.notify(Notification::GroupRemoved { group, parent });
            }
            Some(_) => {}
        }
    }

    /// Remove the detached node `id` and its whole subtree from the registry.
    pub(crate) fn drop_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(node) = self.registry.remove(id) else {
                continue;
            };
            let mut cursor = node.head();
            while let Some(child) = cursor {
                stack.push(child);
                cursor = self.registry.node(child).next;
            }
        }
    }

    pub(crate) fn set_name(&mut self, group: NodeId, name: String) {
        let node = self.registry.node_mut(group);
        let NodeKind::Group { name: slot, .. } = &mut node.kind else {
            return;
        };
        let old_name = slot.replace(name.clone());
        tracing::debug!(%group, ?old_name, new_name = %name, "group renamed");
        self.notify(Notification::NameChanged {
            group,
            old_name,
            new_name: name,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::{Nest, NestOptions, NodeId, Notification, Outcome};
    use alloc::vec::Vec;

    fn flat(n: usize, max_depth: u32) -> (Nest, Vec<NodeId>) {
        let nest = Nest::init(
            NestOptions::new().max_depth(max_depth),
            (0..n).map(|i| alloc::format!("item-{i}")),
        );
        let ids = nest.children(nest.root()).collect();
        (nest, ids)
    }

    fn top(nest: &Nest) -> Vec<NodeId> {
        nest.children(nest.root()).collect()
    }

    #[test]
    fn merge_adjacent_dest_first() {
        let (mut nest, ids) = flat(4, 1);
        let Ok(Outcome::GroupFormed { group }) = nest.eval(ids[2], ids[1]) else {
            panic!("expected a group");
        };
        assert_eq!(top(&nest), [ids[0], group, ids[3]]);
        let members: Vec<NodeId> = nest.children(group).collect();
        assert_eq!(members, [ids[1], ids[2]]);
        nest.check_invariants().unwrap();
    }

    #[test]
    fn merge_adjacent_src_first() {
        let (mut nest, ids) = flat(4, 1);
        let Ok(Outcome::GroupFormed { group }) = nest.eval(ids[1], ids[2]) else {
            panic!("expected a group");
        };
        assert_eq!(top(&nest), [ids[0], group, ids[3]]);
        let members: Vec<NodeId> = nest.children(group).collect();
        assert_eq!(members, [ids[2], ids[1]]);
        nest.check_invariants().unwrap();
    }

    #[test]
    fn merge_non_adjacent_at_chain_ends() {
        let (mut nest, ids) = flat(4, 1);
        let Ok(Outcome::GroupFormed { group }) = nest.eval(ids[0], ids[3]) else {
            panic!("expected a group");
        };
        assert_eq!(top(&nest), [ids[1], ids[2], group]);
        let root = nest.get(nest.root()).unwrap();
        assert_eq!(root.head(), Some(ids[1]));
        assert_eq!(root.tail(), Some(group));
        nest.check_invariants().unwrap();
    }

    #[test]
    fn merge_of_only_two_children_replaces_the_parent() {
        let (mut nest, ids) = flat(3, 2);
        let Ok(Outcome::GroupFormed { group: outer }) = nest.eval(ids[0], ids[1]) else {
            panic!("expected outer group");
        };
        nest.take_notifications();

        // outer = {1, 0}; merging its two children leaves it with one child.
        let Ok(Outcome::GroupFormed { group: inner }) = nest.eval(ids[0], ids[1]) else {
            panic!("expected inner group");
        };
        assert!(nest.get(outer).is_none(), "outer should dissolve");
        assert_eq!(top(&nest), [inner, ids[2]]);
        assert_eq!(nest.level_of(inner), Some(0));
        assert_eq!(nest.level_of(ids[0]), Some(1));
        assert_eq!(nest.level_of(ids[1]), Some(1));
        assert_eq!(
            nest.take_notifications(),
            [
                Notification::GroupCreated {
                    group: inner,
                    head: ids[1],
                    tail: ids[0],
                },
                Notification::GroupRemoved {
                    group: outer,
                    parent: nest.root(),
                },
            ]
        );
        nest.check_invariants().unwrap();
    }

    #[test]
    fn moving_out_dissolves_old_group() {
        let (mut nest, ids) = flat(3, 1);
        let Ok(Outcome::GroupFormed { group }) = nest.eval(ids[0], ids[1]) else {
            panic!("expected a group");
        };
        assert_eq!(top(&nest), [group, ids[2]]);
        nest.take_notifications();

        // Drag ids[0] back out to the top level.
        let root = nest.root();
        assert_eq!(nest.eval(ids[0], root), Ok(Outcome::ItemMoved { group: root }));
        assert!(nest.get(group).is_none());
        // The survivor takes the group's slot and level.
        assert_eq!(top(&nest), [ids[1], ids[2], ids[0]]);
        assert_eq!(nest.level_of(ids[1]), Some(0));
        assert_eq!(
            nest.take_notifications(),
            [
                Notification::ItemAdded {
                    item: ids[0],
                    group: root,
                },
                Notification::ItemRemoved {
                    item: ids[0],
                    group,
                },
                Notification::GroupRemoved {
                    group,
                    parent: root,
                },
            ]
        );
        nest.check_invariants().unwrap();
    }

    #[test]
    fn dissolution_lifts_a_nested_survivor() {
        let (mut nest, ids) = flat(4, 3);
        // outer = {inner{1, 2}, 0}
        let Ok(Outcome::GroupFormed { group: outer }) = nest.eval(ids[0], ids[1]) else {
            panic!("expected outer");
        };
        let Ok(Outcome::GroupFormed { group: inner }) = nest.eval(ids[2], ids[1]) else {
            panic!("expected inner");
        };
        assert_eq!(nest.level_of(ids[2]), Some(2));

        nest.remove_node(ids[0]).unwrap();
        assert!(nest.get(outer).is_none());
        assert_eq!(top(&nest), [inner, ids[3]]);
        assert_eq!(nest.level_of(inner), Some(0));
        assert_eq!(nest.level_of(ids[1]), Some(1));
        assert_eq!(nest.level_of(ids[2]), Some(1));
        nest.check_invariants().unwrap();
    }

    #[test]
    fn remove_group_drops_subtree() {
        let (mut nest, ids) = flat(4, 1);
        let Ok(Outcome::GroupFormed { group }) = nest.eval(ids[0], ids[1]) else {
            panic!("expected a group");
        };
        let before = nest.registry().len();
        nest.remove_node(group).unwrap();
        assert_eq!(nest.registry().len(), before - 3);
        assert!(nest.get(ids[0]).is_none());
        assert_eq!(top(&nest), [ids[2], ids[3]]);
        nest.check_invariants().unwrap();
    }

    #[test]
    fn relocation_within_group_moves_to_tail() {
        let (mut nest, ids) = flat(3, 1);
        let Ok(Outcome::GroupFormed { group }) = nest.eval(ids[0], ids[1]) else {
            panic!("expected a group");
        };
        nest.eval(ids[2], group).unwrap();
        // Relocate the head to the tail directly through the mutator.
        nest.add_child(group, ids[1]);
        let members: Vec<NodeId> = nest.children(group).collect();
        assert_eq!(members, [ids[0], ids[2], ids[1]]);
        assert!(nest.get(group).is_some());
        nest.check_invariants().unwrap();
    }
}
