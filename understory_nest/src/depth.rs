// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth policy: pure checks deciding whether a drop would nest too deeply.
//!
//! Levels count from the root's children, which sit at level 0. A group at
//! level `n` holds children at level `n + 1`.

use crate::id::NodeId;
use crate::node::Node;
use crate::registry::Registry;

/// Level assigned to direct children of `group`.
pub(crate) fn child_level(reg: &Registry, group: NodeId) -> u32 {
    if group == reg.root() {
        0
    } else {
        reg.node(group).level + 1
    }
}

/// Deepest level reachable through `group`'s subtree.
///
/// Nested groups contribute their own level plus their own deepest value, so
/// this grows faster than the true depth of a nested subtree. An empty group
/// yields 0.
pub fn deepest_below(reg: &Registry, group: NodeId) -> u32 {
    let mut deepest = 0;
    let mut cursor = reg.node(group).head();
    while let Some(id) = cursor {
        let child = reg.node(id);
        let m = if child.is_group() {
            child.level + deepest_below(reg, id)
        } else {
            child.level
        };
        deepest = deepest.max(m);
        cursor = child.next;
    }
    deepest
}

/// Number of levels below `node` in its subtree (0 for an item or empty group).
pub(crate) fn height(reg: &Registry, node: &Node) -> u32 {
    let mut h = 0;
    let mut cursor = node.head();
    while let Some(id) = cursor {
        let child = reg.node(id);
        h = h.max(1 + height(reg, child));
        cursor = child.next;
    }
    h
}

/// The three-branch nesting rule.
///
/// - A dragged group is refused when `deepest_below(src) + 1 > max_depth`.
/// - An item dropped onto a group is refused when
///   `deepest_below(dest) > max_depth + 1`; filling an existing group one
///   level deep is allowed.
/// - Two items merging are refused when `dest.level + 1 > max_depth`, since
///   this is the only case that creates a new level.
pub fn exceeds_nesting_rule(reg: &Registry, src: NodeId, dest: NodeId, max_depth: u32) -> bool {
    let s = reg.node(src);
    let d = reg.node(dest);
    if s.is_group() {
        deepest_below(reg, src).saturating_add(1) > max_depth
    } else if d.is_group() {
        deepest_below(reg, dest) > max_depth.saturating_add(1)
    } else {
        d.level.saturating_add(1) > max_depth
    }
}

/// Deepest level any node of `src`'s subtree would occupy once dropped on `dest`.
pub fn landing_depth(reg: &Registry, src: NodeId, dest: NodeId) -> u32 {
    let d = reg.node(dest);
    let lands_at = if d.is_group() {
        child_level(reg, dest)
    } else {
        d.level.saturating_add(1)
    };
    lands_at.saturating_add(height(reg, reg.node(src)))
}

/// Returns true if dropping `src` on `dest` would exceed `max_depth`.
///
/// Combines [`exceeds_nesting_rule`] with a check of the resulting placement,
/// so a group dragged into a deep destination is refused even when its own
/// subtree is shallow.
pub fn would_exceed(reg: &Registry, src: NodeId, dest: NodeId, max_depth: u32) -> bool {
    let rule = exceeds_nesting_rule(reg, src, dest, max_depth);
    let landing = landing_depth(reg, src, dest);
    tracing::trace!(%src, %dest, rule, landing, max_depth, "depth check");
    rule || landing > max_depth
}
