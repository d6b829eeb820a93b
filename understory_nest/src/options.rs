// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tree configuration and the group naming hook.

use alloc::string::String;

use crate::id::NodeId;

/// Configuration fixed for the lifetime of one [`Nest`](crate::Nest).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NestOptions {
    /// Deepest level any node may occupy. Children of the root are level 0,
    /// so the default of 1 allows one level of folders.
    pub max_depth: u32,
}

impl Default for NestOptions {
    fn default() -> Self {
        Self { max_depth: 1 }
    }
}

impl NestOptions {
    /// Default options (`max_depth = 1`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Supplies a display name for a group formed by a drop.
///
/// Called once per new group with the group's id and its two founding
/// children. Returning `None` leaves the group unnamed; a name can be given
/// later with [`Nest::rename_group`](crate::Nest::rename_group).
pub trait NamePrompt {
    /// Name for the group `group` founded by `head` and `tail`.
    fn name_for(&mut self, group: NodeId, head: NodeId, tail: NodeId) -> Option<String>;
}

/// Leaves every new group unnamed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unnamed;

impl NamePrompt for Unnamed {
    fn name_for(&mut self, _group: NodeId, _head: NodeId, _tail: NodeId) -> Option<String> {
        None
    }
}

impl<F> NamePrompt for F
where
    F: FnMut(NodeId, NodeId, NodeId) -> Option<String>,
{
    fn name_for(&mut self, group: NodeId, head: NodeId, tail: NodeId) -> Option<String> {
        self(group, head, tail)
    }
}
