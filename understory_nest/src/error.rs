// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract violations reported by [`Nest`](crate::Nest) operations.
//!
//! Depth violations and no-op drops are not errors; they are reported as
//! [`Outcome`](crate::Outcome) values.

use thiserror::Error;

use crate::id::NodeId;

/// A caller contract violation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The id is not present in the registry. The caller and the tree have
    /// desynchronized.
    #[error("unknown node id {0}")]
    UnknownIdentifier(NodeId),
    /// The operation needs a group but was given an item.
    #[error("node {0} is not a group")]
    NotAGroup(NodeId),
    /// The root group cannot be removed.
    #[error("the root group cannot be removed")]
    RootRemoval,
    /// A description passed to [`Nest::reset`](crate::Nest::reset) was rejected.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(#[from] SnapshotFault),
    /// An internal invariant does not hold at the given node.
    #[error("invariant violated at {1}: {0}")]
    Corrupt(&'static str, NodeId),
}

/// Why a nested description was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SnapshotFault {
    /// The same id appears twice.
    #[error("id {0} appears more than once")]
    DuplicateId(NodeId),
    /// The root's id is used for an entry.
    #[error("the root id {0} cannot appear inside the description")]
    RootId(NodeId),
    /// A branch has fewer than two children.
    #[error("group {0} has fewer than two children")]
    UnderfilledGroup(NodeId),
    /// A node would sit deeper than the configured maximum.
    #[error("node {id} would sit at level {level}, deeper than {max_depth}")]
    TooDeep {
        /// Offending node.
        id: NodeId,
        /// Level it would occupy.
        level: u32,
        /// Configured maximum.
        max_depth: u32,
    },
}
