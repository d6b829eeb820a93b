// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identifiers.

use core::fmt;

use uuid::Uuid;

/// Opaque identifier of an item or group in a [`Nest`](crate::Nest).
///
/// Identifiers are 128-bit random values. They are never reused by the tree
/// that minted them and are safe to hand out to a rendering layer (for
/// example as an attribute on a visual element).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Mint a fresh random identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier known to the caller, for example one carried by an
    /// externally edited [`Entry`](crate::Entry) description.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Build an identifier from its raw 128-bit value.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// The underlying uuid.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The raw 128-bit value.
    pub const fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
