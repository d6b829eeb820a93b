// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized drag sequences: structure, depth ceiling, and reset round trips.

use proptest::prelude::*;
use understory_nest::{Nest, NestOptions, NodeId, Outcome};

/// Every node in display order, root first.
fn candidates(nest: &Nest) -> Vec<NodeId> {
    core::iter::once(nest.root())
        .chain(nest.render_order(nest.root()).into_iter().map(|r| r.id))
        .collect()
}

fn deepest_level(nest: &Nest) -> u32 {
    nest.render_order(nest.root())
        .iter()
        .map(|r| r.level)
        .max()
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn drags_preserve_invariants(
        len in 2_usize..12,
        max_depth in 1_u32..4,
        drags in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 1..40),
    ) {
        let mut nest = Nest::init(
            NestOptions::new().max_depth(max_depth),
            (0..len).map(|i| format!("item-{i}")),
        );
        for (src, dest) in drags {
            let nodes = candidates(&nest);
            let src = *src.get(&nodes);
            let dest = *dest.get(&nodes);
            let before = nest.describe();

            let outcome = nest.eval(src, dest).unwrap();
            match outcome {
                Outcome::Rejected(_) | Outcome::NoOp => {
                    prop_assert_eq!(nest.describe(), before);
                }
                Outcome::GroupFormed { group } | Outcome::ItemMoved { group } => {
                    // The group gaining children survives any dissolution.
                    prop_assert!(nest.get(group).is_some());
                }
            }
            nest.check_invariants().unwrap();
            prop_assert!(deepest_level(&nest) <= max_depth);
        }
    }

    #[test]
    fn no_op_repeats_are_stable(
        len in 3_usize..8,
        drags in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 1..20),
    ) {
        let mut nest = Nest::init(NestOptions::new().max_depth(2), (0..len).map(|i| format!("{i}")));
        for (src, dest) in drags {
            let nodes = candidates(&nest);
            let _ = nest.eval(*src.get(&nodes), *dest.get(&nodes)).unwrap();
        }
        nest.take_notifications();
        for node in candidates(&nest).into_iter().skip(1) {
            let parent = nest.parent_of(node).unwrap();
            let before = nest.describe();
            prop_assert_eq!(nest.eval(node, parent).unwrap(), Outcome::NoOp);
            prop_assert_eq!(nest.eval(node, parent).unwrap(), Outcome::NoOp);
            prop_assert_eq!(nest.describe(), before);
        }
        prop_assert!(nest.take_notifications().is_empty());
    }

    #[test]
    fn reset_of_describe_is_isomorphic(
        len in 2_usize..10,
        drags in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 1..30),
    ) {
        let mut nest = Nest::init(NestOptions::new().max_depth(3), (0..len).map(|i| format!("{i}")));
        for (src, dest) in drags {
            let nodes = candidates(&nest);
            let _ = nest.eval(*src.get(&nodes), *dest.get(&nodes)).unwrap();
        }
        let description = nest.describe();
        let rows = nest.render_order(nest.root());
        let parents: Vec<_> = rows.iter().map(|r| nest.parent_of(r.id)).collect();

        nest.reset(description.clone()).unwrap();

        prop_assert_eq!(nest.describe(), description);
        prop_assert_eq!(nest.render_order(nest.root()), rows.clone());
        let after: Vec<_> = rows.iter().map(|r| nest.parent_of(r.id)).collect();
        prop_assert_eq!(after, parents);
        nest.check_invariants().unwrap();
    }
}

#[test]
fn removing_second_to_last_child_dissolves() {
    let mut nest = Nest::init(NestOptions::new().max_depth(1), ["a", "b", "c", "d"]);
    let ids: Vec<NodeId> = nest.children(nest.root()).collect();
    // Group {b, a} lands where `b` was, so it precedes `c` and `d`.
    let Ok(Outcome::GroupFormed { group }) = nest.eval(ids[0], ids[1]) else {
        panic!("expected a group");
    };
    assert_eq!(nest.eval(ids[2], group), Ok(Outcome::ItemMoved { group }));
    nest.remove_node(ids[2]).unwrap();
    assert!(nest.get(group).is_some(), "two children remain");

    nest.remove_node(ids[1]).unwrap();
    assert!(nest.get(group).is_none(), "one child left, group dissolves");
    let top: Vec<NodeId> = nest.children(nest.root()).collect();
    assert_eq!(top, [ids[0], ids[3]]);
    assert_eq!(nest.level_of(ids[0]), Some(0));
    assert_eq!(nest.parent_of(ids[0]), Some(nest.root()));
    nest.check_invariants().unwrap();
}
