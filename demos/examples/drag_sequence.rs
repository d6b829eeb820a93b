// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replays a handful of resolved drops against a nest and prints the outline.
//!
//! This example shows how a gesture layer drives `understory_nest`:
//! - each finished drop becomes one `Nest::eval(source, destination)` call,
//! - the `Outcome` says whether the drop was legal,
//! - queued notifications tell the rendering layer what to redraw.
//!
//! Run:
//! - `RUST_LOG=understory_nest=debug cargo run -p understory_nest_demos --example drag_sequence`

use tracing_subscriber::EnvFilter;
use understory_nest::{Nest, NestOptions, NodeId, Outcome};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Name each new folder after its founding pair.
    let mut count = 0;
    let prompt = move |_group: NodeId, _head: NodeId, _tail: NodeId| {
        count += 1;
        Some(format!("Folder {count}"))
    };
    let mut nest = Nest::init_with_prompt(
        NestOptions::new().max_depth(2),
        prompt,
        ["inbox", "drafts", "notes", "receipts", "travel"],
    );
    let ids: Vec<NodeId> = nest.children(nest.root()).collect();
    let root = nest.root();

    let drops = [
        ("drafts onto inbox", ids[1], ids[0]),
        ("notes onto inbox", ids[2], ids[0]),
        ("travel onto receipts", ids[4], ids[3]),
        ("notes back to the top", ids[2], root),
        ("drafts back to the top", ids[1], root),
    ];

    for (label, src, dest) in drops {
        let outcome = match nest.eval(src, dest) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(%err, "drop out of sync with the tree");
                return;
            }
        };
        println!("\n== {label}: {outcome:?} ==");
        if let Outcome::GroupFormed { group } = outcome {
            println!("drop targets now include {group}");
        }
        for note in nest.take_notifications() {
            println!("  {note:?}");
        }
        print!("{}", nest.dump(root));
    }
}
