// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A combobox session: typing, highlight movement, commit, and an
//! out-of-order asynchronous filter response that gets dropped.
//!
//! Run:
//! - `cargo run -p trellis_demos --example combobox_session`

use trellis_bind::Priority;
use trellis_roving::{NavEntry, NavSpace};
use trellis_widgets::{Action, ComboboxWidget};

fn main() {
    let entries = [
        NavEntry::new(1_u32, "Apple"),
        NavEntry::new(2, "Banana"),
        NavEntry::new(3, "Cherry"),
    ];
    let space = NavSpace::new(&entries);

    let mut combobox = ComboboxWidget::<u32>::new("fruit");
    combobox.subscribe_announcements(|text: &str, priority: Priority| {
        println!("  [announce/{priority:?}] {text}");
    });

    println!("typing \"an\":");
    let state = combobox.dispatch(&Action::SetInput("an".into()), &space);
    println!("  filtered ids = {:?}, highlighted = {:?}", state.filtered, state.highlighted);

    println!("ArrowDown:");
    let state = combobox.dispatch(&Action::MoveNext, &space);
    println!("  highlighted = {:?}", state.highlighted);
    println!("  input props = {:?}", combobox.input_props().attrs());

    println!("Enter (commit the highlighted option):");
    let enter = combobox
        .input_props()
        .action_for("keydown:Enter")
        .cloned()
        .expect("a highlight binds Enter");
    let state = combobox.dispatch(&enter, &space);
    println!("  open = {}, input = {:?}, selected = {:?}", state.open, state.input, state.selected);

    // An asynchronous filter source answering out of order: the response
    // for "a" lands after the response for "ap" and is discarded.
    println!("two overlapping queries, answered out of order:");
    combobox.dispatch(&Action::SetInput("ap".into()), &space);
    let for_a = combobox.issue_query();
    let for_ap = combobox.issue_query();

    let outcome = combobox.apply_query_results(for_ap, &[1], &space);
    println!("  \"ap\" response: {outcome:?}");
    let outcome = combobox.apply_query_results(for_a, &[1, 2], &space);
    println!("  \"a\" response:  {outcome:?}");
    println!("  filtered ids = {:?} (only \"ap\"'s result)", combobox.state().filtered);
}
