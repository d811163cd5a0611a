// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted keyboard session against a headless menu.
//!
//! This example shows how a rendering layer drives `trellis_widgets`:
//! build an item snapshot per event, dispatch intents, and read the prop
//! sets back. No rendering happens; the "DOM" here is stdout.
//!
//! Run:
//! - `cargo run -p trellis_demos --example menu_session`

use trellis_roving::{NavEntry, NavSpace};
use trellis_widgets::{Action, ListNav};

fn print_items(list: &ListNav<u32>, space: &NavSpace<'_, u32>) {
    for (i, entry) in space.entries().iter().enumerate() {
        let props = list.item_props(space, i);
        let marker = match props.attr_value("tabindex") {
            Some(trellis_bind::AttrValue::Int(0)) => '>',
            _ => ' ',
        };
        let disabled = if entry.disabled { " (disabled)" } else { "" };
        println!("  {marker} {}{disabled}", entry.match_text);
    }
}

fn main() {
    let entries = [
        NavEntry::new(1_u32, "Cut"),
        NavEntry::new(2, "Copy").disabled(),
        NavEntry::new(3, "Paste"),
        NavEntry::new(4, "Properties"),
    ];
    let space = NavSpace::new(&entries);

    let mut menu = ListNav::<u32>::builder("edit-menu")
        .role("menu")
        .build()
        .expect("uncontrolled menu");

    println!("container: {:?}", menu.container_props().attrs());

    let script: [(&str, Action<u32>); 6] = [
        ("Home", Action::MoveFirst),
        ("ArrowDown (skips disabled Copy)", Action::MoveNext),
        ("ArrowDown", Action::MoveNext),
        ("ArrowDown (wraps past the end)", Action::MoveNext),
        ("type 'p'", Action::Typeahead { ch: 'p', now_ms: 100 }),
        ("type 'r' (narrows to Properties)", Action::Typeahead { ch: 'r', now_ms: 180 }),
    ];

    for (label, action) in script {
        let state = menu.dispatch(&action, &space);
        println!("\nafter {label}: active = {:?}", state.active);
        print_items(&menu, &space);
    }
}
