//! Example that renders a small object and walks what is visible
//!
//! Usage:
//!   cargo run --example sample_object [FILE]
//!
//! Without a file a built-in sample object is used.

use std::env;
use value_tree::prelude::*;

fn main() {
    let args: Vec<String> = env::args().collect();
    let value = if args.len() > 1 {
        match load(&args[1]) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("Error loading {}: {}", args[1], e);
                std::process::exit(1);
            }
        }
    } else {
        sample()
    };

    let options = RenderOptions::new().start_expanded(true);
    let mut tree = match ValueTree::new(value, options) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Error building tree: {}", e);
            std::process::exit(1);
        }
    };

    println!("Nodes after first render: {}", tree.node_count());

    // Open everything two levels deep
    if let Err(e) = tree.expand_all(Some(1)) {
        eprintln!("Error expanding tree: {}", e);
        std::process::exit(1);
    }

    println!("Nodes after expanding: {}", tree.node_count());
    println!("Values classified: {}", tree.classifications());
    println!();

    for (id, depth) in tree.visible() {
        let node = tree.get(id).unwrap();
        let indent = "  ".repeat(depth);

        let icon = match node.state() {
            NodeState::ExpandedContainer => "▾",
            NodeState::CollapsedContainer => "▸",
            NodeState::Leaf => "•",
        };

        match node.display() {
            Some(text) => println!("{}{} {}: {}", indent, icon, node.label(), text),
            None => println!(
                "{}{} {} ({} items)",
                indent,
                icon,
                node.label(),
                node.value().member_count()
            ),
        }
    }

    println!();
    println!("Leaves: {}", tree.leaves().len());
    println!("Containers: {}", tree.containers().len());
}

fn load(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&text)?;
    Ok(Value::from(json))
}

fn sample() -> Value {
    Value::from(serde_json::json!({
        "test": "hello",
        "array": [1, 1, 2, 3, 5, 8],
        "subObj": {
            "subTest": "hi",
            "subArray": [2, 1, 3, 4, 7, 11]
        },
        "withDate": 1505296820331u64,
        "emptyVal": ""
    }))
}
