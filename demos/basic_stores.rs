//! Content stores walkthrough.
//!
//! Run with: cargo run --example basic_stores

use contentkit::store::{ContentManager, Priority};
use contentkit::value::Value;

fn main() {
    println!("=== ContentManager ===\n");

    let mut store: ContentManager = ContentManager::with_prefix("ui");
    let title = store.add(Value::from("Welcome"), Some(Value::from("header")), None);
    let count = store.add(Value::from(3), None, None);
    let again = store.add_unique(Value::from("Welcome"), None, None);

    println!("   title key: {}", title);
    println!("   count key: {}", count);
    println!("   add_unique reused title? {}", again == title);
    println!("   partitions: {:?}", store.types());

    store.using(&title, true);
    let removed = store.remove_unusing();
    println!("   remove_unusing dropped {} entry", removed.len());
    println!("   title still present? {}", store.has_key(&title, None));
    println!();

    println!("=== Priority ===\n");

    let mut list: Priority = Priority::new();
    list.add_content(Value::from("render"), 10, None);
    list.add_content(Value::from("teardown"), 100, None);
    list.add_content(Value::from("setup"), 1, None);
    list.push(Value::from("layout"));

    for (i, value) in list.get_content_values().iter().enumerate() {
        println!("   {}. {:?}", i + 1, value);
    }
    println!("   status: {:?}", list.status());
}
